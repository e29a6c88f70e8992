use super::direction::Direction;
use super::grid::{Cell, Snake};

/// Coarse lifecycle state of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first input; nothing moves.
    Idle,
    /// The simulation is ticking.
    Running,
    /// Terminal: the world is frozen, only a restart is meaningful.
    GameOver,
}

/// The complete simulation state for one game session.
///
/// Built by [`GameEngine::reset`](super::engine::GameEngine::reset), mutated
/// only by the tick update and the intent handlers below, and read by the
/// renderer through [`World::snapshot`]. Replaced wholesale on restart,
/// never repaired in place.
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) snake: Snake,
    pub(crate) direction: Direction,
    pub(crate) pending: Option<Direction>,
    pub(crate) food: Cell,
    pub(crate) score: u32,
    pub(crate) phase: Phase,
}

impl World {
    pub(crate) fn new(
        width: usize,
        height: usize,
        snake: Snake,
        direction: Direction,
        food: Cell,
    ) -> Self {
        Self {
            width,
            height,
            snake,
            direction,
            pending: None,
            food,
            score: 0,
            phase: Phase::Idle,
        }
    }

    /// A running world with a hand-placed snake and food, for tests that need
    /// exact layouts.
    #[cfg(test)]
    pub(crate) fn fixture(
        width: usize,
        height: usize,
        snake: Snake,
        direction: Direction,
        food: Cell,
    ) -> Self {
        let mut world = Self::new(width, height, snake, direction, food);
        world.phase = Phase::Running;
        world
    }

    /// Starts the game from [`Phase::Idle`]; a no-op in any other phase.
    ///
    /// The first input of a session only starts it: a directional key is not
    /// applied as a turn, and movement begins in the spawn direction.
    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
        }
    }

    /// Buffers `dir` as the direction to commit on the next tick.
    ///
    /// The latest buffered direction wins; buffering the same direction twice
    /// has no extra effect. A direction that exactly reverses the current one
    /// is dropped so the snake can never fold back onto its own neck, and all
    /// input is dropped once the game is over.
    pub fn buffer_direction(&mut self, dir: Direction) {
        if self.phase == Phase::GameOver || dir.reverses(self.direction) {
            return;
        }
        self.pending = Some(dir);
    }

    /// Whether `cell` lies inside the grid bounds.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x < self.width as i32
            && cell.y >= 0
            && cell.y < self.height as i32
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only view of the world, consumed once per render frame.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { world: self }
    }
}

/// Immutable view of a [`World`] for the renderer: grid dimensions, ordered
/// snake cells, food, score and phase. Holding one cannot mutate the world.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    world: &'a World,
}

impl<'a> Snapshot<'a> {
    pub fn width(&self) -> usize {
        self.world.width
    }

    pub fn height(&self) -> usize {
        self.world.height
    }

    /// Snake cells in body order, head first.
    pub fn snake(&self) -> impl Iterator<Item = Cell> + 'a {
        self.world.snake.cells()
    }

    pub fn head(&self) -> Cell {
        self.world.snake.head()
    }

    pub fn food(&self) -> Cell {
        self.world.food
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    pub fn phase(&self) -> Phase {
        self.world.phase
    }
}
