use std::collections::HashSet;

use rand::Rng;

use super::{
    config::GameConfig,
    direction::Direction,
    error::ConfigError,
    grid::{Cell, Snake},
    world::{Phase, World},
};

/// What the snake ran into, if it ran into anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// The head left the grid.
    Wall,
    /// The head landed on a body segment that was not about to vacate.
    Body,
}

/// Result of one simulation step on a running world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved one cell; `ate_food` reports whether it grew.
    Advanced { ate_food: bool },
    /// The snake hit a wall or itself; the world is frozen in GameOver.
    Collided(Collision),
}

/// Owns the configuration and the food RNG; builds and advances worlds.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Builds a fresh world: a straight snake at the grid centre facing
    /// right, score 0, phase Idle, food on a uniformly random free cell.
    ///
    /// Fails when the grid cannot host the snake plus at least one food cell.
    pub fn reset(&mut self) -> Result<World, ConfigError> {
        self.config.validate()?;

        let head = Cell::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        let snake = Snake::line(head, Direction::Right, self.config.initial_snake_length);
        let food = self.sample_food(self.config.grid_width, self.config.grid_height, &snake)?;

        Ok(World::new(
            self.config.grid_width,
            self.config.grid_height,
            snake,
            Direction::Right,
            food,
        ))
    }

    /// Advances a running world by one step; `Ok(None)` in any other phase.
    ///
    /// The pending direction, if any, commits first. A collision freezes the
    /// world in GameOver and leaves snake and score untouched. Eating grows
    /// the snake, bumps the score by one and resamples food; a grid with no
    /// free cell left is reported as [`ConfigError::NoFreeCell`].
    pub fn tick(&mut self, world: &mut World) -> Result<Option<TickOutcome>, ConfigError> {
        if world.phase != Phase::Running {
            return Ok(None);
        }

        // A buffered direction was already validated against the direction
        // that was current when it was buffered, and the current direction
        // only changes here, so the commit is unconditional.
        if let Some(dir) = world.pending.take() {
            world.direction = dir;
        }

        let new_head = world.snake.head().step(world.direction);

        if !world.contains(new_head) {
            world.phase = Phase::GameOver;
            return Ok(Some(TickOutcome::Collided(Collision::Wall)));
        }
        if world.snake.occupies_excluding_tail(new_head) {
            world.phase = Phase::GameOver;
            return Ok(Some(TickOutcome::Collided(Collision::Body)));
        }

        let ate_food = new_head == world.food;
        world.snake.advance(new_head, ate_food);

        if ate_food {
            world.score += 1;
            world.food = self.sample_food(world.width, world.height, &world.snake)?;
        }

        Ok(Some(TickOutcome::Advanced { ate_food }))
    }

    /// Picks a food cell uniformly from the cells the snake does not cover.
    ///
    /// Occupancy is derived from the body sequence on every call rather than
    /// kept as a second copy of the truth.
    fn sample_food(
        &mut self,
        width: usize,
        height: usize,
        snake: &Snake,
    ) -> Result<Cell, ConfigError> {
        let occupied: HashSet<Cell> = snake.cells().collect();
        let free: Vec<Cell> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Cell::new(x, y)))
            .filter(|cell| !occupied.contains(cell))
            .collect();

        if free.is_empty() {
            return Err(ConfigError::NoFreeCell { width, height });
        }
        Ok(free[self.rng.gen_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig::small())
    }

    fn assert_world_invariants(world: &World) {
        let cells: Vec<Cell> = world.snake().cells().collect();
        for cell in &cells {
            assert!(world.contains(*cell), "{cell:?} is outside the grid");
        }
        for pair in cells.windows(2) {
            let dist = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            assert_eq!(dist, 1, "{:?} and {:?} are not adjacent", pair[0], pair[1]);
        }
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                assert_ne!(a, b, "body cell repeated");
            }
        }
        assert!(
            !world.snake().occupies(world.food()),
            "food {:?} is on the snake",
            world.food()
        );
    }

    #[test]
    fn reset_builds_a_canonical_idle_world() {
        let mut engine = engine();
        let world = engine.reset().unwrap();

        assert_eq!(world.phase(), Phase::Idle);
        assert_eq!(world.score(), 0);
        assert_eq!(world.snake().len(), 3);
        assert_eq!(world.snake().head(), Cell::new(5, 5));
        assert_eq!(world.direction(), Direction::Right);
        assert_world_invariants(&world);
    }

    #[test]
    fn reset_rejects_a_degenerate_grid() {
        let mut config = GameConfig::new(3, 1);
        config.initial_snake_length = 3;
        let mut engine = GameEngine::new(config);
        assert!(matches!(
            engine.reset(),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn restart_is_a_fresh_boot() {
        let mut engine = engine();
        let mut first = engine.reset().unwrap();
        first.start();
        engine.tick(&mut first).unwrap();
        first.score = 42;

        let second = engine.reset().unwrap();
        assert_eq!(second.phase(), Phase::Idle);
        assert_eq!(second.score(), 0);
        assert_eq!(
            second.snake().cells().collect::<Vec<_>>(),
            vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]
        );
        assert_world_invariants(&second);
    }

    #[test]
    fn tick_is_a_no_op_unless_running() {
        let mut engine = engine();
        let mut world = engine.reset().unwrap();
        let before = world.snake().cells().collect::<Vec<_>>();

        assert_eq!(engine.tick(&mut world).unwrap(), None);
        assert_eq!(world.snake().cells().collect::<Vec<_>>(), before);
        assert_eq!(world.phase(), Phase::Idle);

        world.phase = Phase::GameOver;
        assert_eq!(engine.tick(&mut world).unwrap(), None);
    }

    #[test]
    fn steady_tick_moves_without_growing() {
        let mut engine = engine();
        let snake = Snake::line(Cell::new(5, 5), Direction::Right, 3);
        let mut world = World::fixture(10, 10, snake, Direction::Right, Cell::new(8, 8));

        let outcome = engine.tick(&mut world).unwrap();
        assert_eq!(outcome, Some(TickOutcome::Advanced { ate_food: false }));
        assert_eq!(world.snake().len(), 3);
        assert_eq!(world.snake().head(), Cell::new(6, 5));
        assert_eq!(world.score(), 0);
        assert_world_invariants(&world);
    }

    #[test]
    fn eating_grows_and_rescores_and_resamples() {
        // Grid 10x10, snake [(5,5),(5,6),(5,7)] moving up, food at (5,4).
        let mut engine = engine();
        let snake = Snake::from_cells([Cell::new(5, 5), Cell::new(5, 6), Cell::new(5, 7)]);
        let mut world = World::fixture(10, 10, snake, Direction::Up, Cell::new(5, 4));

        let outcome = engine.tick(&mut world).unwrap();
        assert_eq!(outcome, Some(TickOutcome::Advanced { ate_food: true }));
        assert_eq!(world.score(), 1);
        assert_eq!(
            world.snake().cells().collect::<Vec<_>>(),
            vec![
                Cell::new(5, 4),
                Cell::new(5, 5),
                Cell::new(5, 6),
                Cell::new(5, 7),
            ]
        );
        assert_ne!(world.food(), Cell::new(5, 4));
        assert_world_invariants(&world);
    }

    #[test]
    fn score_only_changes_when_food_is_eaten() {
        let mut engine = engine();
        let snake = Snake::line(Cell::new(2, 5), Direction::Right, 3);
        let mut world = World::fixture(10, 10, snake, Direction::Right, Cell::new(5, 5));

        engine.tick(&mut world).unwrap();
        engine.tick(&mut world).unwrap();
        assert_eq!(world.score(), 0);

        let outcome = engine.tick(&mut world).unwrap();
        assert_eq!(outcome, Some(TickOutcome::Advanced { ate_food: true }));
        assert_eq!(world.score(), 1);
    }

    #[test]
    fn wall_collision_freezes_the_world() {
        // Grid 5x5, snake [(0,0),(0,1),(0,2)] moving up: (0,-1) is out.
        let mut engine = engine();
        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]);
        let mut world = World::fixture(5, 5, snake, Direction::Up, Cell::new(3, 3));
        let before = world.snake().cells().collect::<Vec<_>>();

        let outcome = engine.tick(&mut world).unwrap();
        assert_eq!(outcome, Some(TickOutcome::Collided(Collision::Wall)));
        assert_eq!(world.phase(), Phase::GameOver);
        assert_eq!(world.snake().cells().collect::<Vec<_>>(), before);
        assert_eq!(world.score(), 0);
    }

    #[test]
    fn body_collision_freezes_the_world() {
        // Head at (5,5) with the body hooked around so that turning up runs
        // into (5,4), which is not the tail.
        let mut engine = engine();
        let snake = Snake::from_cells([
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 4),
            Cell::new(5, 4),
            Cell::new(4, 4),
        ]);
        let mut world = World::fixture(10, 10, snake, Direction::Left, Cell::new(8, 8));
        world.buffer_direction(Direction::Up);
        let before = world.snake().cells().collect::<Vec<_>>();

        let outcome = engine.tick(&mut world).unwrap();
        assert_eq!(outcome, Some(TickOutcome::Collided(Collision::Body)));
        assert_eq!(world.phase(), Phase::GameOver);
        assert_eq!(world.snake().cells().collect::<Vec<_>>(), before);
        assert_eq!(world.score(), 0);
    }

    #[test]
    fn stepping_onto_the_vacating_tail_is_legal() {
        // A closed ring chasing its own tail: the head may enter the cell
        // the tail leaves on the same tick.
        let mut engine = engine();
        let snake = Snake::from_cells([
            Cell::new(1, 1),
            Cell::new(2, 1),
            Cell::new(2, 2),
            Cell::new(1, 2),
        ]);
        let mut world = World::fixture(3, 3, snake, Direction::Down, Cell::new(0, 0));

        let outcome = engine.tick(&mut world).unwrap();
        assert_eq!(outcome, Some(TickOutcome::Advanced { ate_food: false }));
        assert_eq!(world.snake().head(), Cell::new(1, 2));
        assert_eq!(world.snake().len(), 4);
        assert_world_invariants(&world);
    }

    #[test]
    fn reversing_input_never_turns_the_snake() {
        let mut engine = engine();
        let snake = Snake::line(Cell::new(5, 5), Direction::Right, 3);
        let mut world = World::fixture(10, 10, snake, Direction::Right, Cell::new(8, 8));

        world.buffer_direction(Direction::Left);
        engine.tick(&mut world).unwrap();

        assert_eq!(world.direction(), Direction::Right);
        assert_eq!(world.snake().head(), Cell::new(6, 5));
    }

    #[test]
    fn buffered_turn_commits_on_the_next_tick() {
        let mut engine = engine();
        let snake = Snake::line(Cell::new(5, 5), Direction::Right, 3);
        let mut world = World::fixture(10, 10, snake, Direction::Right, Cell::new(8, 8));

        world.buffer_direction(Direction::Up);
        engine.tick(&mut world).unwrap();

        assert_eq!(world.direction(), Direction::Up);
        assert_eq!(world.snake().head(), Cell::new(5, 4));
        assert_world_invariants(&world);
    }

    #[test]
    fn filling_the_grid_reports_no_free_cell() {
        // 2x2 grid, three-cell snake, food on the last free cell: eating it
        // leaves nowhere to put the next one.
        let mut engine = engine();
        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]);
        let mut world = World::fixture(2, 2, snake, Direction::Down, Cell::new(0, 1));

        assert_eq!(
            engine.tick(&mut world),
            Err(ConfigError::NoFreeCell {
                width: 2,
                height: 2,
            })
        );
    }

    #[test]
    fn invariants_survive_a_wandering_snake() {
        let mut engine = engine();
        let snake = Snake::line(Cell::new(5, 5), Direction::Right, 3);
        let mut world = World::fixture(10, 10, snake, Direction::Right, Cell::new(9, 9));

        for dir in [
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ] {
            world.buffer_direction(dir);
            let outcome = engine.tick(&mut world).unwrap();
            assert!(matches!(outcome, Some(TickOutcome::Advanced { .. })));
            assert_world_invariants(&world);
        }
    }
}
