use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine, Phase, TickClock, TickOutcome, World};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// How often the loop checks whether a simulation step is due. Much finer
/// than any sensible tick interval, so cadence is owned by the [`TickClock`].
const TICK_POLL: Duration = Duration::from_millis(10);

/// Render cadence, decoupled from the simulation cadence.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive play: one logical actor owning the world, processing buffered
/// input, due ticks and render frames cooperatively from a single loop.
pub struct HumanMode {
    engine: GameEngine,
    world: World,
    clock: TickClock,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let clock = TickClock::new(config.tick_interval);
        let mut engine = GameEngine::new(config);
        let world = engine.reset().context("could not set up the game board")?;

        Ok(Self {
            engine,
            world,
            clock,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_poll = interval(TICK_POLL);
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                _ = tick_poll.tick() => {
                    self.pump(Instant::now())?;
                }

                _ = frame_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.world.snapshot(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            let action = self.input_handler.handle_key_event(key);
            self.apply(action)?;
        }
        Ok(())
    }

    /// Applies one input intent. The first key of an idle session only starts
    /// it; see [`World::start`] for the convention.
    fn apply(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Turn(dir) => {
                if self.world.phase() == Phase::Idle {
                    self.world.start();
                } else {
                    self.world.buffer_direction(dir);
                }
            }
            KeyAction::Start => self.world.start(),
            KeyAction::Restart => self.restart()?,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
        Ok(())
    }

    /// Runs at most one simulation step when the game is running and the
    /// clock says one is due.
    fn pump(&mut self, now: Instant) -> Result<()> {
        if self.world.phase() != Phase::Running || !self.clock.maybe_tick(now) {
            return Ok(());
        }

        let outcome = self
            .engine
            .tick(&mut self.world)
            .context("advancing the game")?;

        if let Some(TickOutcome::Collided(_)) = outcome {
            self.metrics.on_game_over(self.world.score());
        }

        Ok(())
    }

    /// Replaces the world with a freshly booted one, waiting for a key.
    fn restart(&mut self) -> Result<()> {
        self.world = self
            .engine
            .reset()
            .context("could not rebuild the game board")?;
        self.clock.rearm();
        self.metrics.on_game_start();
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
