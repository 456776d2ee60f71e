use anyhow::{Context, Result, ensure};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::highscore::HighscoreStore;
use crate::input::{InputCommand, InputHandler};
use crate::render::{Renderer, Scoreboard};
use crate::session::Session;

/// Rates of the two independent loop timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTiming {
    /// Engine ticks per second
    pub tick_rate: u32,
    /// Frames drawn per second
    pub render_fps: u32,
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            render_fps: 30,
        }
    }
}

impl LoopTiming {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_rate > 0, "tick rate must be positive");
        ensure!(self.render_fps > 0, "render rate must be positive");
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate))
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.render_fps))
    }
}

pub struct HumanMode<S: HighscoreStore> {
    session: Session<S>,
    renderer: Renderer,
    input_handler: InputHandler,
    timing: LoopTiming,
    should_quit: bool,
}

impl<S: HighscoreStore> HumanMode<S> {
    pub fn new(session: Session<S>, renderer: Renderer, timing: LoopTiming) -> Self {
        Self {
            session,
            renderer,
            input_handler: InputHandler::new(),
            timing,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.timing.validate()?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        log::info!("starting game, highscore {}", self.session.highscore());

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        log::info!(
            "leaving after {} finished rounds",
            self.session.rounds_played()
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The engine ticks on a fixed timestep; frames are drawn on their own
        // timer so the two rates vary independently.
        let mut tick_timer = interval(self.timing.tick_interval());
        let mut render_timer = interval(self.timing.render_interval());

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let state = self.session.state();
                    let scoreboard = self.scoreboard();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, state, scoreboard);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
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

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                InputCommand::Steer(direction) => {
                    self.session.steer(direction);
                }
                InputCommand::Restart => {
                    // Only the end-of-round screen waits for a restart
                    if self.session.is_round_over() {
                        self.session.start_round();
                    }
                }
                InputCommand::Quit => {
                    self.should_quit = true;
                }
                InputCommand::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        if !self.session.is_round_over() {
            self.session.tick();
        }
    }

    fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            highscore: self.session.highscore(),
            new_highscore: self.session.is_new_highscore(),
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetBundle;
    use crate::game::{Direction, GameConfig, GameEngine};
    use crate::highscore::FileHighscoreStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::TempDir;

    fn mode(dir: &TempDir) -> HumanMode<FileHighscoreStore> {
        let config = GameConfig {
            speed: 1,
            ..Default::default()
        };
        let renderer = Renderer::new(AssetBundle::placeholders(14), &config);
        let engine = GameEngine::with_seed(config, 17).unwrap();
        let store = FileHighscoreStore::new(dir.path().join("highscore.txt"));
        HumanMode::new(Session::new(engine, store), renderer, LoopTiming::default())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn play_until_over(mode: &mut HumanMode<FileHighscoreStore>) {
        mode.handle_event(key(KeyCode::Up));
        while !mode.session.is_round_over() {
            mode.update_game();
        }
    }

    #[test]
    fn test_game_initialization() {
        let dir = TempDir::new().unwrap();
        let mode = mode(&dir);
        assert!(!mode.session.is_round_over());
        assert_eq!(mode.session.state().score, 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_steering_updates_direction() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);

        mode.handle_event(key(KeyCode::Char('d')));
        assert_eq!(mode.session.state().snake.direction, Some(Direction::Right));

        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.session.state().snake.direction, Some(Direction::Right));
    }

    #[test]
    fn test_restart_ignored_mid_round() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);
        mode.handle_event(key(KeyCode::Right));
        mode.update_game();
        let head = mode.session.state().snake.head();

        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.session.state().snake.head(), head);
        assert_eq!(mode.session.state().ticks, 1);
    }

    #[test]
    fn test_restart_after_round_over() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);
        play_until_over(&mut mode);

        // Ticks stop while the end screen waits
        let ticks = mode.session.state().ticks;
        mode.update_game();
        assert_eq!(mode.session.state().ticks, ticks);

        mode.handle_event(key(KeyCode::Char(' ')));
        assert!(!mode.session.is_round_over());
        assert_eq!(mode.session.state().ticks, 0);
    }

    #[test]
    fn test_quit_from_end_screen() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode(&dir);
        play_until_over(&mut mode);

        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_loop_timing() {
        let timing = LoopTiming::default();
        assert!(timing.validate().is_ok());
        assert_eq!(timing.render_interval(), Duration::from_secs_f64(1.0 / 30.0));
        assert!(timing.tick_interval() < timing.render_interval());

        let timing = LoopTiming {
            tick_rate: 0,
            render_fps: 30,
        };
        assert!(timing.validate().is_err());
    }
}
