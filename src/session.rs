//! Round lifecycle around the game engine
//!
//! A session plays any number of rounds back to back. The highscore is read
//! from the store at the start of each round and written the moment a round
//! ends with a better score, before control returns to the caller.

use crate::game::{Direction, GameEngine, GameState, StepResult};
use crate::highscore::HighscoreStore;

pub struct Session<S: HighscoreStore> {
    engine: GameEngine,
    store: S,
    highscore: u32,
    new_highscore: bool,
    rounds_played: u32,
}

impl<S: HighscoreStore> Session<S> {
    /// Start a session with the engine's current round as the first round
    pub fn new(engine: GameEngine, store: S) -> Self {
        let highscore = store.load();
        Self {
            engine,
            store,
            highscore,
            new_highscore: false,
            rounds_played: 0,
        }
    }

    /// Throw away the current round and begin a fresh one
    pub fn start_round(&mut self) {
        self.engine.reset();
        self.highscore = self.store.load();
        self.new_highscore = false;
    }

    pub fn steer(&mut self, direction: Direction) {
        self.engine.set_direction(direction);
    }

    /// Advance the engine one tick, finalizing the round if it just ended
    pub fn tick(&mut self) -> StepResult {
        let result = self.engine.advance();
        // Terminal status only ever appears on a step that moved the snake,
        // so this runs once per round.
        if result.info.moved && result.status.is_over() {
            self.finish_round(result.score);
        }
        result
    }

    fn finish_round(&mut self, score: u32) {
        self.rounds_played += 1;
        if score <= self.highscore {
            return;
        }

        self.highscore = score;
        self.new_highscore = true;
        if let Err(e) = self.store.save(score) {
            log::error!("failed to persist highscore {}: {:#}", score, e);
        }
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    /// Whether the round that just ended set a new highscore
    pub fn is_new_highscore(&self) -> bool {
        self.new_highscore
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn is_round_over(&self) -> bool {
        self.engine.state().is_over()
    }
}
