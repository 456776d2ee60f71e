use super::{
    action::Direction,
    config::GameConfig,
    state::{GameState, LossCause, Position, RoundStatus, Snake},
};
use anyhow::Result;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether this call ran a simulation step (moved the snake)
    pub moved: bool,
    /// Whether the snake ate the apple this step
    pub ate_apple: bool,
}

/// Result of one `advance` call
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub status: RoundStatus,
    pub score: u32,
    pub info: StepInfo,
}

/// The game engine that owns the state of the current round
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    state: GameState,
}

impl GameEngine {
    /// Create a new game engine seeded from system entropy
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a new game engine with a deterministic seed
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;
        let state = Self::fresh_state(&config, &mut rng);
        Ok(Self { config, rng, state })
    }

    /// Read-only view of the current round
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Discard the current round and start a fresh one
    pub fn reset(&mut self) -> &GameState {
        self.state = Self::fresh_state(&self.config, &mut self.rng);
        log::debug!(
            "new round: head at {:?}, apple at {:?}",
            self.state.snake.head(),
            self.state.apple
        );
        &self.state
    }

    /// Request a new direction. Reversals and requests after the round ended
    /// are ignored.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.state.is_over() {
            return;
        }

        let snake = &mut self.state.snake;
        match snake.direction {
            Some(current) if current.is_opposite(requested) => {
                log::trace!("ignoring reversal from {:?} to {:?}", current, requested);
            }
            _ => snake.direction = Some(requested),
        }
    }

    /// Advance the engine by one tick. Every `speed`-th tick runs a
    /// simulation step.
    pub fn advance(&mut self) -> StepResult {
        if self.state.is_over() {
            return self.result(StepInfo::default());
        }

        self.state.ticks += 1;
        if self.state.ticks % u64::from(self.config.speed) != 0 {
            return self.result(StepInfo::default());
        }

        let Some(direction) = self.state.snake.direction else {
            return self.result(StepInfo::default());
        };

        let new_head = self
            .state
            .snake
            .head()
            .stepped(direction, self.config.cell_size);
        self.state.snake.push_head(new_head);

        let ate_apple = new_head == self.state.apple;
        if ate_apple {
            self.state.score += 1;
            self.state.snake.grow();
            self.state.apple = self.spawn_apple();
        }

        self.state.status = self.check_terminal(new_head);
        if self.state.is_over() {
            log::info!(
                "round over: {:?} with score {} after {} ticks",
                self.state.status,
                self.state.score,
                self.state.ticks
            );
        }

        self.result(StepInfo {
            moved: true,
            ate_apple,
        })
    }

    #[cfg(test)]
    pub(crate) fn place_apple(&mut self, apple: Position) {
        self.state.apple = apple;
    }

    fn result(&self, info: StepInfo) -> StepResult {
        StepResult {
            status: self.state.status,
            score: self.state.score,
            info,
        }
    }

    /// Loss conditions take precedence over the win condition
    fn check_terminal(&self, head: Position) -> RoundStatus {
        if !self.state.is_in_bounds(head) {
            return RoundStatus::Lost(LossCause::Wall);
        }

        if self.state.snake.collides_with_body(head) {
            return RoundStatus::Lost(LossCause::SelfCollision);
        }

        if self.state.score >= self.config.win_score {
            return RoundStatus::Won;
        }

        RoundStatus::Running
    }

    fn fresh_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
        let snake = Snake::new(random_interior_cell(config, rng));
        let apple = random_interior_cell(config, rng);
        GameState::new(snake, apple, config.field_extent)
    }

    /// Pick the next apple position. May land on the snake unless
    /// `apple_avoids_snake` is set.
    fn spawn_apple(&mut self) -> Position {
        if !self.config.apple_avoids_snake {
            return random_interior_cell(&self.config, &mut self.rng);
        }

        let free: Vec<Position> = interior_cells(&self.config)
            .filter(|pos| !self.state.snake.occupies(*pos))
            .collect();

        match free.choose(&mut self.rng) {
            Some(pos) => *pos,
            None => random_interior_cell(&self.config, &mut self.rng),
        }
    }
}

/// Uniformly random cell strictly inside the border cells
fn random_interior_cell(config: &GameConfig, rng: &mut impl Rng) -> Position {
    let cells = config.cells_per_side();
    let x = rng.gen_range(1..cells - 1) * config.cell_size;
    let y = rng.gen_range(1..cells - 1) * config.cell_size;
    Position::new(x, y)
}

fn interior_cells(config: &GameConfig) -> impl Iterator<Item = Position> + '_ {
    let cells = config.cells_per_side();
    (1..cells - 1).flat_map(move |row| {
        (1..cells - 1)
            .map(move |col| Position::new(col * config.cell_size, row * config.cell_size))
    })
}
