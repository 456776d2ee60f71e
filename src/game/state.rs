use super::action::Direction;

/// A position on the play field, in field units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }

    /// Grid cell (column, row) this position falls in
    pub fn cell(&self, cell_size: i32) -> (i32, i32) {
        (self.x.div_euclid(cell_size), self.y.div_euclid(cell_size))
    }
}

/// The snake in the game
///
/// Segments are stored tail to head; the last element is the head and the
/// sequence is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
    /// Current direction of movement, `None` until the first steer
    pub direction: Option<Direction>,
    /// Length the snake settles at once trimming catches up
    target_len: usize,
}

impl Snake {
    /// Create a stationary single-segment snake
    pub fn new(head: Position) -> Self {
        Self {
            body: vec![head],
            direction: None,
            target_len: 1,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, tail to head
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Segments excluding the head, tail first
    pub fn body_segments(&self) -> &[Position] {
        &self.body[..self.body.len() - 1]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if position is occupied by any segment
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Append a new head, then drop tail segments beyond the target length
    pub fn push_head(&mut self, head: Position) {
        self.body.push(head);
        if self.body.len() > self.target_len {
            let excess = self.body.len() - self.target_len;
            self.body.drain(..excess);
        }
    }

    /// Extend the target length by one segment
    pub fn grow(&mut self) {
        self.target_len += 1;
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false, a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    /// Snake left the play field
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Lifecycle of a round. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Running,
    Won,
    Lost(LossCause),
}

impl RoundStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, RoundStatus::Running)
    }
}

/// Complete game state for one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Position,
    pub field_extent: i32,
    pub score: u32,
    /// Engine ticks since the round started
    pub ticks: u64,
    pub status: RoundStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, apple: Position, field_extent: i32) -> Self {
        Self {
            snake,
            apple,
            field_extent,
            score: 0,
            ticks: 0,
            status: RoundStatus::Running,
        }
    }

    /// Check if a position is within `[0, field_extent)` on both axes
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        (0..self.field_extent).contains(&pos.x) && (0..self.field_extent).contains(&pos.y)
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(100, 100);
        assert_eq!(pos.moved_by(50, 0), Position::new(150, 100));
        assert_eq!(pos.stepped(Direction::Up, 50), Position::new(100, 50));
        assert_eq!(pos.stepped(Direction::Down, 50), Position::new(100, 150));
        assert_eq!(pos.stepped(Direction::Left, 50), Position::new(50, 100));
        assert_eq!(pos.stepped(Direction::Right, 50), Position::new(150, 100));
    }

    #[test]
    fn test_position_cell() {
        assert_eq!(Position::new(150, 50).cell(50), (3, 1));
        assert_eq!(Position::new(-50, 0).cell(50), (-1, 0));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.direction, None);
        assert!(snake.body_segments().is_empty());
    }

    #[test]
    fn test_push_head_trims_to_target() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.push_head(Position::new(6, 5));
        assert_eq!(snake.segments(), &[Position::new(6, 5)]);

        snake.grow();
        snake.push_head(Position::new(7, 5));
        assert_eq!(snake.segments(), &[Position::new(6, 5), Position::new(7, 5)]);

        snake.push_head(Position::new(8, 5));
        assert_eq!(snake.segments(), &[Position::new(7, 5), Position::new(8, 5)]);
        assert_eq!(snake.head(), Position::new(8, 5));
    }

    #[test]
    fn test_collision_detection() {
        let mut snake = Snake::new(Position::new(3, 5));
        snake.grow();
        snake.grow();
        snake.push_head(Position::new(4, 5));
        snake.push_head(Position::new(5, 5));

        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(Snake::new(Position::new(50, 50)), Position::new(100, 100), 700);

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(650, 650)));
        assert!(!state.is_in_bounds(Position::new(-50, 0)));
        assert!(!state.is_in_bounds(Position::new(700, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 700)));
    }

    #[test]
    fn test_status_terminal() {
        assert!(!RoundStatus::Running.is_over());
        assert!(RoundStatus::Won.is_over());
        assert!(RoundStatus::Lost(LossCause::Wall).is_over());
    }
}
