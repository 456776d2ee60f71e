use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::assets::{AssetBundle, Rgb, TEXELS_PER_CELL, Texture};
use crate::game::{GameConfig, GameState, Position, RoundStatus};

/// Upper half block: foreground paints the top texel, background the bottom
const HALF_BLOCK: &str = "▀";

const SCORE_COLOR: Color = Color::Rgb(139, 0, 255);
const END_COLOR: Color = Color::Blue;

/// What the header and end screen show besides the engine state
#[derive(Debug, Clone, Copy, Default)]
pub struct Scoreboard {
    pub highscore: u32,
    pub new_highscore: bool,
}

pub struct Renderer {
    assets: AssetBundle,
    cell_size: i32,
    cells_per_side: u32,
}

impl Renderer {
    pub fn new(assets: AssetBundle, config: &GameConfig) -> Self {
        Self {
            assets,
            cell_size: config.cell_size,
            cells_per_side: config.cells_per_side() as u32,
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, scoreboard: Scoreboard) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, scoreboard), chunks[0]);

        if state.is_over() {
            let end_area = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(10),
                    Constraint::Percentage(80),
                    Constraint::Percentage(10),
                ])
                .split(chunks[1])[1];
            frame.render_widget(self.render_end_screen(state, scoreboard), end_area);
        } else {
            let field_area = self.centered_field(chunks[1]);
            frame.render_widget(self.render_field(state), field_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Field plus its border, centered in `area`
    fn centered_field(&self, area: Rect) -> Rect {
        let width = u16::try_from(self.cells_per_side * TEXELS_PER_CELL + 2).unwrap_or(u16::MAX);
        let height = u16::try_from(self.cells_per_side + 2).unwrap_or(u16::MAX);

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);
        cell
    }

    fn render_field(&self, state: &GameState) -> Paragraph<'static> {
        Paragraph::new(self.field_lines(state)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    /// One terminal row per grid row, two columns per cell
    pub(crate) fn field_lines(&self, state: &GameState) -> Vec<Line<'static>> {
        let sprites = self.sprite_grid(state);
        let side = self.cells_per_side;

        (0..side)
            .map(|row| {
                let spans: Vec<Span<'static>> = (0..side)
                    .flat_map(|col| {
                        let sprite = sprites[row as usize * side as usize + col as usize];
                        (0..TEXELS_PER_CELL).map(move |tx| {
                            let top = self.texel(sprite, col, row, tx, 0);
                            let bottom = self.texel(sprite, col, row, tx, 1);
                            Span::styled(HALF_BLOCK, Style::default().fg(rgb(top)).bg(rgb(bottom)))
                        })
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    /// Sprite drawn on each cell, row-major. Later layers win: body, head,
    /// then apple.
    fn sprite_grid(&self, state: &GameState) -> Vec<Option<&Texture>> {
        let side = self.cells_per_side as usize;
        let mut grid = vec![None; side * side];

        let layers = state
            .snake
            .body_segments()
            .iter()
            .map(|segment| (*segment, &self.assets.snake_body))
            .chain([
                (state.snake.head(), &self.assets.snake_head),
                (state.apple, &self.assets.apple),
            ]);

        for (pos, texture) in layers {
            if let Some(index) = self.cell_index(pos) {
                grid[index] = Some(texture);
            }
        }

        grid
    }

    /// Row-major index of the cell holding `pos`, if it is on the field
    fn cell_index(&self, pos: Position) -> Option<usize> {
        let (col, row) = pos.cell(self.cell_size);
        let side = self.cells_per_side as i32;
        if (0..side).contains(&col) && (0..side).contains(&row) {
            Some(row as usize * side as usize + col as usize)
        } else {
            None
        }
    }

    fn texel(&self, sprite: Option<&Texture>, col: u32, row: u32, tx: u32, ty: u32) -> Rgb {
        match sprite {
            Some(texture) => texture.pixel(tx, ty),
            None => self
                .assets
                .background
                .pixel(col * TEXELS_PER_CELL + tx, row * TEXELS_PER_CELL + ty),
        }
    }

    fn render_stats(&self, state: &GameState, scoreboard: Scoreboard) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(SCORE_COLOR)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Highscore: ", Style::default().fg(SCORE_COLOR)),
            Span::styled(
                scoreboard.highscore.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_end_screen(&self, state: &GameState, scoreboard: Scoreboard) -> Paragraph<'static> {
        let message = match state.status {
            RoundStatus::Won => "YOU WIN",
            _ => "YOU LOSE",
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                message,
                Style::default().fg(END_COLOR).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(SCORE_COLOR)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Highscore: ", Style::default().fg(SCORE_COLOR)),
                Span::styled(
                    scoreboard.highscore.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        if scoreboard.new_highscore {
            text.push(Line::from(Span::styled(
                "New highscore!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "SPACE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(END_COLOR)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

fn rgb([r, g, b]: Rgb) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetKind;
    use crate::game::{LossCause, MAX_CELLS_PER_SIDE, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn renderer() -> Renderer {
        let config = GameConfig::default();
        Renderer::new(AssetBundle::placeholders(14), &config)
    }

    fn state_with_snake() -> GameState {
        let mut snake = Snake::new(Position::new(100, 50));
        snake.grow();
        snake.push_head(Position::new(150, 50));
        GameState::new(snake, Position::new(300, 300), 700)
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_largest_field_fits_terminal() {
        let config = GameConfig::new(MAX_CELLS_PER_SIDE, 1);
        config.validate().unwrap();
        let side = MAX_CELLS_PER_SIDE as u32;
        let renderer = Renderer::new(AssetBundle::placeholders(side), &config);

        let area = renderer.centered_field(Rect::new(0, 0, u16::MAX, u16::MAX));
        assert_eq!(area.width as u32, side * TEXELS_PER_CELL + 2);
        assert_eq!(area.height as u32, side + 2);

        let state = GameState::new(
            Snake::new(Position::new(3, 3)),
            Position::new(255, 255),
            MAX_CELLS_PER_SIDE,
        );
        let lines = renderer.field_lines(&state);
        assert_eq!(lines.len(), side as usize);
        assert_eq!(
            lines[255].spans[255 * 2].style.fg,
            Some(rgb(AssetKind::Apple.placeholder_fill()))
        );
    }

    #[test]
    fn test_field_dimensions() {
        let lines = renderer().field_lines(&state_with_snake());
        assert_eq!(lines.len(), 14);
        for line in &lines {
            assert_eq!(line.spans.len(), 28);
        }
    }

    #[test]
    fn test_sprites_land_on_their_cells() {
        let lines = renderer().field_lines(&state_with_snake());
        let fg = |row: usize, col: usize| lines[row].spans[col * 2].style.fg;

        assert_eq!(fg(1, 3), Some(rgb(AssetKind::SnakeHead.placeholder_fill())));
        assert_eq!(fg(1, 2), Some(rgb(AssetKind::SnakeBody.placeholder_fill())));
        assert_eq!(fg(6, 6), Some(rgb(AssetKind::Apple.placeholder_fill())));
        assert_eq!(fg(0, 0), Some(rgb(AssetKind::Background.placeholder_fill())));
    }

    #[test]
    fn test_out_of_bounds_head_is_skipped() {
        let mut state = state_with_snake();
        state.snake.push_head(Position::new(150, -50));
        let lines = renderer().field_lines(&state);
        assert_eq!(lines.len(), 14);
    }

    #[test]
    fn test_render_running_round() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let state = state_with_snake();
        let scoreboard = Scoreboard {
            highscore: 12,
            new_highscore: false,
        };

        terminal
            .draw(|frame| renderer().render(frame, &state, scoreboard))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Highscore: 12"));
        assert!(!text.contains("YOU"));
    }

    #[test]
    fn test_render_end_screen() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = state_with_snake();
        state.status = RoundStatus::Lost(LossCause::Wall);
        state.score = 3;
        let scoreboard = Scoreboard {
            highscore: 3,
            new_highscore: true,
        };

        terminal
            .draw(|frame| renderer().render(frame, &state, scoreboard))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("YOU LOSE"));
        assert!(text.contains("New highscore!"));
        assert!(text.contains("SPACE"));

        state.status = RoundStatus::Won;
        terminal
            .draw(|frame| renderer().render(frame, &state, scoreboard))
            .unwrap();
        assert!(screen_text(&terminal).contains("YOU WIN"));
    }
}
