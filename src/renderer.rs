use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::app::{App, Screen};
use crate::config::{
    GLYPH_EFFECT_RING, GLYPH_EFFECT_SPARKLE, GLYPH_FOOD, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GridSize, PALETTE,
};
use crate::game::GridSimulation;
use crate::input::Direction;
use crate::score::ScoreBackend;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{
    render_game_over_menu, render_pause_menu, render_ready_menu, render_user_select,
};

/// Terminal columns per logical cell; keeps cells roughly square.
const CELL_COLUMNS: u16 = 2;

/// Renders the full frame from immutable driver state.
pub fn render<B: ScoreBackend>(frame: &mut Frame<'_>, app: &App<B>) {
    let area = frame.area();
    let [title_row, body] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::from("S N A K E"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(PALETTE.score)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let play_area = render_hud(frame, body, app);
    let board_area = board_rect(play_area, app.simulation().bounds());

    let block = Block::bordered().border_style(Style::new().fg(PALETTE.border));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_grass(frame, inner, app.simulation().bounds());
    render_food(frame, inner, app.simulation());
    render_snake(frame, inner, app.simulation());
    render_effects(frame, inner, app);

    match app.screen() {
        Screen::UserSelect => render_user_select(frame, board_area, app),
        Screen::Ready => render_ready_menu(frame, board_area, app.best_score()),
        Screen::Paused => render_pause_menu(frame, board_area),
        Screen::GameOver => render_game_over_menu(frame, board_area, app),
        Screen::Playing => {}
    }
}

fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    board
}

fn render_grass(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize) {
    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            let color = if (x + y) % 2 == 0 {
                PALETTE.grass_light
            } else {
                PALETTE.grass_dark
            };
            paint_cell(frame, inner, bounds, position, "  ", Style::new().bg(color));
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, simulation: &GridSimulation) {
    let Some(food) = simulation.food() else {
        return;
    };

    paint_cell(
        frame,
        inner,
        simulation.bounds(),
        food,
        GLYPH_FOOD,
        Style::new().fg(PALETTE.food),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, simulation: &GridSimulation) {
    let bounds = simulation.bounds();
    let total = simulation.snake().len();

    for (index, segment) in simulation.snake_positions().enumerate() {
        if index == 0 {
            paint_cell(
                frame,
                inner,
                bounds,
                *segment,
                head_glyph(simulation.direction()),
                Style::new()
                    .fg(Color::White)
                    .bg(PALETTE.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        let t = index as f32 / (total.saturating_sub(1).max(1)) as f32;
        let color = lerp_color(PALETTE.snake_body_start, PALETTE.snake_body_end, t);
        paint_cell(frame, inner, bounds, *segment, "  ", Style::new().bg(color));
    }
}

fn render_effects<B: ScoreBackend>(frame: &mut Frame<'_>, inner: Rect, app: &App<B>) {
    let bounds = app.simulation().bounds();

    for effect in app.effects().iter() {
        let frame_index = usize::from(effect.frame()).min(PALETTE.effect.len() - 1);
        let ring_style = Style::new().fg(PALETTE.effect[frame_index]);
        for cell in effect.ring_cells() {
            paint_cell(frame, inner, bounds, cell, GLYPH_EFFECT_RING, ring_style);
        }

        let sparkle_style = Style::new().fg(PALETTE.sparkle);
        for cell in effect.sparkle_cells() {
            paint_cell(frame, inner, bounds, cell, GLYPH_EFFECT_SPARKLE, sparkle_style);
        }
    }
}

fn paint_cell(
    frame: &mut Frame<'_>,
    inner: Rect,
    bounds: GridSize,
    position: Position,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = logical_to_terminal(inner, bounds, position) else {
        return;
    };

    frame
        .buffer_mut()
        .set_stringn(x, y, glyph, usize::from(CELL_COLUMNS), style);
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Linear blend between two RGB colors; non-RGB inputs return `from`.
#[must_use]
pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) = (from, to) else {
        return from;
    };

    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t) as u8;
    Color::Rgb(channel(r1, r2), channel(g1, g2), channel(b1, b2))
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    use crate::config::GridSize;
    use crate::snake::Position;

    use super::{lerp_color, logical_to_terminal};

    #[test]
    fn cells_map_to_two_columns() {
        let inner = Rect::new(1, 1, 20, 5);
        let bounds = GridSize::new(10, 5);

        assert_eq!(logical_to_terminal(inner, bounds, Position::new(0, 0)), Some((1, 1)));
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(3, 2)), Some((7, 3)));
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(10, 0)), None);
    }

    #[test]
    fn cells_outside_small_terminal_are_skipped() {
        let inner = Rect::new(0, 0, 4, 2);
        let bounds = GridSize::new(10, 5);

        assert_eq!(logical_to_terminal(inner, bounds, Position::new(1, 1)), Some((2, 1)));
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(2, 1)), None);
    }

    #[test]
    fn lerp_hits_both_ends() {
        let from = Color::Rgb(0x78, 0x36, 0xe2);
        let to = Color::Rgb(0x49, 0x23, 0x86);

        assert_eq!(lerp_color(from, to, 0.0), from);
        assert_eq!(lerp_color(from, to, 1.0), to);
        assert_eq!(lerp_color(Color::Red, to, 0.5), Color::Red);
    }
}
