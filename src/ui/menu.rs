use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position as CursorPosition, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::config::{MAX_USERNAME_CHARS, PALETTE};
use crate::game::Collision;
use crate::score::ScoreBackend;

const LEADERBOARD_ROWS: usize = 8;

/// Draws the user picker: a name field above the leaderboard.
pub fn render_user_select<B: ScoreBackend>(frame: &mut Frame<'_>, area: Rect, app: &App<B>) {
    let popup = centered_popup(area, 80, 90);
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" player ")
        .border_style(Style::new().fg(PALETTE.border));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [prompt_row, input_row, message_row, board_rows, footer_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from("Type a new name or pick one below"))
            .alignment(Alignment::Center),
        prompt_row,
    );

    let field = format!("> {}", app.name_input());
    let field_width = u16::try_from(field.width()).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(Line::from(field)).style(
            Style::default()
                .fg(PALETTE.score)
                .add_modifier(Modifier::BOLD),
        ),
        input_row,
    );
    let cursor_x = input_row
        .x
        .saturating_add(field_width)
        .min(input_row.right().saturating_sub(1));
    frame.set_cursor_position(CursorPosition::new(cursor_x, input_row.y));

    if let Some(message) = app.message() {
        frame.render_widget(
            Paragraph::new(Line::from(message.to_owned()))
                .alignment(Alignment::Center)
                .style(Style::default().fg(PALETTE.danger)),
            message_row,
        );
    }

    let ranked = app.ranked();
    let lines: Vec<Line<'_>> = if ranked.is_empty() {
        vec![Line::from("No players yet").style(Style::default().fg(PALETTE.muted))]
    } else {
        ranked
            .iter()
            .enumerate()
            .take(LEADERBOARD_ROWS)
            .map(|(index, (name, best))| {
                let marker = if app.selected() == Some(index) { '>' } else { ' ' };
                let line = Line::from(format!(
                    "{marker} {:>2}. {} {best:>6}",
                    index + 1,
                    pad_to_width(name, MAX_USERNAME_CHARS)
                ));
                if app.selected() == Some(index) {
                    line.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    line
                }
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        board_rows,
    );

    frame.render_widget(
        Paragraph::new(Line::from("[Enter] Play  [Up]/[Down] Pick  [Esc] Quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(PALETTE.muted)),
        footer_row,
    );
}

/// Draws the pre-run prompt.
pub fn render_ready_menu(frame: &mut Frame<'_>, area: Rect, best: u32) {
    let popup = centered_popup(area, 70, 45);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("READY"),
        Line::from(""),
        Line::from(format!("Best score: {best}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("[U] Switch player  [Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        popup,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu<B: ScoreBackend>(frame: &mut Frame<'_>, area: Rect, app: &App<B>) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    let score = app.simulation().score();
    let summary = app.last_run();
    let best = summary.map_or(score, |run| run.best);
    let new_best = summary.is_some_and(|run| run.new_best);

    let mut lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(PALETTE.danger)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")).style(Style::default().fg(PALETTE.score)),
        Line::from(format!("Best: {best}")),
        Line::from(collision_text(app.simulation().collision())),
        Line::from(if new_best { "New best score!" } else { "" }),
    ];
    if let Some(message) = app.message() {
        lines.push(Line::from(message.to_owned()).style(Style::default().fg(PALETTE.danger)));
    }
    lines.extend([
        Line::from(""),
        Line::from("[Enter]/[Space] Play again"),
        Line::from("[U] Switch player  [Q] Quit"),
    ]);

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn collision_text(collision: Option<Collision>) -> &'static str {
    match collision {
        Some(Collision::Wall) => "Cause: hit the wall",
        Some(Collision::SelfBite) => "Cause: bit yourself",
        None => "",
    }
}

/// Right-pads `text` with spaces to `width` display columns.
fn pad_to_width(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(padding))
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;

    use super::{collision_text, pad_to_width};
    use crate::game::Collision;

    #[test]
    fn names_pad_by_display_width() {
        assert_eq!(pad_to_width("bob", 6), "bob   ");
        assert_eq!(pad_to_width("蛇", 4).width(), 4);
        assert_eq!(pad_to_width("much-too-long", 4), "much-too-long");
    }

    #[test]
    fn collision_causes_are_described() {
        assert_eq!(collision_text(Some(Collision::Wall)), "Cause: hit the wall");
        assert_eq!(collision_text(Some(Collision::SelfBite)), "Cause: bit yourself");
        assert_eq!(collision_text(None), "");
    }
}
