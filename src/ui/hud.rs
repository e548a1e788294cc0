use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::config::PALETTE;
use crate::score::ScoreBackend;

/// Renders the score line and key hints, returning the play area above them.
#[must_use]
pub fn render_hud<B: ScoreBackend>(frame: &mut Frame<'_>, area: Rect, app: &App<B>) -> Rect {
    let [play_area, score_row, hint_row] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(
            app.simulation().score(),
            app.best_score(),
            app.simulation().snake().len(),
            app.user(),
        ))
        .alignment(Alignment::Center),
        score_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrow keys or WASD to move  [P] pause  [Q] quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(PALETTE.muted)),
        hint_row,
    );

    play_area
}

fn score_line(score: u32, best: u32, length: usize, user: Option<&str>) -> Line<'static> {
    let label = Style::default().fg(PALETTE.muted);
    let value = Style::default()
        .fg(PALETTE.score)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("Score: ", label),
        Span::styled(score.to_string(), value),
        Span::styled("  Best: ", label),
        Span::styled(best.max(score).to_string(), value),
        Span::styled("  Length: ", label),
        Span::styled(length.to_string(), value),
    ];
    if let Some(user) = user {
        spans.push(Span::styled("  Player: ", label));
        spans.push(Span::styled(user.to_owned(), value));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::score_line;

    #[test]
    fn score_line_shows_running_best() {
        let line = score_line(40, 30, 7, Some("Alice"));
        let text: String = line.spans.iter().map(|span| &*span.content).collect();

        assert_eq!(text, "Score: 40  Best: 40  Length: 7  Player: Alice");
    }

    #[test]
    fn score_line_omits_missing_user() {
        let line = score_line(0, 0, 4, None);
        let text: String = line.spans.iter().map(|span| &*span.content).collect();

        assert_eq!(text, "Score: 0  Best: 0  Length: 4");
    }
}
