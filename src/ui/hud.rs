use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::config::{STAGE_COUNT, THEME};
use crate::engine::Session;
use crate::mission::targets_for_stage;

/// Renders the score and mission panels next to the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &Session) {
    let [score_area, mission_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(9)]).areas(area);

    render_score_panel(frame, score_area, session);
    render_mission_panel(frame, mission_area, session);
}

fn render_score_panel(frame: &mut Frame<'_>, area: Rect, session: &Session) {
    let lines = vec![
        stat_line("Stage", format!("{} / {STAGE_COUNT}", session.stage)),
        stat_line(
            "B",
            format!("{} / {}", session.snake.len(), session.max_length),
        ),
        stat_line("+", session.growth_count.to_string()),
        stat_line("-", session.poison_count.to_string()),
        stat_line("G", session.gates_used.to_string()),
        stat_line("Time", format!("{}s", session.elapsed_seconds())),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::new().fg(THEME.hud_text))
            .block(Block::bordered().title(" score ")),
        area,
    );
}

fn render_mission_panel(frame: &mut Frame<'_>, area: Rect, session: &Session) {
    let targets = targets_for_stage(session.stage);
    let flags = session.missions;

    let lines = vec![
        stat_line("Map", session.map.archetype.name().to_string()),
        Line::from(""),
        objective_line("B", targets.snake_length, session.snake.len(), flags.length_met),
        objective_line(
            "+",
            targets.growth_items as usize,
            session.growth_count as usize,
            flags.growth_met,
        ),
        objective_line(
            "-",
            targets.poison_items as usize,
            session.poison_count as usize,
            flags.poison_met,
        ),
        objective_line(
            "G",
            targets.gate_uses as usize,
            session.gates_used as usize,
            flags.gates_met,
        ),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::new().fg(THEME.hud_text))
            .block(Block::bordered().title(" mission ")),
        area,
    );
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{label:<5} ")),
        Span::styled(value, Style::new().fg(THEME.hud_accent)),
    ])
}

/// One objective row: target, current progress, and a `v` mark once met.
fn objective_line(label: &str, target: usize, current: usize, met: bool) -> Line<'static> {
    let mark = if met { " v" } else { "" };
    Line::from(vec![
        Span::raw(format!("{label:<5} ")),
        Span::raw(format!("{target} ({current})")),
        Span::styled(mark.to_string(), Style::new().fg(THEME.hud_accent)),
    ])
}
