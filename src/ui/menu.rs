use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::{STAGE_COUNT, THEME};
use crate::engine::DeathReason;

/// Entries of the main menu, in display order.
pub const MENU_ITEMS: [&str; 3] = ["Play", "How to Play", "Exit"];

/// Draws the main menu as a centered popup over the board.
pub fn render_main_menu(frame: &mut Frame<'_>, area: Rect, selected: usize) {
    let popup = centered_popup(area, 60, 50);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("GATED SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(THEME.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body: Vec<Line<'_>> = MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if index == selected {
                Line::from(format!("> {item} <"))
                    .style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                Line::from(*item)
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" menu ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows move, [Enter] selects, [Q] quits"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(THEME.menu_footer)),
        footer_row,
    );
}

/// Draws the rules screen as a centered popup.
pub fn render_how_to_play(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("HOW TO PLAY"),
        Line::from(""),
        Line::from("Steer with the arrow keys. Reversing is fatal."),
        Line::from("+ grows the snake by one."),
        Line::from("- shrinks it; below length 3 the run ends."),
        Line::from("T speeds the snake up for a while."),
        Line::from("Gates teleport you to their twin."),
        Line::from(""),
        Line::from("Complete every mission to clear the stage."),
        Line::from(""),
        Line::from("[Enter] Back"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" rules ")),
        popup,
    );
}

/// Draws the game-over popup with the reason the run ended.
pub fn render_game_over(
    frame: &mut Frame<'_>,
    area: Rect,
    death_reason: Option<DeathReason>,
    score: usize,
) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let reason = death_reason.map_or_else(String::new, |reason| reason.to_string());
    let lines = vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(reason),
        Line::from(format!("Score: {score}")),
        Line::from(""),
        Line::from("Press 'R' to retry."),
        Line::from("Press 'Q' to exit."),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws the stage-clear popup.
pub fn render_stage_clear(frame: &mut Frame<'_>, area: Rect, stage: u32) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(format!("STAGE {stage} CLEAR")),
        Line::from(""),
        Line::from("Every mission objective met."),
        Line::from("[Enter] Continue"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" stage clear ")),
        popup,
    );
}

/// Draws the ending screen shown after the last stage.
pub fn render_ending(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("YOU WIN"),
        Line::from(""),
        Line::from(format!("All {STAGE_COUNT} stages cleared.")),
        Line::from(""),
        Line::from("[Enter] Main menu"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(THEME.menu_title))
            .block(Block::bordered().title(" ending ")),
        popup,
    );
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
