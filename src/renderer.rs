use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    GLYPH_GATE, GLYPH_GROWTH_ITEM, GLYPH_IMMUNE_WALL, GLYPH_POISON_ITEM, GLYPH_SNAKE_BODY,
    GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_IDLE, GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT,
    GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL, GLYPH_TIME_ITEM, GLYPH_WALL, THEME,
};
use crate::engine::Session;
use crate::entity::{BlockKind, Coord};
use crate::input::Direction;
use crate::snake::Heading;
use crate::ui::hud::render_hud;

/// Renders the full game frame from immutable session state: the bordered
/// board on the left, the score and mission panels on the right.
pub fn render(frame: &mut Frame<'_>, session: &Session) {
    let area = frame.area();
    let board_width = u16::try_from(session.map.size.width).unwrap_or(u16::MAX);

    let [board_area, side_area] = Layout::horizontal([
        Constraint::Length(board_width.saturating_add(2)),
        Constraint::Min(24),
    ])
    .areas(area);

    render_board(frame, board_area, session);
    render_hud(frame, side_area, session);
}

fn render_board(frame: &mut Frame<'_>, area: Rect, session: &Session) {
    let block = Block::bordered()
        .title(" gated snake ")
        .border_style(Style::new().fg(THEME.board_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buffer = frame.buffer_mut();
    for row in 1..=session.map.size.height {
        for col in 1..=session.map.size.width {
            let coord = Coord { row, col };
            let Some(kind) = session.block_at(coord) else {
                continue;
            };
            let Some((x, y)) = cell_to_terminal(inner, coord) else {
                continue;
            };

            let (glyph, style) = cell_appearance(session, coord, kind);
            buffer.set_string(x, y, glyph, style);
        }
    }
}

fn cell_appearance(session: &Session, coord: Coord, kind: BlockKind) -> (&'static str, Style) {
    match kind {
        BlockKind::Wall => (GLYPH_WALL, Style::new().fg(THEME.wall)),
        BlockKind::ImmuneWall => (GLYPH_IMMUNE_WALL, Style::new().fg(THEME.immune_wall)),
        BlockKind::SnakeHead => (
            head_glyph(session.snake.heading()),
            Style::new()
                .fg(THEME.snake_head)
                .add_modifier(Modifier::BOLD),
        ),
        BlockKind::SnakeBody => {
            if session.snake.tail() == Some(coord) {
                (GLYPH_SNAKE_TAIL, Style::new().fg(THEME.snake_tail))
            } else {
                (GLYPH_SNAKE_BODY, Style::new().fg(THEME.snake_body))
            }
        }
        BlockKind::GrowthItem => (GLYPH_GROWTH_ITEM, Style::new().fg(THEME.growth_item)),
        BlockKind::PoisonItem => (GLYPH_POISON_ITEM, Style::new().fg(THEME.poison_item)),
        BlockKind::TimeItem => (GLYPH_TIME_ITEM, Style::new().fg(THEME.time_item)),
        BlockKind::Gate { active: true } => (
            GLYPH_GATE,
            Style::new()
                .fg(THEME.gate_active)
                .add_modifier(Modifier::BOLD),
        ),
        BlockKind::Gate { active: false } => (GLYPH_GATE, Style::new().fg(THEME.gate)),
    }
}

fn head_glyph(heading: Heading) -> &'static str {
    match heading {
        Heading::Moving(Direction::Up) => GLYPH_SNAKE_HEAD_UP,
        Heading::Moving(Direction::Down) => GLYPH_SNAKE_HEAD_DOWN,
        Heading::Moving(Direction::Left) => GLYPH_SNAKE_HEAD_LEFT,
        Heading::Moving(Direction::Right) => GLYPH_SNAKE_HEAD_RIGHT,
        Heading::Idle | Heading::ReverseAttempted => GLYPH_SNAKE_HEAD_IDLE,
    }
}

/// Maps a 1-based board cell into the terminal rectangle `inner`, clipping
/// cells that fall outside it.
fn cell_to_terminal(inner: Rect, coord: Coord) -> Option<(u16, u16)> {
    let col_offset = u16::try_from(coord.col.checked_sub(1)?).ok()?;
    let row_offset = u16::try_from(coord.row.checked_sub(1)?).ok()?;

    let x = inner.x.saturating_add(col_offset);
    let y = inner.y.saturating_add(row_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
