use ratatui::style::Color;

/// Default board height in cells, border included.
pub const MAP_HEIGHT: i32 = 21;

/// Default board width in cells, border included.
pub const MAP_WIDTH: i32 = 41;

/// Minimum (and spawn) body segment count. Dropping below this ends the run.
pub const MIN_SNAKE_SEGMENTS: usize = 3;

/// Ticks between forced item respawns.
pub const ITEM_RESPAWN_INTERVAL_TICKS: u16 = 50;

/// Speed multiplier granted by a time item.
pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;

/// Duration of the time-item speed boost, in ticks.
pub const SPEED_BOOST_DURATION_TICKS: u32 = 40;

/// Number of stages before the ending sequence.
pub const STAGE_COUNT: u32 = 4;

/// How long the app loop waits on input between tick checks.
pub const INPUT_POLL_INTERVAL_MS: u64 = 15;

pub const GLYPH_WALL: &str = "█";
pub const GLYPH_IMMUNE_WALL: &str = "▓";
pub const GLYPH_SNAKE_BODY: &str = "O";
pub const GLYPH_SNAKE_TAIL: &str = "o";
pub const GLYPH_SNAKE_HEAD_UP: &str = "^";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "v";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "<";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = ">";
pub const GLYPH_SNAKE_HEAD_IDLE: &str = "O";
pub const GLYPH_GROWTH_ITEM: &str = "+";
pub const GLYPH_POISON_ITEM: &str = "-";
pub const GLYPH_TIME_ITEM: &str = "T";
pub const GLYPH_GATE: &str = "◙";

/// Colors applied to all visual elements.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub wall: Color,
    pub immune_wall: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub growth_item: Color,
    pub poison_item: Color,
    pub time_item: Color,
    pub gate: Color,
    pub gate_active: Color,
    pub board_border: Color,
    pub hud_text: Color,
    pub hud_accent: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Default look, close to the classic curses palette.
pub const THEME: Theme = Theme {
    wall: Color::White,
    immune_wall: Color::Gray,
    snake_head: Color::Yellow,
    snake_body: Color::Green,
    snake_tail: Color::LightYellow,
    growth_item: Color::Blue,
    poison_item: Color::Red,
    time_item: Color::Yellow,
    gate: Color::Magenta,
    gate_active: Color::LightMagenta,
    board_border: Color::DarkGray,
    hud_text: Color::White,
    hud_accent: Color::Cyan,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};
