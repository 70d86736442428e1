//! Character art for the bird and obstacles.

use crate::game::WingFrame;
use ratatui::style::{Color, Modifier, Style};

pub const SKY: Color = Color::Rgb(135, 206, 250);
pub const GROUND: Color = Color::Rgb(84, 168, 55);
pub const PIPE: Color = Color::Rgb(100, 170, 40);
pub const PIPE_CAP: Color = Color::Rgb(145, 215, 62);

pub const PIPE_BODY: &str = "█";
pub const PIPE_CAP_TOP: &str = "▀";
pub const PIPE_CAP_BOTTOM: &str = "▄";
pub const HITBOX: &str = "·";

/// Bird glyphs, three cells wide, beak on the right.
pub fn bird_sprite(wing: WingFrame, dead: bool) -> &'static str {
    if dead {
        return "*x>";
    }
    match wing {
        WingFrame::Rest => "-o>",
        WingFrame::Up => "^o>",
        WingFrame::Down => "vo>",
    }
}

pub fn bird_style(dead: bool) -> Style {
    let fg = if dead { Color::Red } else { Color::Yellow };
    Style::default()
        .fg(fg)
        .bg(SKY)
        .add_modifier(Modifier::BOLD)
}
