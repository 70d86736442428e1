//! Terminal rendering.

pub mod camera;
pub mod game_common;
pub mod play_area;
pub mod sprites;

use crate::constants::PHYSICS_TICK_MS;
use crate::game::{Game, GameMode, Phase};
use crate::input::controls_hint;
use game_common::{
    create_game_layout, render_banner, render_centered_notice, render_info_panel_frame,
    render_status_bar,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw one full frame of the game.
pub fn draw_game(frame: &mut Frame, game: &Game) {
    let area = frame.size();
    let layout = create_game_layout(frame, area, " Flapper ", Color::Cyan, 10, 22);

    play_area::render_play_area(frame, layout.content, game);
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);

    match game.phase {
        Phase::Paused => {
            render_centered_notice(frame, layout.content, "PAUSED", "[P] Resume  [Q] Quit");
        }
        Phase::Dying { ticks_left } => {
            let seconds = (ticks_left as u64 * PHYSICS_TICK_MS) as f64 / 1000.0;
            render_banner(
                frame,
                layout.content,
                Color::Red,
                "CRASH!",
                &format!(
                    "You passed {} pipes. Resetting in {:.1}s",
                    game.score, seconds
                ),
            );
        }
        _ => {}
    }
}

/// Status line text and color for the current phase.
pub fn status_message(game: &Game) -> (String, Color) {
    match game.phase {
        Phase::WaitingToStart => {
            let text = match game.mode {
                GameMode::Flappy => "Press Space to start!",
                GameMode::Hover => "Press a direction to start!",
            };
            (text.to_string(), Color::Yellow)
        }
        Phase::Playing => (format!("Score: {}", game.score), Color::Green),
        Phase::Paused => ("Paused".to_string(), Color::Yellow),
        Phase::Dying { .. } => ("Crashed!".to_string(), Color::Red),
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &Game) {
    let (text, color) = status_message(game);
    render_status_bar(frame, area, &text, color, controls_hint(game.mode));
}

fn info_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &Game) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", game.difficulty.name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {} mode", game.mode.name()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        info_line("Score", game.score.to_string(), Color::White),
        info_line("Best", game.best_score.to_string(), Color::Yellow),
        info_line("Deaths", game.deaths.to_string(), Color::Red),
        Line::from(""),
        info_line("Gap", format!("{:.2}", game.difficulty.gap_size()), Color::Green),
    ];

    if game.show_hitboxes {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " [H] hitboxes on",
            Style::default().fg(Color::Magenta),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
