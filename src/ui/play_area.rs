//! Draws the world: sky, ground, obstacle pairs and the bird.

use super::camera::Camera;
use super::sprites::{self, GROUND, PIPE, PIPE_CAP, SKY};
use crate::game::Game;
use crate::geometry::Aabb;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    symbol: &'static str,
    style: Style,
}

/// Off-screen character grid the scene is composed on before it becomes
/// ratatui lines. Coordinates are relative to the play area.
#[derive(Debug, Clone)]
pub struct SceneGrid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl SceneGrid {
    pub fn new(width: u16, height: u16, background: Style) -> Self {
        Self {
            width,
            height,
            cells: vec![
                Cell {
                    symbol: " ",
                    style: background,
                };
                width as usize * height as usize
            ],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn set(&mut self, x: u16, y: u16, symbol: &'static str, style: Style) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { symbol, style };
        }
    }

    pub fn fill(&mut self, r: Rect, symbol: &'static str, style: Style) {
        for y in r.top()..r.bottom() {
            for x in r.left()..r.right() {
                self.set(x, y, symbol, style);
            }
        }
    }

    /// Mark only the border cells of `r`.
    pub fn outline(&mut self, r: Rect, symbol: &'static str, style: Style) {
        if r.width == 0 || r.height == 0 {
            return;
        }
        for x in r.left()..r.right() {
            self.set(x, r.top(), symbol, style);
            self.set(x, r.bottom() - 1, symbol, style);
        }
        for y in r.top()..r.bottom() {
            self.set(r.left(), y, symbol, style);
            self.set(r.right() - 1, y, symbol, style);
        }
    }

    pub fn symbol_at(&self, x: u16, y: u16) -> Option<&'static str> {
        self.index(x, y).map(|i| self.cells[i].symbol)
    }

    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.symbol_at(x, y))
            .collect()
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        let width = self.width.max(1) as usize;
        self.cells
            .chunks(width)
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|c| Span::styled(c.symbol, c.style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

/// Compose the scene for a `width` x `height` play area.
pub fn build_scene(game: &Game, width: u16, height: u16) -> SceneGrid {
    let sky = Style::default().bg(SKY);
    let mut grid = SceneGrid::new(width, height, sky);
    if width == 0 || height == 0 {
        return grid;
    }
    let camera = Camera::new(Rect::new(0, 0, width, height));

    // Ground strip along the floor
    grid.fill(
        Rect::new(0, height - 1, width, 1),
        " ",
        Style::default().bg(GROUND),
    );

    let body = Style::default().fg(PIPE).bg(SKY);
    let cap = Style::default().fg(PIPE_CAP).bg(SKY);
    for pair in &game.obstacles {
        if let Some(r) = camera.project_box(&pair.top_box()) {
            grid.fill(r, sprites::PIPE_BODY, body);
            grid.fill(
                Rect::new(r.x, r.bottom() - 1, r.width, 1),
                sprites::PIPE_CAP_TOP,
                cap,
            );
        }
        if let Some(r) = camera.project_box(&pair.bottom_box()) {
            grid.fill(r, sprites::PIPE_BODY, body);
            grid.fill(
                Rect::new(r.x, r.y, r.width, 1),
                sprites::PIPE_CAP_BOTTOM,
                cap,
            );
        }
    }

    draw_bird(&mut grid, &camera, game);

    if game.show_hitboxes {
        let style = Style::default().fg(Color::Magenta).bg(SKY);
        let boxes = game
            .obstacles
            .iter()
            .flat_map(|p| p.boxes())
            .chain(std::iter::once(game.bird.bounds()));
        for b in boxes {
            outline_box(&mut grid, &camera, &b, style);
        }
    }

    grid
}

fn outline_box(grid: &mut SceneGrid, camera: &Camera, b: &Aabb, style: Style) {
    if let Some(r) = camera.project_box(b) {
        grid.outline(r, sprites::HITBOX, style);
    }
}

/// The sprite is centered on the bird's cell and shifted to stay on screen.
fn draw_bird(grid: &mut SceneGrid, camera: &Camera, game: &Game) {
    let Some((col, row)) = camera.world_to_cell(game.bird.pos) else {
        return;
    };

    let dead = game.is_dying();
    let sprite = sprites::bird_sprite(game.bird.wing, dead);
    let style = sprites::bird_style(dead);
    let len = sprite.chars().count() as u16;
    let start = col
        .saturating_sub(len / 2)
        .min(grid.width().saturating_sub(len));

    for (offset, (i, ch)) in sprite.char_indices().enumerate() {
        let glyph = &sprite[i..i + ch.len_utf8()];
        grid.set(start + offset as u16, row, glyph, style);
    }
}

pub fn render_play_area(frame: &mut Frame, area: Rect, game: &Game) {
    let grid = build_scene(game, area.width, area.height);
    frame.render_widget(Paragraph::new(grid.into_lines()), area);
}
