//! Terminal renderer
//!
//! Projects the 800x600 world onto character cells (16 px per column,
//! 25 px per row) and composes each frame into an off-screen cell buffer
//! that is flushed in one queued pass. Row 0 is the HUD; the world
//! starts on row 1. Rendering only reads the simulation state, never
//! mutates it.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
};
use glam::Vec2;

use crate::consts::COLLECTIBLE_SIZE;
use crate::sim::{CollectibleKind, Facing, GameState, GameStatus, ParticleColor};

/// World pixels per terminal column.
const CELL_W: f32 = 16.0;
/// World pixels per terminal row.
const CELL_H: f32 = 25.0;

const PLATFORM_GREY: Color = Color::Rgb { r: 0x3d, g: 0x3d, b: 0x3d };
const STAR_YELLOW: Color = Color::Rgb { r: 0xff, g: 0xf1, b: 0x76 };
const SNITCH_GOLD: Color = Color::Rgb { r: 0xd3, g: 0xa6, b: 0x25 };
const ENEMY_SLATE: Color = Color::Rgb { r: 0x2c, g: 0x3e, b: 0x50 };
const KNOCK_RED: Color = Color::Rgb { r: 0x74, g: 0x00, b: 0x01 };
const PLAYER_GOLD: Color = SNITCH_GOLD;

/// Run/idle cycle glyphs, indexed by the whole part of `anim_frame`.
const PLAYER_FRAMES: [char; 2] = ['@', 'O'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
};

/// Off-screen character buffer sized to the terminal.
pub struct Screen {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells.clear();
        self.cells.resize(cols as usize * rows as usize, BLANK);
    }

    /// Composes one frame of `state` and flushes it to `out`.
    pub fn draw(&mut self, out: &mut impl Write, state: &GameState) -> io::Result<()> {
        self.cells.fill(BLANK);

        self.draw_platforms(state);
        self.draw_collectibles(state);
        self.draw_enemies(state);
        self.draw_particles(state);
        self.draw_player(state);
        self.draw_hud(state);

        match state.status {
            GameStatus::Start => self.draw_title(),
            GameStatus::Quiz => self.draw_quiz(state),
            GameStatus::GameOver => self.draw_game_over(state),
            GameStatus::Won => self.draw_won(state),
            GameStatus::Playing => {}
        }

        self.present(out)
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32 {
            self.cells[row as usize * self.cols as usize + col as usize] = Cell { ch, fg };
        }
    }

    fn put_str(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, fg);
        }
    }

    fn put_centered(&mut self, row: i32, text: &str, fg: Color) {
        let col = (self.cols as i32 - text.chars().count() as i32) / 2;
        self.put_str(col, row, text, fg);
    }

    /// Maps a world point to a (col, row) cell under the camera.
    fn cell_at(&self, world: Vec2, camera_x: f32) -> (i32, i32) {
        (
            ((world.x - camera_x) / CELL_W).floor() as i32,
            (world.y / CELL_H).floor() as i32 + 1,
        )
    }

    /// Fills every cell covered by a world-space box.
    fn fill_box(&mut self, pos: Vec2, size: Vec2, camera_x: f32, ch: char, fg: Color) {
        let x0 = ((pos.x - camera_x) / CELL_W).floor() as i32;
        let x1 = ((pos.x + size.x - camera_x) / CELL_W).ceil() as i32;
        let y0 = (pos.y / CELL_H).floor() as i32 + 1;
        let y1 = ((pos.y + size.y) / CELL_H).ceil() as i32 + 1;
        for row in y0..y1 {
            for col in x0..x1 {
                self.put(col, row, ch, fg);
            }
        }
    }

    fn draw_platforms(&mut self, state: &GameState) {
        for platform in &state.platforms {
            self.fill_box(platform.pos, platform.size, state.camera_x, '█', PLATFORM_GREY);
        }
    }

    fn draw_collectibles(&mut self, state: &GameState) {
        for c in &state.collectibles {
            if c.collected {
                continue;
            }
            let (ch, fg) = match c.kind {
                CollectibleKind::Star => ('*', STAR_YELLOW),
                CollectibleKind::Snitch => ('o', SNITCH_GOLD),
            };
            let center = c.pos + Vec2::splat(COLLECTIBLE_SIZE / 2.0);
            let (col, row) = self.cell_at(center, state.camera_x);
            self.put(col, row, ch, fg);
        }
    }

    fn draw_enemies(&mut self, state: &GameState) {
        for enemy in &state.enemies {
            self.fill_box(enemy.pos, enemy.size, state.camera_x, '▓', ENEMY_SLATE);
        }
    }

    fn draw_particles(&mut self, state: &GameState) {
        for p in &state.particles {
            let ch = if p.life() > 0.5 { '•' } else { '·' };
            let fg = match p.color {
                ParticleColor::White => Color::White,
                ParticleColor::Gold => SNITCH_GOLD,
                ParticleColor::Red => KNOCK_RED,
            };
            let (col, row) = self.cell_at(p.pos, state.camera_x);
            self.put(col, row, ch, fg);
        }
    }

    fn draw_player(&mut self, state: &GameState) {
        let p = &state.player;
        let frame = PLAYER_FRAMES[p.anim_frame as usize % PLAYER_FRAMES.len()];
        self.fill_box(p.pos, p.size, state.camera_x, frame, PLAYER_GOLD);

        // Direction marker on the leading edge, middle row.
        let mid = p.pos + p.size / 2.0;
        let row = (mid.y / CELL_H).floor() as i32 + 1;
        match p.facing {
            Facing::Right => {
                let col = ((p.pos.x + p.size.x - state.camera_x) / CELL_W).ceil() as i32 - 1;
                self.put(col, row, '»', PLAYER_GOLD);
            }
            Facing::Left => {
                let col = ((p.pos.x - state.camera_x) / CELL_W).floor() as i32;
                self.put(col, row, '«', PLAYER_GOLD);
            }
        }
    }

    fn draw_hud(&mut self, state: &GameState) {
        let hud = format!(
            "SCORE {:05}  STARS {}/{}",
            state.score,
            state.stars_collected(),
            state.stars_total()
        );
        self.put_str(1, 0, &hud, Color::White);
    }

    fn draw_title(&mut self) {
        let mid = self.rows as i32 / 2;
        self.put_centered(mid - 3, "Q U I Z   D A S H", STAR_YELLOW);
        self.put_centered(mid - 1, "run with a/d or the arrow keys, jump with space", Color::White);
        self.put_centered(mid, "stars quiz you, the golden snitch wins the game", Color::White);
        self.put_centered(mid + 2, "press enter to start", Color::Grey);
    }

    fn draw_quiz(&mut self, state: &GameState) {
        let Some(active) = &state.active_quiz else {
            return;
        };
        let width = (self.cols as usize).saturating_sub(8).clamp(20, 52);
        let lines = wrap(&active.question.prompt, width);

        let body = lines.len() as i32 + active.question.options.len() as i32 + 3;
        let mut row = (self.rows as i32 - body) / 2;
        for line in &lines {
            self.put_centered(row, line, Color::White);
            row += 1;
        }
        row += 1;
        for (i, option) in active.question.options.iter().enumerate() {
            let text = format!("{}) {}", i + 1, option);
            self.put_centered(row, &text, STAR_YELLOW);
            row += 1;
        }
        row += 1;
        self.put_centered(row, "press 1-4 to answer", Color::Grey);
    }

    fn draw_game_over(&mut self, state: &GameState) {
        let mid = self.rows as i32 / 2;
        self.put_centered(mid - 1, "G A M E   O V E R", KNOCK_RED);
        self.put_centered(mid + 1, &format!("score {}", state.score), Color::White);
        self.put_centered(mid + 2, "press enter to retry", Color::Grey);
    }

    fn draw_won(&mut self, state: &GameState) {
        let mid = self.rows as i32 / 2;
        self.put_centered(mid - 1, "YOU CAUGHT THE SNITCH", SNITCH_GOLD);
        self.put_centered(mid + 1, &format!("final score {}", state.score), Color::White);
        self.put_centered(mid + 2, "press enter to play again", Color::Grey);
    }

    /// One queued pass over the buffer, batching runs of the same color.
    fn present(&self, out: &mut impl Write) -> io::Result<()> {
        for row in 0..self.rows {
            queue!(out, cursor::MoveTo(0, row))?;
            let mut fg = Color::Reset;
            queue!(out, style::SetForegroundColor(fg))?;
            let mut run = String::new();
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if cell.fg != fg {
                    if !run.is_empty() {
                        queue!(out, style::Print(&run))?;
                        run.clear();
                    }
                    fg = cell.fg;
                    queue!(out, style::SetForegroundColor(fg))?;
                }
                run.push(cell.ch);
            }
            if !run.is_empty() {
                queue!(out, style::Print(&run))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

/// Greedy word wrap. Words longer than `width` get their own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
