//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! # Sub-cell rasterization
//!
//! World rectangles have continuous positions. A rectangle whose edges fall
//! between cell boundaries is drawn with eighth-block glyphs: the cell holding
//! the far edge gets a partial block, and the cell holding the near edge gets
//! the same glyph with foreground and background swapped so the uncovered
//! part shows through. Vertical rectangles use the lower-eighth blocks,
//! horizontal ones the left-eighth blocks.
//!
//! # Pass order
//!
//! Trail, goals, box, top bar, bottom bar, prompt. Later writes win.

use crate::color::{blend, Color, Palette};
use crate::core::GameState;
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::input::Prompt;
use crate::types::{GoalState, Object, Size, Vec2};

/// Lower-eighth blocks indexed by covered eighths (0 = empty).
pub const VERTICAL_EIGHTHS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
/// Left-eighth blocks indexed by covered eighths (0 = empty).
pub const HORIZONTAL_EIGHTHS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];
pub const FULL_BLOCK: char = '█';

pub const TITLE: &str = "FLOATYBOX v0.1.0";
pub const START_HINT: &str = "Click or <Space> to float!";
pub const NEW_HIGH_SCORE: &str = "New High Score!";
pub const CLOSE_BUTTON: &str = "[X]";

/// First column of the time-scale meter track in the top bar.
const METER_X: u16 = 5;
/// Meter track length in cells at time scale 1.0.
const METER_WIDTH: u32 = 13;

/// Per-frame values that live outside the game state.
#[derive(Debug, Clone, Copy)]
pub struct Hud<'a> {
    pub fps: f64,
    pub time_scale: f64,
    pub prompt: Option<&'a Prompt>,
}

impl Default for Hud<'_> {
    fn default() -> Self {
        Self {
            fps: 0.0,
            time_scale: 1.0,
            prompt: None,
        }
    }
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    color: bool,
    palette: Palette,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(true)
    }
}

impl GameView {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            palette: Palette::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn toggle_color(&mut self) -> bool {
        self.color = !self.color;
        self.color
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// The framebuffer is resized to the playfield. Callers can reuse it
    /// across frames.
    pub fn render_into(&self, game: &GameState, hud: &Hud<'_>, fb: &mut FrameBuffer) {
        let width = game.width().min(u16::MAX as u32) as u16;
        let height = game.height().min(u16::MAX as u32) as u16;
        fb.resize(width, height);
        fb.clear(Cell::blank(self.base_style()));

        self.draw_trails(game, fb);
        self.draw_goals(game, fb);
        self.draw_box(game, fb);
        self.draw_ui_top(game, hud, fb);
        self.draw_ui_bottom(game, fb);
        if let Some(prompt) = hud.prompt {
            self.draw_prompt(prompt, fb);
        }
    }

    /// Style of empty playfield cells.
    fn base_style(&self) -> CellStyle {
        if self.color {
            CellStyle {
                fg: Color::Rgb(self.palette.ui),
                bg: Color::Rgb(self.palette.bg),
                ..CellStyle::default()
            }
        } else {
            CellStyle::default()
        }
    }

    /// Style for a game object drawn in `fg` at `alpha` over the background.
    fn object_style(&self, fg: crate::color::Rgb, alpha: f64) -> CellStyle {
        if !self.color {
            return CellStyle::default();
        }
        let bg = Color::Rgb(self.palette.bg);
        CellStyle {
            fg: blend(Color::Rgb(fg), bg, alpha),
            bg,
            ..CellStyle::default()
        }
    }

    fn bar_style(&self) -> CellStyle {
        if self.color {
            CellStyle {
                fg: Color::Rgb(self.palette.ui),
                bg: Color::Rgb(self.palette.ui_bg),
                bold: true,
                ..CellStyle::default()
            }
        } else {
            CellStyle {
                reverse: true,
                ..CellStyle::default()
            }
        }
    }

    /// The near-edge style: swapped colors, or reverse video without color.
    fn cut_style(&self, style: CellStyle) -> CellStyle {
        if self.color {
            style.swapped()
        } else {
            CellStyle {
                reverse: true,
                ..style
            }
        }
    }

    /// Rasterize a rectangle with 1/8-cell vertical resolution.
    pub fn draw_vertical(&self, fb: &mut FrameBuffer, obj: &Object, style: CellStyle) {
        let frac = eighths(obj.position.y + obj.size.y as f64);
        if frac == 0 {
            for y in 0..obj.size.y {
                for x in 0..obj.size.x {
                    put_world(fb, obj.position + offset(x, y), FULL_BLOCK, style);
                }
            }
            return;
        }

        for y in 0..=obj.size.y {
            let (glyph, row_style) = if y == 0 {
                (VERTICAL_EIGHTHS[frac], self.cut_style(style))
            } else if y == obj.size.y {
                (VERTICAL_EIGHTHS[frac], style)
            } else {
                (FULL_BLOCK, style)
            };
            for x in 0..obj.size.x {
                put_world(fb, obj.position + offset(x, y), glyph, row_style);
            }
        }
    }

    /// Rasterize a rectangle with 1/8-cell horizontal resolution.
    pub fn draw_horizontal(&self, fb: &mut FrameBuffer, obj: &Object, style: CellStyle) {
        let frac = eighths(obj.position.x + obj.size.x as f64);
        if frac == 0 {
            for x in 0..obj.size.x {
                for y in 0..obj.size.y {
                    put_world(fb, obj.position + offset(x, y), FULL_BLOCK, style);
                }
            }
            return;
        }

        for x in 0..=obj.size.x {
            let (glyph, col_style) = if x == 0 {
                (HORIZONTAL_EIGHTHS[frac], self.cut_style(style))
            } else if x == obj.size.x {
                (HORIZONTAL_EIGHTHS[frac], style)
            } else {
                (FULL_BLOCK, style)
            };
            for y in 0..obj.size.y {
                put_world(fb, obj.position + offset(x, y), glyph, col_style);
            }
        }
    }

    fn draw_trails(&self, game: &GameState, fb: &mut FrameBuffer) {
        let trail = game.trail();
        let len = trail.len();
        if len < 2 {
            return;
        }
        for i in 0..len - 1 {
            if trail[i].position.y < trail[i + 1].position.y {
                self.draw_trail(trail, i, fb);
            }
        }
        if trail[len - 2].position.y < trail[len - 1].position.y {
            self.draw_trail(trail, len - 1, fb);
        }
    }

    fn draw_trail(&self, trail: &[Object], i: usize, fb: &mut FrameBuffer) {
        let style = self.object_style(self.palette.trail, trail_alpha(i, trail.len()));
        self.draw_vertical(fb, &trail[i], style);
    }

    fn draw_goals(&self, game: &GameState, fb: &mut FrameBuffer) {
        let box_x = game.player().object.position.x;
        let width = game.width() as f64;
        for goal in game.goals().iter() {
            let fg = match goal.state {
                GoalState::Unresolved => self.palette.goal,
                GoalState::Passed => self.palette.goal_pass,
                GoalState::Missed => self.palette.goal_miss,
            };
            for sprite in &goal.sprites {
                let alpha = goal_alpha(sprite, goal.state, box_x, width);
                self.draw_vertical(fb, sprite, self.object_style(fg, alpha));
            }
        }
    }

    fn draw_box(&self, game: &GameState, fb: &mut FrameBuffer) {
        let style = self.object_style(self.palette.player, 1.0);
        self.draw_vertical(fb, &game.player().object, style);
    }

    fn draw_ui_top(&self, game: &GameState, hud: &Hud<'_>, fb: &mut FrameBuffer) {
        let width = fb.width();
        if fb.height() == 0 {
            return;
        }
        let row = 0;
        let style = self.bar_style();
        fb.fill_rect(0, row, width, 1, ' ', style);

        if hud.time_scale != 1.0 {
            self.draw_meter(game, hud.time_scale, fb);
            fb.fill_rect(0, row, METER_X.min(width), 1, ' ', style);
        }

        fb.put_str(centered(width, TITLE), row, TITLE, style);

        let fps = if hud.fps.is_finite() { hud.fps.round() as i64 } else { 0 };
        fb.put_str(0, row, &fps.to_string(), style);

        let button = if self.color {
            CellStyle {
                fg: Color::Rgb(self.palette.button),
                ..style
            }
        } else {
            style
        };
        fb.put_str(width.saturating_sub(CLOSE_BUTTON.len() as u16), row, CLOSE_BUTTON, button);
    }

    /// Time-scale meter: a bar sliding out of the track's left end so its
    /// right edge sits at `time_scale` of the track.
    fn draw_meter(&self, game: &GameState, time_scale: f64, fb: &mut FrameBuffer) {
        let title_x = centered(fb.width(), TITLE);
        if METER_X as u32 + METER_WIDTH + 1 > title_x as u32 {
            return;
        }
        let filled = time_scale.clamp(0.0, 1.0) * METER_WIDTH as f64;
        let bar = Object::new(
            Size::new(METER_WIDTH, 1),
            Vec2::new(METER_X as f64 - METER_WIDTH as f64 + filled, game.height() as f64 - 1.0),
        );
        let style = if self.color {
            CellStyle {
                fg: Color::Rgb(self.palette.meter),
                bg: Color::Rgb(self.palette.ui_bg),
                ..CellStyle::default()
            }
        } else {
            CellStyle::default()
        };
        self.draw_horizontal(fb, &bar, style);
    }

    fn draw_ui_bottom(&self, game: &GameState, fb: &mut FrameBuffer) {
        let width = fb.width();
        let Some(row) = fb.height().checked_sub(1) else {
            return;
        };
        let style = self.bar_style();
        fb.fill_rect(0, row, width, 1, ' ', style);

        let score = game.score().to_string();
        fb.put_str(0, row, &score, style);
        let high = game.high_score().to_string();
        fb.put_str(width.saturating_sub(high.len() as u16), row, &high, style);

        if !game.playing() {
            fb.put_str(centered(width, START_HINT), row, START_HINT, style);
        } else if game.is_new_high() {
            fb.put_str(centered(width, NEW_HIGH_SCORE), row, NEW_HIGH_SCORE, style);
        }
    }

    fn draw_prompt(&self, prompt: &Prompt, fb: &mut FrameBuffer) {
        if !prompt.is_active() {
            return;
        }
        let width = fb.width();
        let Some(row) = fb.height().checked_sub(1) else {
            return;
        };
        let style = if self.color {
            CellStyle {
                fg: Color::Rgb(self.palette.prompt),
                bg: Color::Rgb(self.palette.bg),
                ..CellStyle::default()
            }
        } else {
            CellStyle::default()
        };
        fb.fill_rect(0, row, width, 1, ' ', style);
        fb.put_char(0, row, ':', style);
        fb.put_str(1, row, &prompt.text(), style);

        let cursor = (prompt.cursor() + 1).min(u16::MAX as usize) as u16;
        fb.reverse_cell(cursor, row);
    }
}

/// Covered eighths of the cell containing edge `v`.
fn eighths(v: f64) -> usize {
    ((v * 8.0).floor() as i64).rem_euclid(8) as usize
}

/// Column where `text` starts when centered in `width`.
fn centered(width: u16, text: &str) -> u16 {
    width.saturating_sub(text.chars().count() as u16) / 2
}

fn offset(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f64, y as f64)
}

/// Write one glyph at a world position (y up, bottom row 0).
fn put_world(fb: &mut FrameBuffer, pos: Vec2, ch: char, style: CellStyle) {
    let (col, row) = (pos.x.floor(), pos.y.floor());
    if !(col >= 0.0 && row >= 0.0) {
        return;
    }
    let (col, row) = (col as u64, row as u64);
    let height = fb.height() as u64;
    if col >= fb.width() as u64 || row >= height {
        return;
    }
    fb.put_char(col as u16, (height - 1 - row) as u16, ch, style);
}

/// Trail slot `i` of `len` fades in from the tail.
pub fn trail_alpha(i: usize, len: usize) -> f64 {
    if len == 0 {
        return 1.0;
    }
    i as f64 / len as f64
}

/// Opacity of a goal sprite given the box x and the playfield width.
///
/// Passed goals fade out once fully behind the box; every goal fades in from
/// the right edge as it approaches the box.
pub fn goal_alpha(sprite: &Object, state: GoalState, box_x: f64, width: f64) -> f64 {
    let right = sprite.position.x + sprite.size.x as f64;
    let alpha = if state == GoalState::Passed && right < box_x {
        right / box_x
    } else if sprite.position.x > box_x {
        (sprite.position.x - width) / (box_x - width)
    } else {
        1.0
    };
    if alpha.is_nan() {
        1.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}
