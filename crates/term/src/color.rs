//! Colors, alpha fading and the game palette.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Linear interpolation towards `other`; `t` is clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// A cell color: either the terminal's own default or an explicit RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Rgb(Rgb),
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb)
    }
}

/// Composite `fg` at `alpha` over `bg`.
///
/// Only RGB pairs can be blended; anything involving the terminal default
/// returns `fg` unchanged.
pub fn blend(fg: Color, bg: Color, alpha: f64) -> Color {
    match (fg, bg) {
        (Color::Rgb(fg), Color::Rgb(bg)) => Color::Rgb(bg.lerp(fg, alpha)),
        _ => fg,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Rgb,
    pub prompt: Rgb,
    pub ui: Rgb,
    pub ui_bg: Rgb,
    pub button: Rgb,
    pub meter: Rgb,
    pub player: Rgb,
    pub trail: Rgb,
    pub goal: Rgb,
    pub goal_pass: Rgb,
    pub goal_miss: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bg: Rgb::from_hex(0x1b1e24),
            prompt: Rgb::from_hex(0xabb2bf),
            ui: Rgb::from_hex(0xabb2bf),
            ui_bg: Rgb::from_hex(0x3e4452),
            button: Rgb::from_hex(0xabb2bf),
            meter: Rgb::from_hex(0xe5c07b),
            player: Rgb::from_hex(0xdf6c3e),
            trail: Rgb::from_hex(0xabb2bf),
            goal: Rgb::from_hex(0x61afef),
            goal_pass: Rgb::from_hex(0xe5c07b),
            goal_miss: Rgb::from_hex(0xd30946),
        }
    }
}
