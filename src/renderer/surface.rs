//! The 2D drawing surface the scene is rendered onto
//!
//! Deliberately small: rectangles, rounded rectangles, lines, text, linear
//! gradients and image blits. The browser backend maps these onto Canvas 2D;
//! tests and the headless runner record them.

use glam::Vec2;

use crate::assets::AssetRole;
use crate::sim::Rect;

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Two-stop linear gradient in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub from: Vec2,
    pub to: Vec2,
    pub start: Color,
    pub end: Color,
}

/// Fill style
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Line style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    /// The platform UI font stack
    System,
    Arial,
}

impl FontFamily {
    pub fn as_css(&self) -> &'static str {
        match self {
            FontFamily::System => "-apple-system, BlinkMacSystemFont, \"Segoe UI\", sans-serif",
            FontFamily::Arial => "Arial",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub px: u32,
    pub bold: bool,
    pub family: FontFamily,
}

impl Font {
    pub const fn system(px: u32) -> Self {
        Self {
            px,
            bold: false,
            family: FontFamily::System,
        }
    }

    pub const fn bold(px: u32) -> Self {
        Self {
            px,
            bold: true,
            family: FontFamily::System,
        }
    }

    /// CSS font shorthand
    pub fn to_css(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{}{}px {}", weight, self.px, self.family.as_css())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub color: Color,
    pub align: TextAlign,
}

/// Drawing primitives needed by the scene
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke);

    /// `at` is the baseline anchor, interpreted per `style.align`
    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle);

    /// Blit a loaded image scaled into `rect`
    fn draw_image(&mut self, role: AssetRole, rect: Rect);
}
