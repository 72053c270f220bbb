//! Recording surface
//!
//! Captures draw calls instead of rasterizing them. Used by the headless
//! runner and by tests to inspect what a frame would show.

use glam::Vec2;

use super::surface::{Paint, Stroke, Surface, TextStyle};
use crate::assets::AssetRole;
use crate::sim::Rect;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    FillRoundRect {
        rect: Rect,
        radius: f32,
        paint: Paint,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
    Text {
        text: String,
        at: Vec2,
        style: TextStyle,
    },
    Image {
        role: AssetRole,
        rect: Rect,
    },
}

/// Draw calls of one frame, in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// Images blitted, in order
    pub fn images(&self) -> Vec<AssetRole> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Image { role, .. } => Some(*role),
                _ => None,
            })
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Line { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCmd::FillRect { rect, paint: *paint });
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint) {
        self.commands.push(DrawCmd::FillRoundRect {
            rect,
            radius,
            paint: *paint,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            at,
            style: *style,
        });
    }

    fn draw_image(&mut self, role: AssetRole, rect: Rect) {
        self.commands.push(DrawCmd::Image { role, rect });
    }
}
