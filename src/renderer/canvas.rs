//! Canvas 2D backend (wasm32 only)

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::surface::{Paint, Stroke, Surface, TextStyle};
use crate::assets::AssetRole;
use crate::sim::Rect;

/// Draws onto an HTML canvas through its 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    player: HtmlImageElement,
    resignation: HtmlImageElement,
    sick_leave: HtmlImageElement,
}

fn warn_on_err(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("Canvas {} failed: {:?}", what, e);
    }
}

impl CanvasSurface {
    pub fn new(
        ctx: CanvasRenderingContext2d,
        player: HtmlImageElement,
        resignation: HtmlImageElement,
        sick_leave: HtmlImageElement,
    ) -> Self {
        Self {
            ctx,
            player,
            resignation,
            sick_leave,
        }
    }

    fn image(&self, role: AssetRole) -> &HtmlImageElement {
        match role {
            AssetRole::Player => &self.player,
            AssetRole::Resignation => &self.resignation,
            AssetRole::SickLeave => &self.sick_leave,
        }
    }

    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Linear(g) => {
                let gradient = self.ctx.create_linear_gradient(
                    g.from.x as f64,
                    g.from.y as f64,
                    g.to.x as f64,
                    g.to.y as f64,
                );
                warn_on_err("gradient stop", gradient.add_color_stop(0.0, &g.start.to_css()));
                warn_on_err("gradient stop", gradient.add_color_stop(1.0, &g.end.to_css()));
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }

    /// Trace a rounded rectangle path with arcTo corners
    fn round_rect_path(&self, rect: Rect, radius: f32) -> Result<(), JsValue> {
        let (x, y) = (rect.left() as f64, rect.top() as f64);
        let (r, b) = (rect.right() as f64, rect.bottom() as f64);
        let radius = (radius.min(rect.size.x / 2.0).min(rect.size.y / 2.0)).max(0.0) as f64;

        self.ctx.begin_path();
        self.ctx.move_to(x + radius, y);
        self.ctx.arc_to(r, y, r, b, radius)?;
        self.ctx.arc_to(r, b, x, b, radius)?;
        self.ctx.arc_to(x, b, x, y, radius)?;
        self.ctx.arc_to(x, y, r, y, radius)?;
        self.ctx.close_path();
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.set_fill(paint);
        self.ctx.fill_rect(
            rect.left() as f64,
            rect.top() as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint) {
        self.set_fill(paint);
        match self.round_rect_path(rect, radius) {
            Ok(()) => self.ctx.fill(),
            Err(e) => log::warn!("Canvas rounded rect failed: {:?}", e),
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle) {
        self.ctx.set_font(&style.font.to_css());
        self.ctx.set_text_align(style.align.as_css());
        self.ctx.set_fill_style_str(&style.color.to_css());
        warn_on_err("text", self.ctx.fill_text(text, at.x as f64, at.y as f64));
    }

    fn draw_image(&mut self, role: AssetRole, rect: Rect) {
        let result = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            self.image(role),
            rect.left() as f64,
            rect.top() as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
        warn_on_err("image", result);
    }
}
