use crate::core::{Canvas2d, Rgba};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `Canvas2d` over a browser 2D context, drawing in CSS pixels.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the canvas has no 2D context (unsupported or already
    /// claimed by another context type).
    pub fn acquire(canvas: &web::HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Reset the transform so one unit is one CSS pixel.
    pub fn set_pixel_ratio(&self, dpr: f64) {
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }
}

impl Canvas2d for CanvasSurface {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(&color.css());
        ctx.set_line_width(width as f64);
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow_blur: f32) {
        let ctx = &self.ctx;
        let css = color.css();
        ctx.begin_path();
        _ = ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        ctx.set_fill_style_str(&css);
        ctx.set_shadow_color(&css);
        ctx.set_shadow_blur(glow_blur as f64);
        ctx.fill();
        ctx.set_shadow_blur(0.0);
    }
}
