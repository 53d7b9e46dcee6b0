//! Browser 2D canvas backend

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::draw::{Assets, Surface};
use crate::sim::{AssetId, Drawable};

/// A decoded `<img>`
#[derive(Debug, Clone)]
pub struct HtmlImage(pub HtmlImageElement);

impl HtmlImage {
    /// Start loading `src` and wait until the browser has decoded it
    pub async fn load(src: &str) -> Result<Self, JsValue> {
        let img = HtmlImageElement::new()?;
        img.set_src(src);
        JsFuture::from(img.decode()).await?;
        Ok(Self(img))
    }
}

impl Drawable for HtmlImage {
    fn intrinsic_size(&self) -> Vec2 {
        Vec2::new(self.0.natural_width() as f32, self.0.natural_height() as f32)
    }
}

/// Load the ball, goal and hole images relative to the page
pub async fn load_assets() -> Result<Assets<HtmlImage>, JsValue> {
    Ok(Assets {
        ball: HtmlImage::load(AssetId::Ball.file_name()).await?,
        goal: HtmlImage::load(AssetId::Goal.file_name()).await?,
        hole: HtmlImage::load(AssetId::Hole.file_name()).await?,
    })
}

/// `CanvasRenderingContext2d` as a [`Surface`]
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Grab the 2D context and set up the banner text style
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        ctx.set_font("bold 72px sans-serif");
        ctx.set_text_align("center");
        ctx.set_stroke_style_str("#ffffff");
        ctx.set_line_width(8.0);
        ctx.set_line_join("round");
        ctx.set_fill_style_str("#00008b");

        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImage;

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.clear_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn draw_image(&mut self, image: &HtmlImage, x: f32, y: f32, w: f32, h: f32) {
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &image.0, x as f64, y as f64, w as f64, h as f64,
        ) {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        let _ = self.ctx.stroke_text(text, x as f64, y as f64);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        let _ = self.ctx.translate(dx as f64, dy as f64);
    }
}
