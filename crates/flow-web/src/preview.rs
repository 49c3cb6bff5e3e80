use crate::dom;
use flow_core::{ACCENT_RGB, PREVIEW_DOT_RADIUS, PREVIEW_HEIGHT, PREVIEW_WIDTH};
use glam::Vec2;
use web_sys as web;

pub const PREVIEW_ID: &str = "hand-preview";

/// Small mirrored camera view with the detected landmarks on top.
pub struct Preview {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Preview {
    pub fn find(document: &web::Document) -> Option<Self> {
        let canvas: web::HtmlCanvasElement = dom::element_by_id(document, PREVIEW_ID)?;
        canvas.set_width(PREVIEW_WIDTH);
        canvas.set_height(PREVIEW_HEIGHT);
        let ctx = dom::context_2d(&canvas)?;
        canvas.set_hidden(true);
        Some(Self { canvas, ctx })
    }

    pub fn set_visible(&self, visible: bool) {
        self.canvas.set_hidden(!visible);
    }

    pub fn draw(&self, video: &web::HtmlVideoElement, landmarks: Option<&[Vec2]>) {
        let (w, h) = (PREVIEW_WIDTH as f64, PREVIEW_HEIGHT as f64);
        self.ctx.save();
        let _ = self.ctx.translate(w, 0.0);
        let _ = self.ctx.scale(-1.0, 1.0);
        self.ctx.set_filter("saturate(0.15)");
        let _ = self
            .ctx
            .draw_image_with_html_video_element_and_dw_and_dh(video, 0.0, 0.0, w, h);
        self.ctx.restore();

        let Some(points) = landmarks else {
            return;
        };
        let [r, g, b] = ACCENT_RGB;
        self.ctx.set_fill_style_str(&format!("rgb({}, {}, {})", r, g, b));
        for p in points {
            // landmarks are in camera space; mirror to match the video
            let x = (1.0 - p.x as f64) * w;
            let y = p.y as f64 * h;
            self.ctx.begin_path();
            let _ = self
                .ctx
                .arc(x, y, PREVIEW_DOT_RADIUS, 0.0, std::f64::consts::TAU);
            self.ctx.fill();
        }
    }
}
