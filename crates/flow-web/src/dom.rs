use flow_core::{SectionLayout, MAX_DEVICE_PIXEL_RATIO};
use wasm_bindgen::JsCast;
use web_sys as web;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[inline]
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Viewport size in CSS px.
#[inline]
pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

#[inline]
pub fn device_pixel_ratio(window: &web::Window) -> f64 {
    window.device_pixel_ratio().min(MAX_DEVICE_PIXEL_RATIO)
}

/// Size the canvas to cover the viewport: backing store at the capped device
/// pixel ratio, CSS box at viewport size. Resizing the backing store resets
/// the context transform, so the caller re-applies its scale afterwards.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Option<(f64, f64, f64)> {
    let window = web::window()?;
    let (w, h) = viewport_size(&window);
    let dpr = device_pixel_ratio(&window);
    canvas.set_width(((w * dpr) as u32).max(1));
    canvas.set_height(((h * dpr) as u32).max(1));
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", w));
    let _ = style.set_property("height", &format!("{}px", h));
    Some((w, h, dpr))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Fraction of the scrollable height currently scrolled past.
pub fn scroll_progress(window: &web::Window, document: &web::Document) -> f64 {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let (_, h) = viewport_size(window);
    let max_scroll = document
        .document_element()
        .map(|el| el.scroll_height() as f64 - h)
        .unwrap_or(0.0);
    if max_scroll > 0.0 {
        scroll_y / max_scroll
    } else {
        0.0
    }
}

/// Read each section's `offsetTop` along with the current scroll position.
pub fn section_layout(window: &web::Window, document: &web::Document, ids: &[String]) -> SectionLayout {
    let anchors = ids
        .iter()
        .map(|id| {
            element_by_id::<web::HtmlElement>(document, id).map(|el| el.offset_top() as f64)
        })
        .collect();
    SectionLayout {
        scroll_y: window.scroll_y().unwrap_or(0.0),
        viewport_height: viewport_size(window).1,
        anchors,
    }
}

#[inline]
pub fn set_hidden(document: &web::Document, id: &str, hidden: bool) {
    if let Some(el) = element_by_id::<web::HtmlElement>(document, id) {
        el.set_hidden(hidden);
    }
}
