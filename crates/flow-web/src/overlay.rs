use crate::dom;
use flow_core::{toggle_label, CursorRing, TrackingStatus, GUIDE_VISIBLE_MS};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const TOGGLE_ID: &str = "hand-toggle";
pub const CURSOR_ID: &str = "hand-cursor";
pub const GUIDE_ID: &str = "hand-guide";
pub const GUIDE_DISMISS_ID: &str = "hand-guide-dismiss";

pub fn render_toggle(document: &web::Document, status: TrackingStatus, visible: bool) {
    let Some(btn) = dom::element_by_id::<web::HtmlButtonElement>(document, TOGGLE_ID) else {
        return;
    };
    btn.set_hidden(!visible);
    btn.set_disabled(status.loading);
    let label = toggle_label(status);
    let _ = btn.set_attribute("aria-label", label);
    btn.set_title(label);
    let classes = btn.class_list();
    let _ = classes.toggle_with_force("active", status.enabled);
    let _ = classes.toggle_with_force("loading", status.loading);
}

pub fn render_cursor(document: &web::Document, ring: Option<CursorRing>) {
    let Some(el) = dom::element_by_id::<web::HtmlElement>(document, CURSOR_ID) else {
        return;
    };
    let Some(r) = ring else {
        el.set_hidden(true);
        return;
    };
    el.set_hidden(false);
    let style = el.style();
    // never the target of elementFromPoint
    let _ = style.set_property("pointer-events", "none");
    let _ = style.set_property(
        "transform",
        &format!("translate({:.1}px, {:.1}px)", r.left, r.top),
    );
    let _ = style.set_property("width", &format!("{}px", r.size));
    let _ = style.set_property("height", &format!("{}px", r.size));
    let _ = style.set_property("opacity", &format!("{}", r.opacity));
    let _ = style.set_property("--dot-size", &format!("{}px", r.dot));
}

/// The gesture guide panel, auto-hidden a few seconds after it appears.
#[derive(Clone, Default)]
pub struct Guide {
    timer: Rc<Cell<Option<i32>>>,
}

impl Guide {
    pub fn show(&self, window: &web::Window, document: &web::Document) {
        self.cancel_timer(window);
        dom::set_hidden(document, GUIDE_ID, false);
        let timer = self.timer.clone();
        let doc = document.clone();
        let cb = Closure::once_into_js(move || {
            timer.set(None);
            dom::set_hidden(&doc, GUIDE_ID, true);
        });
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                GUIDE_VISIBLE_MS as i32,
            )
            .ok();
        self.timer.set(id);
    }

    pub fn hide(&self, window: &web::Window, document: &web::Document) {
        self.cancel_timer(window);
        dom::set_hidden(document, GUIDE_ID, true);
    }

    fn cancel_timer(&self, window: &web::Window) {
        if let Some(id) = self.timer.take() {
            window.clear_timeout_with_handle(id);
        }
    }
}
