use crate::dom;
use crate::input::{self, SharedInput};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub input: Rc<RefCell<SharedInput>>,
}

/// Pointer and scroll listeners feeding the flow field. Synthetic events
/// from hand tracking arrive through the same `mousemove` listener.
pub fn wire_input_handlers(w: InputWiring) {
    // mousemove
    {
        let input_m = w.input.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            input_m.borrow_mut().pointer = Some(input::pointer_client_px(&ev));
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .window
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // mouseleave on the document clears the pointer
    {
        let input_m = w.input.clone();
        let closure = Closure::wrap(Box::new(move || {
            input_m.borrow_mut().pointer = None;
        }) as Box<dyn FnMut()>);
        let _ = w
            .document
            .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // scroll
    {
        let input_m = w.input.clone();
        let window = w.window.clone();
        let document = w.document.clone();
        w.input.borrow_mut().last_scroll_y = window.scroll_y().unwrap_or(0.0);
        let closure = Closure::wrap(Box::new(move || {
            let y = window.scroll_y().unwrap_or(0.0);
            let progress = dom::scroll_progress(&window, &document);
            input_m.borrow_mut().on_scroll(y, progress);
        }) as Box<dyn FnMut()>);
        let _ = w
            .window
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_resize(window: &web::Window, mut on_resize: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || on_resize()) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Call `on_change` with the new value whenever the reduced-motion
/// preference flips.
pub fn wire_reduced_motion(window: &web::Window, mut on_change: impl FnMut(bool) + 'static) {
    let Some(mq) = window.match_media(dom::REDUCED_MOTION_QUERY).ok().flatten() else {
        log::warn!("[flow] matchMedia unavailable; reduced-motion changes ignored");
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::MediaQueryListEvent| {
        on_change(ev.matches());
    }) as Box<dyn FnMut(_)>);
    let _ = mq.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}
