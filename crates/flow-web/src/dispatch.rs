use flow_core::{PointerEvent, PointerTarget, ScrollCommand};
use web_sys as web;

/// Replay bridge output as real DOM mouse events. Element events bubble;
/// the window-level move does not.
pub fn dispatch_pointer_events(window: &web::Window, events: &[PointerEvent<web::Element>]) {
    for ev in events {
        let init = web::MouseEventInit::new();
        init.set_bubbles(matches!(ev.target, PointerTarget::Element(_)));
        init.set_client_x(ev.x as i32);
        init.set_client_y(ev.y as i32);
        let mouse = match web::MouseEvent::new_with_mouse_event_init_dict(ev.kind.dom_type(), &init) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("[bridge] could not build {}: {:?}", ev.kind.dom_type(), e);
                continue;
            }
        };
        let _ = match &ev.target {
            PointerTarget::Window => window.dispatch_event(&mouse),
            PointerTarget::Element(el) => el.dispatch_event(&mouse),
        };
    }
}

pub fn scroll_to_section(document: &web::Document, cmd: &ScrollCommand) {
    let Some(target) = document.get_element_by_id(&cmd.section) else {
        return;
    };
    let opts = web::ScrollIntoViewOptions::new();
    opts.set_behavior(web::ScrollBehavior::Smooth);
    target.scroll_into_view_with_scroll_into_view_options(&opts);
}
