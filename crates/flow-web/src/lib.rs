#![cfg(target_arch = "wasm32")]
mod device;
mod dispatch;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod poem;
mod preview;
mod tracking;

use flow_core::{Capability, FlowField, FlowParams};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub const CANVAS_ID: &str = "flow-canvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("flow-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn random_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("[flow] no entropy source ({}); using fixed seed", e);
            42
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let reduced_motion = dom::prefers_reduced_motion(&window);
    let capability = device::detect(&window, &document);
    poem::init(&window, &document);

    let input = Rc::new(RefCell::new(input::SharedInput::default()));
    events::wire_input_handlers(events::InputWiring {
        window: window.clone(),
        document: document.clone(),
        input: input.clone(),
    });

    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;

    let frame_loop = match dom::context_2d(&canvas) {
        Some(ctx) => {
            let field = FlowField::new(
                FlowParams::default(),
                capability,
                reduced_motion,
                random_seed(),
            );
            let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
                field,
                canvas.clone(),
                ctx,
                input.clone(),
            )));
            frame_ctx.borrow_mut().resize();
            canvas.set_hidden(reduced_motion);
            Some(frame::start_loop(frame_ctx))
        }
        None => {
            log::warn!("[flow] 2D canvas context unavailable; flow field disabled");
            None
        }
    };

    if let Some(l) = frame_loop.clone() {
        events::wire_resize(&window, move || {
            l.context().borrow_mut().resize();
            l.resume();
        });
    }

    let controller = tracking::TrackingController::new(
        window.clone(),
        document.clone(),
        input,
        tracking::TrackerConfig::default(),
        capability == Capability::Low,
        reduced_motion,
    );
    controller.wire_controls();

    events::wire_reduced_motion(&window, move |reduced| {
        log::info!("[flow] reduced motion -> {}", reduced);
        if let Some(l) = &frame_loop {
            l.context().borrow_mut().set_reduced_motion(reduced);
            l.resume();
        }
        controller.set_reduced_motion(reduced);
    });

    Ok(())
}
