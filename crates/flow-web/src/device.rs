use flow_core::{classify, is_mobile_user_agent, Capability, DeviceProfile, WEBGL_CONTEXT_KINDS};
use wasm_bindgen::JsValue;
use web_sys as web;

/// Probe what the browser reports about the device. Every probe degrades to
/// "unknown" rather than failing.
pub fn profile(window: &web::Window, document: &web::Document) -> DeviceProfile {
    let navigator = window.navigator();
    let cores = navigator.hardware_concurrency();
    let cores = (cores.is_finite() && cores > 0.0).then_some(cores as u32);
    // `deviceMemory` is Chromium-only and absent from web-sys
    let memory_gb = js_sys::Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|m| m as f32);
    let is_mobile = navigator
        .user_agent()
        .map(|ua| is_mobile_user_agent(&ua))
        .unwrap_or(false);
    DeviceProfile {
        cores,
        memory_gb,
        is_mobile,
        has_webgl: has_webgl(document),
    }
}

fn has_webgl(document: &web::Document) -> bool {
    let Ok(el) = document.create_element("canvas") else {
        return false;
    };
    let Ok(canvas) = wasm_bindgen::JsCast::dyn_into::<web::HtmlCanvasElement>(el) else {
        return false;
    };
    WEBGL_CONTEXT_KINDS
        .iter()
        .any(|kind| matches!(canvas.get_context(kind), Ok(Some(_))))
}

pub fn detect(window: &web::Window, document: &web::Document) -> Capability {
    let p = profile(window, document);
    let tier = classify(&p);
    log::info!(
        "[device] cores={:?} memory={:?} mobile={} webgl={} -> {}",
        p.cores,
        p.memory_gb,
        p.is_mobile,
        p.has_webgl,
        tier.as_str()
    );
    tier
}
