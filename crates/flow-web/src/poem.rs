use flow_core::poem::{parse_payload, pick_fallback, ENDPOINT, STORAGE_KEY};
use flow_core::POEM_IDLE_DELAY_MS;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub const POEM_ID: &str = "poem-text";

/// Show a cached or fallback fragment now, then try the endpoint once the
/// page has settled. Failures only ever leave the fallback in place.
pub fn init(window: &web::Window, document: &web::Document) {
    let Some(el) = document.get_element_by_id(POEM_ID) else {
        return;
    };
    let storage = window.session_storage().ok().flatten();
    if let Some(cached) = storage
        .as_ref()
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
    {
        show(&el, &cached, true);
        return;
    }
    show(&el, pick_fallback(js_sys::Math::random()), false);

    let win = window.clone();
    let cb = Closure::once_into_js(move || {
        spawn_local(async move {
            match fetch_poem(&win).await {
                Ok(text) => {
                    show(&el, &text, true);
                    if let Some(s) = storage {
                        let _ = s.set_item(STORAGE_KEY, &text);
                    }
                    log::info!("[poem] generated fragment loaded");
                }
                Err(e) => log::debug!("[poem] keeping fallback: {:#}", e),
            }
        });
    });
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        POEM_IDLE_DELAY_MS,
    );
}

fn show(el: &web::Element, text: &str, generated: bool) {
    el.set_text_content(Some(text));
    let _ = el.set_attribute("data-generated", if generated { "1" } else { "0" });
}

async fn fetch_poem(window: &web::Window) -> anyhow::Result<String> {
    let resp: web::Response = JsFuture::from(window.fetch_with_str(ENDPOINT))
        .await
        .map_err(|e| anyhow::anyhow!("fetch failed: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a response: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("status {}", resp.status());
    }
    let body = resp
        .text()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("body is not text"))?;
    Ok(parse_payload(&body)?)
}
