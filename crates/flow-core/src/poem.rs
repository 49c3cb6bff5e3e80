//! Local side of the poetic-fragment feature: fallbacks and payload parsing.
//! The fetch itself lives in the web front-end and never surfaces errors.

use crate::error::PoemError;
use serde::Deserialize;

pub const FALLBACKS: [&str; 8] = [
    "i taught the circuit to hesitate\nbefore it learned my name",
    "the body is a protocol\nnobody agreed to sign",
    "somewhere between the sensor and the skin\na third thing listening",
    "my gender is a runtime error\nbeautiful and unresolved",
    "we trained the model on touch\nit predicted longing",
    "every interface is a wound\ndressed in light",
    "the algorithm dreams in pronouns\nit has not yet earned",
    "i am the latency\nbetween wanting and being seen",
];

pub const STORAGE_KEY: &str = "mo-poem";
pub const ENDPOINT: &str = "/api/poem";

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    text: Option<String>,
}

/// Pick a fallback from a uniform sample in `[0, 1)`.
pub fn pick_fallback(r: f64) -> &'static str {
    let i = (r.clamp(0.0, 1.0) * FALLBACKS.len() as f64) as usize;
    FALLBACKS[i.min(FALLBACKS.len() - 1)]
}

/// Extract the fragment from a `{ "text": ... }` body.
pub fn parse_payload(body: &str) -> Result<String, PoemError> {
    let payload: Payload =
        serde_json::from_str(body).map_err(|e| PoemError::Malformed(e.to_string()))?;
    match payload.text {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(PoemError::Empty),
    }
}
