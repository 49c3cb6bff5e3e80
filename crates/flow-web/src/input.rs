use flow_core::{InputSample, PointerMode};
use glam::Vec2;

/// Latest raw input as written by the DOM listeners. Every field is
/// last-write-wins; the frame loop reads it once per refresh.
#[derive(Default, Clone, Copy)]
pub struct SharedInput {
    pub pointer: Option<Vec2>,
    pub pointer_mode: PointerMode,
    pub scroll_progress: f32,
    /// Delta of the most recent scroll event; consumed by the next frame.
    pub scroll_velocity: f32,
    pub last_scroll_y: f64,
}

impl SharedInput {
    pub fn on_scroll(&mut self, scroll_y: f64, progress: f64) {
        self.scroll_velocity = (scroll_y - self.last_scroll_y).abs() as f32;
        self.last_scroll_y = scroll_y;
        self.scroll_progress = progress.clamp(0.0, 1.0) as f32;
    }

    /// Snapshot for one frame. The scroll delta is taken so the smoothed
    /// energy decays once scrolling stops.
    pub fn take_sample(&mut self) -> InputSample {
        InputSample {
            pointer: self.pointer,
            pointer_mode: self.pointer_mode,
            scroll_progress: self.scroll_progress,
            scroll_velocity: std::mem::take(&mut self.scroll_velocity),
        }
    }
}

#[inline]
pub fn pointer_client_px(ev: &web_sys::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}
