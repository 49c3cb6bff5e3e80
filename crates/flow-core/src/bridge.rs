//! Hand state → synthetic pointer input and section navigation.
//!
//! Nothing here touches a DOM. [`InputBridge`] produces an abstract
//! [`PointerEvent`] stream over an opaque element handle `T`; the front-end
//! decides how a `T` is hit-tested and how each event is dispatched.

use crate::constants::{OFFSCREEN, SECTION_IDS, SWIPE_COOLDOWN_MS, SWIPE_THRESHOLD};
use crate::gesture::HandState;
use instant::{Duration, Instant};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Move,
    Enter,
    Leave,
    Click,
}

impl PointerKind {
    pub fn dom_type(self) -> &'static str {
        match self {
            PointerKind::Move => "mousemove",
            PointerKind::Enter => "mouseenter",
            PointerKind::Leave => "mouseleave",
            PointerKind::Click => "click",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointerTarget<T> {
    /// Process-wide listeners (the flow field's pointer input).
    Window,
    Element(T),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent<T> {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    pub target: PointerTarget<T>,
}

impl<T> PointerEvent<T> {
    fn element(kind: PointerKind, x: f32, y: f32, el: T) -> Self {
        Self {
            kind,
            x,
            y,
            target: PointerTarget::Element(el),
        }
    }
}

/// At most: window move, leave, enter, move, click.
pub type PointerEvents<T> = SmallVec<[PointerEvent<T>; 5]>;

pub struct InputBridge<T> {
    hovered: Option<T>,
    was_pinching: bool,
}

impl<T> Default for InputBridge<T> {
    fn default() -> Self {
        Self {
            hovered: None,
            was_pinching: false,
        }
    }
}

impl<T: Clone + PartialEq> InputBridge<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&T> {
        self.hovered.as_ref()
    }

    /// Translate one hand state. `hit_test` resolves the topmost element
    /// under viewport coordinates.
    pub fn process(
        &mut self,
        state: &HandState,
        hit_test: impl FnOnce(f32, f32) -> Option<T>,
    ) -> PointerEvents<T> {
        let mut out = PointerEvents::new();

        if !state.detected {
            if let Some(prev) = self.hovered.take() {
                out.push(PointerEvent::element(
                    PointerKind::Leave,
                    OFFSCREEN,
                    OFFSCREEN,
                    prev,
                ));
            }
            return out;
        }

        let (x, y) = (state.screen_x, state.screen_y);
        out.push(PointerEvent {
            kind: PointerKind::Move,
            x,
            y,
            target: PointerTarget::Window,
        });

        if let Some(el) = hit_test(x, y) {
            if self.hovered.as_ref() != Some(&el) {
                if let Some(prev) = self.hovered.take() {
                    out.push(PointerEvent::element(PointerKind::Leave, x, y, prev));
                }
                out.push(PointerEvent::element(PointerKind::Enter, x, y, el.clone()));
                self.hovered = Some(el.clone());
            }
            out.push(PointerEvent::element(PointerKind::Move, x, y, el.clone()));
            // click on the rising edge only; a held pinch does not repeat
            if state.is_pinching && !self.was_pinching {
                out.push(PointerEvent::element(PointerKind::Click, x, y, el));
                log::debug!("[bridge] click at ({:.0}, {:.0})", x, y);
            }
        }

        self.was_pinching = state.is_pinching;
        out
    }

    pub fn reset(&mut self) {
        self.hovered = None;
        self.was_pinching = false;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavigationParams {
    /// Minimum `|wrist_velocity_y|` that counts as a swipe.
    pub swipe_threshold: f32,
    pub cooldown: Duration,
    /// Section anchors in page order.
    pub sections: Vec<String>,
}

impl Default for NavigationParams {
    fn default() -> Self {
        Self {
            swipe_threshold: SWIPE_THRESHOLD,
            cooldown: Duration::from_millis(SWIPE_COOLDOWN_MS),
            sections: SECTION_IDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Where the page is and where each section starts, in document px.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionLayout {
    pub scroll_y: f64,
    pub viewport_height: f64,
    /// One entry per configured section; `None` if its anchor is missing.
    pub anchors: Vec<Option<f64>>,
}

/// Index of the last section whose anchor is at or above the viewport's
/// vertical midpoint; 0 when none is.
pub fn current_section(layout: &SectionLayout) -> usize {
    let midpoint = layout.scroll_y + layout.viewport_height / 2.0;
    layout
        .anchors
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, a)| match a {
            Some(top) if midpoint >= *top => Some(i),
            _ => None,
        })
        .unwrap_or(0)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollCommand {
    pub from: usize,
    pub to: usize,
    pub section: String,
}

pub struct SectionNavigator {
    params: NavigationParams,
    last_trigger: Option<Instant>,
}

impl Default for SectionNavigator {
    fn default() -> Self {
        Self::new(NavigationParams::default())
    }
}

impl SectionNavigator {
    pub fn new(params: NavigationParams) -> Self {
        Self {
            params,
            last_trigger: None,
        }
    }

    pub fn sections(&self) -> &[String] {
        &self.params.sections
    }

    fn cooling_down(&self, now: Instant) -> bool {
        match self.last_trigger {
            Some(last) => now < last + self.params.cooldown,
            None => false,
        }
    }

    /// Turn a wrist swipe into a one-section scroll. `layout` is only read
    /// once a swipe qualifies.
    pub fn update(
        &mut self,
        state: &HandState,
        now: Instant,
        layout: impl FnOnce() -> SectionLayout,
    ) -> Option<ScrollCommand> {
        let n = self.params.sections.len();
        if !state.detected || n == 0 {
            return None;
        }
        let v = state.wrist_velocity_y;
        if v.abs() < self.params.swipe_threshold || self.cooling_down(now) {
            return None;
        }

        let layout = layout();
        let from = current_section(&layout).min(n - 1);
        // positive velocity = wrist moving down = next section
        let to = if v > 0.0 {
            (from + 1).min(n - 1)
        } else {
            from.saturating_sub(1)
        };
        if to == from {
            return None;
        }
        if !matches!(layout.anchors.get(to), Some(Some(_))) {
            log::debug!("[nav] section {} has no anchor", self.params.sections[to]);
            return None;
        }

        self.last_trigger = Some(now);
        let section = self.params.sections[to].clone();
        log::info!("[nav] {} -> {}", self.params.sections[from], section);
        Some(ScrollCommand { from, to, section })
    }

    pub fn reset(&mut self) {
        self.last_trigger = None;
    }
}
