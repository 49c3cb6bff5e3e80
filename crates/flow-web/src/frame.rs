use crate::dom;
use crate::input::SharedInput;
use flow_core::{FlowField, FrameOutput, BACKGROUND_RGB};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub field: FlowField,
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub input: Rc<RefCell<SharedInput>>,
    pub width: f64,
    pub height: f64,
}

impl FrameContext {
    pub fn new(
        field: FlowField,
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
        input: Rc<RefCell<SharedInput>>,
    ) -> Self {
        Self {
            field,
            canvas,
            ctx,
            input,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Match the canvas to the viewport, clear it, and rebuild the pool.
    pub fn resize(&mut self) {
        let Some((w, h, dpr)) = dom::sync_canvas_backing_size(&self.canvas) else {
            return;
        };
        self.width = w;
        self.height = h;
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.clear();
        self.field.resize(w as f32, h as f32);
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.field.set_reduced_motion(reduced);
        self.clear();
        self.canvas.set_hidden(reduced);
    }

    fn clear(&self) {
        let [r, g, b] = BACKGROUND_RGB;
        self.ctx.set_fill_style_str(&format!("rgb({}, {}, {})", r, g, b));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    /// Run one refresh. Returns whether the loop should reschedule.
    pub fn frame(&mut self) -> bool {
        let sample = self.input.borrow_mut().take_sample();
        match self.field.frame(&sample) {
            Some(out) => {
                self.paint(&out);
                self.field.recycle(out.segments);
                true
            }
            None => false,
        }
    }

    fn paint(&self, out: &FrameOutput) {
        let [r, g, b] = BACKGROUND_RGB;
        self.ctx
            .set_fill_style_str(&format!("rgba({}, {}, {}, {})", r, g, b, out.trail_fade));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        for s in &out.segments {
            self.ctx.set_stroke_style_str(&s.color.css());
            self.ctx.set_line_width(s.width as f64);
            self.ctx.begin_path();
            self.ctx.move_to(s.from.x as f64, s.from.y as f64);
            self.ctx.line_to(s.to.x as f64, s.to.y as f64);
            self.ctx.stroke();
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` driver for a [`FrameContext`]. The loop stops by
/// itself once the field goes inactive; [`FrameLoop::resume`] restarts it.
#[derive(Clone)]
pub struct FrameLoop {
    ctx: Rc<RefCell<FrameContext>>,
    tick: Tick,
    scheduled: Rc<Cell<bool>>,
}

fn request(tick: &Tick) -> bool {
    let Some(w) = web::window() else {
        return false;
    };
    match tick.borrow().as_ref() {
        Some(cb) => w.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok(),
        None => false,
    }
}

impl FrameLoop {
    pub fn context(&self) -> &Rc<RefCell<FrameContext>> {
        &self.ctx
    }

    pub fn resume(&self) {
        if self.scheduled.get() || !self.ctx.borrow().field.is_active() {
            return;
        }
        if request(&self.tick) {
            self.scheduled.set(true);
            log::info!("[flow] loop running");
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Tick = Rc::new(RefCell::new(None));
    let scheduled = Rc::new(Cell::new(false));
    let tick_clone = tick.clone();
    let scheduled_tick = scheduled.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        scheduled_tick.set(false);
        if !frame_ctx_tick.borrow_mut().frame() {
            log::info!("[flow] loop stopped");
            return;
        }
        scheduled_tick.set(request(&tick_clone));
    }) as Box<dyn FnMut()>));

    let handle = FrameLoop {
        ctx: frame_ctx,
        tick,
        scheduled,
    };
    handle.resume();
    handle
}
