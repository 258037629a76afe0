// Browser driver for a ParticleField: a requestAnimationFrame loop that
// re-schedules itself until cancelled, plus a window resize listener.
//
// The tick and the resize listener share the field through Rc<RefCell<_>>.
// Both types are !Send, so both closures are pinned to the page's single
// event loop and never run concurrently; no lock is needed.

use crate::field::ParticleField;
use crate::renderer::Renderer;
use crate::surface;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct AnimationLoop {
    window: Window,
    canvas: HtmlCanvasElement,
    field: Rc<RefCell<ParticleField>>,
    cancelled: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frames: Rc<Cell<u64>>,
    tick: FrameCallback,
    resize: Option<Closure<dyn FnMut()>>,
}

impl AnimationLoop {
    pub fn start(
        window: Window,
        canvas: HtmlCanvasElement,
        field: ParticleField,
        renderer: Renderer,
    ) -> Result<AnimationLoop, JsValue> {
        let field = Rc::new(RefCell::new(field));
        let cancelled = Rc::new(Cell::new(false));
        let frame_id = Rc::new(Cell::new(None));
        let frames = Rc::new(Cell::new(0));

        let resize = {
            let window = window.clone();
            let canvas = canvas.clone();
            let field = Rc::clone(&field);
            Closure::wrap(Box::new(move || {
                let (width, height) = surface::fit_to_viewport(&canvas, &window);
                field.borrow_mut().resize(width as f64, height as f64);
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

        // The closure needs a handle to itself to schedule the next frame,
        // so it is stored in a shared slot filled after construction
        let tick: FrameCallback = Rc::new(RefCell::new(None));
        {
            let next = Rc::clone(&tick);
            let window = window.clone();
            let field = Rc::clone(&field);
            let cancelled = Rc::clone(&cancelled);
            let frame_id = Rc::clone(&frame_id);
            let frames = Rc::clone(&frames);
            *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                frame_id.set(None);
                if cancelled.get() {
                    return;
                }
                {
                    #[cfg(feature = "frame-timers")]
                    let _timer = crate::Timer::new("ParticleField::step");
                    let commands = field.borrow_mut().step();
                    renderer.render(&commands);
                }
                frames.set(frames.get() + 1);
                if cancelled.get() {
                    return;
                }
                if let Some(callback) = next.borrow().as_ref() {
                    let scheduled = window.request_animation_frame(callback.as_ref().unchecked_ref());
                    record_schedule(scheduled, &frame_id, &cancelled);
                }
            }) as Box<dyn FnMut()>));
        }

        let first = match tick.borrow().as_ref() {
            Some(callback) => window.request_animation_frame(callback.as_ref().unchecked_ref()),
            None => Err(JsValue::from_str("animation callback missing")),
        };
        match first {
            Ok(id) => frame_id.set(Some(id)),
            Err(err) => {
                let _ = window
                    .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
                tick.borrow_mut().take();
                return Err(err);
            }
        }

        Ok(AnimationLoop {
            window,
            canvas,
            field,
            cancelled,
            frame_id,
            frames,
            tick,
            resize: Some(resize),
        })
    }

    pub fn field(&self) -> &Rc<RefCell<ParticleField>> {
        &self.field
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    // Completed frame steps since start
    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }

    pub fn is_running(&self) -> bool {
        !self.cancelled.get()
    }

    // Every step is idempotent, so this also cleans up a loop that already
    // died on a failed schedule. Must not be called from inside the tick
    // itself, which would drop the closure that is executing.
    pub fn stop(&mut self) {
        self.cancelled.set(true);
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Some(resize) = self.resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
        }
        // breaks the closure's reference to its own slot
        self.tick.borrow_mut().take();
        self.canvas.remove();
    }
}

// A loop that failed to re-schedule is dead, so it is marked cancelled
fn record_schedule(scheduled: Result<i32, JsValue>, frame_id: &Cell<Option<i32>>, cancelled: &Cell<bool>) {
    match scheduled {
        Ok(id) => frame_id.set(Some(id)),
        Err(err) => {
            crate::warn!("particles: could not schedule next frame: {:?}", err);
            frame_id.set(None);
            cancelled.set(true);
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
