#[macro_use]
mod utils;
pub mod animation;
pub mod color;
pub mod config;
pub mod field;
pub mod particle;
pub mod renderer;
pub mod surface;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use crate::color::Color;
pub use crate::config::{FieldConfig, Palette};
pub use crate::field::ParticleField;
pub use crate::particle::Particle;
pub use crate::renderer::RenderCommand;

use crate::animation::AnimationLoop;
use crate::renderer::Renderer;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Handle to the running overlay. Dropping it (or `free()` from JS) tears the
// overlay down the same way `teardown` does.
#[wasm_bindgen]
pub struct ParticleOverlay {
    animation: AnimationLoop,
}

#[wasm_bindgen]
impl ParticleOverlay {
    /// Starts the overlay with 70 particles and the default palette.
    pub fn start() -> Result<ParticleOverlay, JsValue> {
        ParticleOverlay::start_with_config(FieldConfig::default())
    }

    /// `palette` is an array of css hex strings, e.g. `["#8b0000", "#ff4444"]`.
    pub fn start_with(particle_count: u32, palette: js_sys::Array) -> Result<ParticleOverlay, JsValue> {
        let hexes = palette
            .iter()
            .map(|entry| {
                entry
                    .as_string()
                    .ok_or_else(|| format!("Palette entry {:?} is not a string", entry))
            })
            .collect::<Result<Vec<String>, String>>()?;
        let palette = Palette::from_hex(&hexes[..])?;
        let config = FieldConfig::default()
            .with_particle_count(particle_count as usize)
            .with_palette(palette);
        ParticleOverlay::start_with_config(config)
    }

    pub fn particle_count(&self) -> u32 {
        self.animation.field().borrow().len() as u32
    }

    pub fn width(&self) -> f64 {
        self.animation.field().borrow().width()
    }

    pub fn height(&self) -> f64 {
        self.animation.field().borrow().height()
    }

    pub fn frame_count(&self) -> f64 {
        self.animation.frame_count() as f64
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    /// Stops the frame loop, detaches the resize listener and removes the canvas.
    pub fn teardown(&mut self) {
        if self.animation.is_running() {
            log!("particles: teardown");
        }
        self.animation.stop();
    }
}

impl ParticleOverlay {
    pub fn start_with_config(config: FieldConfig) -> Result<ParticleOverlay, JsValue> {
        let _timer = Timer::new("ParticleOverlay::start");
        let window = surface::window()?;
        let document = surface::document()?;
        let canvas = surface::overlay_canvas(&document)?;
        let (width, height) = surface::fit_to_viewport(&canvas, &window);

        let particle_count = config.particle_count;
        let field = ParticleField::new(config, width as f64, height as f64);
        let renderer = Renderer::new(&canvas);
        let animation = AnimationLoop::start(window, canvas, field, renderer)?;
        log!(
            "particles: {} particles on a {}x{} surface",
            particle_count,
            width,
            height
        );
        Ok(ParticleOverlay { animation })
    }

    pub fn canvas(&self) -> &web_sys::HtmlCanvasElement {
        self.animation.canvas()
    }
}
