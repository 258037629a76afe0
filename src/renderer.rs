// Renderer struct that replays a frame's draw commands onto the overlay's
// 2d context. When the browser hands us no context the renderer is inert and
// every frame is silently dropped.

use crate::color::Color;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        glow: f64,
    },
}

pub struct Renderer {
    pub context: Option<CanvasRenderingContext2d>,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Self {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        if context.is_none() {
            crate::warn!("particles: no 2d context, rendering disabled");
        }
        Renderer { context }
    }

    pub fn is_active(&self) -> bool {
        self.context.is_some()
    }

    pub fn render(&self, commands: &[RenderCommand]) {
        let context = match &self.context {
            Some(context) => context,
            None => return,
        };
        for command in commands {
            match command {
                RenderCommand::Clear { width, height } => {
                    context.clear_rect(0.0, 0.0, *width, *height);
                }
                RenderCommand::Circle {
                    x,
                    y,
                    radius,
                    color,
                    glow,
                } => {
                    let css = color.to_css();
                    context.begin_path();
                    // arc only fails on a negative radius, sizes start at 0.5
                    let _ = context.arc(*x, *y, *radius, 0.0, PI * 2.0);
                    #[allow(deprecated)]
                    context.set_fill_style(&JsValue::from_str(&css));
                    context.set_shadow_color(&css);
                    context.set_shadow_blur(*glow);
                    context.fill();
                }
            }
        }
    }
}
