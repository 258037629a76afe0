// Helpers for the overlay canvas: find or create it, and size it to the viewport

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, Window};

pub const CANVAS_ID: &str = "particles";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

// Reuses an existing #particles canvas. Any other element holding the id is
// replaced by the new canvas so the id stays unique; without one the canvas
// is appended as the last child of <body>
pub fn overlay_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    let existing = document.get_element_by_id(CANVAS_ID);
    if let Some(canvas) = existing
        .as_ref()
        .and_then(|el| el.dyn_ref::<HtmlCanvasElement>())
    {
        return Ok(canvas.clone());
    }
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id(CANVAS_ID);
    match existing {
        Some(placeholder) => placeholder.replace_with_with_node_1(&canvas)?,
        None => {
            let body = document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?;
            body.append_child(&canvas)?;
        }
    }
    Ok(canvas)
}

// Zero when the viewport can't be read, frames then draw nothing until a resize
pub fn viewport_size(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v as u32)
            .unwrap_or(0)
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

pub fn fit_to_viewport(canvas: &HtmlCanvasElement, window: &Window) -> (u32, u32) {
    let (width, height) = viewport_size(window);
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
    }
    (width, height)
}
