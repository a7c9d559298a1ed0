//! Browser painter for draw lists

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::shapes::{Shape, Stroke, TextAlign};

/// Paint shapes in order. The context is expected to be scaled to logical
/// canvas units already.
pub fn paint(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    shapes: &[Shape],
) -> Result<(), JsValue> {
    ctx.clear_rect(0.0, 0.0, width, height);

    for shape in shapes {
        match shape {
            Shape::Rect { rect, fill, stroke } => {
                let (x, y, w, h) = (rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill_rect(x, y, w, h);
                if let Some(stroke) = stroke {
                    apply_stroke(ctx, stroke);
                    ctx.stroke_rect(x, y, w, h);
                }
            }
            Shape::Ellipse {
                center,
                radii,
                rotation,
                fill,
                stroke,
            } => {
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x as f64,
                    radii.y as f64,
                    *rotation as f64,
                    0.0,
                    TAU,
                )?;
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill();
                if let Some(stroke) = stroke {
                    apply_stroke(ctx, stroke);
                    ctx.stroke();
                }
            }
            Shape::Text {
                text,
                pos,
                size,
                bold,
                align,
                fill,
                stroke,
            } => {
                let weight = if *bold { "bold " } else { "" };
                ctx.set_font(&format!("{}{}px Arial", weight, size));
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                ctx.set_text_baseline("middle");
                if let Some(stroke) = stroke {
                    apply_stroke(ctx, stroke);
                    ctx.stroke_text(text, pos.x as f64, pos.y as f64)?;
                }
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
            Shape::Overlay { alpha } => {
                ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {})", alpha));
                ctx.fill_rect(0.0, 0.0, width, height);
            }
        }
    }

    Ok(())
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) {
    ctx.set_stroke_style_str(&stroke.color.to_css());
    ctx.set_line_width(stroke.width as f64);
}
