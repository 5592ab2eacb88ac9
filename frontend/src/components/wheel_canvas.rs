use prize_wheel_engine::backend::domain::angle_mapping::sector_spans;
use shared::{Segment, SegmentDisplay};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::services::logging::Logger;

const FALLBACK_COLOR: &str = "#cccccc";
const FALLBACK_TEXT_COLOR: &str = "#000000";
const RIM_COLOR: &str = "#FFD700";
const POINTER_COLOR: &str = "#D32F2F";

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub wheel: Vec<Segment>,
    pub displays: Vec<SegmentDisplay>,
    /// Wheel rotation in degrees, clockwise
    pub rotation: f64,
    #[prop_or(400)]
    pub size: u32,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    use_effect_with(
        (props.wheel.clone(), props.displays.clone(), props.rotation),
        {
            let canvas_ref = canvas_ref.clone();
            move |(wheel, displays, rotation): &(Vec<Segment>, Vec<SegmentDisplay>, f64)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    if let Err(e) = draw_wheel(&canvas, wheel, displays, *rotation) {
                        Logger::error_with_component("wheel-canvas", &format!("Drawing failed: {:?}", e));
                    }
                }
                || ()
            }
        },
    );

    html! {
        <canvas
            ref={canvas_ref}
            class="wheel-canvas"
            width={props.size.to_string()}
            height={props.size.to_string()}
        />
    }
}

/// Canvas angles start at 3 o'clock; wheel angles start at 12 o'clock
fn canvas_radians(wheel_degrees: f64) -> f64 {
    (wheel_degrees - 90.0).to_radians()
}

fn draw_wheel(
    canvas: &HtmlCanvasElement,
    wheel: &[Segment],
    displays: &[SegmentDisplay],
    rotation: f64,
) -> Result<(), JsValue> {
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let size = f64::from(canvas.width());
    let center = size / 2.0;
    let radius = center - 10.0;

    ctx.clear_rect(0.0, 0.0, size, size);
    ctx.save();
    ctx.translate(center, center)?;
    ctx.rotate(rotation.to_radians())?;

    for span in sector_spans(wheel) {
        let display = displays.iter().find(|d| d.id == span.segment_id);
        let color = display.map(|d| d.color.as_str()).unwrap_or(FALLBACK_COLOR);
        let text_color = display
            .map(|d| d.text_color.as_str())
            .unwrap_or(FALLBACK_TEXT_COLOR);
        let label = display
            .map(|d| d.label.clone())
            .unwrap_or_else(|| format!("#{}", span.segment_id));

        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.arc(0.0, 0.0, radius, canvas_radians(span.start), canvas_radians(span.end))?;
        ctx.close_path();
        ctx.set_fill_style(&JsValue::from_str(color));
        ctx.fill();
        ctx.set_stroke_style(&JsValue::from_str(RIM_COLOR));
        ctx.set_line_width(2.0);
        ctx.stroke();

        ctx.save();
        ctx.rotate(canvas_radians(span.midpoint()))?;
        ctx.set_text_align("right");
        ctx.set_text_baseline("middle");
        ctx.set_font("bold 14px sans-serif");
        ctx.set_fill_style(&JsValue::from_str(text_color));
        ctx.fill_text(&label, radius - 14.0, 0.0)?;
        ctx.restore();
    }

    ctx.begin_path();
    ctx.arc(0.0, 0.0, radius * 0.12, 0.0, std::f64::consts::TAU)?;
    ctx.set_fill_style(&JsValue::from_str(RIM_COLOR));
    ctx.fill();
    ctx.restore();

    // Fixed pointer at 12 o'clock
    ctx.begin_path();
    ctx.move_to(center - 14.0, 0.0);
    ctx.line_to(center + 14.0, 0.0);
    ctx.line_to(center, 30.0);
    ctx.close_path();
    ctx.set_fill_style(&JsValue::from_str(POINTER_COLOR));
    ctx.fill();

    Ok(())
}
