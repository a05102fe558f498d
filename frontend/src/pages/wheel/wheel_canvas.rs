use shared::constants::LABEL_BASELINE_OFFSET;
use shared::{label_font_size, Segment, WheelGeometry};
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub segments: Vec<Segment>,
    pub rotation: f64,
    pub highlight: Option<usize>,
    pub is_spinning: bool,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let geometry = WheelGeometry::default();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (props.segments.clone(), props.rotation, props.highlight, props.is_spinning),
            move |(segments, rotation, highlight, is_spinning)| {
                let context = canvas_ref
                    .cast::<HtmlCanvasElement>()
                    .and_then(|canvas| canvas.get_context("2d").ok().flatten())
                    .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok());

                match context {
                    Some(context) => {
                        draw_wheel(&context, &geometry, segments, *rotation, *highlight, *is_spinning)
                    }
                    None => log::warn!("wheel canvas unavailable, skipping render"),
                }
                || ()
            },
        );
    }

    let size = geometry.size.to_string();
    html! {
        <div class="relative">
            <canvas
                ref={canvas_ref}
                width={size.clone()}
                height={size}
                class="w-full max-w-[800px] h-auto rounded-full"
                style={if props.is_spinning {
                    "filter: drop-shadow(0px 5px 20px rgba(130, 100, 255, 0.4));"
                } else {
                    "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.2));"
                }}
            />
        </div>
    }
}

fn draw_wheel(
    context: &CanvasRenderingContext2d,
    geometry: &WheelGeometry,
    segments: &[Segment],
    rotation: f64,
    highlight: Option<usize>,
    is_spinning: bool,
) {
    let WheelGeometry { size, center_x, center_y, radius, label_radius } = *geometry;

    context.clear_rect(0.0, 0.0, size, size);

    if segments.is_empty() {
        context.begin_path();
        context.set_fill_style_str("#e5e7eb");
        let _ = context.arc(center_x, center_y, radius, 0.0, 2.0 * PI);
        context.fill();
    }

    context.save();
    let _ = context.translate(center_x, center_y);
    let _ = context.rotate(rotation);
    let _ = context.translate(-center_x, -center_y);

    let font_size = label_font_size(segments.len());
    for segment in segments {
        context.begin_path();
        let _ = context.arc(center_x, center_y, radius, segment.start_angle, segment.end_angle);
        context.line_to(center_x, center_y);
        context.set_fill_style_str(&segment.color.to_hex());
        context.fill();

        if highlight == Some(segment.index) {
            context.set_fill_style_str("rgba(255, 255, 255, 0.35)");
            context.fill();
            context.close_path();
            context.set_stroke_style_str("#ffffff");
            context.set_line_width(6.0);
            context.stroke();
        }

        context.save();
        let _ = context.translate(center_x, center_y);
        let _ = context.rotate(segment.bisector());
        context.set_font(&format!("{}px Arial", font_size));
        context.set_text_align("right");
        context.set_fill_style_str("#000");
        let _ = context.fill_text(segment.label.as_str(), label_radius, LABEL_BASELINE_OFFSET);
        context.restore();
    }

    context.restore();

    draw_pointer(context, geometry, is_spinning);
}

// Fixed pointer at 12 o'clock, tip pointing into the wheel
fn draw_pointer(context: &CanvasRenderingContext2d, geometry: &WheelGeometry, is_spinning: bool) {
    let pointer_width = 16.0;
    let pointer_height = 30.0;
    let tip_y = geometry.center_y - geometry.radius + pointer_height;

    context.begin_path();
    context.move_to(geometry.center_x, tip_y);
    context.line_to(geometry.center_x - pointer_width, geometry.center_y - geometry.radius - 5.0);
    context.line_to(geometry.center_x + pointer_width, geometry.center_y - geometry.radius - 5.0);
    context.close_path();

    if is_spinning {
        context.set_fill_style_str("#ffd700");
    } else {
        context.set_fill_style_str("#f59e0b");
    }
    context.fill();

    context.set_stroke_style_str("#e69500");
    context.set_line_width(1.5);
    context.stroke();
}
