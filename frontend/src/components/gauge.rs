use shared::{ChartRenderer, ChartSpec};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::NodeRef;

const GAUGE_SIZE: u32 = 256;

/// Draws the score gauge on the results canvas.
pub struct CanvasGauge {
    canvas_ref: NodeRef,
}

pub struct GaugeHandle {
    context: CanvasRenderingContext2d,
}

impl CanvasGauge {
    pub fn new(canvas_ref: NodeRef) -> Self {
        Self { canvas_ref }
    }
}

impl ChartRenderer for CanvasGauge {
    type Handle = GaugeHandle;
    type Error = String;

    fn draw(&mut self, spec: &ChartSpec) -> Result<GaugeHandle, String> {
        let canvas = self
            .canvas_ref
            .cast::<HtmlCanvasElement>()
            .ok_or("Gauge canvas is not mounted")?;
        canvas.set_width(GAUGE_SIZE);
        canvas.set_height(GAUGE_SIZE);

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| "Canvas context unavailable")?
            .ok_or("Canvas context missing")?
            .dyn_into()
            .map_err(|_| "Context cast failed")?;

        let size = f64::from(GAUGE_SIZE);
        let center = size / 2.0;
        let outer = center - 8.0;
        let thickness = outer * (1.0 - spec.cutout);
        let radius = outer - thickness / 2.0;

        context.clear_rect(0.0, 0.0, size, size);
        context.set_line_width(thickness);
        context.set_line_cap("round");

        let [filled, remaining] = spec.slices;
        stroke_arc(
            &context,
            center,
            radius,
            spec.start_angle,
            spec.start_angle + spec.sweep,
            remaining.color,
        )?;
        if filled.value > 0 {
            stroke_arc(
                &context,
                center,
                radius,
                spec.start_angle,
                spec.value_end_angle(),
                filled.color,
            )?;
        }

        log::debug!("Gauge drawn for score {}", spec.score);
        Ok(GaugeHandle { context })
    }

    fn destroy(&mut self, handle: GaugeHandle) {
        let size = f64::from(GAUGE_SIZE);
        handle.context.clear_rect(0.0, 0.0, size, size);
    }
}

fn stroke_arc(
    context: &CanvasRenderingContext2d,
    center: f64,
    radius: f64,
    from: f64,
    to: f64,
    color: &str,
) -> Result<(), String> {
    context.begin_path();
    context
        .arc(center, center, radius, from, to)
        .map_err(|_| "Unable to trace gauge arc".to_string())?;
    context.set_stroke_style_str(color);
    context.stroke();
    Ok(())
}
