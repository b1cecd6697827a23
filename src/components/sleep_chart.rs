//! Sleep Chart Component
//!
//! Bedtime and wake time lines over per-night duration bars, drawn on an
//! HTML5 canvas. The left axis is minute-of-day, the right one hours slept.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::ChartConfig;
use crate::sleep::{format_clock, ChartPoint};
use crate::state::global::GlobalState;

const BED_COLOR: &str = "#6366F1";
const WAKE_COLOR: &str = "#F59E0B";
const DURATION_COLOR: &str = "rgba(16, 185, 129, 0.35)";

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 50.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Minutes between clock-axis ticks, each one labelled
const TICK_MINUTES: i32 = 60;

/// Canvas sleep chart
#[component]
pub fn SleepChart(#[prop(into)] points: Signal<Vec<ChartPoint>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let config = state.config.chart.clone();
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let points = points.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &points, &config);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />
            <div class="flex justify-center gap-4 mt-4 text-sm text-gray-300">
                <LegendItem color=BED_COLOR label="Bedtime" />
                <LegendItem color=WAKE_COLOR label="Wake time" />
                <LegendItem color=DURATION_COLOR label="Hours slept" />
            </div>
        </div>
    }
}

#[component]
fn LegendItem(color: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <div class="w-3 h-3 rounded-full" style=format!("background-color: {}", color) />
            <span>{label}</span>
        </div>
    }
}

/// Upper bound of the duration axis
fn duration_axis_max(points: &[ChartPoint], suggested: f64) -> f64 {
    points
        .iter()
        .map(|p| p.duration_hours)
        .fold(suggested, f64::max)
}

/// Clock-axis tick positions from `min` to `max` inclusive
fn clock_ticks(min: i32, max: i32) -> Vec<i32> {
    let first = min.div_euclid(TICK_MINUTES) * TICK_MINUTES;
    let first = if first < min { first + TICK_MINUTES } else { first };
    (first..=max).step_by(TICK_MINUTES as usize).collect()
}

/// Clock-axis labels, one per tick
fn clock_labels(min: i32, max: i32) -> Vec<(i32, String)> {
    clock_ticks(min, max)
        .into_iter()
        .map(|tick| (tick, format_clock(tick)))
        .collect()
}

/// Map `value` in `[min, max]` to a canvas y, top of the plot being `max`
fn scale_y(value: f64, min: f64, max: f64, chart_height: f64) -> f64 {
    let clamped = value.clamp(min, max);
    MARGIN_TOP + ((max - clamped) / (max - min)) * chart_height
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, points: &[ChartPoint], config: &ChartConfig) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if points.is_empty() {
        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No sleep data yet", width / 2.0 - 70.0, height / 2.0);
        return;
    }

    let clock_min = config.min_minutes as f64;
    let clock_max = config.max_minutes as f64;
    let hours_max = duration_axis_max(points, config.duration_suggested_max);

    // Clock grid, hourly
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("11px sans-serif");
    ctx.set_fill_style(&"#9ca3af".into()); // gray-400
    for (tick, label) in clock_labels(config.min_minutes, config.max_minutes) {
        let y = scale_y(tick as f64, clock_min, clock_max, chart_height);
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();
        let _ = ctx.fill_text(&label, 5.0, y + 4.0);
    }

    // Hours axis on the right
    let hour_step = if hours_max > 12.0 { 4.0 } else { 2.0 };
    let mut hours = 0.0;
    while hours <= hours_max {
        let y = scale_y(hours, 0.0, hours_max, chart_height);
        ctx.set_fill_style(&"#9ca3af".into());
        let _ = ctx.fill_text(&format!("{}h", hours), width - MARGIN_RIGHT + 8.0, y + 4.0);
        hours += hour_step;
    }

    let slot = chart_width / points.len() as f64;
    let x_at = |i: usize| MARGIN_LEFT + slot * (i as f64 + 0.5);

    // Duration bars behind the lines
    ctx.set_fill_style(&DURATION_COLOR.into());
    for (i, point) in points.iter().enumerate() {
        let top = scale_y(point.duration_hours, 0.0, hours_max, chart_height);
        let bar_width = slot * 0.6;
        ctx.fill_rect(
            x_at(i) - bar_width / 2.0,
            top,
            bar_width,
            MARGIN_TOP + chart_height - top,
        );
    }

    let bed: Vec<f64> = points.iter().map(|p| p.bed_minutes_adjusted as f64).collect();
    let wake: Vec<f64> = points.iter().map(|p| p.wake_minutes as f64).collect();
    for (series, color) in [(&bed, BED_COLOR), (&wake, WAKE_COLOR)] {
        ctx.set_stroke_style(&color.into());
        ctx.set_fill_style(&color.into());
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (i, value) in series.iter().enumerate() {
            let y = scale_y(*value, clock_min, clock_max, chart_height);
            if i == 0 {
                ctx.move_to(x_at(i), y);
            } else {
                ctx.line_to(x_at(i), y);
            }
        }
        ctx.stroke();

        for (i, value) in series.iter().enumerate() {
            let y = scale_y(*value, clock_min, clock_max, chart_height);
            ctx.begin_path();
            let _ = ctx.arc(x_at(i), y, 3.0, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }
    }

    // Day labels, thinned out when crowded
    let label_every = (points.len() / 10).max(1);
    ctx.set_fill_style(&"#9ca3af".into());
    for (i, point) in points.iter().enumerate().step_by(label_every) {
        let _ = ctx.fill_text(&point.label, x_at(i) - 12.0, height - 15.0);
    }
}
