use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use strum::IntoEnumIterator;
use web_sys::HtmlCanvasElement;

use crate::{
    domain::{
        chart::{ChartConfig, ChartInputs, ChartSurface, ClickHandler, PointKind, StrokeStyle, legend_entries},
        logging::LogComponent,
        market_data::TradeDirection,
    },
    event_utils::{CanvasClickListener, ListenerSlot},
    infrastructure::rendering::paint_chart,
    log_error, log_info,
};

fn paint_or_log(canvas: &HtmlCanvasElement, chart: &ChartSurface) {
    if let Err(e) = paint_chart(canvas, chart) {
        log_error!(LogComponent::Presentation("EntryPointChart"), "render failed: {}", e);
    }
}

fn marker_label(kind: PointKind) -> &'static str {
    match kind {
        PointKind::Entry => "Entry",
        PointKind::StopLoss => "Stop Loss",
        PointKind::TakeProfit => "Take Profit",
    }
}

/// Candlestick chart with reference levels. Clicking inside the plot drops
/// a marker of the selected kind and reports `(price, kind)` to the host.
#[component]
pub fn EntryPointChart(
    #[prop(into)] inputs: Signal<ChartInputs>,
    #[prop(optional)] direction: Option<TradeDirection>,
    #[prop(optional)] on_point_added: Option<Callback<(f64, PointKind)>>,
    #[prop(optional)] config: Option<ChartConfig>,
) -> impl IntoView {
    let config = config.map(ChartConfig::or_default_if_invalid).unwrap_or_default();
    let theme = config.theme.clone();
    let chart = Rc::new(RefCell::new(ChartSurface::new(config.clone())));
    let listener: Rc<RefCell<ListenerSlot<CanvasClickListener>>> = Rc::new(RefCell::new(ListenerSlot::new()));
    let (point_count, set_point_count) = create_signal(0usize);
    let canvas_ref = create_node_ref::<Canvas>();

    // inputs changed: refit, rebind the click listener, repaint
    {
        let chart = chart.clone();
        let listener = listener.clone();
        create_effect(move |_| {
            let next = inputs.get();
            let Some(canvas_el) = canvas_ref.get() else {
                return;
            };
            let canvas: HtmlCanvasElement = (*canvas_el).clone();
            chart.borrow_mut().set_inputs(next);

            let redraw_canvas = canvas.clone();
            let mut handler = ClickHandler::new(chart.clone()).on_redraw(move |surface| {
                paint_or_log(&redraw_canvas, surface);
                set_point_count.set(surface.annotations().len());
            });
            if let Some(callback) = on_point_added.clone() {
                handler = handler.on_point_added(move |price, kind| callback.call((price, kind)));
            }
            listener.borrow_mut().install(CanvasClickListener::attach(&canvas, move |click| {
                handler.handle(click);
            }));

            paint_or_log(&canvas, &chart.borrow());
        });
    }

    {
        let listener = listener.clone();
        on_cleanup(move || {
            listener.borrow_mut().release();
            log_info!(LogComponent::Presentation("EntryPointChart"), "click listener released");
        });
    }

    let on_kind_change = {
        let chart = chart.clone();
        move |event: ev::Event| {
            if let Ok(kind) = PointKind::from_str(&event_target_value(&event)) {
                chart.borrow_mut().set_marker_kind(kind);
            }
        }
    };

    let on_clear = {
        let chart = chart.clone();
        move |_: ev::MouseEvent| {
            chart.borrow_mut().clear_annotations();
            set_point_count.set(0);
            if let Some(canvas_el) = canvas_ref.get_untracked() {
                paint_or_log(&canvas_el, &chart.borrow());
            }
        }
    };

    let frame_style = direction
        .map(|d| {
            let style = d.style();
            format!(
                "border: 2px solid {}; background: {}; border-radius: 8px; padding: 12px;",
                style.line_color.to_css(),
                style.fill_color.to_css()
            )
        })
        .unwrap_or_else(|| "padding: 12px;".to_string());

    view! {
        <div class="entry-point-chart" style=frame_style>
            <div class="chart-toolbar" style="display: flex; gap: 8px; align-items: center; margin-bottom: 8px;">
                {direction.map(|d| view! { <span class="direction-badge">{d.style().label}</span> })}
                <select class="marker-kind" on:change=on_kind_change>
                    {PointKind::iter()
                        .map(|kind| view! { <option value={kind.as_ref().to_string()}>{marker_label(kind)}</option> })
                        .collect_view()}
                </select>
                <button class="clear-points" on:click=on_clear>"Clear points"</button>
                <span class="point-count">{move || format!("{} points", point_count.get())}</span>
            </div>
            <canvas
                node_ref=canvas_ref
                width={config.width.to_string()}
                height={config.height.to_string()}
                style="cursor: crosshair; max-width: 100%;"
            />
            <div class="chart-legend" style="display: flex; flex-wrap: wrap; gap: 12px; margin-top: 8px; font-size: 12px;">
                {move || {
                    legend_entries(&inputs.get(), &theme)
                        .into_iter()
                        .map(|entry| {
                            let border = if entry.style == StrokeStyle::Dashed { "dashed" } else { "solid" };
                            let swatch = format!(
                                "display: inline-block; width: 16px; border-top: 2px {} {}; margin-right: 4px;",
                                border,
                                entry.color.to_css()
                            );
                            view! {
                                <span class="legend-entry">
                                    <span class="legend-swatch" style=swatch></span>
                                    {entry.label}
                                </span>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
