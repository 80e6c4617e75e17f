use std::cell::{Cell, RefCell};
use std::rc::Rc;

use levels_chart_wasm::domain::chart::{
    ChartConfig, ChartInputs, ChartSurface, ClickHandler, PointKind, PointerClick,
};
use levels_chart_wasm::event_utils::ListenerSlot;

fn shared_chart() -> Rc<RefCell<ChartSurface>> {
    let inputs = ChartInputs::new(2010.0)
        .support(Some(2000.0))
        .resistance(Some(2020.0));
    Rc::new(RefCell::new(ChartSurface::with_inputs(ChartConfig::default(), inputs)))
}

fn counting_handler(chart: &Rc<RefCell<ChartSurface>>) -> (ClickHandler, Rc<RefCell<Vec<(f64, PointKind)>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    let handler = ClickHandler::new(chart.clone()).on_point_added(move |price, kind| sink.borrow_mut().push((price, kind)));
    (handler, calls)
}

#[test]
fn click_outside_plot_is_ignored() {
    let chart = shared_chart();
    let (handler, calls) = counting_handler(&chart);

    for (x, y) in [(400.0, 20.0), (20.0, 200.0), (780.0, 200.0), (400.0, 390.0)] {
        assert!(handler.handle(PointerClick::local(x, y)).is_none());
    }
    assert!(chart.borrow().annotations().is_empty());
    assert!(calls.borrow().is_empty());
}

#[test]
fn click_maps_row_to_price() {
    let chart = shared_chart();
    let (handler, calls) = counting_handler(&chart);

    let point = handler.handle(PointerClick::local(400.0, 200.0)).unwrap();
    let expected = chart.borrow().viewport().y_to_price(200.0);
    assert!((point.price - expected).abs() < 1e-9);
    assert_eq!(point.kind, PointKind::Entry);
    assert_eq!((point.x, point.y), (400.0, 200.0));
    assert_eq!(calls.borrow().as_slice(), &[(point.price, PointKind::Entry)]);
}

#[test]
fn client_coordinates_are_made_local() {
    let chart = shared_chart();
    let (handler, _) = counting_handler(&chart);

    let point = handler.handle(PointerClick::new(500.0, 300.0, 100.0, 100.0)).unwrap();
    assert_eq!((point.x, point.y), (400.0, 200.0));
    // inside in client space but outside once made local
    assert!(handler.handle(PointerClick::new(120.0, 300.0, 100.0, 100.0)).is_none());
}

#[test]
fn points_accumulate_in_click_order() {
    let chart = shared_chart();
    let (handler, calls) = counting_handler(&chart);

    for y in [100.0, 300.0, 200.0] {
        handler.handle(PointerClick::local(400.0, y)).unwrap();
    }

    let chart = chart.borrow();
    let points = chart.annotations().points();
    assert_eq!(points.len(), 3);
    assert_eq!(points.iter().map(|p| p.y).collect::<Vec<_>>(), vec![100.0, 300.0, 200.0]);
    assert_eq!(points.iter().map(|p| p.id.value()).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(points[0].price > points[2].price && points[2].price > points[1].price);
    assert_eq!(calls.borrow().len(), 3);
}

#[test]
fn redraw_happens_before_notification() {
    let chart = shared_chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    let redraw_events = events.clone();
    let notify_events = events.clone();
    let reader = chart.clone();

    let handler = ClickHandler::new(chart.clone())
        .on_redraw(move |surface| redraw_events.borrow_mut().push(format!("redraw:{}", surface.annotations().len())))
        .on_point_added(move |_, _| {
            // the host may read the surface from inside the callback
            let count = reader.borrow().annotations().len();
            notify_events.borrow_mut().push(format!("notify:{}", count));
        });

    handler.handle(PointerClick::local(400.0, 200.0));
    assert_eq!(events.borrow().as_slice(), &["redraw:1".to_string(), "notify:1".to_string()]);
}

#[test]
fn ignored_click_does_not_redraw() {
    let chart = shared_chart();
    let redraws = Rc::new(Cell::new(0));
    let counter = redraws.clone();
    let handler = ClickHandler::new(chart).on_redraw(move |_| counter.set(counter.get() + 1));

    handler.handle(PointerClick::local(10.0, 10.0));
    assert_eq!(redraws.get(), 0);
}

#[test]
fn marker_kind_applies_to_later_clicks() {
    let chart = shared_chart();
    let (handler, calls) = counting_handler(&chart);

    handler.handle(PointerClick::local(400.0, 100.0));
    chart.borrow_mut().set_marker_kind(PointKind::StopLoss);
    handler.handle(PointerClick::local(400.0, 300.0));
    chart.borrow_mut().set_marker_kind(PointKind::TakeProfit);
    handler.handle(PointerClick::local(400.0, 150.0));

    let kinds: Vec<PointKind> = calls.borrow().iter().map(|(_, kind)| *kind).collect();
    assert_eq!(kinds, vec![PointKind::Entry, PointKind::StopLoss, PointKind::TakeProfit]);
}

#[test]
fn clearing_keeps_ids_increasing() {
    let chart = shared_chart();
    let (handler, _) = counting_handler(&chart);

    handler.handle(PointerClick::local(400.0, 100.0));
    handler.handle(PointerClick::local(400.0, 120.0));
    chart.borrow_mut().clear_annotations();
    assert!(chart.borrow().annotations().is_empty());

    let point = handler.handle(PointerClick::local(400.0, 140.0)).unwrap();
    assert_eq!(point.id.value(), 2);
    assert_eq!(chart.borrow().annotations().len(), 1);
}

#[test]
fn new_inputs_keep_annotations() {
    let chart = shared_chart();
    let (handler, _) = counting_handler(&chart);
    handler.handle(PointerClick::local(400.0, 100.0));

    chart.borrow_mut().set_inputs(ChartInputs::new(1500.0));
    assert_eq!(chart.borrow().annotations().len(), 1);
    assert!(chart.borrow().viewport().max_price < 1600.0);
}

#[test]
fn annotations_serialize_for_hosts() {
    let chart = shared_chart();
    let (handler, _) = counting_handler(&chart);
    chart.borrow_mut().set_marker_kind(PointKind::TakeProfit);
    handler.handle(PointerClick::local(400.0, 200.0));

    let json = serde_json::to_value(chart.borrow().annotations().points()).unwrap();
    assert_eq!(json[0]["id"], 0);
    assert_eq!(json[0]["kind"], "take_profit");
    assert_eq!(json[0]["x"], 400.0);
}

struct DropCounter(Rc<Cell<u32>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn listener_slot_holds_one_handle() {
    let dropped = Rc::new(Cell::new(0));
    let mut slot = ListenerSlot::new();
    assert!(!slot.is_active());

    slot.install(DropCounter(dropped.clone()));
    assert!(slot.is_active());
    assert_eq!(dropped.get(), 0);

    slot.install(DropCounter(dropped.clone()));
    assert_eq!(dropped.get(), 1);

    slot.release();
    assert!(!slot.is_active());
    assert_eq!(dropped.get(), 2);

    slot.release();
    assert_eq!(dropped.get(), 2);
}

#[test]
fn dropping_slot_releases_handle() {
    let dropped = Rc::new(Cell::new(0));
    {
        let mut slot = ListenerSlot::new();
        slot.install(DropCounter(dropped.clone()));
    }
    assert_eq!(dropped.get(), 1);
}
