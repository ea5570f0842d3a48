use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use node_layout::logging::{LogEvent, LogSink};
use node_layout::{
    Constraint, ContainerId, CoordinatorConfig, Insets, LayoutCoordinator, Logger, LoggingResult,
    NodeVariant, Rect, SharedBox, StaticBox,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

const HOST: ContainerId = ContainerId(1);
const PANELS: i32 = 6;
const ROWS: i32 = 12;

/// Dashboard-like tree: a header row, a grid of panels, each panel a column
/// of boxes, and a fractional overlay.
fn build_dashboard() -> (LayoutCoordinator, Vec<SharedBox>) {
    let mut config = CoordinatorConfig::default().with_logger(Logger::new(NullSink));
    config.enable_metrics();
    config.target = Some(HOST);
    let mut layout = LayoutCoordinator::with_config("root", NodeVariant::Vertical, config);
    let mut boxes = Vec::new();

    layout
        .add_node("header", NodeVariant::Horizontal, Some("root"), None)
        .ok();
    layout
        .add_node("panels", NodeVariant::Grid, Some("root"), None)
        .ok();
    layout
        .add_node("overlay", NodeVariant::Rect, Some("root"), None)
        .ok();

    for i in 0..4 {
        let handle: SharedBox = StaticBox::new(20 + i, 1).shared();
        layout.attach(&handle, "header", None).ok();
        boxes.push(handle);
    }
    for panel in 0..PANELS {
        let name = format!("panel{panel}");
        let cell = Constraint::cell(panel % 3, panel / 3, 1, 1);
        layout
            .add_node(name.clone(), NodeVariant::Vertical, Some("panels"), Some(cell))
            .ok();
        for row in 0..ROWS {
            let handle: SharedBox = StaticBox::new(10 + row, 1 + row % 3).shared();
            layout.attach(&handle, &name, None).ok();
            boxes.push(handle);
        }
    }
    let popup: SharedBox = StaticBox::new(30, 8).shared();
    layout
        .attach(
            &popup,
            "overlay",
            Some(Constraint::fraction(0.25, 0.25, 0.5, 0.5)),
        )
        .ok();
    boxes.push(popup);

    (layout, boxes)
}

fn measure_dashboard(c: &mut Criterion) {
    let (mut layout, _boxes) = build_dashboard();
    c.bench_function("measure_dashboard", |b| {
        b.iter(|| black_box(layout.preferred_size(Insets::uniform(1))));
    });
}

fn arrange_dashboard(c: &mut Criterion) {
    let (mut layout, _boxes) = build_dashboard();
    c.bench_function("arrange_dashboard", |b| {
        b.iter(|| layout.arrange(black_box(Rect::new(0, 0, 240, 120)), Insets::uniform(1)));
    });
}

fn attach_detach_cycle(c: &mut Criterion) {
    let (mut layout, _boxes) = build_dashboard();
    let handle: SharedBox = StaticBox::new(5, 5).shared();
    c.bench_function("attach_detach_cycle", |b| {
        b.iter(|| {
            layout.attach(&handle, "panel0", None).ok();
            black_box(layout.detach(&handle));
        });
    });
}

criterion_group!(
    layout_benches,
    measure_dashboard,
    arrange_dashboard,
    attach_detach_cycle
);
criterion_main!(layout_benches);
