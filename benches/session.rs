use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use packline::logging::{LogEvent, LogSink, Logger, LoggingResult};
use packline::{
    InputEvent, LayoutManager, Manifest, ManifestEntry, Point, Section, SessionConfig,
    SessionController, Size,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

fn session_scan_script(c: &mut Criterion) {
    let script = scan_script();
    c.bench_function("session_scan_script", |b| {
        b.iter(|| {
            let mut session = build_session();
            for event in black_box(script.clone()) {
                session.apply(event).expect("scripted event");
            }
            black_box(session.take_events())
        });
    });
}

fn session_drag_script(c: &mut Criterion) {
    let script = drag_script();
    c.bench_function("session_drag_script", |b| {
        b.iter(|| {
            let mut session = build_session();
            for event in black_box(script.clone()) {
                session.apply(event).expect("scripted event");
            }
            black_box(session.take_events())
        });
    });
}

fn build_session() -> SessionController {
    let manifest = Manifest::new(
        (0..40)
            .map(|n| ManifestEntry::new(format!("SKU-{n:03}"), format!("Item {n}"), 3))
            .collect(),
    )
    .expect("manifest");
    let layout = LayoutManager::default_for_viewport(Size::new(1920, 1080));
    let mut config = SessionConfig::default();
    config.logger = Some(Logger::new(NullSink));
    config.metrics_interval = Duration::from_millis(0);
    config.enable_metrics();
    SessionController::new(manifest, layout, config)
}

fn scan_script() -> Vec<InputEvent> {
    let mut script = Vec::new();
    for n in 0..40 {
        for _ in 0..3 {
            script.push(InputEvent::ScanSubmitted(format!("sku-{n:03}")));
        }
        script.push(InputEvent::Tick);
        // Occasional bad reads and corrections keep the reject paths warm.
        if n % 7 == 0 {
            script.push(InputEvent::ScanSubmitted("UNKNOWN".to_string()));
            script.push(InputEvent::RemoveOne(format!("SKU-{n:03}")));
            script.push(InputEvent::ScanSubmitted(format!("SKU-{n:03}")));
        }
    }
    script
}

fn drag_script() -> Vec<InputEvent> {
    let mut script = Vec::new();
    let drops = [
        (Section::ToPack, Point::new(200, 800)),
        (Section::Metrics, Point::new(960, 200)),
        (Section::Fulfilled, Point::new(1400, 800)),
    ];
    for _ in 0..20 {
        for (section, drop) in drops {
            script.push(InputEvent::BeginDrag(section));
            script.push(InputEvent::UpdateDrag(Point::new(drop.x - 50, drop.y - 50)));
            script.push(InputEvent::UpdateDrag(drop));
            script.push(InputEvent::EndDrag(drop));
        }
        script.push(InputEvent::ResizeZone("zone:top".to_string(), 15, -10));
        script.push(InputEvent::Tick);
    }
    script
}

criterion_group!(benches, session_scan_script, session_drag_script);
criterion_main!(benches);
