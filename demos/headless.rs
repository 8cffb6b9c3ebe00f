use std::time::Duration;
use tiled_scroll::prelude::*;

/// Example of driving the engine without any UI toolkit
fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Tiled scroll headless example");
    println!("=============================");

    let config =
        TiledScrollConfig::from_json(r#"{ "levels_of_zoom": 3, "visibility_margin": 40.0 }"#)?;
    let surface = ScrollState::new(Point::new(800.0, 600.0), Point::new(4096.0, 4096.0))
        .with_zoom_limits(0.125, 1.0);
    let provider = ReuseIdentifierProvider::new("pin");
    let mut view = TiledScrollView::with_config(surface, provider, config)?.with_delegate(
        Delegate::new()
            .on_did_appear(|v| println!("   appeared: {:?}", v.annotation()))
            .on_did_disappear(|v| println!("   disappeared: {:?}", v.annotation()))
            .on_did_select(|v| println!("   selected: {:?}", v.annotation())),
    );
    view.register_view_factory("pin", || AnnotationView::new("pin", Point::new(24.0, 24.0)));

    println!("Max zoom: {}", view.surface().maximum_zoom_scale());

    println!("\nAdding a 10x10 grid of annotations");
    let grid = (0..10).flat_map(|row| {
        (0..10).map(move |column| {
            Annotation::new(
                format!("poi-{}-{}", row, column),
                Point::new(column as f64 * 400.0 + 200.0, row as f64 * 400.0 + 200.0),
            )
        })
    });
    let report = view.add_annotations(grid);
    println!("   {} visible after add", report.appeared);

    println!("\nScrolling to the far corner");
    view.scroll_to_annotation(&AnnotationId::new("poi-9-9"), false)?;
    println!("   visible views: {}", view.reconciler().visible_count());
    println!("   pooled views: {}", view.reconciler().pool().len());

    println!("\nTapping the annotation under the viewport center");
    let now = Instant::now();
    let first_target = view.visible_views().next().map(|v| v.position());
    if let Some(target) = first_target {
        let outcome = view.handle_touch(TouchEvent::new(target, 1, now));
        println!("   outcome: {:?}", outcome);
    }

    println!("\nZooming out with a two-finger tap");
    let later = now + Duration::from_secs(1);
    let outcome = view.handle_touch(TouchEvent::new(Point::new(400.0, 300.0), 2, later));
    println!("   outcome: {:?}, zoom {}", outcome, view.surface().zoom_scale());
    let tick = view.tick(later + Duration::from_millis(150));
    if let Some(report) = tick.resumed {
        println!("   mute ended: {} appeared, {} disappeared", report.appeared, report.disappeared);
    }

    println!("\nDrawing visible tiles");
    let mut tiles = |tile: TileIndex| (tile.scale == 1).then(|| tile.to_string());
    let report = view.draw_visible_tiles(&mut tiles, &mut TileLog);
    println!("   {} of {} tiles drawn", report.drawn, report.requested);

    Ok(())
}

/// Canvas that just lists what would be drawn
struct TileLog;

impl TileCanvas<String> for TileLog {
    fn draw_image(&mut self, image: &String, rect: &Bounds) {
        log::info!("tile {} at ({}, {})", image, rect.min.x, rect.min.y);
    }
}
