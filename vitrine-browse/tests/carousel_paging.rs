//! End-to-end paging flows through the row registry.

use std::time::{Duration, Instant};

use vitrine_browse::carousel::focus::FocusTarget;
use vitrine_browse::carousel::{
    Direction, ItemPositionClassifier, RowEvent, RowKey, RowMessage, RowRegistry,
    ViewportWindow,
};
use vitrine_browse::config::RuntimeConfig;
use vitrine_core::MediaId;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ids(_: usize) -> Option<MediaId> {
    Some(MediaId::new())
}

/// Drive a started shift to its committed event.
fn settle_shift(
    registry: &mut RowRegistry,
    cfg: &RuntimeConfig,
    started: Instant,
) -> Vec<RowEvent> {
    registry.tick(
        started + Duration::from_millis(cfg.shift_duration_ms() + 10),
        cfg,
        |_| true,
    )
}

#[test]
fn paging_scenario_clamps_then_wraps() {
    init_logs();
    // itemsPerPage=4 (1024px viewport), totalItems=10:
    // Next -> 4, Next -> 6 (clamped), Next -> wraps to 0.
    let cfg = RuntimeConfig::default();
    let mut registry = RowRegistry::new();
    let key = RowKey::Trending;
    registry.ensure_row(key, 10, 1024.0);

    let mut committed = Vec::new();
    for _ in 0..3 {
        let t0 = Instant::now();
        let events = registry.handle(RowMessage::NextPage(key), &cfg, t0);
        assert!(matches!(events.as_slice(), [RowEvent::ShiftStarted(k, _)] if *k == key));

        for event in settle_shift(&mut registry, &cfg, t0) {
            match event {
                RowEvent::ShiftCommitted { lowest, .. } => committed.push(lowest),
                RowEvent::FocusItem(_) | RowEvent::PrefetchHint { .. } => {}
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }
    assert_eq!(committed, vec![4, 6, 0]);
}

#[test]
fn advance_during_flight_emits_nothing_and_preserves_state() {
    init_logs();
    let cfg = RuntimeConfig::default();
    let mut registry = RowRegistry::new();
    let key = RowKey::Trending;
    registry.ensure_row(key, 10, 1024.0);
    let t0 = Instant::now();

    registry.handle(RowMessage::NextPage(key), &cfg, t0);
    let window_before = registry.get(&key).unwrap().row.window;

    let events = registry.handle(RowMessage::NextPage(key), &cfg, t0);
    assert!(events.is_empty());
    assert_eq!(registry.get(&key).unwrap().row.window, window_before);
}

#[test]
fn realized_items_stay_bounded_across_a_full_cycle() {
    init_logs();
    let cfg = RuntimeConfig::default();
    let mut registry = RowRegistry::new();
    let key = RowKey::NewReleases;
    registry.ensure_row(key, 13, 1024.0); // 4 per page

    let cycle = 13usize.div_ceil(4);
    for _ in 0..cycle {
        let t0 = Instant::now();
        registry.handle(RowMessage::NextPage(key), &cfg, t0);

        // bound holds mid-flight too
        let row = &registry.get(&key).unwrap().row;
        let window = ViewportWindow::compute(row, ids);
        assert!(window.realized_data_count() <= 13usize.min(2 * 4 + 2));

        settle_shift(&mut registry, &cfg, t0);
        let row = &registry.get(&key).unwrap().row;
        let window = ViewportWindow::compute(row, ids);
        assert!(window.realized_data_count() <= 13usize.min(2 * 4 + 2));
    }
    // back where we started
    assert_eq!(
        registry.get(&key).unwrap().row.window.lowest_visible_index,
        0
    );
}

#[test]
fn refocus_lands_on_revealed_edge_item_once_mounted() {
    init_logs();
    let cfg = RuntimeConfig::default();
    let mut registry = RowRegistry::new();
    let key = RowKey::Trending;
    registry.ensure_row(key, 10, 1024.0);
    let t0 = Instant::now();

    registry.handle(RowMessage::NextPage(key), &cfg, t0);
    let settled_at = t0 + Duration::from_millis(cfg.shift_duration_ms() + 10);
    // target not mounted yet at commit time
    let events = registry.tick(settled_at, &cfg, |_| false);
    assert!(events.iter().any(|e| matches!(e, RowEvent::ShiftCommitted { lowest: 4, .. })));
    assert!(!events.iter().any(|e| matches!(e, RowEvent::FocusItem(_))));

    // a later poll finds it mounted
    let events = registry.tick(
        settled_at + Duration::from_millis(cfg.refocus_poll_interval_ms() + 10),
        &cfg,
        |target| target.data_index == 4,
    );
    assert!(events.contains(&RowEvent::FocusItem(FocusTarget {
        row: key,
        data_index: 4
    })));
}

#[test]
fn refocus_is_abandoned_when_item_never_mounts() {
    init_logs();
    let cfg = RuntimeConfig::default();
    let mut registry = RowRegistry::new();
    let key = RowKey::Trending;
    registry.ensure_row(key, 10, 1024.0);
    let t0 = Instant::now();

    registry.handle(RowMessage::NextPage(key), &cfg, t0);
    let settled_at = t0 + Duration::from_millis(cfg.shift_duration_ms() + 10);
    registry.tick(settled_at, &cfg, |_| false);

    let events = registry.tick(
        settled_at + Duration::from_millis(cfg.refocus_timeout_ms() + 20),
        &cfg,
        |_| false,
    );
    assert!(events.iter().any(|e| matches!(
        e,
        RowEvent::RefocusAbandoned(FocusTarget { data_index: 4, .. })
    )));
}

#[test]
fn wrap_shift_mounts_padding_copies_for_the_animation() {
    init_logs();
    // Prev from index 0 on a looping row: the strip must already show
    // copies of the last page while the shift animates.
    let cfg = RuntimeConfig::default();
    let mut registry = RowRegistry::new();
    let key = RowKey::MyList;
    registry.ensure_row(key, 10, 1024.0);
    let t0 = Instant::now();

    let events = registry.handle(RowMessage::PrevPage(key), &cfg, t0);
    assert!(matches!(events.as_slice(), [RowEvent::ShiftStarted(_, plan)]
        if plan.target_lowest == 6 && plan.direction == Direction::Prev));

    let row = &registry.get(&key).unwrap().row;
    assert!(row.window.is_animating);
    let mut window = ViewportWindow::compute(row, ids);
    ItemPositionClassifier::for_row(row).classify(&mut window);
    let leading_clones = window
        .slots
        .iter()
        .filter_map(|s| s.as_item())
        .filter(|i| i.uid.is_clone())
        .count();
    assert_eq!(leading_clones, 5); // items_per_page + 1

    settle_shift(&mut registry, &cfg, t0);
    assert_eq!(
        registry.get(&key).unwrap().row.window.lowest_visible_index,
        6
    );
}
