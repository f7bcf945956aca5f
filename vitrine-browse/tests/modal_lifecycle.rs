//! Overlay lifecycle wired the way a host embeds it: records in the shared
//! registry, machine events driven by measurement/settled signals, side
//! effects applied through the collaborator handles.

use std::sync::mpsc;
use std::time::Instant;

use vitrine_browse::carousel::classify::{self, ItemPositionClassifier};
use vitrine_browse::carousel::{RowKey, ViewportWindow};
use vitrine_browse::config::RuntimeConfig;
use vitrine_browse::interop::{apply_modal_effects, LayoutHandle, RoutingSink};
use vitrine_browse::modal::{
    ModalPhase, ModalStateMachine, RouteTarget, ViewEnv,
};
use vitrine_browse::prelude::CarouselRow;
use vitrine_core::{
    AnchorRect, MediaId, MediaType, ModalKey, ModalKind, ModalRecord, ModalRegistry,
    Rect,
};

#[derive(Debug, Default)]
struct StubLayout {
    scroll: f32,
    locked: bool,
    detail_open: bool,
    tooltips_suppressed: bool,
    cleared_lock: bool,
}

impl LayoutHandle for StubLayout {
    fn scroll_position(&self) -> f32 {
        self.scroll
    }
    fn lock_scroll(&mut self) {
        self.locked = true;
    }
    fn unlock_scroll(&mut self) {
        self.locked = false;
    }
    fn restore_scroll(&mut self, offset: f32) {
        self.scroll = offset;
    }
    fn clear_scroll_lock(&mut self) {
        self.locked = false;
        self.cleared_lock = true;
    }
    fn set_detail_open(&mut self, open: bool) {
        self.detail_open = open;
    }
    fn set_tooltips_suppressed(&mut self, suppressed: bool) {
        self.tooltips_suppressed = suppressed;
    }
}

#[derive(Debug, Default)]
struct StubRouter {
    reflected: Vec<Option<RouteTarget>>,
}

impl RoutingSink for StubRouter {
    fn reflect(&mut self, target: Option<RouteTarget>) {
        self.reflected.push(target);
    }
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn env() -> ViewEnv {
    ViewEnv {
        scroll_y: 380.0,
        viewport_width: 1280.0,
    }
}

fn anchor() -> AnchorRect {
    AnchorRect::new(Rect::new(100.0, 200.0, 300.0, 150.0), 380.0)
}

/// Mini card measured centered over the anchor at 1.5x its size.
fn mini_rect() -> Rect {
    Rect::new(62.5, 125.0, 450.0, 225.0)
}

#[test]
fn detail_session_brackets_layout_and_routing_effects() {
    init_logs();
    let cfg = RuntimeConfig::default();
    let registry = ModalRegistry::new();
    let mut layout = StubLayout {
        scroll: 380.0,
        ..StubLayout::default()
    };
    let mut router = StubRouter::default();

    let key = ModalKey(MediaId::new());
    let record = ModalRecord::open(key, ModalKind::Detail, Some(anchor()));
    registry.open(key, record.clone());

    let route = RouteTarget {
        id: key.0,
        media_type: MediaType::Series,
    };
    let mut machine = ModalStateMachine::new(&record, Some(route), &cfg);

    // mount -> measured -> open
    let out = machine.set_measured(mini_rect(), &env());
    apply_modal_effects(&out.effects, key, &registry, &mut layout, &mut router);
    assert!(layout.tooltips_suppressed);

    let out = machine.on_settled(&env());
    apply_modal_effects(&out.effects, key, &registry, &mut layout, &mut router);
    assert_eq!(machine.phase(), ModalPhase::Open);
    assert!(layout.locked);
    assert!(layout.detail_open);
    assert_eq!(router.reflected, vec![Some(route)]);

    let out = machine.on_settled(&env());
    apply_modal_effects(&out.effects, key, &registry, &mut layout, &mut router);
    assert!(!layout.tooltips_suppressed);

    // scroll drifts while the panel is open, then the panel closes
    layout.scroll = 0.0;
    let out = machine.request_close(false, &env());
    apply_modal_effects(&out.effects, key, &registry, &mut layout, &mut router);
    assert!(!registry.get(&key).unwrap().is_open);

    let out = machine.on_settled(&env());
    let dismissed =
        apply_modal_effects(&out.effects, key, &registry, &mut layout, &mut router);
    assert!(dismissed);
    assert!(machine.is_dismissed());
    // scroll restored, marker removed, route cleared, record gone
    assert_eq!(layout.scroll, 380.0);
    assert!(!layout.locked);
    assert!(!layout.detail_open);
    assert_eq!(router.reflected.last(), Some(&None));
    assert!(registry.get(&key).is_none());
}

#[test]
fn registry_subscription_drives_an_externally_closed_overlay() {
    init_logs();
    let cfg = RuntimeConfig::default();
    let registry = ModalRegistry::new();
    let key = ModalKey(MediaId::new());
    let record = ModalRecord::open(key, ModalKind::Mini, Some(anchor()));

    let (tx, rx) = mpsc::channel();
    let _sub = registry.subscribe(move |snapshot| {
        let _ = tx.send(snapshot.clone());
    });

    registry.open(key, record.clone());
    let mut machine = ModalStateMachine::new(&record, None, &cfg);
    machine.set_measured(mini_rect(), &env());
    machine.on_settled(&env());
    machine.on_settled(&env());
    assert_eq!(machine.phase(), ModalPhase::Open);

    // another component closes the record; the subscription snapshot is
    // forwarded into the machine
    registry.close(key, false);
    let snapshot = rx.try_iter().last().unwrap();
    let out = machine.on_record_change(snapshot.get(&key), &env());
    assert_eq!(machine.phase(), ModalPhase::Close);
    assert!(out.transform.is_some());
}

#[test]
fn close_without_animation_short_circuits_from_any_point() {
    init_logs();
    let cfg = RuntimeConfig::default();
    let key = ModalKey(MediaId::new());
    let record = ModalRecord::open(key, ModalKind::Mini, Some(anchor()));

    // mid-open-morph
    let mut machine = ModalStateMachine::new(&record, None, &cfg);
    machine.set_measured(mini_rect(), &env());
    machine.on_settled(&env());
    let out = machine.request_close(true, &env());
    let t = out.transform.unwrap();
    assert_eq!(t.opacity, 0.0);
    assert_eq!(t.duration_ms, 0);

    // before measurement ever happened
    let mut machine = ModalStateMachine::new(&record, None, &cfg);
    let out = machine.request_close(true, &env());
    let t = out.transform.unwrap();
    assert_eq!(t.opacity, 0.0);
    assert_eq!(t.duration_ms, 0);
    assert!(machine.is_dismissed());
}

#[test]
fn grid_item_anchor_round_trips_through_the_overlay() {
    init_logs();
    // Full path: classify a carousel window, measure a card, capture its
    // anchor, open a mini overlay from it, close it again untouched. The
    // close morph must land exactly back on the anchor.
    let cfg = RuntimeConfig::default();
    let mut row = CarouselRow::new(RowKey::Trending, 10, 1024.0);
    row.items_per_page = 4;

    let data_id = MediaId::new();
    let mut window = ViewportWindow::compute(&row, |i| {
        (i < 10).then_some(data_id)
    });
    ItemPositionClassifier::for_row(&row).classify(&mut window);

    let uid = window.slots[1].as_item().unwrap().uid;
    classify::record_measurement(
        &mut window,
        uid,
        Rect::new(100.0, 200.0, 300.0, 150.0),
    );
    let anchor = classify::capture_anchor(&window, 1, 380.0).unwrap();

    let key = ModalKey(data_id);
    let record = ModalRecord::open(key, ModalKind::Mini, Some(anchor));
    let mut machine = ModalStateMachine::new(&record, None, &cfg);

    let reset = machine
        .set_measured(mini_rect(), &env())
        .transform
        .unwrap();
    assert!((reset.scale_x - 1.0 / cfg.mini_scale_factor()).abs() < 1e-4);
    assert!(reset.translate_x.abs() < 1e-4);
    assert!(reset.translate_y.abs() < 1e-4);

    machine.on_settled(&env()); // -> Open
    machine.on_settled(&env()); // open settled
    let close = machine.request_close(false, &env()).transform.unwrap();
    assert_eq!(close.scale_x, reset.scale_x);
    assert_eq!(close.scale_y, reset.scale_y);
    assert_eq!(close.translate_x, reset.translate_x);
    assert_eq!(close.translate_y, reset.translate_y);
    assert_eq!(close.opacity, 0.0);
}

#[test]
fn unanchored_detail_follows_fixed_scale_track() {
    init_logs();
    // AnchorRect = null: Mount is 0.8/invisible, Open is 1.0/visible.
    let cfg = RuntimeConfig::default();
    let key = ModalKey(MediaId::new());
    let record = ModalRecord::open(key, ModalKind::Detail, None);
    let mut machine = ModalStateMachine::new(&record, None, &cfg);

    let mount = machine
        .set_measured(Rect::new(32.0, 215.0, 850.0, 640.0), &env())
        .transform
        .unwrap();
    assert_eq!((mount.scale_x, mount.scale_y, mount.opacity), (0.8, 0.8, 0.0));

    let open = machine.on_settled(&env()).transform.unwrap();
    assert_eq!((open.scale_x, open.scale_y, open.opacity), (1.0, 1.0, 1.0));
}

#[test]
fn escape_closes_and_clears_the_global_scroll_lock() {
    init_logs();
    let cfg = RuntimeConfig::default();
    let registry = ModalRegistry::new();
    let mut layout = StubLayout {
        scroll: 380.0,
        ..StubLayout::default()
    };
    let mut router = StubRouter::default();

    let key = ModalKey(MediaId::new());
    let record = ModalRecord::open(key, ModalKind::Detail, Some(anchor()));
    registry.open(key, record.clone());
    let mut machine = ModalStateMachine::new(&record, None, &cfg);

    machine.set_measured(mini_rect(), &env());
    let out = machine.on_settled(&env());
    apply_modal_effects(&out.effects, key, &registry, &mut layout, &mut router);
    let out = machine.on_settled(&env());
    apply_modal_effects(&out.effects, key, &registry, &mut layout, &mut router);
    assert!(layout.locked);

    let out = machine.on_escape(&env());
    apply_modal_effects(&out.effects, key, &registry, &mut layout, &mut router);
    assert_eq!(machine.phase(), ModalPhase::Close);
    assert!(layout.cleared_lock);
    assert!(!layout.locked);
    assert!(!registry.get(&key).unwrap().is_open);
}
