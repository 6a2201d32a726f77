//! End-to-end behaviour of the engine against the synthetic DOM.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use replyguy_config::{Config, LocatorConfig};
use replyguy_core::{
    ContainerLocator, Engine, ManualScheduler, OverlayState, OverlayUi, OverlayView,
    RecordingObservers, WriteMethod,
};
use replyguy_dom::{ElementSpec, MemoryDom};
use replyguy_protocols::{DomEventKind, DomHost, NodeId};

/// Records whether the overlay element had a parent at each mount.
#[derive(Default)]
struct ParentCheckingUi {
    mounts: RefCell<Vec<bool>>,
}

impl OverlayUi for ParentCheckingUi {
    fn mount(&self, dom: &dyn DomHost, element: NodeId, _view: &OverlayView) {
        self.mounts.borrow_mut().push(dom.parent(element).is_some());
    }

    fn update(&self, _dom: &dyn DomHost, _element: NodeId, _view: &OverlayView) {}

    fn unmount(&self, _dom: &dyn DomHost, _element: NodeId) {}
}

struct World {
    dom: Rc<MemoryDom>,
    clock: Rc<ManualScheduler>,
    ui: Rc<ParentCheckingUi>,
    engine: Engine,
}

impl World {
    fn new(dom: MemoryDom) -> Self {
        let dom = Rc::new(dom);
        let clock = Rc::new(ManualScheduler::new());
        let ui = Rc::new(ParentCheckingUi::default());
        let mut engine = Engine::new(
            dom.clone(),
            clock.clone(),
            Rc::new(RecordingObservers::new()),
            Config::default(),
            ui.clone(),
        );
        engine.start();
        Self {
            dom,
            clock,
            ui,
            engine,
        }
    }

    fn advance(&mut self, ms: u64) {
        for key in self.clock.advance(Duration::from_millis(ms)) {
            self.engine.on_timer(key);
        }
    }

    fn markers(&self) -> usize {
        self.dom.query_attribute_all("id", "replyguy-overlay").len()
    }
}

fn composer(width: f64) -> ElementSpec {
    ElementSpec::div()
        .role("group")
        .size(width, 120.0)
        .child(
            ElementSpec::div().size(width - 20.0, 60.0).child(
                ElementSpec::div()
                    .testid("tweetTextarea_0")
                    .attr("contenteditable", "true")
                    .size(width - 40.0, 40.0),
            ),
        )
        .child(ElementSpec::div().testid("toolBar").size(width - 40.0, 36.0))
}

fn post(author: &str, text: &str) -> ElementSpec {
    ElementSpec::new("article")
        .testid("tweet")
        .size(600.0, 150.0)
        .child(ElementSpec::div().testid("User-Name").text(author))
        .child(ElementSpec::div().testid("tweetText").text(text))
}

fn status_page() -> MemoryDom {
    let dom = MemoryDom::new();
    dom.set_href("https://x.com/alice/status/1");
    let body = dom.body().unwrap();
    let main = dom.append(body, &ElementSpec::new("main").role("main").size(1000.0, 800.0));
    dom.append(
        main,
        &ElementSpec::div()
            .testid("cellInnerDiv")
            .size(600.0, 200.0)
            .child(post("alice", "hello world")),
    );
    dom.append(
        main,
        &ElementSpec::div()
            .testid("cellInnerDiv")
            .size(600.0, 200.0)
            .child(composer(600.0)),
    );
    dom
}

#[test]
fn region_invariants_hold_for_every_strategy() {
    let dom = status_page();
    let input = dom.by_testid("tweetTextarea_0").unwrap();
    let config = LocatorConfig::default();
    let region = ContainerLocator::new(&dom, &config).locate(input).unwrap();

    assert!(dom.is_connected(region.node));
    assert!(dom.contains(region.node, input));
    assert_ne!(Some(region.node), dom.body());
    assert!(region.width >= config.min_width && region.width <= config.max_width);
}

#[test]
fn hello_world_subject() {
    let world = World::new(status_page());
    let subject = world.engine.subject().unwrap();
    assert_eq!(subject.text, "hello world");
    assert_eq!(subject.author, "alice");
}

#[test]
fn seven_message_dm_thread() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    let messages: Vec<ElementSpec> = (1..=7)
        .map(|i| {
            ElementSpec::div()
                .testid("messageEntry")
                .child(ElementSpec::new("span").attr("dir", "auto").text(format!("message {}", i)))
        })
        .collect();
    dom.append(
        body,
        &ElementSpec::div()
            .testid("DMDrawer")
            .size(400.0, 600.0)
            .child(ElementSpec::div().children(messages))
            .child(
                ElementSpec::div().testid("DMComposer").size(400.0, 80.0).child(
                    ElementSpec::div()
                        .testid("tweetTextarea_0")
                        .attr("contenteditable", "true"),
                ),
            ),
    );

    let world = World::new(dom);
    let subject = world.engine.subject().unwrap();
    assert_eq!(subject.text, "message 7");
    assert_eq!(
        subject.thread,
        vec!["message 3", "message 4", "message 5", "message 6"]
    );
}

#[test]
fn out_of_bounds_chain_leaves_overlay_absent() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    dom.append(
        body,
        &ElementSpec::div().size(3000.0, 900.0).child(
            ElementSpec::div().size(2400.0, 500.0).child(
                ElementSpec::div().size(30.0, 30.0).child(
                    ElementSpec::div()
                        .testid("tweetTextarea_0")
                        .attr("contenteditable", "true"),
                ),
            ),
        ),
    );
    let world = World::new(dom);
    assert_eq!(world.engine.state(), OverlayState::Absent);
    assert_eq!(world.markers(), 0);
    assert!(world.ui.mounts.borrow().is_empty());
}

#[test]
fn at_most_one_marker_and_mount_only_when_attached() {
    let mut world = World::new(status_page());
    let body = world.dom.body().unwrap();
    for width in [520.0, 560.0, 640.0] {
        let dialog = world
            .dom
            .append(body, &ElementSpec::div().role("dialog").child(composer(width)));
        world.engine.on_nodes_added(&[dialog]);
        assert_eq!(world.markers(), 1);
    }
    world.engine.on_viewport_changed();
    world.advance(100);
    assert_eq!(world.markers(), 1);
    let mounts = world.ui.mounts.borrow();
    assert_eq!(mounts.len(), 4);
    assert!(mounts.iter().all(|attached| *attached));
}

#[test]
fn resize_burst_is_one_pass() {
    let mut world = World::new(status_page());
    for _ in 0..25 {
        world.engine.on_container_resized();
        world.advance(3);
    }
    world.advance(100);
    assert_eq!(world.engine.stats().reposition_passes, 1);
}

#[test]
fn plain_control_insert() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    dom.append(
        body,
        &ElementSpec::new("form")
            .size(600.0, 100.0)
            .child(ElementSpec::new("textarea").testid("tweetTextarea_0")),
    );
    let textarea = dom.by_testid("tweetTextarea_0").unwrap();
    let world = World::new(dom);

    assert_eq!(world.engine.insert_text("abc"), Some(WriteMethod::NativeValue));
    assert_eq!(world.dom.value(textarea), "abc");
    assert_eq!(world.dom.count_events(textarea, DomEventKind::Input), 1);
    assert_eq!(world.dom.count_events(textarea, DomEventKind::Change), 1);
}

#[test]
fn url_change_clears_overlay_before_scan() {
    let mut world = World::new(status_page());
    assert_eq!(world.engine.state(), OverlayState::Mounted);

    world.dom.set_href("https://x.com/home");
    world.engine.on_location_probe();
    assert_eq!(world.engine.state(), OverlayState::Absent);
    assert_eq!(world.engine.stats().scans, 1);

    world.advance(500);
    assert_eq!(world.engine.stats().scans, 2);
    assert_eq!(world.engine.state(), OverlayState::Mounted);
}
