//! Overlay lifecycle.
//!
//! [`OverlayManager`] owns the one overlay element the engine ever puts in the
//! page, and the UI mounted inside it. The element is either fully absent or
//! fully inserted inside a validated container region; it is never parked on
//! `<body>`.
//!
//! ```text
//!  absent ──show──▶ pending-insert ──region──▶ mounted ◀─┐
//!    ▲                    │                     │  │      │ reposition
//!    └────── no region ───┘                     │  └──────┘
//!    └──── close / supersede / navigate / detach┘
//! ```

mod anchor;

use std::cell::Cell;
use std::rc::Rc;

use replyguy_config::OverlayConfig;
use replyguy_protocols::{
    CandidateInput, ComposeContext, ContainerRegion, DomError, DomHost, ExtractedContext, NodeId,
};
use serde::Serialize;
use tracing::{debug, info, warn};

pub use anchor::{Anchor, choose_anchor};

use crate::locator::{self, ContainerLocator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayState {
    Absent,
    PendingInsert,
    Mounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeardownReason {
    UserClosed,
    Superseded,
    Navigation,
    RegionDetached,
    NoRegion,
    InsertFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayLayout {
    Narrow,
    Wide,
}

impl OverlayLayout {
    pub fn for_width(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint { Self::Narrow } else { Self::Wide }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Wide => "wide",
        }
    }
}

/// A compose input the engine decided to serve.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub candidate: CandidateInput,
    pub context: ComposeContext,
    /// What a reply answers. `None` for top-level posts.
    pub subject: Option<ExtractedContext>,
}

/// What the mounted UI is told to render.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub context: ComposeContext,
    pub subject: Option<ExtractedContext>,
    pub width: f64,
    pub layout: OverlayLayout,
}

/// The presentational layer living inside the overlay element.
pub trait OverlayUi {
    /// Called once per overlay element, only after it has been attached.
    fn mount(&self, dom: &dyn DomHost, element: NodeId, view: &OverlayView);

    /// Called on every later positioning pass.
    fn update(&self, dom: &dyn DomHost, element: NodeId, view: &OverlayView);

    fn unmount(&self, dom: &dyn DomHost, element: NodeId);
}

/// The current mount.
#[derive(Debug, Clone, PartialEq)]
pub struct MountRecord {
    pub detection: Detection,
    pub region: ContainerRegion,
    pub anchor: Anchor,
}

/// Holds the positioning flag for the duration of a pass.
struct PassGuard(Rc<Cell<bool>>);

impl PassGuard {
    fn enter(flag: &Rc<Cell<bool>>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(Rc::clone(flag)))
        }
    }
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct OverlayManager {
    config: OverlayConfig,
    ui: Rc<dyn OverlayUi>,
    state: OverlayState,
    element: Option<NodeId>,
    ui_mounted: bool,
    pending: Option<Detection>,
    mounted: Option<MountRecord>,
    in_pass: Rc<Cell<bool>>,
}

impl OverlayManager {
    pub fn new(config: OverlayConfig, ui: Rc<dyn OverlayUi>) -> Self {
        Self {
            config,
            ui,
            state: OverlayState::Absent,
            element: None,
            ui_mounted: false,
            pending: None,
            mounted: None,
            in_pass: Rc::new(Cell::new(false)),
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    pub fn mounted(&self) -> Option<&MountRecord> {
        self.mounted.as_ref()
    }

    pub fn candidate(&self) -> Option<CandidateInput> {
        self.mounted
            .as_ref()
            .map(|m| m.detection.candidate)
            .or_else(|| self.pending.as_ref().map(|d| d.candidate))
    }

    /// Whether a positioning pass is running.
    pub fn in_pass(&self) -> bool {
        self.in_pass.get()
    }

    /// Shared handle to the positioning flag.
    pub fn pass_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.in_pass)
    }

    /// Mounted, and the element and region still hold the candidate.
    pub fn is_mount_valid(&self, dom: &dyn DomHost) -> bool {
        let (Some(record), Some(element)) = (&self.mounted, self.element) else {
            return false;
        };
        self.state == OverlayState::Mounted
            && dom.is_connected(element)
            && dom.is_connected(record.region.node)
            && dom.contains(record.region.node, record.detection.candidate.node)
    }

    /// Serve a new detection, replacing whatever is mounted.
    pub fn show(
        &mut self,
        dom: &dyn DomHost,
        locator: &ContainerLocator<'_>,
        detection: Detection,
    ) -> OverlayState {
        let Some(_guard) = PassGuard::enter(&self.in_pass) else {
            debug!("show ignored: positioning pass in progress");
            return self.state;
        };

        if self.state != OverlayState::Absent || self.element.is_some() {
            self.teardown(dom, TeardownReason::Superseded);
        }
        self.purge_foreign(dom);

        self.state = OverlayState::PendingInsert;
        let candidate = detection.candidate.node;
        self.pending = Some(detection);

        let Some(region) = locator.locate(candidate) else {
            self.pending = None;
            self.state = OverlayState::Absent;
            info!("overlay not shown: no container region for {}", candidate);
            return self.state;
        };
        match self.pending.take() {
            Some(detection) => self.attach(dom, detection, region),
            None => self.state,
        }
    }

    /// Re-run the locator for the mounted candidate and move or update the
    /// overlay. Tears down if nothing validates any more.
    pub fn reposition(&mut self, dom: &dyn DomHost, locator: &ContainerLocator<'_>) -> OverlayState {
        if self.state != OverlayState::Mounted {
            return self.state;
        }
        let Some(_guard) = PassGuard::enter(&self.in_pass) else {
            debug!("reposition ignored: positioning pass in progress");
            return self.state;
        };
        let Some(record) = self.mounted.clone() else {
            return self.state;
        };

        let candidate = record.detection.candidate.node;
        if !dom.is_connected(candidate) {
            self.teardown(dom, TeardownReason::RegionDetached);
            return self.state;
        }
        let Some(region) = locator.locate(candidate) else {
            self.teardown(dom, TeardownReason::NoRegion);
            return self.state;
        };
        self.attach(dom, record.detection, region)
    }

    /// Remove the overlay and unmount its UI. Returns whether anything was
    /// torn down.
    pub fn teardown(&mut self, dom: &dyn DomHost, reason: TeardownReason) -> bool {
        if self.state == OverlayState::Absent && self.element.is_none() {
            return false;
        }
        if let Some(element) = self.element.take() {
            if self.ui_mounted {
                self.ui.unmount(dom, element);
            }
            dom.remove(element);
        }
        self.ui_mounted = false;
        self.pending = None;
        self.mounted = None;
        self.state = OverlayState::Absent;
        info!("overlay torn down: {:?}", reason);
        true
    }

    fn purge_foreign(&self, dom: &dyn DomHost) {
        for node in dom.query_attribute_all("id", &self.config.marker_id) {
            if Some(node) != self.element {
                warn!("removing stray overlay element {}", node);
                dom.remove(node);
            }
        }
    }

    fn ensure_element(&mut self, dom: &dyn DomHost) -> Result<NodeId, DomError> {
        if let Some(element) = self.element {
            return Ok(element);
        }
        let element = dom.create_element("div")?;
        dom.set_attribute(element, "id", &self.config.marker_id)?;
        for (property, value) in [
            ("position", "relative"),
            ("z-index", "1"),
            ("pointer-events", "auto"),
            ("display", "block"),
            ("padding", "0"),
        ] {
            dom.set_style(element, property, value)?;
        }
        self.element = Some(element);
        Ok(element)
    }

    fn apply_geometry(
        &self,
        dom: &dyn DomHost,
        element: NodeId,
        region: &ContainerRegion,
        context: ComposeContext,
        layout: OverlayLayout,
    ) -> Result<(), DomError> {
        let width = format!("{}px", region.width);
        dom.set_style(element, "width", &width)?;
        dom.set_style(element, "max-width", &width)?;
        dom.set_style(element, "box-sizing", "border-box")?;
        dom.set_style(element, "margin-top", &format!("{}px", self.config.margin_top_px))?;
        dom.set_style(
            element,
            "margin-bottom",
            &format!("{}px", self.config.margin_bottom_px),
        )?;
        dom.set_attribute(element, "data-layout", layout.as_str())?;
        dom.set_attribute(element, "data-context", context.as_str())?;
        Ok(())
    }

    fn attach(
        &mut self,
        dom: &dyn DomHost,
        detection: Detection,
        region: ContainerRegion,
    ) -> OverlayState {
        self.purge_foreign(dom);
        let candidate = detection.candidate.node;

        let element = match self.ensure_element(dom) {
            Ok(element) => element,
            Err(e) => {
                warn!("overlay element could not be created: {}", e);
                self.teardown(dom, TeardownReason::InsertFailed);
                return self.state;
            }
        };

        let anchor = choose_anchor(dom, region.node, candidate, Some(element));
        if !anchor.holds(dom, element) {
            if let Err(e) = dom.insert_before(anchor.parent(), element, anchor.reference()) {
                warn!("overlay insert {} failed: {}", anchor.name(), e);
                self.teardown(dom, TeardownReason::InsertFailed);
                return self.state;
            }
            debug!("overlay inserted {} in {}", anchor.name(), anchor.parent());
        }

        let attached = dom.parent(element).is_some() && dom.is_connected(element);
        if !attached {
            self.teardown(dom, TeardownReason::InsertFailed);
            return self.state;
        }

        let layout = OverlayLayout::for_width(region.width, self.config.narrow_breakpoint_px);
        if let Err(e) = self.apply_geometry(dom, element, &region, detection.context, layout) {
            warn!("overlay styling failed: {}", e);
        }

        let view = OverlayView {
            context: detection.context,
            subject: detection.subject.clone(),
            width: region.width,
            layout,
        };
        if self.ui_mounted {
            self.ui.update(dom, element, &view);
        } else {
            self.ui.mount(dom, element, &view);
            self.ui_mounted = true;
        }

        info!(
            "overlay mounted for {} in {} ({}, {}px, {})",
            detection.context, region.node, region.strategy, region.width, anchor.name()
        );
        self.mounted = Some(MountRecord {
            detection,
            region,
            anchor,
        });
        self.state = OverlayState::Mounted;
        self.state
    }
}

/// Re-check a mount record against the locator's invariants without moving
/// anything.
pub fn region_still_valid(
    dom: &dyn DomHost,
    config: &replyguy_config::LocatorConfig,
    record: &MountRecord,
) -> bool {
    locator::validate(dom, config, record.region.node, record.detection.candidate.node).is_some()
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
