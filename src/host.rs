//! Contract between the layout engine and the host that owns the visual boxes.
//!
//! The engine never paints and never owns boxes. It reads a box's preferred size,
//! visibility and current container, and writes back its bounds. Boxes are shared
//! with the host through [`SharedBox`]; identity is pointer identity of that handle.

use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::geometry::{Insets, Rect, Size};

/// Host-assigned identity of a container that boxes live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

/// A visual element the engine positions.
pub trait LayoutBox {
    /// Intrinsic preferred size of the box's content.
    fn preferred_size(&self) -> Size;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    fn set_bounds(&mut self, bounds: Rect);

    fn bounds(&self) -> Rect;

    /// Container the box currently lives in, as seen by the host.
    fn container(&self) -> Option<ContainerId>;

    /// Move the box into another container (or out of any).
    fn set_container(&mut self, container: Option<ContainerId>);
}

/// Box handle shared between host and engine.
pub type SharedBox = Rc<RefCell<dyn LayoutBox>>;

/// Identity of a [`SharedBox`], usable as a map key.
///
/// Two keys are equal iff they were taken from clones of the same handle. The key
/// does not keep the box alive; registries that store keys also store the handle.
#[derive(Debug, Clone, Copy)]
pub struct BoxKey(*const ());

impl BoxKey {
    pub fn of(handle: &SharedBox) -> Self {
        Self(Rc::as_ptr(handle) as *const ())
    }
}

impl PartialEq for BoxKey {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for BoxKey {}

impl Hash for BoxKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.0 as usize).hash(state);
    }
}

/// Container-side view the coordinator needs to lay a container out.
pub trait HostContainer {
    fn id(&self) -> ContainerId;

    /// Client bounds of the container.
    fn bounds(&self) -> Rect;

    fn insets(&self) -> Insets;
}

/// Plain in-memory box with a fixed preferred size.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBox {
    preferred: Size,
    visible: bool,
    bounds: Rect,
    container: Option<ContainerId>,
}

impl StaticBox {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            preferred: Size::new(width, height),
            visible: true,
            bounds: Rect::default(),
            container: None,
        }
    }

    pub fn in_container(mut self, container: ContainerId) -> Self {
        self.container = Some(container);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn set_preferred(&mut self, preferred: Size) {
        self.preferred = preferred;
    }

    /// Wrap into a handle the engine can hold.
    pub fn shared(self) -> Rc<RefCell<StaticBox>> {
        Rc::new(RefCell::new(self))
    }
}

impl LayoutBox for StaticBox {
    fn preferred_size(&self) -> Size {
        self.preferred
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn container(&self) -> Option<ContainerId> {
        self.container
    }

    fn set_container(&mut self, container: Option<ContainerId>) {
        self.container = container;
    }
}

/// Plain container description for hosts that do not track one themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticContainer {
    pub id: ContainerId,
    pub bounds: Rect,
    pub insets: Insets,
}

impl HostContainer for StaticContainer {
    fn id(&self) -> ContainerId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn insets(&self) -> Insets {
        self.insets
    }
}
