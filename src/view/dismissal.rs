//! Collapsing the detail panel when the user clicks somewhere else.
//!
//! Views describe their interactive areas as [`Region`]s. A pointer-down that lands in
//! none of them counts as an outside interaction. [`PointerHub`] fans pointer-down
//! events out to subscribers; a [`Subscription`] detaches itself when dropped, so a view
//! that mounts and unmounts repeatedly never accumulates listeners.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// A pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Something on screen that can say whether a point falls inside it.
pub trait Region {
    fn contains(&self, point: Point) -> bool;
}

/// Axis-aligned rectangle, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

impl Region for Rect {
    fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }
}

/// True if `point` lies outside every region.
pub fn is_outside(point: Point, regions: &[Rc<dyn Region>]) -> bool {
    !regions.iter().any(|r| r.contains(point))
}

type Listener = Rc<dyn Fn(Point)>;
type Listeners = RefCell<BTreeMap<u64, Listener>>;

/// Single-threaded fan-out of pointer-down events.
#[derive(Default)]
pub struct PointerHub {
    listeners: Rc<Listeners>,
    next_id: Cell<u64>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(Point) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, Rc::new(listener));
        tracing::debug!(id, "pointer listener attached");
        Subscription { id, listeners: Rc::downgrade(&self.listeners) }
    }

    /// Delivers a pointer-down to every current listener.
    pub fn pointer_down(&self, point: Point) {
        // Snapshot first: listeners may subscribe or unsubscribe while running.
        let snapshot: Vec<Listener> = self.listeners.borrow().values().cloned().collect();
        for listener in snapshot {
            listener(point);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Handle of an attached listener. Dropping it detaches the listener.
#[must_use = "the listener is detached as soon as the subscription is dropped"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(&self.id);
            tracing::debug!(id = self.id, "pointer listener detached");
        }
    }
}
