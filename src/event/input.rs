//! Surface notifications delivered to the engine.
//!
//! Defines [`SurfaceEvent`], the [`EventKind`] discriminant used for listener
//! registration, and the [`ListenerSet`] bitmask a surface node carries.

use std::ops::{BitAnd, BitOr};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from any concrete surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
}

// ---------------------------------------------------------------------------
// EventKind / SurfaceEvent
// ---------------------------------------------------------------------------

/// Discriminant of a [`SurfaceEvent`], used for listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerEnter,
    PointerLeave,
    PointerDown,
    PointerUp,
    Focus,
    Blur,
    KeyPress,
}

impl EventKind {
    /// The listener bit for this kind.
    pub fn listener(self) -> ListenerSet {
        match self {
            EventKind::PointerEnter => ListenerSet::POINTER_ENTER,
            EventKind::PointerLeave => ListenerSet::POINTER_LEAVE,
            EventKind::PointerDown => ListenerSet::POINTER_DOWN,
            EventKind::PointerUp => ListenerSet::POINTER_UP,
            EventKind::Focus => ListenerSet::FOCUS,
            EventKind::Blur => ListenerSet::BLUR,
            EventKind::KeyPress => ListenerSet::KEY_PRESS,
        }
    }
}

/// A notification from the rendering surface about one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceEvent {
    PointerEnter,
    PointerLeave,
    PointerDown,
    PointerUp,
    Focus,
    Blur,
    KeyPress(Key),
}

impl SurfaceEvent {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            SurfaceEvent::PointerEnter => EventKind::PointerEnter,
            SurfaceEvent::PointerLeave => EventKind::PointerLeave,
            SurfaceEvent::PointerDown => EventKind::PointerDown,
            SurfaceEvent::PointerUp => EventKind::PointerUp,
            SurfaceEvent::Focus => EventKind::Focus,
            SurfaceEvent::Blur => EventKind::Blur,
            SurfaceEvent::KeyPress(_) => EventKind::KeyPress,
        }
    }

    /// Whether the event propagates to ancestor nodes. Focus and blur do not.
    pub fn bubbles(&self) -> bool {
        !matches!(self, SurfaceEvent::Focus | SurfaceEvent::Blur)
    }

    /// Whether this is one of the four pointer transitions.
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            SurfaceEvent::PointerEnter
                | SurfaceEvent::PointerLeave
                | SurfaceEvent::PointerDown
                | SurfaceEvent::PointerUp
        )
    }
}

// ---------------------------------------------------------------------------
// ListenerSet
// ---------------------------------------------------------------------------

/// Bitmask of event kinds a node listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ListenerSet(pub u8);

impl ListenerSet {
    pub const NONE: ListenerSet = ListenerSet(0);
    pub const POINTER_ENTER: ListenerSet = ListenerSet(1);
    pub const POINTER_LEAVE: ListenerSet = ListenerSet(2);
    pub const POINTER_DOWN: ListenerSet = ListenerSet(4);
    pub const POINTER_UP: ListenerSet = ListenerSet(8);
    pub const FOCUS: ListenerSet = ListenerSet(16);
    pub const BLUR: ListenerSet = ListenerSet(32);
    pub const KEY_PRESS: ListenerSet = ListenerSet(64);

    /// The four pointer transitions wired by automatic state handling.
    pub const POINTER: ListenerSet = ListenerSet(1 | 2 | 4 | 8);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: ListenerSet) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no listener bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `self` without the bits in `other`.
    pub fn without(self, other: ListenerSet) -> ListenerSet {
        ListenerSet(self.0 & !other.0)
    }
}

impl BitOr for ListenerSet {
    type Output = ListenerSet;
    fn bitor(self, rhs: Self) -> Self::Output {
        ListenerSet(self.0 | rhs.0)
    }
}

impl BitAnd for ListenerSet {
    type Output = ListenerSet;
    fn bitand(self, rhs: Self) -> Self::Output {
        ListenerSet(self.0 & rhs.0)
    }
}
