//! Drag lifecycle events and the listener registry that fans them out.

use crate::scene::{ObjectId, Scene};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    HoverOn,
    HoverOff,
    DragStart,
    Drag,
    DragEnd,
}

impl DragEventKind {
    pub const ALL: [DragEventKind; 5] = [
        DragEventKind::HoverOn,
        DragEventKind::HoverOff,
        DragEventKind::DragStart,
        DragEventKind::Drag,
        DragEventKind::DragEnd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DragEventKind::HoverOn => "hoveron",
            DragEventKind::HoverOff => "hoveroff",
            DragEventKind::DragStart => "dragstart",
            DragEventKind::Drag => "drag",
            DragEventKind::DragEnd => "dragend",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for DragEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEvent {
    HoverOn(ObjectId),
    HoverOff(ObjectId),
    DragStart(ObjectId),
    Drag(ObjectId),
    DragEnd(ObjectId),
}

impl DragEvent {
    pub fn kind(&self) -> DragEventKind {
        match self {
            DragEvent::HoverOn(_) => DragEventKind::HoverOn,
            DragEvent::HoverOff(_) => DragEventKind::HoverOff,
            DragEvent::DragStart(_) => DragEventKind::DragStart,
            DragEvent::Drag(_) => DragEventKind::Drag,
            DragEvent::DragEnd(_) => DragEventKind::DragEnd,
        }
    }

    pub fn object(&self) -> ObjectId {
        match *self {
            DragEvent::HoverOn(o)
            | DragEvent::HoverOff(o)
            | DragEvent::DragStart(o)
            | DragEvent::Drag(o)
            | DragEvent::DragEnd(o) => o,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&DragEvent, &mut Scene)>;

/// Listener registry keyed by event kind. Listeners run synchronously in
/// registration order and receive the scene so they can restyle the object.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: FnvHashMap<DragEventKind, SmallVec<[(ListenerId, Listener); 2]>>,
    next_id: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &mut self,
        kind: DragEventKind,
        listener: impl FnMut(&DragEvent, &mut Scene) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not registered for `kind`.
    pub fn remove_listener(&mut self, kind: DragEventKind, id: ListenerId) -> bool {
        let Some(bucket) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = bucket.len();
        bucket.retain(|(lid, _)| *lid != id);
        before != bucket.len()
    }

    pub fn has_listener(&self, kind: DragEventKind, id: ListenerId) -> bool {
        self.listeners
            .get(&kind)
            .is_some_and(|b| b.iter().any(|(lid, _)| *lid == id))
    }

    pub fn listener_count(&self, kind: DragEventKind) -> usize {
        self.listeners.get(&kind).map_or(0, |b| b.len())
    }

    pub fn dispatch(&mut self, event: &DragEvent, scene: &mut Scene) {
        if let Some(bucket) = self.listeners.get_mut(&event.kind()) {
            for (_, listener) in bucket.iter_mut() {
                listener(event, scene);
            }
        }
    }
}
