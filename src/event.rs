//! Debug notifications.
//!
//! Engines report what happens on each access (hit, miss, second chance,
//! eviction, load) to an [`EventSink`], but only while debug mode is on.
//! Events are purely observational: sinks cannot influence eviction decisions
//! or counters.

use {
    crate::{Access, FrameId, PageId},
    log::debug,
    parking_lot::Mutex,
    std::{fmt, sync::Arc},
};

/// What happened to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Page was already resident.
    Hit,
    /// Page was not resident (page fault).
    Miss,
    /// Clock hand found the frame referenced, cleared its bit and moved on.
    SecondChance,
    /// Page was evicted to make room for the faulting page.
    Evict {
        /// Whether the victim had to be written back.
        dirty: bool,
    },
    /// Page was loaded from disk into a frame.
    Load,
}

/// Single debug notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Kind of the event.
    pub kind: EventKind,

    /// Page the event refers to. For evictions and second chances this is the
    /// page held by the frame, not the faulting page.
    pub page: PageId,

    /// Frame involved. Not known yet when a miss is reported.
    pub frame: Option<FrameId>,

    /// Access that triggered the event.
    pub access: Access,
}

impl Event {
    /// Creates a new event.
    pub const fn new(kind: EventKind, page: PageId, frame: Option<FrameId>, access: Access) -> Self {
        Self {
            kind,
            page,
            frame,
            access,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame.map(|id| id.0);
        match (self.kind, frame) {
            (EventKind::Hit, Some(frame)) => {
                write!(f, "{} hit: page {} in frame {frame}", self.access, self.page)
            }
            (EventKind::Miss, _) => write!(f, "{} miss: page {}", self.access, self.page),
            (EventKind::SecondChance, Some(frame)) => write!(
                f,
                "second chance: page {} in frame {frame}, reference bit cleared",
                self.page
            ),
            (EventKind::Evict { dirty: true }, Some(frame)) => write!(
                f,
                "evict dirty page {} from frame {frame}, writing to disk",
                self.page
            ),
            (EventKind::Evict { dirty: false }, Some(frame)) => {
                write!(f, "evict clean page {} from frame {frame}", self.page)
            }
            (EventKind::Load, Some(frame)) => {
                write!(f, "load page {} into frame {frame}", self.page)
            }
            (EventKind::Hit, None) => write!(f, "{} hit: page {}", self.access, self.page),
            (EventKind::SecondChance, None) => write!(
                f,
                "second chance: page {}, reference bit cleared",
                self.page
            ),
            (EventKind::Evict { dirty: true }, None) => {
                write!(f, "evict dirty page {}, writing to disk", self.page)
            }
            (EventKind::Evict { dirty: false }, None) => {
                write!(f, "evict clean page {}", self.page)
            }
            (EventKind::Load, None) => write!(f, "load page {}", self.page),
        }
    }
}

/// Receiver of debug notifications.
pub trait EventSink: Send {
    /// Called for every event emitted while debug mode is enabled.
    fn notify(&mut self, event: &Event);
}

/// Default sink, forwards events to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn notify(&mut self, event: &Event) {
        debug!(target: "pagesim::event", "{event}");
    }
}

/// Sink collecting events in memory.
///
/// Cloned recorders share the same buffer, so one handle can be installed into
/// an engine while another is kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Kinds of recorded events, in order.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().iter().map(|e| e.kind).collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drops all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for EventRecorder {
    fn notify(&mut self, event: &Event) {
        self.events.lock().push(*event);
    }
}

/// Debug switch together with the sink it guards.
pub struct EventChannel {
    enabled: bool,
    sink: Box<dyn EventSink>,
}

impl EventChannel {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            sink: Box::new(LogSink),
        }
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub(crate) fn set_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sink = sink;
    }

    /// Whether events are currently delivered.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Delivers the event if debug mode is on.
    pub fn emit(&mut self, kind: EventKind, page: PageId, frame: Option<FrameId>, access: Access) {
        if self.enabled {
            self.sink.notify(&Event::new(kind, page, frame, access));
        }
    }
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
