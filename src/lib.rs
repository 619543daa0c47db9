#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(elided_lifetimes_in_paths)]

mod config;
mod error;
mod event;
mod frame;
mod mmu;
mod replacer;
mod stats;
mod util;

pub use {
    config::{DEFAULT_CAPACITY, MmuConfig, Policy, WriteBack},
    error::{MmuError, MmuResult},
    event::{Event, EventChannel, EventKind, EventRecorder, EventSink, LogSink},
    frame::{Access, Frame, FrameId, FrameTable, PageId},
    mmu::{ClockMmu, Engine, LruMmu, RandomMmu},
    replacer::{ClockReplacer, LruReplacer, RandomReplacer},
    stats::MmuStats,
};

/// Memory management unit simulator.
///
/// Uniform interface over all replacement policies. A driver feeds trace
/// events one at a time through [`read`](Mmu::read) and
/// [`write`](Mmu::write), and reads the counters once the trace is exhausted.
/// Accesses never fail: any page number is accepted.
///
/// Counters only ever grow. An engine is not meant to be reset, a new run
/// requires a new instance.
pub trait Mmu: Send {
    /// Issues an access of the given type.
    fn access(&mut self, page: PageId, access: Access);

    /// Reads a page.
    fn read(&mut self, page: PageId) {
        self.access(page, Access::Read)
    }

    /// Writes a page, leaving its frame dirty.
    fn write(&mut self, page: PageId) {
        self.access(page, Access::Write)
    }

    /// Enables debug notifications.
    fn set_debug(&mut self);

    /// Disables debug notifications.
    fn reset_debug(&mut self);

    /// Whether debug notifications are enabled.
    fn is_debug(&self) -> bool;

    /// Replaces the receiver of debug notifications.
    ///
    /// The sink is only invoked while debug mode is enabled.
    fn set_event_sink(&mut self, sink: Box<dyn EventSink>);

    /// Pages loaded from disk so far.
    fn total_disk_reads(&self) -> u64;

    /// Dirty pages written back so far.
    fn total_disk_writes(&self) -> u64;

    /// Page faults so far.
    fn total_page_faults(&self) -> u64;

    /// Reads and writes issued so far.
    fn total_accesses(&self) -> u64;

    /// Snapshot of all counters.
    fn stats(&self) -> MmuStats {
        MmuStats {
            capacity: self.capacity(),
            accesses: self.total_accesses(),
            page_faults: self.total_page_faults(),
            disk_reads: self.total_disk_reads(),
            disk_writes: self.total_disk_writes(),
        }
    }

    /// Replacement policy of the engine.
    fn policy(&self) -> Policy;

    /// Number of physical frames.
    fn capacity(&self) -> usize;

    /// Number of frames currently holding a page.
    fn resident_count(&self) -> usize;

    /// Whether the page is held by some frame.
    fn is_resident(&self, page: PageId) -> bool;

    /// Resident pages, in ascending page order.
    fn resident_pages(&self) -> Vec<PageId>;
}

/// Page eviction policy.
///
/// Victim selection strategy plugged into an [`Engine`]. The engine owns the
/// frames, the residency index and the counters; the policy only keeps the
/// meta-data it needs to order frames (reference bits, recency, ...) and
/// picks the frame to reuse once no free frame is left.
pub trait EvictionPolicy: Send {
    /// Policy implemented.
    fn policy(&self) -> Policy;

    /// Notifies the policy that the page held by the frame has been
    /// accessed.
    fn touch(&mut self, id: FrameId, access: Access);

    /// Starts tracking a frame that just had a page loaded into it.
    fn insert(&mut self, id: FrameId);

    /// Find the next frame to be evicted and evict it.
    ///
    /// Only called when every frame is resident. The returned frame stops
    /// being tracked until it is [`insert`](EvictionPolicy::insert)ed again.
    /// `access` is the access that caused the fault, used for notifications.
    fn evict(&mut self, frames: &FrameTable, access: Access, events: &mut EventChannel) -> FrameId;

    /// Returns the maximum number of frames that can be tracked.
    fn capacity(&self) -> usize;

    /// Number of frames currently tracked.
    fn size(&self) -> usize;
}
