use {
    crate::{
        Access,
        EventChannel,
        EvictionPolicy,
        FrameId,
        FrameTable,
        Policy,
        util::AccessSequence,
    },
    priority_queue::PriorityQueue,
    std::cmp::Reverse,
};

/// Least Recently Used (LRU) frame replacer.
///
/// This implementation uses a priority queue to manage the frames.
/// The priority queue is ordered by the last access time of the frames. The
/// most recently accessed frame gets the newest timestamp, while the
/// least recently accessed one is the first to be evicted.
///
/// The ordering is exact: every hit and every load re-stamps its frame, and a
/// frame is present at most once no matter how often it is touched.
#[derive(Debug)]
pub struct LruReplacer {
    /// Maximum number of frames that can be stored in the replacer.
    capacity: usize,

    /// Resident frames keyed by their last access time.
    frames: PriorityQueue<FrameId, Reverse<u64>>,

    /// Monotonically increasing sequence of timestamps.
    /// Used to determine the order of page accesses.
    seq: AccessSequence,
}

impl LruReplacer {
    /// Creates a new LRU replacer.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            frames: PriorityQueue::with_capacity(capacity),
            seq: AccessSequence::new(),
        }
    }

    /// Peek into the next frame to be evicted.
    pub fn peek(&self) -> Option<FrameId> {
        self.frames.peek().map(|(id, _)| *id)
    }

    /// Tracked frames ordered from most to least recently used.
    pub fn recency_order(&self) -> Vec<FrameId> {
        let mut order: Vec<_> = self.frames.iter().map(|(id, Reverse(ts))| (*ts, *id)).collect();
        order.sort_unstable_by(|a, b| b.cmp(a));
        order.into_iter().map(|(_, id)| id).collect()
    }

    fn push(&mut self, id: FrameId) {
        debug_assert!(
            self.frames.len() < self.capacity || self.frames.get(&id).is_some(),
            "LRU replacer is full"
        );

        // If the accessed frame is already within the queue, update its priority.
        // Otherwise, insert it. Both cases are handled by the `push` method.
        let priority = self.seq.next();
        self.frames.push(id, Reverse(priority));
    }
}

impl EvictionPolicy for LruReplacer {
    fn policy(&self) -> Policy {
        Policy::Lru
    }

    fn touch(&mut self, id: FrameId, _access: Access) {
        // No special handling for access type in LRU.
        self.push(id);
    }

    fn insert(&mut self, id: FrameId) {
        self.push(id);
    }

    fn evict(&mut self, frames: &FrameTable, _access: Access, _events: &mut EventChannel) -> FrameId {
        debug_assert!(frames.is_full());
        match self.frames.pop() {
            Some((id, _)) => id,
            // Every frame is resident (hence tracked) whenever eviction is needed.
            None => unreachable!("LRU eviction with no resident frames"),
        }
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn size(&self) -> usize {
        self.frames.len()
    }
}
