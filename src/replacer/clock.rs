//! Clock (second chance) page replacement.
//!
//! Frames form a ring with one reference bit each. The hand sweeps the ring:
//! a referenced frame loses its bit and is skipped, the first unreferenced
//! frame is the victim. Since the sweep clears every bit it passes, a victim is
//! always found before the hand has gone around the ring twice.

use crate::{Access, EventChannel, EventKind, EvictionPolicy, FrameId, FrameTable, Policy};

/// Clock frame replacer.
#[derive(Debug)]
pub struct ClockReplacer {
    /// Reference bit per frame.
    referenced: Vec<bool>,

    /// Whether the frame currently holds a tracked page.
    tracked: Vec<bool>,

    /// Number of tracked frames.
    size: usize,

    /// Next frame to inspect. Persists across sweeps.
    hand: usize,

    /// Frames inspected by the most recent sweep, victim included.
    last_sweep: usize,
}

impl ClockReplacer {
    /// Creates a new clock replacer with the hand on frame 0.
    pub fn new(capacity: usize) -> Self {
        Self {
            referenced: vec![false; capacity],
            tracked: vec![false; capacity],
            size: 0,
            hand: 0,
            last_sweep: 0,
        }
    }

    /// Frame the hand currently points at.
    pub fn hand(&self) -> FrameId {
        FrameId(self.hand)
    }

    /// Whether the frame's reference bit is set.
    pub fn is_referenced(&self, id: FrameId) -> bool {
        self.referenced.get(id.0).copied().unwrap_or(false)
    }

    /// Number of frames the last eviction sweep inspected, victim included.
    pub fn last_sweep_len(&self) -> usize {
        self.last_sweep
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.referenced.len();
    }
}

impl EvictionPolicy for ClockReplacer {
    fn policy(&self) -> Policy {
        Policy::Clock
    }

    fn touch(&mut self, id: FrameId, _access: Access) {
        self.referenced[id.0] = true;
    }

    fn insert(&mut self, id: FrameId) {
        if !self.tracked[id.0] {
            self.tracked[id.0] = true;
            self.size += 1;
        }
        self.referenced[id.0] = true;
    }

    fn evict(&mut self, frames: &FrameTable, access: Access, events: &mut EventChannel) -> FrameId {
        debug_assert!(frames.is_full());
        let mut steps = 0;
        loop {
            steps += 1;
            debug_assert!(steps <= 2 * self.referenced.len());

            let current = self.hand;
            if !self.tracked[current] || !self.referenced[current] {
                break;
            }

            self.referenced[current] = false;
            if let Some(frame) = frames.get(FrameId(current)) {
                events.emit(
                    EventKind::SecondChance,
                    frame.page,
                    Some(FrameId(current)),
                    access,
                );
            }
            self.advance();
        }

        // The victim is the frame under the hand; move past it before returning.
        let victim = self.hand;
        self.tracked[victim] = false;
        self.size -= 1;
        self.advance();
        self.last_sweep = steps;

        FrameId(victim)
    }

    fn capacity(&self) -> usize {
        self.referenced.len()
    }

    fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{EventRecorder, PageId},
    };

    fn full_table(capacity: usize) -> FrameTable {
        let mut table = FrameTable::new(capacity).unwrap();
        while let Some(id) = table.take_free() {
            table.load(id, PageId(10 + id.0 as u64), false);
        }
        table
    }

    fn full_replacer(capacity: usize) -> ClockReplacer {
        let mut replacer = ClockReplacer::new(capacity);
        for i in 0..capacity {
            replacer.insert(FrameId(i));
        }
        replacer
    }

    #[test]
    fn all_referenced_sweeps_full_ring() {
        let table = full_table(4);
        let mut events = EventChannel::new(false);
        let mut replacer = full_replacer(4);

        // Every bit is set: the hand clears all four, then comes back to frame 0.
        assert_eq!(replacer.evict(&table, Access::Read, &mut events), FrameId(0));
        assert_eq!(replacer.last_sweep_len(), 5);
        assert_eq!(replacer.hand(), FrameId(1));
        assert_eq!(replacer.size(), 3);
        for i in 1..4 {
            assert!(!replacer.is_referenced(FrameId(i)));
        }

        // Remaining frames are unreferenced, the next victim is right under the hand.
        replacer.insert(FrameId(0));
        assert_eq!(replacer.evict(&table, Access::Read, &mut events), FrameId(1));
        assert_eq!(replacer.last_sweep_len(), 1);
        assert_eq!(replacer.hand(), FrameId(2));
    }

    #[test]
    fn touched_frame_gets_second_chance() {
        let table = full_table(3);
        let mut events = EventChannel::new(false);
        let mut replacer = full_replacer(3);

        // First sweep clears everything and takes frame 0.
        assert_eq!(replacer.evict(&table, Access::Read, &mut events), FrameId(0));
        replacer.insert(FrameId(0));

        // Frame 1 is touched again, so frame 2 goes next.
        replacer.touch(FrameId(1), Access::Read);
        assert_eq!(replacer.evict(&table, Access::Read, &mut events), FrameId(2));
        assert!(!replacer.is_referenced(FrameId(1)));
        assert_eq!(replacer.hand(), FrameId(0));
    }

    #[test]
    fn second_chances_are_reported() {
        let table = full_table(2);
        let recorder = EventRecorder::new();
        let mut events = EventChannel::new(true);
        events.set_sink(Box::new(recorder.clone()));
        let mut replacer = full_replacer(2);

        replacer.evict(&table, Access::Write, &mut events);
        let recorded = recorder.events();
        assert_eq!(recorded.len(), 2);
        assert!(recorded.iter().all(|e| e.kind == EventKind::SecondChance));
        assert_eq!(recorded[0].page, PageId(10));
        assert_eq!(recorded[1].frame, Some(FrameId(1)));
        assert_eq!(recorded[1].access, Access::Write);
    }

    #[test]
    fn single_frame() {
        let table = full_table(1);
        let mut events = EventChannel::new(false);
        let mut replacer = full_replacer(1);

        assert_eq!(replacer.evict(&table, Access::Read, &mut events), FrameId(0));
        assert_eq!(replacer.last_sweep_len(), 2);
        assert_eq!(replacer.hand(), FrameId(0));
    }
}
