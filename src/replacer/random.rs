use {
    crate::{Access, EventChannel, EvictionPolicy, FrameId, FrameTable, Policy},
    rand::{Rng, SeedableRng, rngs::StdRng},
};

/// Random frame replacer.
///
/// Keeps no access history: each eviction is an independent, uniform draw
/// over all frames.
#[derive(Debug)]
pub struct RandomReplacer {
    capacity: usize,
    size: usize,
    rng: StdRng,
}

impl RandomReplacer {
    /// Creates a replacer seeded from system entropy.
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_entropy())
    }

    /// Creates a replacer with a reproducible victim sequence.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, StdRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, rng: StdRng) -> Self {
        Self {
            capacity,
            size: 0,
            rng,
        }
    }
}

impl EvictionPolicy for RandomReplacer {
    fn policy(&self) -> Policy {
        Policy::Random
    }

    fn touch(&mut self, _id: FrameId, _access: Access) {}

    fn insert(&mut self, _id: FrameId) {
        debug_assert!(self.size < self.capacity, "random replacer is full");
        self.size += 1;
    }

    fn evict(&mut self, frames: &FrameTable, _access: Access, _events: &mut EventChannel) -> FrameId {
        debug_assert!(frames.is_full());
        self.size -= 1;
        FrameId(self.rng.gen_range(0..self.capacity))
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn size(&self) -> usize {
        self.size
    }
}
