use {
    crate::{
        Access,
        ClockReplacer,
        EventChannel,
        EventKind,
        EventSink,
        EvictionPolicy,
        FrameTable,
        LruReplacer,
        Mmu,
        MmuError,
        MmuResult,
        PageId,
        Policy,
        RandomReplacer,
        WriteBack,
    },
    log::debug,
};

/// MMU driven by the Clock (second chance) policy.
pub type ClockMmu = Engine<ClockReplacer>;

/// MMU driven by the exact LRU policy.
pub type LruMmu = Engine<LruReplacer>;

/// MMU driven by the random policy.
pub type RandomMmu = Engine<RandomReplacer>;

/// Page replacement engine.
///
/// Owns the frame table and the counters, and delegates victim selection to
/// the eviction policy `P`. The fault path is shared by all policies:
///
/// 1. a resident page is a hit: the policy is notified and a write marks the
///    frame dirty;
/// 2. otherwise the access is a page fault and costs one disk read;
/// 3. the page goes to the lowest free frame if there is one;
/// 4. otherwise the policy picks a victim, which costs a disk write when it
///    is dirty, and the page takes its frame.
///
/// A freshly loaded page is dirty only if it was loaded by a write.
#[derive(Debug)]
pub struct Engine<P: EvictionPolicy> {
    frames: FrameTable,
    policy: P,
    events: EventChannel,
    write_back: WriteBack,

    accesses: u64,
    page_faults: u64,
    disk_reads: u64,
    disk_writes: u64,
}

impl<P: EvictionPolicy> Engine<P> {
    /// Creates an engine around an arbitrary eviction policy.
    ///
    /// The policy must track exactly `capacity` frames and none of them yet,
    /// otherwise construction fails with
    /// [`MmuError::InvalidConfiguration`].
    pub fn with_policy(capacity: usize, policy: P) -> MmuResult<Self> {
        Self::build(capacity, policy, WriteBack::Tracked)
    }

    fn build(capacity: usize, policy: P, write_back: WriteBack) -> MmuResult<Self> {
        let frames = FrameTable::new(capacity)?;
        if policy.capacity() != capacity {
            return Err(MmuError::InvalidConfiguration(format!(
                "{} policy sized for {} frames, engine has {capacity}",
                policy.policy(),
                policy.capacity()
            )));
        }
        if policy.size() != 0 {
            return Err(MmuError::InvalidConfiguration(format!(
                "{} policy already tracks {} frames",
                policy.policy(),
                policy.size()
            )));
        }
        debug!(
            "{} engine created: frames={capacity} write_back={write_back:?}",
            policy.policy()
        );
        Ok(Self {
            frames,
            policy,
            events: EventChannel::new(false),
            write_back,
            accesses: 0,
            page_faults: 0,
            disk_reads: 0,
            disk_writes: 0,
        })
    }

    /// The eviction policy state.
    pub fn replacer(&self) -> &P {
        &self.policy
    }

    /// The frame table.
    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// Write-back accounting in use.
    pub fn write_back(&self) -> WriteBack {
        self.write_back
    }

    fn fault(&mut self, page: PageId, access: Access) {
        self.page_faults += 1;
        self.disk_reads += 1;
        self.events.emit(EventKind::Miss, page, None, access);

        let frame = match self.frames.take_free() {
            Some(frame) => frame,
            None => {
                let victim = self.policy.evict(&self.frames, access, &mut self.events);
                if let Some(old) = self.frames.get(victim).copied() {
                    if self.write_back.charges(old.dirty, access.is_write()) {
                        self.disk_writes += 1;
                    }
                    self.events.emit(
                        EventKind::Evict { dirty: old.dirty },
                        old.page,
                        Some(victim),
                        access,
                    );
                }
                victim
            }
        };

        self.frames.load(frame, page, access.is_write());
        self.policy.insert(frame);
        self.events.emit(EventKind::Load, page, Some(frame), access);
    }
}

impl ClockMmu {
    /// Creates a Clock MMU with `capacity` frames.
    pub fn new(capacity: usize) -> MmuResult<Self> {
        Self::with_policy(capacity, ClockReplacer::new(capacity))
    }
}

impl LruMmu {
    /// Creates an LRU MMU with `capacity` frames.
    pub fn new(capacity: usize) -> MmuResult<Self> {
        Self::with_policy(capacity, LruReplacer::new(capacity))
    }
}

impl RandomMmu {
    /// Creates a random MMU with `capacity` frames, seeded from entropy.
    pub fn new(capacity: usize) -> MmuResult<Self> {
        Self::with_options(capacity, None, WriteBack::Tracked)
    }

    /// Creates a random MMU whose victim sequence is reproducible.
    pub fn with_seed(capacity: usize, seed: u64) -> MmuResult<Self> {
        Self::with_options(capacity, Some(seed), WriteBack::Tracked)
    }

    /// Creates a random MMU with explicit seed and write-back accounting.
    pub fn with_options(
        capacity: usize,
        seed: Option<u64>,
        write_back: WriteBack,
    ) -> MmuResult<Self> {
        let replacer = match seed {
            Some(seed) => RandomReplacer::with_seed(capacity, seed),
            None => RandomReplacer::new(capacity),
        };
        Self::build(capacity, replacer, write_back)
    }
}

impl<P: EvictionPolicy> Mmu for Engine<P> {
    fn access(&mut self, page: PageId, access: Access) {
        self.accesses += 1;

        match self.frames.lookup(page) {
            Some(frame) => {
                if access.is_write() {
                    self.frames.mark_dirty(frame);
                }
                self.policy.touch(frame, access);
                self.events.emit(EventKind::Hit, page, Some(frame), access);
            }
            None => self.fault(page, access),
        }
    }

    fn set_debug(&mut self) {
        self.events.set_enabled(true);
    }

    fn reset_debug(&mut self) {
        self.events.set_enabled(false);
    }

    fn is_debug(&self) -> bool {
        self.events.is_enabled()
    }

    fn set_event_sink(&mut self, sink: Box<dyn EventSink>) {
        self.events.set_sink(sink);
    }

    fn total_disk_reads(&self) -> u64 {
        self.disk_reads
    }

    fn total_disk_writes(&self) -> u64 {
        self.disk_writes
    }

    fn total_page_faults(&self) -> u64 {
        self.page_faults
    }

    fn total_accesses(&self) -> u64 {
        self.accesses
    }

    fn policy(&self) -> Policy {
        self.policy.policy()
    }

    fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    fn resident_count(&self) -> usize {
        self.frames.len()
    }

    fn is_resident(&self, page: PageId) -> bool {
        self.frames.lookup(page).is_some()
    }

    fn resident_pages(&self) -> Vec<PageId> {
        self.frames.resident_pages()
    }
}
