use {
    crate::{MmuError, MmuResult},
    std::{
        collections::{HashMap, VecDeque},
        fmt,
    },
};

/// Logical page number.
///
/// Pages carry no structure beyond identity: they are only compared and
/// hashed when looking up residency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PageId {
    fn from(page: u64) -> Self {
        Self(page)
    }
}

/// Index of a physical frame.
///
/// Frames form a fixed-size arena, the identifier is a direct index into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of memory access issued against a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Page is only read; a freshly loaded page starts clean.
    Read,
    /// Page is modified; the target frame becomes dirty.
    Write,
}

impl Access {
    /// Whether the access modifies the page.
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

/// Contents of a resident frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Page currently held by the frame.
    pub page: PageId,

    /// Whether the page was modified since it was loaded.
    pub dirty: bool,
}

/// Fixed-size arena of physical frames.
///
/// Besides the frame slots, the table keeps a residency index (page to frame)
/// for constant time hit detection, and the list of frames that have never
/// been filled. A frame is either on the free list or referenced by exactly
/// one index entry, never both.
#[derive(Debug)]
pub struct FrameTable {
    slots: Vec<Option<Frame>>,
    index: HashMap<PageId, FrameId>,

    /// Never used frames, lowest index first.
    free: VecDeque<FrameId>,
}

impl FrameTable {
    /// Creates a table of `capacity` free frames.
    ///
    /// At least one frame is required.
    pub fn new(capacity: usize) -> MmuResult<Self> {
        if capacity < 1 {
            return Err(MmuError::InvalidConfiguration(format!(
                "frame count must be at least 1, got {capacity}"
            )));
        }
        Ok(Self {
            slots: vec![None; capacity],
            index: HashMap::with_capacity(capacity),
            free: (0..capacity).map(FrameId).collect(),
        })
    }

    /// Total number of frames.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of resident frames.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no page is resident.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether every frame holds a page.
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Frame holding `page`, if it is resident.
    pub fn lookup(&self, page: PageId) -> Option<FrameId> {
        self.index.get(&page).copied()
    }

    /// Contents of the given frame, `None` when the frame is free.
    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Iterates over resident frames in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, &Frame)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|frame| (FrameId(i), frame)))
    }

    /// Resident pages, in ascending page order.
    pub fn resident_pages(&self) -> Vec<PageId> {
        let mut pages: Vec<_> = self.index.keys().copied().collect();
        pages.sort_unstable();
        pages
    }

    pub(crate) fn mark_dirty(&mut self, id: FrameId) {
        if let Some(frame) = self.slots.get_mut(id.0).and_then(Option::as_mut) {
            frame.dirty = true;
        }
    }

    /// Takes the lowest numbered free frame.
    pub(crate) fn take_free(&mut self) -> Option<FrameId> {
        self.free.pop_front()
    }

    /// Places `page` into the frame, returning the evicted contents.
    ///
    /// The previous occupant (if any) is dropped from the residency index.
    pub(crate) fn load(&mut self, id: FrameId, page: PageId, dirty: bool) -> Option<Frame> {
        let previous = self.slots[id.0].replace(Frame { page, dirty });
        if let Some(old) = previous {
            self.index.remove(&old.page);
        }
        self.index.insert(page, id);
        previous
    }
}
