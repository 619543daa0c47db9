use {
    crate::{ClockMmu, LruMmu, Mmu, MmuError, MmuResult, RandomMmu},
    log::debug,
    std::{fmt, str::FromStr},
};

/// Default number of frames.
pub const DEFAULT_CAPACITY: usize = 64;

/// Page replacement policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Second chance: circular scan over reference bits.
    Clock,
    /// Exact least recently used.
    #[default]
    Lru,
    /// Uniformly random victim.
    Random,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clock => f.write_str("clock"),
            Self::Lru => f.write_str("lru"),
            Self::Random => f.write_str("rand"),
        }
    }
}

impl FromStr for Policy {
    type Err = MmuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clock" => Ok(Self::Clock),
            "lru" => Ok(Self::Lru),
            "rand" | "random" => Ok(Self::Random),
            _ => Err(MmuError::UnknownPolicy(s.to_owned())),
        }
    }
}

/// How evictions are charged with disk writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WriteBack {
    /// A disk write is counted when the evicted page is dirty.
    #[default]
    Tracked,

    /// A disk write is counted for every eviction caused by a write miss,
    /// whatever the state of the victim. Dirty bits are ignored.
    ///
    /// Reproduces the accounting of the classic random simulator; only valid
    /// for [`Policy::Random`].
    OnWriteMiss,
}

impl WriteBack {
    /// Whether evicting a victim in the given state costs a disk write.
    pub(crate) const fn charges(self, victim_dirty: bool, write_miss: bool) -> bool {
        match self {
            Self::Tracked => victim_dirty,
            Self::OnWriteMiss => write_miss,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct MmuConfig {
    /// Number of physical frames, at least 1.
    pub capacity: usize,

    /// Replacement policy.
    pub policy: Policy,

    /// Seed for the random policy. Seeded from entropy when absent; ignored
    /// by the other policies.
    pub seed: Option<u64>,

    /// Write-back accounting.
    pub write_back: WriteBack,

    /// Whether debug notifications start enabled.
    pub debug: bool,
}

impl Default for MmuConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: Policy::default(),
            seed: None,
            write_back: WriteBack::default(),
            debug: false,
        }
    }
}

impl MmuConfig {
    /// Configuration for `capacity` frames and the given policy.
    pub fn new(capacity: usize, policy: Policy) -> Self {
        Self {
            capacity,
            policy,
            ..Self::default()
        }
    }

    /// Sets the number of frames.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the replacement policy.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Fixes the random policy's seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets write-back accounting.
    pub fn with_write_back(mut self, write_back: WriteBack) -> Self {
        self.write_back = write_back;
        self
    }

    /// Sets the initial debug mode.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Checks the configuration without building an engine.
    pub fn validate(&self) -> MmuResult<()> {
        if self.capacity < 1 {
            return Err(MmuError::InvalidConfiguration(format!(
                "frame count must be at least 1, got {}",
                self.capacity
            )));
        }
        if self.write_back == WriteBack::OnWriteMiss && self.policy != Policy::Random {
            return Err(MmuError::InvalidConfiguration(format!(
                "write-miss accounting is only supported by the random policy, not {}",
                self.policy
            )));
        }
        Ok(())
    }

    /// Builds the engine selected by the configuration.
    pub fn build(&self) -> MmuResult<Box<dyn Mmu>> {
        self.validate()?;
        debug!(
            "building {} engine with {} frames",
            self.policy, self.capacity
        );

        let mut mmu: Box<dyn Mmu> = match self.policy {
            Policy::Clock => Box::new(ClockMmu::new(self.capacity)?),
            Policy::Lru => Box::new(LruMmu::new(self.capacity)?),
            Policy::Random => Box::new(RandomMmu::with_options(
                self.capacity,
                self.seed,
                self.write_back,
            )?),
        };
        if self.debug {
            mmu.set_debug();
        }
        Ok(mmu)
    }
}
