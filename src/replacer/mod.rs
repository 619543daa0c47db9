mod clock;
mod lru;
mod random;

pub use {clock::ClockReplacer, lru::LruReplacer, random::RandomReplacer};
