mod access_sequence;

pub use access_sequence::AccessSequence;
