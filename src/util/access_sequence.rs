/// Logical access clock.
///
/// Whenever some replacer needs to log the time of the last access, it can use
/// sequence numbers as a timestamp. Numbers are strictly increasing, so two
/// accesses never share a timestamp.
#[derive(Debug, Default)]
pub struct AccessSequence {
    val: u64,
}

impl AccessSequence {
    /// Creates a sequence starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { val: 0 }
    }

    /// Returns next sequence number.
    pub fn next(&mut self) -> u64 {
        let val = self.val;
        self.val += 1;
        val
    }
}
