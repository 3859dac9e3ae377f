use std::time::Duration;

/// A recorded split: the interval since the previous split plus the
/// cumulative elapsed time at the moment it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lap {
    pub number: u32,
    pub duration: Duration,
    pub total: Duration,
}
