use crate::task::Timestamp;

/// Source of the timestamps stamped onto tasks when they are created or mutated.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Local wall-clock time, truncated to whole seconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from(chrono::Local::now().naive_local())
    }
}
