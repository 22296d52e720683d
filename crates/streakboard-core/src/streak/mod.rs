mod breakdown;
mod display;
mod tracker;

pub use breakdown::{
    evaluate, ElapsedBreakdown, Reading, ReadingStatus, ReferenceInstant, SECS_PER_DAY,
    SECS_PER_HOUR, SECS_PER_MINUTE,
};
pub use display::{Segment, StreakDisplay, PLACEHOLDER, UNIT_LABELS};
pub use tracker::{log_reading, StreakTracker, DEFAULT_TICK_PERIOD};
