//! Time management and wall-clock access

pub mod clock;
pub mod time;

pub use clock::{Clock, ManualClock, SystemClock};
pub use time::{is_filtering_window, TimeManager};
