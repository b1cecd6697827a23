//! Sleep Chart Series
//!
//! Sleep sessions from the backend and the chart series derived from them.

pub mod normalizer;

pub use normalizer::{
    format_clock, normalize, normalize_in, parse_instant, ChartPoint, SleepSession,
    MINUTES_PER_DAY,
};
