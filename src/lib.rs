//! PyTrack - in-process call counting, timing and event tracking
//!
//! This library wraps ordinary Rust callables so that every successful call
//! updates per-function statistics (call count, total and average execution
//! time), counts manually signalled events, and reports the results as a
//! text summary, a JSON snapshot, or a pair of bar charts.

pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod function_profiler;
pub mod instrument;
pub mod snapshot;
pub mod summary;
pub mod tracker;

pub use chart::{ChartData, ChartRenderer, SvgChartRenderer, TerminalChartRenderer};
pub use config::{ChartConfig, TrackerConfig};
pub use error::{Result, TrackError};
pub use function_profiler::FunctionStats;
pub use instrument::{Callable, Tracked};
pub use snapshot::Snapshot;
pub use tracker::Tracker;
