//! The tracker: function statistics plus named event counters
//!
//! A [`Tracker`] is a cheap handle onto shared, single-threaded state.
//! Cloning it (or wrapping a function with [`Tracker::track`]) hands out
//! another reference to the same maps, so every wrapper keeps recording into
//! the tracker that produced it for as long as either is alive. The state is
//! `!Send`; trackers on different threads are combined through
//! [`Tracker::merge_snapshot`].

use crate::chart::{ChartData, ChartRenderer, SvgChartRenderer, TerminalChartRenderer};
use crate::config::{ChartConfig, TrackerConfig, DEFAULT_TRACKER_NAME};
use crate::error::Result;
use crate::function_profiler::FunctionStats;
use crate::instrument::{self, qualified_name, Tracked};
use crate::snapshot::Snapshot;
use crate::summary;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

/// Shared state behind a [`Tracker`] and its wrappers
#[derive(Debug)]
pub(crate) struct TrackerState {
    name: String,
    functions: IndexMap<String, FunctionStats>,
    events: IndexMap<String, u64>,
    chart: ChartConfig,
}

impl TrackerState {
    fn new(name: String, chart: ChartConfig) -> Self {
        Self {
            name,
            functions: IndexMap::new(),
            events: IndexMap::new(),
            chart,
        }
    }

    /// Fold one successful call into the bucket for `id`
    pub(crate) fn record_call(&mut self, id: &str, elapsed: Duration) {
        let stats = match self.functions.get_index_of(id) {
            Some(index) => &mut self.functions[index],
            None => {
                tracing::debug!(tracker = %self.name, function = id, "tracking new function");
                self.functions.entry(id.to_string()).or_default()
            }
        };
        stats.record(elapsed);
        tracing::trace!(
            function = id,
            elapsed_secs = elapsed.as_secs_f64(),
            calls = stats.calls,
            "recorded call"
        );
    }

    fn record_event(&mut self, name: &str) {
        match self.events.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                tracing::debug!(tracker = %self.name, event = name, "tracking new event");
                self.events.insert(name.to_string(), 1);
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            name: self.name.clone(),
            functions: self.functions.clone(),
            events: self.events.clone(),
        }
    }
}

/// General purpose performance and event tracker
///
/// ```
/// use pytrack::Tracker;
///
/// let tracker = Tracker::new("t1");
/// let mut square = tracker.track("square", |x: u64| x * x);
/// assert_eq!(square.call((9,)), 81);
///
/// tracker.record_event("start");
/// tracker.record_event("start");
///
/// let report = tracker.report();
/// assert_eq!(report.functions["square"].calls, 1);
/// assert_eq!(report.events["start"], 2);
/// ```
#[derive(Debug, Clone)]
pub struct Tracker {
    state: Rc<RefCell<TrackerState>>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKER_NAME)
    }
}

impl Tracker {
    /// Create an empty tracker
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_state(TrackerState::new(name.into(), ChartConfig::default()))
    }

    /// Create an empty tracker from configuration
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::with_state(TrackerState::new(config.name.clone(), config.chart.clone()))
    }

    /// Rebuild a tracker from a saved snapshot
    ///
    /// Loaded buckets are normalized: negative totals are clamped and every
    /// `avg_time` is recomputed from `total_time / calls`.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut state = TrackerState::new(snapshot.name, ChartConfig::default());
        state.functions = snapshot.functions;
        for stats in state.functions.values_mut() {
            stats.normalize();
        }
        state.events = snapshot.events;
        Self::with_state(state)
    }

    /// Replace the chart settings used by [`Tracker::plot_performance`]
    pub fn with_chart_config(self, chart: ChartConfig) -> Self {
        self.state.borrow_mut().chart = chart;
        self
    }

    fn with_state(state: TrackerState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Tracker name
    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    /// Wrap `f` so each successful call is timed and counted under `id`
    ///
    /// Identifiers are the bucket keys: wrapping two different callables
    /// with the same `id` aggregates them together.
    pub fn track<F>(&self, id: impl Into<String>, f: F) -> Tracked<F> {
        Tracked::new(id.into(), f, Rc::clone(&self.state))
    }

    /// Wrap `f` under an identifier derived from its type path
    ///
    /// See [`qualified_name`](crate::instrument::qualified_name).
    pub fn track_fn<F>(&self, f: F) -> Tracked<F> {
        self.track(qualified_name::<F>(), f)
    }

    /// Time an inline block under `id`
    pub fn measure<R>(&self, id: &str, f: impl FnOnce() -> R) -> R {
        instrument::timed(&self.state, id, f)
    }

    /// Time a fallible block under `id`; an `Err` is returned unrecorded
    pub fn try_measure<T, E>(
        &self,
        id: &str,
        f: impl FnOnce() -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        instrument::try_timed(&self.state, id, f)
    }

    /// Manually track a named event
    pub fn record_event(&self, name: &str) {
        self.state.borrow_mut().record_event(name);
    }

    /// Statistics recorded for `id`, if it was ever called successfully
    pub fn function_stats(&self, id: &str) -> Option<FunctionStats> {
        self.state.borrow().functions.get(id).cloned()
    }

    /// Occurrences of `name` so far (0 if never recorded)
    pub fn event_count(&self, name: &str) -> u64 {
        self.state.borrow().events.get(name).copied().unwrap_or(0)
    }

    /// Owned copy of the current name, functions and events
    pub fn report(&self) -> Snapshot {
        self.state.borrow().snapshot()
    }

    /// Save the report as JSON, replacing any existing file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.report().save(path)
    }

    /// Fold another snapshot into this tracker
    ///
    /// Call counts, total times and event counts add up; averages are
    /// recomputed. New keys are appended after existing ones.
    pub fn merge_snapshot(&self, other: &Snapshot) {
        let mut state = self.state.borrow_mut();
        for (id, stats) in &other.functions {
            state.functions.entry(id.clone()).or_default().absorb(stats);
        }
        for (name, count) in &other.events {
            *state.events.entry(name.clone()).or_insert(0) += count;
        }
        tracing::debug!(
            tracker = %state.name,
            from = %other.name,
            functions = other.functions.len(),
            events = other.events.len(),
            "merged snapshot"
        );
    }

    /// Print a readable summary to stdout
    pub fn summary(&self) {
        print!("{}", summary::render_summary(&self.report()));
    }

    /// Write the summary to any writer
    pub fn write_summary<W: io::Write>(&self, writer: W) -> io::Result<()> {
        summary::write_summary(&self.report(), writer)
    }

    /// Draw the call-count and average-time bar charts
    ///
    /// With `save_path` the chart is written there as SVG; without it the
    /// bars are printed to stdout. Prints `No performance data to plot` and
    /// returns `Ok(())` when no function has been tracked.
    pub fn plot_performance(&self, save_path: Option<&Path>) -> Result<()> {
        let chart = self.state.borrow().chart.clone();
        match save_path {
            Some(path) => self.plot_with(&mut SvgChartRenderer::new(path, chart)),
            None => self.plot_with(&mut TerminalChartRenderer::stdout(&chart)),
        }
    }

    /// Draw the charts with a caller-supplied renderer
    pub fn plot_with<R: ChartRenderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        let Some(data) = ChartData::from_snapshot(&self.report()) else {
            println!("No performance data to plot");
            return Ok(());
        };
        renderer.render(&data)
    }
}
