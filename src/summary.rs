//! Human-readable text summary

use crate::snapshot::Snapshot;
use std::fmt::Write as _;
use std::io;

/// Render the summary exactly as [`Tracker::summary`](crate::Tracker::summary) prints it
///
/// ```
/// use pytrack::{summary::render_summary, Snapshot};
///
/// let mut snapshot = Snapshot::new("demo");
/// snapshot.events.insert("start".to_string(), 2);
///
/// let text = render_summary(&snapshot);
/// assert_eq!(text, "📊 PyTrack Report: demo\n\nEvents:\n - start: 2 times\n");
/// ```
pub fn render_summary(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "📊 PyTrack Report: {}", snapshot.name);
    for (function, stats) in &snapshot.functions {
        let _ = writeln!(
            out,
            " - {}: {} calls, avg {:.4}s",
            function, stats.calls, stats.avg_time
        );
    }

    if !snapshot.events.is_empty() {
        out.push_str("\nEvents:\n");
        for (event, count) in &snapshot.events {
            let _ = writeln!(out, " - {}: {} times", event, count);
        }
    }

    out
}

/// Write the summary to any writer
pub fn write_summary<W: io::Write>(snapshot: &Snapshot, mut writer: W) -> io::Result<()> {
    writer.write_all(render_summary(snapshot).as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function_profiler::FunctionStats;

    fn stats(samples: &[f64]) -> FunctionStats {
        let mut stats = FunctionStats::new();
        for &s in samples {
            stats.record_secs(s);
        }
        stats
    }

    #[test]
    fn test_header_only_when_empty() {
        let snapshot = Snapshot::new("empty");
        assert_eq!(render_summary(&snapshot), "📊 PyTrack Report: empty\n");
    }

    #[test]
    fn test_function_lines_four_decimals() {
        let mut snapshot = Snapshot::new("t1");
        snapshot
            .functions
            .insert("slow".to_string(), stats(&[0.01, 0.012, 0.011]));
        snapshot
            .functions
            .insert("fast".to_string(), stats(&[0.00004]));

        let text = render_summary(&snapshot);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "📊 PyTrack Report: t1");
        assert_eq!(lines[1], " - slow: 3 calls, avg 0.0110s");
        assert_eq!(lines[2], " - fast: 1 calls, avg 0.0000s");
        assert_eq!(lines.len(), 3);
        assert!(!text.contains("Events:"));
    }

    #[test]
    fn test_events_section_follows_blank_line() {
        let mut snapshot = Snapshot::new("t1");
        snapshot.functions.insert("slow".to_string(), stats(&[0.5]));
        snapshot.events.insert("start".to_string(), 2);
        snapshot.events.insert("stop".to_string(), 1);

        let text = render_summary(&snapshot);
        assert_eq!(
            text,
            "📊 PyTrack Report: t1\n\
             \x20- slow: 1 calls, avg 0.5000s\n\
             \n\
             Events:\n\
             \x20- start: 2 times\n\
             \x20- stop: 1 times\n"
        );
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut snapshot = Snapshot::new("order");
        for name in ["zeta", "alpha", "mid"] {
            snapshot.functions.insert(name.to_string(), stats(&[0.1]));
        }

        let text = render_summary(&snapshot);
        let zeta = text.find("zeta").unwrap();
        let alpha = text.find("alpha").unwrap();
        let mid = text.find("mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[test]
    fn test_write_summary_to_buffer() {
        let mut snapshot = Snapshot::new("buf");
        snapshot.events.insert("tick".to_string(), 5);

        let mut buf = Vec::new();
        write_summary(&snapshot, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains(" - tick: 5 times"));
    }
}
