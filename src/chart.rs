//! Performance charts
//!
//! The tracker only prepares [`ChartData`]: the function identifiers in
//! insertion order plus two parallel value arrays (call counts and average
//! times). Drawing is delegated to a [`ChartRenderer`]:
//!
//! - [`SvgChartRenderer`] writes a two-panel SVG document to a file
//! - [`TerminalChartRenderer`] draws the same two panels as text bars

use crate::config::ChartConfig;
use crate::error::Result;
use crate::snapshot::Snapshot;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Upper panel title
pub const CALLS_TITLE: &str = "Function Calls";
/// Upper panel y-axis label
pub const CALLS_LABEL: &str = "Number of Calls";
/// Lower panel title
pub const AVG_TIME_TITLE: &str = "Average Exec. Time";
/// Lower panel y-axis label
pub const AVG_TIME_LABEL: &str = "Time (seconds)";

/// Rotation applied to x-axis labels (degrees)
const LABEL_ROTATION: i32 = 45;

/// Values for the two bar charts, in a single consistent key order
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Figure title
    pub title: String,
    /// Function identifiers (shared x-axis categories)
    pub categories: Vec<String>,
    /// Call count per category
    pub calls: Vec<u64>,
    /// Average execution time per category (seconds)
    pub avg_times: Vec<f64>,
}

impl ChartData {
    /// Build chart data from a snapshot; `None` when no functions were tracked
    pub fn from_snapshot(snapshot: &Snapshot) -> Option<Self> {
        if snapshot.functions.is_empty() {
            return None;
        }

        let mut categories = Vec::with_capacity(snapshot.functions.len());
        let mut calls = Vec::with_capacity(snapshot.functions.len());
        let mut avg_times = Vec::with_capacity(snapshot.functions.len());
        for (name, stats) in &snapshot.functions {
            categories.push(name.clone());
            calls.push(stats.calls);
            avg_times.push(stats.avg_time);
        }

        Some(Self {
            title: format!("PyTrack Performance Report: {}", snapshot.name),
            categories,
            calls,
            avg_times,
        })
    }

    fn call_values(&self) -> Vec<f64> {
        self.calls.iter().map(|&c| c as f64).collect()
    }
}

/// Something that can draw [`ChartData`]
pub trait ChartRenderer {
    /// Draw both panels
    fn render(&mut self, chart: &ChartData) -> Result<()>;
}

/// Renders the chart as an SVG file
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    path: PathBuf,
    config: ChartConfig,
}

impl SvgChartRenderer {
    /// Create a renderer writing to `path`
    pub fn new(path: impl Into<PathBuf>, config: ChartConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    /// Destination file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the SVG document
    pub fn to_svg(&self, chart: &ChartData) -> String {
        let width = self.config.width as f64;
        let panel_height = self.config.panel_height as f64;
        let header = 50.0;
        let height = header + 2.0 * panel_height;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        svg.push_str("    <style>text { font-family: sans-serif; fill: #333; }</style>\n");
        let _ = writeln!(
            svg,
            r#"    <rect width="{}" height="{}" fill="white"/>"#,
            width, height
        );
        let _ = writeln!(
            svg,
            r#"    <text x="{}" y="32" font-size="20" text-anchor="middle">{}</text>"#,
            width / 2.0,
            escape_xml(&chart.title)
        );

        self.render_panel(
            &mut svg,
            header,
            &Panel {
                title: CALLS_TITLE,
                y_label: CALLS_LABEL,
                values: &chart.call_values(),
                integer_ticks: true,
            },
            &chart.categories,
        );
        self.render_panel(
            &mut svg,
            header + panel_height,
            &Panel {
                title: AVG_TIME_TITLE,
                y_label: AVG_TIME_LABEL,
                values: &chart.avg_times,
                integer_ticks: false,
            },
            &chart.categories,
        );

        svg.push_str("</svg>\n");
        svg
    }

    fn render_panel(&self, svg: &mut String, top: f64, panel: &Panel<'_>, categories: &[String]) {
        let width = self.config.width as f64;
        let panel_height = self.config.panel_height as f64;
        let (left, right, title_band, label_band) = (80.0, 20.0, 40.0, 110.0);

        let x0 = left;
        let x1 = (width - right).max(x0 + 1.0);
        let y0 = top + title_band;
        let y1 = (top + panel_height - label_band).max(y0 + 1.0);
        let plot_width = x1 - x0;
        let plot_height = y1 - y0;

        let max = panel.values.iter().cloned().fold(0.0_f64, f64::max);
        let scale_max = if max > 0.0 { max } else { 1.0 };

        let _ = writeln!(svg, r#"    <g class="panel">"#);
        let _ = writeln!(
            svg,
            r#"        <text x="{}" y="{}" font-size="16" text-anchor="middle">{}</text>"#,
            (x0 + x1) / 2.0,
            top + 26.0,
            escape_xml(panel.title)
        );

        // Axes
        let _ = writeln!(
            svg,
            r##"        <line x1="{x0}" y1="{y0}" x2="{x0}" y2="{y1}" stroke="#333"/>"##
        );
        let _ = writeln!(
            svg,
            r##"        <line x1="{x0}" y1="{y1}" x2="{x1}" y2="{y1}" stroke="#333"/>"##
        );
        let _ = writeln!(
            svg,
            r#"        <text x="20" y="{y}" font-size="12" text-anchor="middle" transform="rotate(-90 20 {y})">{label}</text>"#,
            y = (y0 + y1) / 2.0,
            label = escape_xml(panel.y_label)
        );

        for fraction in [0.0, 0.5, 1.0] {
            let y = y1 - fraction * plot_height;
            let tick = format_tick(fraction * scale_max, panel.integer_ticks);
            let _ = writeln!(
                svg,
                r##"        <line x1="{}" y1="{y}" x2="{x0}" y2="{y}" stroke="#333"/>"##,
                x0 - 5.0
            );
            let _ = writeln!(
                svg,
                r#"        <text x="{}" y="{}" font-size="11" text-anchor="end">{}</text>"#,
                x0 - 8.0,
                y + 4.0,
                tick
            );
        }

        let slot = plot_width / categories.len().max(1) as f64;
        let bar_width = slot * 0.6;
        for (i, (name, &value)) in categories.iter().zip(panel.values).enumerate() {
            let bar_height = (value.max(0.0) / scale_max) * plot_height;
            let center = x0 + slot * (i as f64 + 0.5);
            let _ = writeln!(
                svg,
                r#"        <rect x="{}" y="{}" width="{}" height="{}" fill="{}"><title>{}: {}</title></rect>"#,
                center - bar_width / 2.0,
                y1 - bar_height,
                bar_width,
                bar_height,
                escape_xml(&self.config.bar_color),
                escape_xml(name),
                format_tick(value, panel.integer_ticks)
            );
            let label_y = y1 + 14.0;
            let _ = writeln!(
                svg,
                r#"        <text x="{center}" y="{label_y}" font-size="11" text-anchor="start" transform="rotate({LABEL_ROTATION} {center} {label_y})">{}</text>"#,
                escape_xml(name)
            );
        }

        svg.push_str("    </g>\n");
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&mut self, chart: &ChartData) -> Result<()> {
        let svg = self.to_svg(chart);
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(svg.as_bytes())?;
        writer.flush()?;
        tracing::info!(
            path = %self.path.display(),
            functions = chart.categories.len(),
            "saved performance chart"
        );
        Ok(())
    }
}

/// Draws the chart as horizontal text bars
#[derive(Debug)]
pub struct TerminalChartRenderer<W> {
    writer: W,
    bar_width: usize,
}

impl TerminalChartRenderer<io::Stdout> {
    /// Renderer printing to standard output
    pub fn stdout(config: &ChartConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> TerminalChartRenderer<W> {
    /// Renderer printing to `writer`
    pub fn new(writer: W, config: &ChartConfig) -> Self {
        Self {
            writer,
            bar_width: config.terminal_width.max(1),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Build the text rendering
    pub fn to_text(&self, chart: &ChartData) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", chart.title);

        let calls: Vec<String> = chart.calls.iter().map(|c| c.to_string()).collect();
        let times: Vec<String> = chart.avg_times.iter().map(|t| format!("{:.4}", t)).collect();
        self.render_panel(
            &mut out,
            &format!("{} ({})", CALLS_TITLE, CALLS_LABEL),
            &chart.categories,
            &chart.call_values(),
            &calls,
        );
        self.render_panel(
            &mut out,
            &format!("{} ({})", AVG_TIME_TITLE, AVG_TIME_LABEL),
            &chart.categories,
            &chart.avg_times,
            &times,
        );
        out
    }

    fn render_panel(
        &self,
        out: &mut String,
        heading: &str,
        categories: &[String],
        values: &[f64],
        labels: &[String],
    ) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", heading);

        let name_width = categories
            .iter()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0);
        let max = values.iter().cloned().fold(0.0_f64, f64::max);

        for ((name, &value), label) in categories.iter().zip(values).zip(labels) {
            let len = if max > 0.0 {
                ((value.max(0.0) / max) * self.bar_width as f64).round() as usize
            } else {
                0
            };
            let len = if value > 0.0 { len.max(1) } else { len };
            let _ = writeln!(
                out,
                "  {:<name_width$} | {} {}",
                name,
                "█".repeat(len),
                label
            );
        }
    }
}

impl<W: Write> ChartRenderer for TerminalChartRenderer<W> {
    fn render(&mut self, chart: &ChartData) -> Result<()> {
        let text = self.to_text(chart);
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

struct Panel<'a> {
    title: &'a str,
    y_label: &'a str,
    values: &'a [f64],
    integer_ticks: bool,
}

fn format_tick(value: f64, integer: bool) -> String {
    if integer {
        format!("{}", value.round() as u64)
    } else {
        format!("{:.4}", value)
    }
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
