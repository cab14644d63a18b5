//! Plain-text renderer: route summary, instruction table, highlighted step,
//! and bar charts for analytics.

use std::fmt::Display;
use std::io::Write;

use routeplan_client::display::max_count;
use routeplan_client::{DisplayModel, RouteRenderer, SegmentHighlight};
use routeplan_core::AnalyticsSeries;

const BAR_WIDTH: i64 = 30;
const SEPARATOR_WIDTH: usize = 60;

pub(crate) struct TerminalRenderer<W> {
    out: W,
    /// Something has been written since the last `clear`.
    dirty: bool,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out, dirty: false }
    }

    fn line(&mut self, text: impl Display) {
        self.dirty = true;
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

/// `count / max` of [`BAR_WIDTH`] hashes; any non-zero count gets at least one.
fn bar(count: i64, max: i64) -> String {
    if max <= 0 || count <= 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH / max).max(1);
    "#".repeat(usize::try_from(width).unwrap_or(0))
}

impl<W: Write + Send> RouteRenderer for TerminalRenderer<W> {
    /// Scrollback can't be erased, so earlier output is closed off with a rule.
    fn clear(&mut self) {
        if self.dirty {
            self.line("-".repeat(SEPARATOR_WIDTH));
            self.dirty = false;
        }
    }

    fn show_route(&mut self, model: &DisplayModel) {
        self.line(&model.title);
        let [distance, duration, vehicle] = model.summary_lines();
        self.line(format_args!("  {distance}"));
        self.line(format_args!("  {duration} ({})", model.clock));
        self.line(format_args!("  {vehicle}"));
        self.line("");

        if model.steps.is_empty() {
            self.line("  (no turn-by-turn instructions)");
            return;
        }
        self.line(format_args!("  {:<5}{:<12}INSTRUCTION", "#", "DISTANCE"));
        for step in &model.steps {
            self.line(format_args!(
                "  {:<5}{:<12}{}",
                step.number, step.distance, step.text
            ));
        }
    }

    fn highlight_segment(&mut self, highlight: &SegmentHighlight) {
        self.line("");
        self.line(format_args!(
            "Step {}: {}",
            highlight.step_index + 1,
            highlight.text
        ));
        match (highlight.points.first(), highlight.points.last()) {
            (Some(start), Some(end)) => self.line(format_args!(
                "  {} points from ({:.5}, {:.5}) to ({:.5}, {:.5})",
                highlight.points.len(),
                start.lat,
                start.lon,
                end.lat,
                end.lon
            )),
            _ => self.line("  (no geometry for this step)"),
        }
    }

    fn show_error(&mut self, message: &str) {
        self.line(format_args!("error: {message}"));
    }

    fn render_analytics(&mut self, series: &AnalyticsSeries) {
        if series.is_empty() {
            self.line("no routes requested yet");
            return;
        }
        let max = max_count(series);

        self.line("TOP ROUTES");
        for route in &series.top_routes {
            self.line(format_args!(
                "  {:<40}{:>5} {}",
                route.label,
                route.count,
                bar(route.count, max)
            ));
        }
        self.line("");
        self.line("VEHICLE USAGE");
        for (vehicle, count) in &series.vehicle_usage {
            self.line(format_args!(
                "  {:<40}{:>5} {}",
                vehicle,
                count,
                bar(*count, max)
            ));
        }
    }
}
