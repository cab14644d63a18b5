//! Rendering collaborator: the map, instruction list, summary text and
//! charts of whatever front end hosts the orchestrator.

use routeplan_core::AnalyticsSeries;

use crate::display::{DisplayModel, SegmentHighlight};

/// Receives display updates from the orchestrator.
///
/// Calls arrive in a fixed order for each new result: [`clear`] first, then
/// [`show_route`]. Errors also arrive after a [`clear`], so a partial or
/// stale route is never left on screen next to a message.
///
/// [`clear`]: RouteRenderer::clear
/// [`show_route`]: RouteRenderer::show_route
pub trait RouteRenderer: Send {
    /// Removes the route overlay, markers, instruction list, highlight and
    /// any message.
    fn clear(&mut self);

    fn show_route(&mut self, model: &DisplayModel);

    /// Draws `highlight.points` distinctly from the route, replacing any
    /// previous highlight.
    fn highlight_segment(&mut self, highlight: &SegmentHighlight);

    fn show_error(&mut self, message: &str);

    fn render_analytics(&mut self, series: &AnalyticsSeries);
}
