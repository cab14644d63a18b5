//! Display model built from a route result: the text and geometry a
//! renderer needs, already formatted in the requested unit.

use routeplan_core::{
    AnalyticsSeries, LatLon, RouteResult, SegmentInterval, TravelMode, TripDuration, UnitSystem,
};

/// One numbered line of the instruction list.
#[derive(Debug, Clone, PartialEq)]
pub struct StepLine {
    /// 1-based.
    pub number: usize,
    pub text: String,
    pub distance: String,
    pub interval: SegmentInterval,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub title: String,
    pub origin: String,
    pub destination: String,
    pub travel_mode: TravelMode,
    pub unit_system: UnitSystem,
    /// `"55.20 km"`
    pub distance: String,
    /// `"1h 23m 45s"`
    pub duration: String,
    /// `"01:23:45"`
    pub clock: String,
    /// `"Car"`
    pub vehicle: String,
    pub steps: Vec<StepLine>,
    pub geometry: Vec<LatLon>,
}

impl DisplayModel {
    #[must_use]
    pub fn new(
        origin: &str,
        destination: &str,
        travel_mode: TravelMode,
        unit_system: UnitSystem,
        result: &RouteResult,
    ) -> Self {
        let duration = TripDuration::from_millis(result.total_duration_millis());
        let steps = result
            .steps()
            .iter()
            .enumerate()
            .map(|(i, step)| StepLine {
                number: i + 1,
                text: step.text.clone(),
                distance: unit_system.format_meters(step.distance_meters),
                interval: step.interval,
            })
            .collect();

        Self {
            title: format!(
                "Directions from {origin} to {destination} by {}",
                travel_mode.label()
            ),
            origin: origin.to_string(),
            destination: destination.to_string(),
            travel_mode,
            unit_system,
            distance: unit_system.format_meters(result.total_distance_meters()),
            duration: duration.to_string(),
            clock: duration.clock(),
            vehicle: travel_mode.label().to_string(),
            steps,
            geometry: result.geometry().to_vec(),
        }
    }

    /// `Distance: …`, `Duration: …`, `Vehicle: …`
    #[must_use]
    pub fn summary_lines(&self) -> [String; 3] {
        [
            format!("Distance: {}", self.distance),
            format!("Duration: {}", self.duration),
            format!("Vehicle: {}", self.vehicle),
        ]
    }
}

/// The single active highlighted instruction segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentHighlight {
    /// 0-based index into the route's steps.
    pub step_index: usize,
    pub text: String,
    pub interval: SegmentInterval,
    /// `geometry[start..=end]`
    pub points: Vec<LatLon>,
}

/// Largest count in the series, used to scale bar charts.
#[must_use]
pub fn max_count(series: &AnalyticsSeries) -> i64 {
    series
        .top_routes
        .iter()
        .map(|r| r.count)
        .chain(series.vehicle_usage.values().copied())
        .max()
        .unwrap_or(0)
}
