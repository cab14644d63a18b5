//! Trip duration decomposition.

use std::fmt;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// A duration split into whole hours, minutes and seconds by floor division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripDuration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TripDuration {
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self {
            hours: ms / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// Zero-padded clock form, e.g. `01:23:45`.
    #[must_use]
    pub fn clock(self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Compact form: `1h 23m 45s`, `5m 3s`, or `42s`.
impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours > 0 {
            write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
        } else if self.minutes > 0 {
            write!(f, "{}m {}s", self.minutes, self.seconds)
        } else {
            write!(f, "{}s", self.seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_example_duration() {
        let d = TripDuration::from_millis(5_025_000);
        assert_eq!(
            d,
            TripDuration {
                hours: 1,
                minutes: 23,
                seconds: 45
            }
        );
        assert_eq!(d.to_string(), "1h 23m 45s");
        assert_eq!(d.clock(), "01:23:45");
    }

    #[test]
    fn compact_form_drops_leading_zero_units() {
        assert_eq!(TripDuration::from_millis(3_600_000).to_string(), "1h 0m 0s");
        assert_eq!(TripDuration::from_millis(5_415_000).to_string(), "1h 30m 15s");
        assert_eq!(TripDuration::from_millis(303_000).to_string(), "5m 3s");
        assert_eq!(TripDuration::from_millis(45_000).to_string(), "45s");
        assert_eq!(TripDuration::from_millis(999).to_string(), "0s");
    }

    fn whole_millis(d: TripDuration) -> u64 {
        d.hours * MS_PER_HOUR + d.minutes * MS_PER_MINUTE + d.seconds * MS_PER_SECOND
    }

    #[test]
    fn floor_decomposition_brackets_the_input() {
        let samples = [
            0_u64,
            1,
            999,
            1_000,
            59_999,
            60_000,
            3_599_999,
            3_600_000,
            5_025_000,
            5_025_999,
            86_400_000 * 3 + 17,
        ];
        for t in samples {
            let d = TripDuration::from_millis(t);
            assert!(d.minutes < 60 && d.seconds < 60, "{t}: {d:?}");
            assert!(whole_millis(d) <= t, "{t}: {d:?}");
            assert!(t < whole_millis(d) + MS_PER_SECOND, "{t}: {d:?}");
        }
    }
}
