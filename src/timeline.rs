use time::{Duration, OffsetDateTime};

use crate::error::ExtractError;

/// The running clock for synthesized trackpoint times.
///
/// The original recording carries no per-point times, so the workout is
/// treated as constant-speed: the total duration divided by the point count
/// gives a fixed millisecond delta, and every point gets the current clock
/// value before the clock advances. One `Timeline` is threaded through all
/// elevation batches so times never reset at a batch boundary.
#[derive(Debug)]
pub struct Timeline {
    clock: OffsetDateTime,
    delta: Duration,
}

impl Timeline {
    pub fn new(
        start: OffsetDateTime,
        total_time_secs: f64,
        points: usize,
    ) -> Result<Self, ExtractError> {
        if points == 0 {
            return Err(ExtractError::EmptyRoute);
        }
        // Truncated to whole milliseconds, matching the website's exports.
        let delta_ms = (total_time_secs * 1000.0 / points as f64) as i64;
        Ok(Self {
            clock: start,
            delta: Duration::milliseconds(delta_ms),
        })
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Returns the timestamp for the next point and advances the clock.
    pub fn advance(&mut self) -> OffsetDateTime {
        let at = self.clock;
        self.clock += self.delta;
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp_nanos(1_700_000_000_000 * 1_000_000).unwrap()
    }

    #[test]
    fn delta_is_duration_over_point_count() {
        let timeline = Timeline::new(start(), 40.0, 4).unwrap();
        assert_eq!(timeline.delta(), Duration::milliseconds(10_000));
    }

    #[test]
    fn fractional_delta_is_truncated_to_milliseconds() {
        let timeline = Timeline::new(start(), 10.0, 3).unwrap();
        assert_eq!(timeline.delta(), Duration::milliseconds(3333));
    }

    #[test]
    fn kth_timestamp_is_start_plus_k_deltas() {
        let mut timeline = Timeline::new(start(), 40.0, 4).unwrap();
        for k in 0..4 {
            assert_eq!(timeline.advance(), start() + Duration::seconds(10 * k));
        }
    }

    #[test]
    fn zero_points_is_an_empty_route_error() {
        let err = Timeline::new(start(), 40.0, 0).unwrap_err();
        assert!(matches!(err, ExtractError::EmptyRoute));
    }
}
