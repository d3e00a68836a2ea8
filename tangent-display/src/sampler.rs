//! Filter and calibration stage of the touch sampling loop
//!
//! The firmware's sampling task owns the acquisition timing (interrupt
//! waits, inter-sample delays); this type owns everything between a
//! concluded acquisition cycle and the published [`TouchShared`] state,
//! so the whole conditioning path is testable without hardware.

use embassy_sync::blocking_mutex::raw::RawMutex;

use tangent_core::calibration::apply_calibration;
use tangent_core::filter::NoiseFilter;
use tangent_core::geometry::Geometry;

use crate::touch_state::TouchShared;

/// Per-loop touch conditioning state
///
/// Exclusively owned by the sampling loop. The noise filter history
/// lives here; the geometry is captured when the loop starts.
pub struct TouchSampler {
    filter: NoiseFilter,
    geometry: Geometry,
}

impl TouchSampler {
    /// Create a sampler mapping into the given screen geometry
    pub fn new(geometry: Geometry) -> Self {
        Self {
            filter: NoiseFilter::new(),
            geometry,
        }
    }

    /// Process one accepted acquisition cycle
    ///
    /// Runs the raw median point through the noise filter and the
    /// active calibration, then publishes the result with `pressed`
    /// set and the timestamp refreshed.
    pub fn publish_cycle<M: RawMutex>(
        &mut self,
        raw_x: u16,
        raw_y: u16,
        shared: &TouchShared<M>,
        timestamp_ms: u64,
    ) {
        let (filtered_x, filtered_y) = self.filter.push(raw_x, raw_y);
        let calibration = shared.calibration();
        let (x, y) = apply_calibration(filtered_x, filtered_y, &calibration, self.geometry);
        shared.publish(x, y, timestamp_ms);
    }

    /// Handle a touch release
    ///
    /// Clears the pressed flag and resets the noise filter so the next
    /// touch starts from a clean history.
    pub fn release<M: RawMutex>(&mut self, shared: &TouchShared<M>) {
        shared.release_touch();
        self.filter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use tangent_core::calibration::CalibrationConfig;
    use tangent_core::calibration::RAW_MAX;

    fn sampler() -> TouchSampler {
        TouchSampler::new(Geometry::new(320, 480))
    }

    #[test]
    fn test_cycle_publishes_calibrated_point() {
        let shared: TouchShared<NoopRawMutex> = TouchShared::new();
        let mut sampler = sampler();

        // Raw range corners map to the screen corners.
        let cal = shared.calibration();
        sampler.publish_cycle(cal.x_min, cal.y_min, &shared, 10);
        let point = shared.read_touch();
        assert!(point.pressed);
        assert_eq!((point.x, point.y), (0, 0));
        assert_eq!(point.timestamp_ms, 10);

        // The median window lags: three cycles at the far corner are
        // needed before the majority of the window has moved.
        for i in 0..3 {
            sampler.publish_cycle(cal.x_max, cal.y_max, &shared, 20 + i);
        }
        let point = shared.read_touch();
        assert_eq!((point.x, point.y), (319, 479));
        assert_eq!(shared.touch_count(), 4);
    }

    #[test]
    fn test_release_resets_filter_history() {
        let shared: TouchShared<NoopRawMutex> = TouchShared::new();
        let mut sampler = sampler();
        let cal = CalibrationConfig {
            x_min: 0,
            x_max: RAW_MAX,
            y_min: 0,
            y_max: RAW_MAX,
            ..Default::default()
        };
        shared.set_calibration(cal);

        // Saturate the filter window at one corner.
        for i in 0..6 {
            sampler.publish_cycle(100, 100, &shared, i);
        }

        sampler.release(&shared);
        assert!(!shared.is_pressed());

        // With a reset filter, one sample at the opposite corner moves
        // the published point immediately (the window re-seeds).
        sampler.publish_cycle(4000, 4000, &shared, 7);
        let point = shared.read_touch();
        assert!(point.x > 300 && point.y > 460);
    }

    #[test]
    fn test_runtime_calibration_change_applies_next_cycle() {
        let shared: TouchShared<NoopRawMutex> = TouchShared::new();
        let mut sampler = sampler();

        let cal = shared.calibration();
        sampler.publish_cycle(cal.x_min, cal.y_min, &shared, 1);
        assert_eq!(shared.read_touch().x, 0);

        shared.set_calibration(CalibrationConfig {
            invert_x: true,
            ..cal
        });
        // Same raw input now lands at the far edge. The filter window
        // still holds the same raw value, so the change is visible in
        // one cycle.
        sampler.publish_cycle(cal.x_min, cal.y_min, &shared, 2);
        assert_eq!(shared.read_touch().x, 319);
    }
}
