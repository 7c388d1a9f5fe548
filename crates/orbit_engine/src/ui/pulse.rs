//! Button pulse animation

use crate::core::config::PulseConfig;
use crate::foundation::math::constants::TAU;

/// Uniform scale factor at `elapsed` seconds
///
/// A sinusoid centred between `min` and `max` with period `period`.
/// Non-positive periods yield the midpoint.
pub fn pulse_scale(elapsed: f32, config: &PulseConfig) -> f32 {
    let mid = (config.min + config.max) * 0.5;
    if config.period <= 0.0 {
        return mid;
    }
    let amplitude = (config.max - config.min) * 0.5;
    mid + amplitude * (TAU * elapsed / config.period).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_pulse_shape() {
        let config = PulseConfig::default();
        assert_abs_diff_eq!(pulse_scale(0.0, &config), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pulse_scale(0.125, &config), 1.04, epsilon = 1e-5);
        assert_abs_diff_eq!(pulse_scale(0.375, &config), 0.96, epsilon = 1e-5);
        assert_abs_diff_eq!(pulse_scale(0.5, &config), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_pulse_stays_in_range() {
        let config = PulseConfig::default();
        for step in 0..200 {
            let scale = pulse_scale(step as f32 * 0.013, &config);
            assert!((0.96 - 1e-5..=1.04 + 1e-5).contains(&scale));
        }
    }

    #[test]
    fn test_degenerate_period() {
        let config = PulseConfig { min: 0.5, max: 1.5, period: 0.0 };
        assert_eq!(pulse_scale(3.0, &config), 1.0);
    }
}
