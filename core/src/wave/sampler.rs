use crate::prelude::WaveformSpec;
use std::f64::consts::PI;

/// Uniform phase sampling over exactly one period of a sine wave.
///
/// Angles use the closed form `i * (2π / length)` rather than repeated
/// accumulation of the increment, so long tables do not pick up rounding
/// drift toward the end of the period.
pub struct SineSampler;

impl SineSampler {
    /// Phase angle of sample `index` in a table of `length` samples.
    pub fn angle(length: usize, index: usize) -> f64 {
        index as f64 * (2.0 * PI / length as f64)
    }

    /// The full angle sequence for a table of `length` samples.
    pub fn angles(length: usize) -> Vec<f64> {
        (0..length).map(|i| Self::angle(length, i)).collect()
    }

    /// Real-valued signal at `angle`, before quantization.
    pub fn real_value(spec: &WaveformSpec, angle: f64) -> f64 {
        spec.amplitude * (angle + spec.phase).sin() + spec.dc_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> WaveformSpec {
        WaveformSpec {
            length: 4,
            amplitude: 1.0,
            dc_offset: 1.0,
            phase: 0.0,
            full_scale_voltage: 2.0,
            resolution_bits: 8,
        }
    }

    #[test]
    fn angles_are_uniformly_spaced() {
        let angles = SineSampler::angles(4);
        assert_eq!(angles.len(), 4);
        assert!((angles[0]).abs() < 1e-12);
        assert!((angles[1] - PI / 2.0).abs() < 1e-12);
        assert!((angles[2] - PI).abs() < 1e-12);
        assert!((angles[3] - 3.0 * PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn signal_is_periodic_over_one_table() {
        let spec = spec();
        let start = SineSampler::real_value(&spec, SineSampler::angle(4, 0));
        let wrap = SineSampler::real_value(&spec, SineSampler::angle(4, 4));
        assert!((start - wrap).abs() < 1e-9);
    }

    #[test]
    fn real_value_applies_offset_and_phase() {
        let mut spec = spec();
        assert!((SineSampler::real_value(&spec, 0.0) - 1.0).abs() < 1e-12);
        assert!((SineSampler::real_value(&spec, PI / 2.0) - 2.0).abs() < 1e-12);

        spec.phase = PI / 2.0;
        assert!((SineSampler::real_value(&spec, 0.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_sample_table_sits_at_angle_zero() {
        let angles = SineSampler::angles(1);
        assert_eq!(angles, vec![0.0]);
    }
}
