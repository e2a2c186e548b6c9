/// Voltage-to-code converter for a DAC with a fixed full-scale reference.
///
/// Codes are produced by truncation toward zero, matching the firmware
/// table convention. No clamping: an over-ranged input yields a code
/// outside `[0, max_code]` rather than an error.
pub struct Quantizer {
    max_code: u64,
    full_scale: f64,
}

impl Quantizer {
    pub fn new(resolution_bits: u8, full_scale: f64) -> Self {
        // Shift guard keeps out-of-range resolutions from panicking; the
        // validation layer reports them separately.
        let max_code = if resolution_bits >= 64 {
            u64::MAX
        } else {
            (1u64 << resolution_bits) - 1
        };
        Self {
            max_code,
            full_scale,
        }
    }

    /// Largest representable code, `2^resolution_bits - 1`.
    pub fn max_code(&self) -> u64 {
        self.max_code
    }

    /// Quantizes one real-valued sample, truncating toward zero.
    pub fn quantize(&self, value: f64) -> i64 {
        (self.max_code as f64 * (value / self.full_scale)) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_code_follows_resolution() {
        assert_eq!(Quantizer::new(8, 2.5).max_code(), 255);
        assert_eq!(Quantizer::new(12, 2.5).max_code(), 4095);
        assert_eq!(Quantizer::new(16, 2.5).max_code(), 65535);
        assert_eq!(Quantizer::new(32, 2.5).max_code(), 4294967295);
    }

    #[test]
    fn quantize_truncates_toward_zero() {
        let quantizer = Quantizer::new(8, 2.0);
        // 255 * (1.0 / 2.0) = 127.5 -> 127, not 128.
        assert_eq!(quantizer.quantize(1.0), 127);
        // Negative side also truncates toward zero.
        assert_eq!(quantizer.quantize(-0.004), 0);
        assert_eq!(quantizer.quantize(-0.02), -2);
    }

    #[test]
    fn full_scale_input_maps_to_max_code() {
        let quantizer = Quantizer::new(12, 2.5);
        assert_eq!(quantizer.quantize(2.5), 4095);
        assert_eq!(quantizer.quantize(0.0), 0);
    }

    #[test]
    fn over_ranged_input_is_not_clamped() {
        let quantizer = Quantizer::new(8, 2.0);
        assert_eq!(quantizer.quantize(4.0), 510);
    }
}
