use crate::prelude::{TableResult, WaveformSpec};
use crate::quantize::Quantizer;
use crate::telemetry::LogManager;
use crate::validate::validate;
use crate::wave::SineSampler;
use serde::{Deserialize, Serialize};

/// Per-table diagnostic trace: the angle sequence, the real-valued signal
/// before quantization, and the quantized codes. The emitter only needs
/// the codes; the visualizer plots all three.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveTrace {
    pub angles: Vec<f64>,
    pub real: Vec<f64>,
    pub codes: Vec<i64>,
}

/// Generates one period of quantized sine samples.
///
/// Pure and deterministic: identical specs yield identical sequences. No
/// validation is performed; a degenerate or over-ranged spec silently
/// produces codes outside `[0, max_code]`.
pub fn generate(spec: &WaveformSpec) -> Vec<i64> {
    let quantizer = Quantizer::new(spec.resolution_bits, spec.full_scale_voltage);
    (0..spec.length)
        .map(|i| {
            let angle = SineSampler::angle(spec.length, i);
            quantizer.quantize(SineSampler::real_value(spec, angle))
        })
        .collect()
}

/// Validation wrapper over [`generate`] for callers that want degenerate
/// or over-ranged specs reported instead of silently encoded.
pub fn generate_checked(spec: &WaveformSpec) -> TableResult<Vec<i64>> {
    validate(spec)?;
    Ok(generate(spec))
}

/// Runs the same pass as [`generate`] while retaining the angle and
/// real-valued sequences for emission and plotting.
pub fn trace(spec: &WaveformSpec) -> WaveTrace {
    let quantizer = Quantizer::new(spec.resolution_bits, spec.full_scale_voltage);
    let logger = LogManager::new();

    let mut angles = Vec::with_capacity(spec.length);
    let mut real = Vec::with_capacity(spec.length);
    let mut codes = Vec::with_capacity(spec.length);

    for i in 0..spec.length {
        let angle = SineSampler::angle(spec.length, i);
        let value = SineSampler::real_value(spec, angle);
        angles.push(angle);
        real.push(value);
        codes.push(quantizer.quantize(value));
    }

    logger.record(&format!(
        "traced {} samples (max_code {})",
        codes.len(),
        quantizer.max_code()
    ));

    WaveTrace {
        angles,
        real,
        codes,
    }
}
