use crate::workflow::runner::TableArtifact;
use lutcore::quantize::Quantizer;
use serde::{Deserialize, Serialize};

/// Snapshot served to the visualizer: the quantized table, the continuous
/// waveform it was sampled from, and enough context to label the plots.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub length: usize,
    pub resolution_bits: u8,
    pub max_code: u64,
    pub angles: Vec<f64>,
    pub real_wave: Vec<f64>,
    pub codes: Vec<i64>,
    pub notes: Vec<String>,
}

impl VisualizationModel {
    pub fn from_artifact(artifact: &TableArtifact) -> Self {
        let quantizer = Quantizer::new(
            artifact.spec.resolution_bits,
            artifact.spec.full_scale_voltage,
        );
        Self {
            length: artifact.spec.length,
            resolution_bits: artifact.spec.resolution_bits,
            max_code: quantizer.max_code(),
            angles: artifact.trace.angles.clone(),
            real_wave: artifact.trace.real.clone(),
            codes: artifact.trace.codes.clone(),
            notes: artifact.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::TableConfig;
    use crate::workflow::runner::Runner;

    #[test]
    fn model_captures_artifact_dimensions() {
        let cfg = TableConfig::from_args(32, 0.9, 1.0, 0.0, 2.5, 12);
        let artifact = Runner::new(cfg, false).execute().unwrap();
        let model = VisualizationModel::from_artifact(&artifact);
        assert_eq!(model.length, 32);
        assert_eq!(model.codes.len(), 32);
        assert_eq!(model.angles.len(), 32);
        assert_eq!(model.max_code, 4095);
    }
}
