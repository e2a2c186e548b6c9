use serde::{Deserialize, Serialize};

/// Immutable waveform description consumed by the generation pipeline.
///
/// One value describes one table: the oscillation itself (`amplitude`,
/// `dc_offset`, `phase`), the sampling density (`length` samples over a
/// single period), and the quantizer target (`full_scale_voltage` and
/// `resolution_bits`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformSpec {
    pub length: usize,
    pub amplitude: f64,
    pub dc_offset: f64,
    pub phase: f64,
    pub full_scale_voltage: f64,
    pub resolution_bits: u8,
}

/// Common error type for table generation.
#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("invalid spec: {0}")]
    InvalidSpec(String),
    #[error("range overflow: {0}")]
    RangeOverflow(String),
}

pub type TableResult<T> = Result<T, TableError>;
