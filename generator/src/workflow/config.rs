use anyhow::Context;
use lutcore::prelude::WaveformSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Table configuration as accepted on the command line, from a YAML file,
/// or over the ingest endpoint. Defaults are the original firmware table:
/// 1024 samples of a 0.9 V sine on a 1.0 V offset against a 2.5 V, 12-bit
/// DAC.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub length: usize,
    pub amplitude: f64,
    pub dc_offset: f64,
    pub phase: f64,
    pub full_scale_voltage: f64,
    pub resolution_bits: u8,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            length: 1024,
            amplitude: 0.9,
            dc_offset: 1.0,
            phase: 0.0,
            full_scale_voltage: 2.5,
            resolution_bits: 12,
        }
    }
}

impl TableConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading table config {}", path_ref.display()))?;
        let config: TableConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing table config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        length: usize,
        amplitude: f64,
        dc_offset: f64,
        phase: f64,
        full_scale_voltage: f64,
        resolution_bits: u8,
    ) -> Self {
        Self {
            length,
            amplitude,
            dc_offset,
            phase,
            full_scale_voltage,
            resolution_bits,
        }
    }

    pub fn to_waveform_spec(&self) -> WaveformSpec {
        WaveformSpec {
            length: self.length,
            amplitude: self.amplitude,
            dc_offset: self.dc_offset,
            phase: self.phase,
            full_scale_voltage: self.full_scale_voltage,
            resolution_bits: self.resolution_bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_waveform_spec() {
        let cfg = TableConfig::from_args(256, 1.2, 1.25, 0.0, 3.3, 10);
        let spec = cfg.to_waveform_spec();
        assert_eq!(spec.length, 256);
        assert_eq!(spec.resolution_bits, 10);
        assert!((spec.full_scale_voltage - 3.3).abs() < 1e-12);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"length: 512\nresolution_bits: 8\namplitude: 0.5\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = TableConfig::load(&path).unwrap();
        assert_eq!(cfg.length, 512);
        assert_eq!(cfg.resolution_bits, 8);
        // Unlisted fields keep the firmware defaults.
        assert!((cfg.full_scale_voltage - 2.5).abs() < 1e-12);
    }
}
