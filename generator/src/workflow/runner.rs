use crate::workflow::config::TableConfig;
use anyhow::Context;
use log::warn;
use lutcore::prelude::WaveformSpec;
use lutcore::quantize::CodeWidth;
use lutcore::table::{self, WaveTrace};
use lutcore::validate::validate;

/// Everything one generation run produces: the spec it ran with, the full
/// trace, the storage width for emission, and any validation findings.
pub struct TableArtifact {
    pub spec: WaveformSpec,
    pub trace: WaveTrace,
    pub width: CodeWidth,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: TableConfig,
    strict: bool,
}

impl Runner {
    pub fn new(config: TableConfig, strict: bool) -> Self {
        Self { config, strict }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn execute(&self) -> anyhow::Result<TableArtifact> {
        self.execute_spec(&self.config.to_waveform_spec())
    }

    /// Generates a table for an arbitrary spec. In strict mode validation
    /// findings abort the run; otherwise they are logged and carried as
    /// notes while the table is produced as-is, matching the permissive
    /// reference behavior.
    pub fn execute_spec(&self, spec: &WaveformSpec) -> anyhow::Result<TableArtifact> {
        let mut notes = Vec::new();
        if let Err(err) = validate(spec) {
            if self.strict {
                return Err(err).context("validating waveform spec");
            }
            warn!("spec check: {}", err);
            notes.push(err.to_string());
        }

        let trace = table::trace(spec);
        let width = CodeWidth::from_bits(spec.resolution_bits);

        Ok(TableArtifact {
            spec: spec.clone(),
            trace,
            width,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_executes_generation() {
        let cfg = TableConfig::from_args(16, 0.9, 1.0, 0.0, 2.5, 12);
        let runner = Runner::new(cfg, false);
        let artifact = runner.execute().unwrap();
        assert_eq!(artifact.trace.codes.len(), 16);
        assert_eq!(artifact.width, CodeWidth::U16);
        assert!(artifact.notes.is_empty());
    }

    #[test]
    fn permissive_runner_carries_overflow_notes() {
        let cfg = TableConfig::from_args(8, 3.0, 1.0, 0.0, 2.5, 12);
        let runner = Runner::new(cfg, false);
        let artifact = runner.execute().unwrap();
        assert_eq!(artifact.notes.len(), 1);
        assert!(artifact.notes[0].contains("range overflow"));
    }

    #[test]
    fn strict_runner_rejects_overflow() {
        let cfg = TableConfig::from_args(8, 3.0, 1.0, 0.0, 2.5, 12);
        let runner = Runner::new(cfg, true);
        assert!(runner.execute().is_err());
    }
}
