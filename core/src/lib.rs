//! Waveform sampling and quantization core for the DAC LUT toolchain.
//!
//! The modules mirror the firmware-facing generation flow: uniform phase
//! sampling over one period, voltage-to-code quantization, and table
//! assembly, with an optional validation layer on top of the permissive
//! reference behavior.

pub mod prelude;
pub mod quantize;
pub mod table;
pub mod telemetry;
pub mod validate;
pub mod wave;

pub use prelude::{TableError, TableResult, WaveformSpec};
