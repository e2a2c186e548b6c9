use crate::prelude::{TableError, TableResult, WaveformSpec};

/// Checks a spec for the two silent-failure classes of the permissive
/// generation path: degenerate configuration (zero-length table, unusable
/// resolution, non-positive reference voltage) and range overflow (the
/// waveform swings outside `[0, full_scale_voltage]`, so codes leave
/// `[0, max_code]`).
///
/// The pure [`crate::table::generate`] path never calls this; callers opt
/// in when they prefer a reported error over a nonsensical table.
pub fn validate(spec: &WaveformSpec) -> TableResult<()> {
    if spec.length == 0 {
        return Err(TableError::InvalidSpec("length must be positive".into()));
    }
    if spec.resolution_bits == 0 || spec.resolution_bits > 32 {
        return Err(TableError::InvalidSpec(format!(
            "resolution of {} bits is outside 1..=32",
            spec.resolution_bits
        )));
    }
    if !(spec.full_scale_voltage > 0.0) {
        return Err(TableError::InvalidSpec(format!(
            "full-scale voltage {} is used as a divisor and must be positive",
            spec.full_scale_voltage
        )));
    }

    let peak = spec.dc_offset + spec.amplitude.abs();
    if peak > spec.full_scale_voltage {
        return Err(TableError::RangeOverflow(format!(
            "waveform peak {:.3} V exceeds full scale {:.3} V",
            peak, spec.full_scale_voltage
        )));
    }
    let trough = spec.dc_offset - spec.amplitude.abs();
    if trough < 0.0 {
        return Err(TableError::RangeOverflow(format!(
            "waveform trough {:.3} V falls below 0 V",
            trough
        )));
    }

    Ok(())
}
