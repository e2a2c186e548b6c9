use anyhow::Context;
use lutcore::prelude::WaveformSpec;
use lutcore::quantize::CodeWidth;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Values per line inside the braced initializer, matching the firmware
/// tables already checked in.
const VALUES_PER_LINE: usize = 16;

/// Renders the table as a complete C definition: a doc comment stating the
/// byte size and waveform properties, a width-typed array declaration, and
/// the comma-separated codes wrapped every sixteen values.
pub fn render(spec: &WaveformSpec, codes: &[i64]) -> String {
    let width = CodeWidth::from_bits(spec.resolution_bits);
    let mut out = comment_block(spec, width, codes.len());
    out.push_str(&array_decl(width, codes.len()));

    for (i, code) in codes.iter().enumerate() {
        if i % VALUES_PER_LINE == 0 {
            out.push_str("\n    ");
        }
        if i == codes.len() - 1 {
            let _ = write!(out, "{} ", code);
        } else {
            let _ = write!(out, "{}, ", code);
        }
    }

    out.push_str("\n};\n");
    out
}

/// Renders the table and writes it to `path`.
pub fn write_source<P: AsRef<Path>>(path: P, spec: &WaveformSpec, codes: &[i64]) -> anyhow::Result<()> {
    let path_ref = path.as_ref();
    fs::write(path_ref, render(spec, codes))
        .with_context(|| format!("writing LUT source {}", path_ref.display()))
}

fn comment_block(spec: &WaveformSpec, width: CodeWidth, length: usize) -> String {
    let mut out = String::new();
    out.push_str("/**\n");
    out.push_str(" *    Sine LUT table\n");
    out.push_str(" *\n");
    out.push_str(" * @note   This table is automatically generated by the\n");
    let _ = writeln!(
        out,
        " *         LUT generator driver version {}",
        env!("CARGO_PKG_VERSION")
    );
    out.push_str(" *\n");
    let _ = writeln!(out, " *     Size of LUT in bytes: {}", width.bytes() * length);
    out.push_str(" *\n");
    out.push_str(" *     Generated sine signal property:\n");
    let _ = writeln!(out, " *       - DC-offset = {} V", spec.dc_offset);
    let _ = writeln!(out, " *       - Amplitude = {} V", spec.amplitude);
    let _ = writeln!(out, " *       - Phase = {} rad", spec.phase);
    out.push_str(" */\n");
    out
}

fn array_decl(width: CodeWidth, length: usize) -> String {
    match width {
        CodeWidth::U8 => format!("const uint8_t gu8_sin_lut[{}] = {{", length),
        CodeWidth::U16 => format!("const uint16_t gu16_sin_lut[{}] = {{", length),
        CodeWidth::U32 => format!("const uint32_t gu32_sin_lut[{}] = {{", length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lutcore::table::generate;

    fn spec(length: usize, resolution_bits: u8) -> WaveformSpec {
        WaveformSpec {
            length,
            amplitude: 1.0,
            dc_offset: 1.0,
            phase: 0.0,
            full_scale_voltage: 2.0,
            resolution_bits,
        }
    }

    #[test]
    fn render_emits_byte_table_for_eight_bits() {
        let spec = spec(4, 8);
        let codes = generate(&spec);
        let source = render(&spec, &codes);
        assert!(source.contains("const uint8_t gu8_sin_lut[4] = {"));
        assert!(source.contains("127, 255, 127, 0 "));
        assert!(source.contains("Size of LUT in bytes: 4"));
        assert!(source.ends_with("\n};\n"));
    }

    #[test]
    fn render_widens_past_eight_bits() {
        let spec = spec(4, 9);
        let source = render(&spec, &generate(&spec));
        assert!(source.contains("const uint16_t gu16_sin_lut[4] = {"));
        assert!(source.contains("Size of LUT in bytes: 8"));
    }

    #[test]
    fn render_uses_words_past_sixteen_bits() {
        let spec = spec(2, 24);
        let source = render(&spec, &generate(&spec));
        assert!(source.contains("const uint32_t gu32_sin_lut[2] = {"));
        assert!(source.contains("Size of LUT in bytes: 8"));
    }

    #[test]
    fn render_wraps_every_sixteen_values() {
        let spec = spec(40, 12);
        let source = render(&spec, &generate(&spec));
        let body = source.split('{').nth(1).unwrap();
        assert_eq!(body.matches("\n    ").count(), 3);
    }

    #[test]
    fn last_value_has_no_trailing_comma() {
        let spec = spec(4, 8);
        let source = render(&spec, &generate(&spec));
        assert!(source.contains("0 \n};\n"));
        assert!(!source.contains("0, \n};"));
    }

    #[test]
    fn comment_records_waveform_properties() {
        let spec = WaveformSpec {
            length: 8,
            amplitude: 0.9,
            dc_offset: 1.0,
            phase: 0.0,
            full_scale_voltage: 2.5,
            resolution_bits: 12,
        };
        let source = render(&spec, &generate(&spec));
        assert!(source.contains("- DC-offset = 1 V"));
        assert!(source.contains("- Amplitude = 0.9 V"));
        assert!(source.contains("- Phase = 0 rad"));
    }

    #[test]
    fn write_source_creates_the_file() {
        let spec = spec(4, 8);
        let codes = generate(&spec);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sin_lut.txt");
        write_source(&path, &spec, &codes).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&spec, &codes));
    }
}
