use serde::{Deserialize, Serialize};

/// Storage width class for emitted table entries.
///
/// Firmware tables are declared with the narrowest unsigned C type that
/// holds the configured resolution: up to 8 bits in a byte, up to 16 bits
/// in a halfword, anything wider in a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeWidth {
    U8,
    U16,
    U32,
}

impl CodeWidth {
    pub fn from_bits(resolution_bits: u8) -> Self {
        if resolution_bits <= 8 {
            CodeWidth::U8
        } else if resolution_bits <= 16 {
            CodeWidth::U16
        } else {
            CodeWidth::U32
        }
    }

    /// Size of one table entry in bytes.
    pub fn bytes(self) -> usize {
        match self {
            CodeWidth::U8 => 1,
            CodeWidth::U16 => 2,
            CodeWidth::U32 => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_classification_boundaries() {
        assert_eq!(CodeWidth::from_bits(1), CodeWidth::U8);
        assert_eq!(CodeWidth::from_bits(8), CodeWidth::U8);
        assert_eq!(CodeWidth::from_bits(9), CodeWidth::U16);
        assert_eq!(CodeWidth::from_bits(12), CodeWidth::U16);
        assert_eq!(CodeWidth::from_bits(16), CodeWidth::U16);
        assert_eq!(CodeWidth::from_bits(17), CodeWidth::U32);
        assert_eq!(CodeWidth::from_bits(32), CodeWidth::U32);
    }

    #[test]
    fn entry_sizes_match_width() {
        assert_eq!(CodeWidth::U8.bytes(), 1);
        assert_eq!(CodeWidth::U16.bytes(), 2);
        assert_eq!(CodeWidth::U32.bytes(), 4);
    }
}
