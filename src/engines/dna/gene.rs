use super::schema::{GeneSpec, MAX_ENCODABLE};
use serde::Serialize;

/// Letters for base-4 digits 0..=3
pub const ALPHABET: [char; 4] = ['G', 'T', 'A', 'C'];

/// Letters per gene in an uncompressed strand
pub const BLOCK_LEN: usize = 6;

/// One bounded integer parameter.
///
/// The value is always inside `[min, max]`; out-of-range writes are clamped,
/// never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gene {
    name: &'static str,
    value: i32,
    min: i32,
    max: i32,
}

impl Gene {
    pub fn new(name: &'static str, value: i32, min: i32, max: i32) -> Self {
        debug_assert!(min <= max, "gene {name} has min > max");
        let mut gene = Self { name, value: min, min, max };
        gene.set_value(i64::from(value));
        gene
    }

    pub fn from_spec(spec: &GeneSpec) -> Self {
        Self::new(spec.name, spec.default, spec.min, spec.max)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Clamp into range and store. Returns the stored value.
    pub fn set_value(&mut self, value: i64) -> i32 {
        let clamped = value.clamp(i64::from(self.min), i64::from(self.max));
        // in range of i32 after the clamp
        self.value = clamped as i32;
        self.value
    }

    /// Clamp into range, then truncate toward zero. NaN stores the minimum.
    pub fn set_value_f64(&mut self, value: f64) -> i32 {
        if value.is_nan() {
            self.value = self.min;
            return self.value;
        }
        let clamped = value.clamp(f64::from(self.min), f64::from(self.max));
        self.set_value(clamped.trunc() as i64)
    }

    /// This gene's 6-letter block
    pub fn dna_strand(&self) -> String {
        encode_block(self.value)
    }
}

/// Base-4, zero-padded to six digits, digits mapped onto `G T A C`.
pub fn encode_block(value: i32) -> String {
    debug_assert!((0..=MAX_ENCODABLE).contains(&value), "value {value} is not encodable");
    let value = value.clamp(0, MAX_ENCODABLE) as u32;
    (0..BLOCK_LEN)
        .rev()
        .map(|position| ALPHABET[((value >> (2 * position)) & 0b11) as usize])
        .collect()
}

/// Inverse of [`encode_block`]. `None` when the block holds a foreign letter.
pub fn decode_block(block: &str) -> Option<i32> {
    block.chars().try_fold(0i32, |acc, letter| {
        let digit = ALPHABET.iter().position(|&a| a == letter)?;
        Some(acc * 4 + digit as i32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_out_of_range() {
        let mut gene = Gene::new("flag", 0, 0, 1);
        assert_eq!(gene.set_value(5), 1);
        assert_eq!(gene.set_value(-3), 0);
        assert_eq!(gene.value(), 0);
    }

    #[test]
    fn test_constructor_clamps_default() {
        let gene = Gene::new("rate", 50, 2, 20);
        assert_eq!(gene.value(), 20);
    }

    #[test]
    fn test_fractional_values_truncate() {
        let mut gene = Gene::new("angle", 0, 0, 150);
        assert_eq!(gene.set_value_f64(14.9), 14);
        assert_eq!(gene.set_value_f64(200.7), 150);
        assert_eq!(gene.set_value_f64(f64::NAN), 0);

        let mut signed = Gene::new("drift", 0, -10, 10);
        assert_eq!(signed.set_value_f64(-3.7), -3);
    }

    #[test]
    fn test_block_encoding() {
        assert_eq!(encode_block(0), "GGGGGG");
        assert_eq!(encode_block(1), "GGGGGT");
        assert_eq!(encode_block(512), "GAGGGG");
        assert_eq!(encode_block(4095), "CCCCCC");
    }

    #[test]
    fn test_block_decoding() {
        assert_eq!(decode_block("GGGGGT"), Some(1));
        assert_eq!(decode_block("GAGGGG"), Some(512));
        assert_eq!(decode_block("GGGGGX"), None);
    }
}
