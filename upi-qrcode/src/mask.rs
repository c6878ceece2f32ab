//! Mask pattern 0 and the format and version information words.
//!
//! Only mask 0, `(row + col) % 2 == 0`, is ever applied. Readers accept any
//! of the eight masks, the penalty-based choice between them is skipped.

use crate::matrix::{format_positions, version_info_positions, Matrix, Module};
use crate::version::Version;

/// Format word for error correction level M with mask 0, BCH protected and
/// XORed with `0x5412`. Level M is `00` and mask 0 is `000`, so every data
/// and remainder bit is zero and only the XOR pattern remains.
pub const FORMAT_M_MASK0: u16 = 0b101_0100_0001_0010;

/// Inverts every data module where `(row + col)` is even.
///
/// Function modules, including the reserved format and version cells, are
/// left untouched.
pub fn apply_mask(matrix: &mut Matrix) {
    let size = matrix.size();
    for row in 0..size {
        for col in 0..size {
            if !matrix.is_data_module(row, col) || (row + col) % 2 != 0 {
                continue;
            }
            if let Module::Data(bit) = matrix.get(row, col) {
                matrix.set(row, col, Module::Data(!bit));
            }
        }
    }
}

/// Writes [FORMAT_M_MASK0] into both format strips.
pub fn write_format(matrix: &mut Matrix) {
    for (i, pair) in format_positions(matrix.size()).iter().enumerate() {
        let bit = (FORMAT_M_MASK0 >> i) & 1 != 0;
        for &(row, col) in pair {
            matrix.set(row, col, Module::Format(bit));
        }
    }
}

/// 18-bit version word: the version number followed by its BCH(18, 6)
/// remainder over the generator `0x1F25`.
pub fn version_word(version: Version) -> u32 {
    let v = version.value() as u32;
    let mut rem = v;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
    }
    (v << 12) | rem
}

/// Writes the version word into both 6x3 blocks. Does nothing below version 7.
pub fn write_version_info(matrix: &mut Matrix) {
    if matrix.version().value() < 7 {
        return;
    }
    let word = version_word(matrix.version());
    for (i, pair) in version_info_positions(matrix.size()).iter().enumerate() {
        let bit = (word >> i) & 1 != 0;
        for &(row, col) in pair {
            matrix.set(row, col, Module::VersionInfo(bit));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::place_data;

    /// Same BCH(15, 5) computation readers use to validate the format word.
    fn format_word(data: u16) -> u16 {
        let mut rem = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ ((rem >> 9) * 0x537);
        }
        ((data << 10) | rem) ^ 0x5412
    }

    #[test]
    fn format_constant_matches_bch() {
        assert_eq!(format_word(0), FORMAT_M_MASK0);
        assert_eq!(FORMAT_M_MASK0, 0x5412);
    }

    #[test]
    fn known_version_words() {
        assert_eq!(version_word(Version::new(7).unwrap()), 0x07C94);
        assert_eq!(version_word(Version::new(8).unwrap()), 0x085BC);
        assert_eq!(version_word(Version::new(10).unwrap()), 0x0A4D3);
    }

    #[test]
    fn mask_only_touches_data() {
        for v in Version::all() {
            let mut matrix = Matrix::function_patterns(v);
            place_data(&mut matrix, &vec![0x3C; v.total_codewords()]);
            let before = matrix.clone();
            apply_mask(&mut matrix);
            let size = matrix.size();
            for row in 0..size {
                for col in 0..size {
                    let (old, new) = (before.get(row, col), matrix.get(row, col));
                    if old.is_function() {
                        assert_eq!(old, new, "function cell ({}, {}) changed", row, col);
                    } else {
                        assert_eq!(old.is_dark() != new.is_dark(), (row + col) % 2 == 0);
                    }
                }
            }
        }
    }

    #[test]
    fn format_bits_in_both_copies() {
        let mut matrix = Matrix::function_patterns(Version::MIN);
        write_format(&mut matrix);
        // 101010000010010, bit 14 first
        let top_left_row: Vec<bool> = [0, 1, 2, 3, 4, 5, 7]
            .iter()
            .map(|&col| matrix.get(8, col).is_dark())
            .collect();
        assert_eq!(
            top_left_row,
            vec![true, false, true, false, true, false, false]
        );
        let bottom_left: Vec<bool> = (14..21).map(|row| matrix.get(row, 8).is_dark()).collect();
        assert_eq!(
            bottom_left,
            vec![false, false, true, false, true, false, true]
        );
        for (i, pair) in format_positions(21).iter().enumerate() {
            let [a, b] = *pair;
            assert_eq!(matrix.get(a.0, a.1), matrix.get(b.0, b.1), "format bit {}", i);
        }
    }

    #[test]
    fn version_info_written_from_7() {
        let mut small = Matrix::function_patterns(Version::new(6).unwrap());
        let untouched = small.clone();
        write_version_info(&mut small);
        assert_eq!(small, untouched);

        let mut matrix = Matrix::function_patterns(Version::new(7).unwrap());
        write_version_info(&mut matrix);
        let size = matrix.size();
        // Bit 0 of 0x07C94 is 0, bit 2 is 1
        assert_eq!(matrix.get(0, size - 11), Module::VersionInfo(false));
        assert_eq!(matrix.get(0, size - 9), Module::VersionInfo(true));
        assert_eq!(matrix.get(size - 9, 0), Module::VersionInfo(true));
    }
}
