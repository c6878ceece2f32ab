//! Capacity table for versions 1 to 10 at error correction level M, and
//! selection of the smallest version able to hold a byte-mode payload.

use crate::EncodeError;

/// Error correction codewords per block and block groups, as
/// `(ec_per_block, [(block_count, data_codewords_per_block); 2])`.
/// Index 0 is version 1. A zero block count means the group is absent.
const EC_BLOCKS_M: [(usize, [(usize, usize); 2]); 10] = [
    (10, [(1, 16), (0, 0)]),
    (16, [(1, 28), (0, 0)]),
    (26, [(1, 44), (0, 0)]),
    (18, [(2, 32), (0, 0)]),
    (24, [(2, 43), (0, 0)]),
    (16, [(4, 27), (0, 0)]),
    (18, [(4, 31), (0, 0)]),
    (22, [(2, 38), (2, 39)]),
    (22, [(3, 36), (2, 37)]),
    (26, [(4, 43), (1, 44)]),
];

/// Alignment pattern centers, shared by rows and columns.
const ALIGNMENT_CENTERS: [&[usize]; 10] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
];

/// 4-bit mode indicator for byte mode.
pub const BYTE_MODE: u32 = 0b0100;

/// A QR Code version between [Version::MIN] and [Version::MAX].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

/// Layout of one codeword block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    pub data_len: usize,
    pub ec_len: usize,
}

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(10);

    /// Returns `None` outside of the tabulated range.
    pub fn new(number: u8) -> Option<Version> {
        if (Self::MIN.0..=Self::MAX.0).contains(&number) {
            Some(Version(number))
        } else {
            None
        }
    }

    /// Every tabulated version, smallest first.
    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.0..=Self::MAX.0).map(Version)
    }

    /// Smallest version whose data capacity holds `len` bytes in byte mode.
    ///
    /// # Errors
    ///
    /// Returns [EncodeError::PayloadTooLarge] when even version 10 is too small.
    pub fn for_payload(len: usize) -> Result<Version, EncodeError> {
        let version = Self::all()
            .find(|v| v.required_bits(len) <= v.data_codewords() * 8)
            .ok_or(EncodeError::PayloadTooLarge {
                len,
                capacity: Self::MAX.byte_capacity(),
            })?;
        tracing::debug!(
            len,
            version = version.value(),
            blocks = version.blocks().len(),
            "selected QR version"
        );
        Ok(version)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Side length in modules.
    pub fn size(self) -> usize {
        self.0 as usize * 4 + 17
    }

    /// Width of the character count indicator in byte mode.
    pub fn count_bits(self) -> usize {
        if self.0 <= 9 {
            8
        } else {
            16
        }
    }

    fn required_bits(self, len: usize) -> usize {
        4 + self.count_bits() + len * 8
    }

    pub fn ec_per_block(self) -> usize {
        EC_BLOCKS_M[self.index()].0
    }

    /// Blocks in placement order, group 1 first.
    pub fn blocks(self) -> Vec<BlockSpec> {
        let (ec_len, groups) = EC_BLOCKS_M[self.index()];
        groups
            .iter()
            .flat_map(|&(count, data_len)| {
                std::iter::repeat(BlockSpec { data_len, ec_len }).take(count)
            })
            .collect()
    }

    pub fn data_codewords(self) -> usize {
        self.blocks().iter().map(|b| b.data_len).sum()
    }

    pub fn total_codewords(self) -> usize {
        self.blocks().iter().map(|b| b.data_len + b.ec_len).sum()
    }

    /// Largest payload in bytes this version can hold.
    pub fn byte_capacity(self) -> usize {
        (self.data_codewords() * 8 - 4 - self.count_bits()) / 8
    }

    pub fn alignment_centers(self) -> &'static [usize] {
        ALIGNMENT_CENTERS[self.index()]
    }

    fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-M", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Version;
    use crate::EncodeError;

    #[test]
    fn byte_capacities() {
        let capacities: Vec<usize> = Version::all().map(Version::byte_capacity).collect();
        assert_eq!(capacities, vec![14, 26, 42, 62, 84, 106, 122, 152, 180, 213]);
    }

    #[test]
    fn total_codewords() {
        let totals: Vec<usize> = Version::all().map(Version::total_codewords).collect();
        assert_eq!(totals, vec![26, 44, 70, 100, 134, 172, 196, 242, 292, 346]);
    }

    #[test]
    fn total_codewords_fill_the_data_area() {
        // Data modules of a version, minus the 0 or 7 remainder bits
        for v in Version::all() {
            let remainder = if (2..=6).contains(&v.value()) { 7 } else { 0 };
            let matrix = crate::matrix::Matrix::function_patterns(v);
            assert_eq!(
                matrix.data_module_count(),
                v.total_codewords() * 8 + remainder,
                "version {}",
                v
            );
        }
    }

    #[test]
    fn split_groups() {
        let v = Version::new(9).unwrap();
        let data: Vec<usize> = v.blocks().iter().map(|b| b.data_len).collect();
        assert_eq!(data, vec![36, 36, 36, 37, 37]);
        assert!(v.blocks().iter().all(|b| b.ec_len == 22));
    }

    #[test]
    fn smallest_version_selected() {
        assert_eq!(Version::for_payload(0).unwrap().value(), 1);
        assert_eq!(Version::for_payload(14).unwrap().value(), 1);
        assert_eq!(Version::for_payload(15).unwrap().value(), 2);
        assert_eq!(Version::for_payload(180).unwrap().value(), 9);
        assert_eq!(Version::for_payload(181).unwrap().value(), 10);
        assert_eq!(Version::for_payload(213).unwrap().value(), 10);
    }

    #[test]
    fn selection_is_monotonic() {
        let mut previous = Version::MIN;
        for len in 0..=Version::MAX.byte_capacity() {
            let v = Version::for_payload(len).unwrap();
            assert!(v >= previous, "length {} went back to {}", len, v);
            previous = v;
        }
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            Version::for_payload(214),
            Err(EncodeError::PayloadTooLarge {
                len: 214,
                capacity: 213
            })
        );
    }

    #[test]
    fn out_of_range() {
        assert!(Version::new(0).is_none());
        assert!(Version::new(11).is_none());
        assert_eq!(Version::new(10), Some(Version::MAX));
    }
}
