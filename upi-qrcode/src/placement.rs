//! Zig-zag placement of the codeword stream into the data area.

use crate::matrix::{Matrix, Module};

/// Cells of the data area in placement order.
///
/// Column pairs are walked from the right edge to the left, skipping the
/// vertical timing column, alternately upwards and downwards. Within a row
/// of a pair the right column comes first.
pub fn placement_order(matrix: &Matrix) -> Vec<(usize, usize)> {
    let size = matrix.size();
    let mut order = Vec::with_capacity(matrix.data_module_count());
    let mut right = size - 1;
    let mut upward = true;
    loop {
        for step in 0..size {
            let row = if upward { size - 1 - step } else { step };
            for col in [right, right - 1] {
                if matrix.is_data_module(row, col) {
                    order.push((row, col));
                }
            }
        }
        upward = !upward;
        if right < 3 {
            break;
        }
        right -= 2;
        if right == 6 {
            right = 5;
        }
    }
    order
}

/// Writes `codewords` bit by bit, most significant first, into every unset
/// cell. Cells left over once the stream runs out are light.
pub fn place_data(matrix: &mut Matrix, codewords: &[u8]) {
    let mut bits = codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 != 0));
    for (row, col) in placement_order(matrix) {
        debug_assert_eq!(matrix.get(row, col), Module::Unset, "cell written twice");
        let bit = bits.next().unwrap_or(false);
        matrix.set(row, col, Module::Data(bit));
    }
    debug_assert!(bits.next().is_none(), "codeword stream longer than the data area");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;
    use std::collections::HashSet;

    #[test]
    fn visits_every_data_cell_once() {
        for v in Version::all() {
            let matrix = Matrix::function_patterns(v);
            let order = placement_order(&matrix);
            let unique: HashSet<_> = order.iter().collect();
            assert_eq!(unique.len(), order.len(), "version {}", v);
            assert_eq!(order.len(), matrix.unset_count(), "version {}", v);
        }
    }

    #[test]
    fn no_unset_cells_after_placement() {
        for v in Version::all() {
            let mut matrix = Matrix::function_patterns(v);
            let before = matrix.unset_count();
            let stream = vec![0xA5; v.total_codewords()];
            place_data(&mut matrix, &stream);
            assert_eq!(matrix.unset_count(), 0);
            assert_eq!(matrix.data_module_count(), before);
        }
    }

    #[test]
    fn starts_bottom_right_going_up() {
        let matrix = Matrix::function_patterns(Version::MIN);
        let order = placement_order(&matrix);
        assert_eq!(&order[..4], &[(20, 20), (20, 19), (19, 20), (19, 19)]);
        // Second pair runs downwards from row 9, below the format strip
        let second = order.iter().position(|&(_, col)| col == 18).unwrap();
        assert_eq!(order[second], (9, 18));
    }

    #[test]
    fn timing_column_is_skipped() {
        let matrix = Matrix::function_patterns(Version::new(2).unwrap());
        let order = placement_order(&matrix);
        assert!(order.iter().all(|&(_, col)| col != 6));
        assert!(order.iter().any(|&(_, col)| col == 0));
    }

    #[test]
    fn first_byte_lands_msb_first() {
        let mut matrix = Matrix::function_patterns(Version::MIN);
        let mut stream = vec![0u8; 26];
        stream[0] = 0b1000_0001;
        place_data(&mut matrix, &stream);
        assert_eq!(matrix.get(20, 20), Module::Data(true));
        assert_eq!(matrix.get(20, 19), Module::Data(false));
        assert_eq!(matrix.get(17, 19), Module::Data(true));
    }
}
