//! The module grid and its function patterns.
//!
//! Coordinates are `(row, col)` with `(0, 0)` at the top-left corner.

use crate::version::Version;

/// State of a single cell of the symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Module {
    /// Not yet assigned, available for data.
    Unset,
    FinderDark,
    /// Light finder ring and the separator around each finder.
    FinderLight,
    TimingDark,
    TimingLight,
    AlignmentDark,
    AlignmentLight,
    /// The single dark cell above the bottom-left finder's separator.
    DarkModule,
    /// Format information, holds its bit once written.
    Format(bool),
    /// Version information (versions 7 and above), holds its bit once written.
    VersionInfo(bool),
    /// Data or error correction bit.
    Data(bool),
}

impl Module {
    pub fn is_dark(self) -> bool {
        match self {
            Module::FinderDark
            | Module::TimingDark
            | Module::AlignmentDark
            | Module::DarkModule => true,
            Module::Format(bit) | Module::VersionInfo(bit) | Module::Data(bit) => bit,
            _ => false,
        }
    }

    /// True for every cell burnt in before data placement.
    pub fn is_function(self) -> bool {
        !matches!(self, Module::Unset | Module::Data(_))
    }
}

/// Square grid of modules for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    version: Version,
    cells: Vec<Module>,
}

impl Matrix {
    fn empty(version: Version) -> Self {
        let size = version.size();
        Matrix {
            size,
            version,
            cells: vec![Module::Unset; size * size],
        }
    }

    /// Grid with every function pattern in place and all other cells unset.
    ///
    /// Built once per symbol: data placement fills the unset cells, and the
    /// mask uses [Matrix::is_data_module] on the result, so the pattern
    /// layout is never recomputed.
    pub fn function_patterns(version: Version) -> Self {
        let mut m = Matrix::empty(version);
        let size = m.size;

        m.draw_finder(0, 0);
        m.draw_finder(0, size - 7);
        m.draw_finder(size - 7, 0);
        m.draw_timing();
        m.draw_alignments();
        m.reserve_format();
        m.set(size - 8, 8, Module::DarkModule);
        if version.value() >= 7 {
            m.reserve_version_info();
        }
        m
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn get(&self, row: usize, col: usize) -> Module {
        self.cells[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, module: Module) {
        self.cells[row * self.size + col] = module;
    }

    /// True when the cell belongs to the data area, whether or not a bit has
    /// been placed in it yet.
    pub fn is_data_module(&self, row: usize, col: usize) -> bool {
        !self.get(row, col).is_function()
    }

    pub fn data_module_count(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_function()).count()
    }

    pub fn unset_count(&self) -> usize {
        self.cells.iter().filter(|&&m| m == Module::Unset).count()
    }

    /// 7x7 finder at `(top, left)` plus its separator, clamped to the grid.
    fn draw_finder(&mut self, top: usize, left: usize) {
        let size = self.size as isize;
        for dy in -1..=7isize {
            for dx in -1..=7isize {
                let row = top as isize + dy;
                let col = left as isize + dx;
                if row < 0 || row >= size || col < 0 || col >= size {
                    continue;
                }
                // Chebyshev distance from the finder center
                let dist = (dy - 3).abs().max((dx - 3).abs());
                let module = if dist == 2 || dist == 4 {
                    Module::FinderLight
                } else {
                    Module::FinderDark
                };
                self.set(row as usize, col as usize, module);
            }
        }
    }

    fn draw_timing(&mut self) {
        for i in 8..self.size - 8 {
            let module = if i % 2 == 0 {
                Module::TimingDark
            } else {
                Module::TimingLight
            };
            self.set(6, i, module);
            self.set(i, 6, module);
        }
    }

    fn draw_alignments(&mut self) {
        let centers = self.version.alignment_centers();
        for &row in centers {
            for &col in centers {
                // Would overlap a finder
                if matches!(self.get(row, col), Module::FinderDark | Module::FinderLight) {
                    continue;
                }
                self.draw_alignment(row, col);
            }
        }
    }

    fn draw_alignment(&mut self, center_row: usize, center_col: usize) {
        for dy in -2..=2isize {
            for dx in -2..=2isize {
                let module = if dy.abs().max(dx.abs()) == 1 {
                    Module::AlignmentLight
                } else {
                    Module::AlignmentDark
                };
                let row = (center_row as isize + dy) as usize;
                let col = (center_col as isize + dx) as usize;
                self.set(row, col, module);
            }
        }
    }

    /// Placeholders for both copies of the format information.
    fn reserve_format(&mut self) {
        for (row, col) in format_positions(self.size)
            .iter()
            .flat_map(|pair| pair.iter().copied())
        {
            self.set(row, col, Module::Format(false));
        }
    }

    fn reserve_version_info(&mut self) {
        for (row, col) in version_info_positions(self.size)
            .iter()
            .flat_map(|pair| pair.iter().copied())
        {
            self.set(row, col, Module::VersionInfo(false));
        }
    }
}

/// Cells holding format bit `i` (bit 0 is the least significant), as the
/// `[copy around the top-left finder, copy split between the other two]`
/// pair.
pub fn format_positions(size: usize) -> [[(usize, usize); 2]; 15] {
    let mut positions = [[(0, 0); 2]; 15];
    for (i, pair) in positions.iter_mut().enumerate() {
        let first = match i {
            0..=5 => (i, 8),
            6 => (7, 8),
            7 => (8, 8),
            8 => (8, 7),
            _ => (8, 14 - i),
        };
        let second = if i < 8 {
            (8, size - 1 - i)
        } else {
            (size - 15 + i, 8)
        };
        *pair = [first, second];
    }
    positions
}

/// Cells holding version bit `i`, for the top-right and bottom-left blocks.
pub fn version_info_positions(size: usize) -> [[(usize, usize); 2]; 18] {
    let mut positions = [[(0, 0); 2]; 18];
    for (i, pair) in positions.iter_mut().enumerate() {
        let a = size - 11 + i % 3;
        let b = i / 3;
        *pair = [(b, a), (a, b)];
    }
    positions
}
