//! Orientation transforms for compensating how modules are mounted.
//!
//! Modules in 4-in-1 boards are often soldered rotated relative to the direction text scrolls
//! in, and some boards put the first chip of the chain on the left instead of the right. Both
//! are corrected here, on the way from the column buffer to the chips.

use itertools::iproduct;

use crate::config::Rotation;

/// An 8x8 bit matrix for one module. `self.0[c][r]` is the LED in column `c`, row `r`, which
/// is bit `r` of digit register `c`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitMatrix(pub [[bool; 8]; 8]);

impl BitMatrix {
    /// All LEDs off.
    pub fn empty() -> Self {
        BitMatrix([[false; 8]; 8])
    }

    /// All LEDs on.
    pub fn full() -> Self {
        BitMatrix([[true; 8]; 8])
    }

    /// Read one LED. Coordinates outside the matrix read as off.
    pub fn get(&self, column: usize, row: usize) -> bool {
        column < 8 && row < 8 && self.0[column][row]
    }

    /// Set one LED. Coordinates outside the matrix are ignored.
    pub fn set(&mut self, column: usize, row: usize, lit: bool) {
        if column < 8 && row < 8 {
            self.0[column][row] = lit;
        }
    }

    /// Flip one LED. Coordinates outside the matrix are ignored.
    pub fn toggle(&mut self, column: usize, row: usize) {
        if column < 8 && row < 8 {
            self.0[column][row] = !self.0[column][row];
        }
    }
}

/// Decode 8 digit register values into a matrix.
pub fn columns_to_matrix(columns: &[u8; 8]) -> BitMatrix {
    let mut matrix = BitMatrix::empty();
    for (c, &column) in columns.iter().enumerate() {
        let mut rest = column;
        for r in (0..8).rev() {
            if rest == 0 {
                break;
            }
            if rest & (1 << r) != 0 {
                rest &= !(1 << r);
                matrix.0[c][r] = true;
            }
        }
    }
    matrix
}

/// Encode a matrix back into 8 digit register values.
pub fn matrix_to_columns(matrix: &BitMatrix) -> [u8; 8] {
    let mut columns = [0u8; 8];
    for (c, r) in iproduct!(0..8usize, 0..8usize) {
        if matrix.0[c][r] {
            columns[c] |= 1 << r;
        }
    }
    columns
}

/// Rotate a matrix by a quarter turn, half turn, or not at all. Each of the four concentric
/// rings is rotated by cycling four cells at a time.
pub fn rotate(matrix: &BitMatrix, rotation: Rotation) -> BitMatrix {
    let mut m = matrix.0;
    if rotation == Rotation::None {
        return BitMatrix(m);
    }
    for i in 0..4 {
        for j in i..7 - i {
            let tmp = m[i][j];
            match rotation {
                Rotation::Clockwise => {
                    m[i][j] = m[j][7 - i];
                    m[j][7 - i] = m[7 - i][7 - j];
                    m[7 - i][7 - j] = m[7 - j][i];
                    m[7 - j][i] = tmp;
                }
                Rotation::CounterClockwise => {
                    m[i][j] = m[7 - j][i];
                    m[7 - j][i] = m[7 - i][7 - j];
                    m[7 - i][7 - j] = m[j][7 - i];
                    m[j][7 - i] = tmp;
                }
                Rotation::OneEighty => {
                    m[i][j] = m[7 - i][7 - j];
                    m[7 - i][7 - j] = tmp;
                    let tmp = m[j][7 - i];
                    m[j][7 - i] = m[7 - j][i];
                    m[7 - j][i] = tmp;
                }
                Rotation::None => unreachable!(),
            }
        }
    }
    BitMatrix(m)
}

/// Map a logical module position to its position in the chain frame. Positions past the end of
/// the chain are returned unchanged.
pub fn physical_index(logical: usize, num_modules: usize, reversed: bool) -> usize {
    if reversed && logical < num_modules {
        num_modules - 1 - logical
    } else {
        logical
    }
}
