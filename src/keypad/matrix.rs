use crate::hal_ext::pins::{MatrixPin, PinMode};
use super::event::Position;

/// Result of a single sweep of the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scan {
    /// No key closed
    Idle,
    /// Exactly one key closed
    Key(Position),
    /// More than one key closed, readings cannot be trusted
    Ambiguous,
}

/// Keyboard matrix driven row-by-row
///
/// Columns are pull-up inputs. A row is activated by driving it low, so a
/// closed key at the intersection pulls its column low.
///
/// Without diodes a closed key connects two rows when more than one key is
/// pressed, so the inactive rows must not be driven. In that case rows are kept
/// as inputs and switched to output only for the time they are being read.
/// With diodes the rows can stay outputs, held high when inactive.
pub struct Matrix<R, C, const NROWS: usize, const NCOLS: usize> {
    rows: [R; NROWS],
    cols: [C; NCOLS],
    has_diodes: bool,
}

impl<R, C, const NROWS: usize, const NCOLS: usize> Matrix<R, C, NROWS, NCOLS>
where
    R: MatrixPin,
    C: MatrixPin,
{
    // Every position index must fit in u16
    const VALID_SIZE: () = assert!(NROWS * NCOLS <= u16::MAX as usize + 1);

    /// Take ownership of the pins and configure them for scanning
    pub fn new(mut rows: [R; NROWS], mut cols: [C; NCOLS], has_diodes: bool) -> Self {
        let () = Self::VALID_SIZE;

        for row in rows.iter_mut() {
            if has_diodes {
                row.set_mode(PinMode::Output);
                row.write(true);
            } else {
                row.set_mode(PinMode::Input);
            }
        }
        for col in cols.iter_mut() {
            col.set_mode(PinMode::InputPullUp);
        }
        Self { rows, cols, has_diodes }
    }

    /// Sweep all rows and reduce the readings to a single key
    pub fn scan(&mut self) -> Scan {
        let mut key = None;
        let mut ambiguous = false;
        for (i, row) in self.rows.iter_mut().enumerate() {
            if !self.has_diodes {
                row.set_mode(PinMode::Output);
            }
            row.write(false);
            for (j, col) in self.cols.iter().enumerate() {
                if !col.read() {
                    if key.is_some() {
                        ambiguous = true;
                    } else {
                        key = Some(Position::new((i * NCOLS + j) as u16));
                    }
                }
            }
            row.write(true);
            if !self.has_diodes {
                row.set_mode(PinMode::Input);
            }
        }

        match (ambiguous, key) {
            (true, _) => Scan::Ambiguous,
            (false, Some(p)) => Scan::Key(p),
            (false, None) => Scan::Idle,
        }
    }

    pub fn has_diodes(&self) -> bool {
        self.has_diodes
    }

    pub fn rows(&self) -> &[R; NROWS] {
        &self.rows
    }

    pub fn cols(&self) -> &[C; NCOLS] {
        &self.cols
    }

    /// Give up the pins
    pub fn release(self) -> ([R; NROWS], [C; NCOLS]) {
        (self.rows, self.cols)
    }
}
