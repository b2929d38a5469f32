//! 2-D row- or column-major container over interleaved complex pairs, used
//! for time x frequency frames (the STFT engine's output).

use crate::complex::ComplexList;
use crate::error::ComplexError;
use crate::sample::Sample;

/// Memory layout of a [`ComplexMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    RowMajor,
    ColumnMajor,
}

/// `rows x cols` complex values, `rows * cols * 2` reals backing them.
#[derive(Debug, Clone)]
pub struct ComplexMatrix<T: Sample> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    orientation: Orientation,
}

impl<T: Sample> ComplexMatrix<T> {
    pub fn new(rows: usize, cols: usize, orientation: Orientation) -> Self {
        Self {
            data: vec![T::ZERO; rows * cols * 2],
            rows,
            cols,
            orientation,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn flat_index(&self, row: usize, col: usize) -> Result<usize, ComplexError> {
        if row >= self.rows || col >= self.cols {
            return Err(ComplexError::InvalidMatrixDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<(T, T), ComplexError> {
        let idx = self.flat_index(row, col)?;
        Ok((self.data[2 * idx], self.data[2 * idx + 1]))
    }

    pub fn set(&mut self, row: usize, col: usize, re: T, im: T) -> Result<(), ComplexError> {
        let idx = self.flat_index(row, col)?;
        self.data[2 * idx] = re;
        self.data[2 * idx + 1] = im;
        Ok(())
    }

    /// Length of the matrix's natural axis (the one `setRowOrColumn`
    /// addresses): the column count when row-major, the row count when
    /// column-major.
    fn axis_len(&self) -> usize {
        match self.orientation {
            Orientation::RowMajor => self.cols,
            Orientation::ColumnMajor => self.rows,
        }
    }

    /// Copy the first `axis_len` elements of `list` into row/column
    /// `axis_index` (row if row-major, column if column-major).
    ///
    /// `list.len() < axis_len` fails; `list.len() > axis_len` is permitted
    /// and the excess is discarded — this carries the FFT's symmetry: the
    /// caller passes the full `N`-length spectrum, only the first half is
    /// stored.
    pub fn set_row_or_column(
        &mut self,
        axis_index: usize,
        list: &ComplexList<T>,
    ) -> Result<(), ComplexError> {
        let axis_len = self.axis_len();
        if list.len() < axis_len {
            return Err(ComplexError::InvalidInputLength {
                got: list.len(),
                want: axis_len,
            });
        }
        for i in 0..axis_len {
            let (re, im) = list.get(i)?;
            match self.orientation {
                Orientation::RowMajor => self.set(axis_index, i, re, im)?,
                Orientation::ColumnMajor => self.set(i, axis_index, re, im)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_round_trip_row_major() {
        let mut m = ComplexMatrix::<f32>::new(2, 3, Orientation::RowMajor);
        m.set(1, 2, 4.0, -4.0).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), (4.0, -4.0));
    }

    #[test]
    fn out_of_bounds() {
        let m = ComplexMatrix::<f32>::new(2, 2, Orientation::RowMajor);
        assert!(m.get(2, 0).is_err());
        assert!(m.get(0, 2).is_err());
    }

    #[test]
    fn set_row_or_column_drops_tail() {
        let mut m = ComplexMatrix::<f64>::new(1, 3, Orientation::RowMajor);
        let list = ComplexList::<f64>::from_reals(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        m.set_row_or_column(0, &list).unwrap();
        assert_eq!(m.get(0, 0).unwrap(), (1.0, 0.0));
        assert_eq!(m.get(0, 1).unwrap(), (2.0, 0.0));
        assert_eq!(m.get(0, 2).unwrap(), (3.0, 0.0));
    }

    #[test]
    fn set_row_or_column_too_short_fails() {
        let mut m = ComplexMatrix::<f64>::new(1, 4, Orientation::RowMajor);
        let list = ComplexList::<f64>::from_reals(&[1.0, 2.0]);
        assert!(m.set_row_or_column(0, &list).is_err());
    }

    #[test]
    fn set_row_or_column_column_major() {
        let mut m = ComplexMatrix::<f64>::new(3, 1, Orientation::ColumnMajor);
        let list = ComplexList::<f64>::from_reals(&[1.0, 2.0, 3.0]);
        m.set_row_or_column(0, &list).unwrap();
        assert_eq!(m.get(0, 0).unwrap(), (1.0, 0.0));
        assert_eq!(m.get(1, 0).unwrap(), (2.0, 0.0));
        assert_eq!(m.get(2, 0).unwrap(), (3.0, 0.0));
    }
}
