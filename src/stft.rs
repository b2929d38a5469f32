//! Windowed, hopped block-FFT producing a frequency-bin x time-slice matrix.

use crate::complex::ComplexList;
use crate::complex_matrix::{ComplexMatrix, Orientation};
use crate::error::StftError;
use crate::fft::dynamic::DynamicFft;
use crate::fft::Direction;
use crate::sample::Sample;

/// Analysis window applied to each frame before transforming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Hann,
    Blackman,
}

/// Hop stride between successive windows, as a fraction of the window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopSize {
    Sixteenth,
    Eighth,
    Quarter,
    Half,
    ThreeQuarters,
}

impl HopSize {
    fn frames(self, window: usize) -> usize {
        let hop = match self {
            HopSize::Sixteenth => window / 16,
            HopSize::Eighth => window / 8,
            HopSize::Quarter => window / 4,
            HopSize::Half => window / 2,
            HopSize::ThreeQuarters => (window * 3) / 4,
        };
        hop.max(1)
    }
}

fn window_table<T: Sample>(kind: WindowKind, window: usize) -> Vec<T> {
    let w = window as f64;
    (0..window)
        .map(|i| {
            let v = match kind {
                WindowKind::Hann => 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / (w - 1.0)).cos()),
                WindowKind::Blackman => {
                    0.42 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / (w - 1.0)).cos()
                        + 0.08 * (4.0 * std::f64::consts::PI * i as f64 / (w - 1.0)).cos()
                }
            };
            T::from_f64(v)
        })
        .collect()
}

/// Short-time Fourier transform engine for a fixed window size and hop.
pub struct Stft<T: Sample> {
    window_size: usize,
    hop: usize,
    kind: WindowKind,
    normalize: bool,
    window: Vec<T>,
    window_sum: T,
    fft: DynamicFft<T>,
}

impl<T: Sample> Stft<T> {
    pub fn new(window_size: usize, hop_size: HopSize, kind: WindowKind, normalize: bool) -> Self {
        let hop = hop_size.frames(window_size);
        let window = window_table::<T>(kind, window_size);
        let window_sum = window.iter().fold(T::ZERO, |acc, &v| acc + v);
        Self {
            window_size,
            hop,
            kind,
            normalize,
            window,
            window_sum,
            fft: DynamicFft::new(),
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn hop(&self) -> usize {
        self.hop
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    /// Run the transform over `input`, producing a `(window_size/2 + 1) x
    /// n_slices` matrix of positive-frequency bins, row-major.
    pub fn process(&self, input: &[T]) -> Result<ComplexMatrix<T>, StftError> {
        if input.len() < self.window_size {
            return Err(StftError::InvalidInputSize(input.len()));
        }
        if self.hop == 0 || self.hop > self.window_size {
            return Err(StftError::InvalidHopSize {
                hop: self.hop,
                window: self.window_size,
            });
        }

        let n_slices = (input.len() - self.window_size) / self.hop + 1;
        let n_bins = self.window_size / 2 + 1;
        let mut matrix = ComplexMatrix::<T>::new(n_bins, n_slices, Orientation::ColumnMajor);

        for slice in 0..n_slices {
            let start = slice * self.hop;
            let mut windowed = vec![T::ZERO; self.window_size];
            for i in 0..self.window_size {
                let mut v = input[start + i] * self.window[i];
                if self.normalize && self.window_sum != T::ZERO {
                    v = v / self.window_sum;
                }
                windowed[i] = v;
            }
            let mut frame = ComplexList::<T>::from_reals(&windowed);
            self.fft.process(&mut frame, Direction::Forward)?;

            let mut bins = ComplexList::<T>::new(n_bins);
            for k in 0..n_bins {
                let (re, im) = frame.get(k)?;
                bins.set(k, re, im)?;
            }
            matrix.set_row_or_column(slice, &bins)?;
        }

        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_input_shorter_than_window() {
        let stft = Stft::<f64>::new(64, HopSize::Quarter, WindowKind::Hann, false);
        assert!(stft.process(&[0.0; 32]).is_err());
    }

    #[test]
    fn sine_128_window_64_quarter_hop_shape() {
        let sample_rate = 44100.0_f64;
        let freq = 400.0_f64;
        let input: Vec<f64> = (0..128)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate).sin())
            .collect();
        let stft = Stft::<f64>::new(64, HopSize::Quarter, WindowKind::Hann, false);
        let matrix = stft.process(&input).unwrap();
        assert_eq!(matrix.rows(), 33);
        assert_eq!(matrix.cols(), 5);

        let bin_hz = sample_rate / 64.0;
        let expected_bin = (freq / bin_hz).round() as usize;
        for col in 0..matrix.cols() {
            let mut best_bin = 0;
            let mut best_mag = 0.0;
            for row in 0..matrix.rows() {
                let (re, im) = matrix.get(row, col).unwrap();
                let mag = (re * re + im * im).sqrt();
                if mag > best_mag {
                    best_mag = mag;
                    best_bin = row;
                }
            }
            assert!(
                (best_bin as isize - expected_bin as isize).abs() <= 1,
                "col {col}: peak bin {best_bin}, expected near {expected_bin}"
            );
        }
    }
}
