//! Arbitrary-length FFT engine, dispatching to radix-2 for power-of-two
//! lengths and to Bluestein's chirp-Z algorithm otherwise.

use crate::complex::ComplexList;
use crate::error::FftError;
use crate::sample::Sample;

use super::algorithms::{bluestein_in_place, radix2_in_place, Direction};

/// An FFT engine that accepts any input length, chosen fresh per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct DynamicFft<T: Sample> {
    _marker: std::marker::PhantomData<T>,
}

impl<T: Sample> DynamicFft<T> {
    pub fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }

    /// Transform `data` in place, dispatching on whether `data.len()` is a
    /// power of two.
    pub fn process(&self, data: &mut ComplexList<T>, direction: Direction) -> Result<(), FftError> {
        let n = data.len();
        if n == 0 || n.is_power_of_two() {
            radix2_in_place(data, direction)
        } else {
            bluestein_in_place(data, direction)
        }
    }

    /// Linear convolution of `a` and `b` via forward transform, pointwise
    /// multiply, inverse transform. Output length equals `a.len()`; both
    /// inputs must already be sized (and, for a correct linear — not
    /// circular — convolution, zero-padded) by the caller.
    pub fn convolve(
        &self,
        a: &ComplexList<T>,
        b: &ComplexList<T>,
    ) -> Result<ComplexList<T>, FftError> {
        if a.len() != b.len() {
            return Err(FftError::InvalidInputSize(b.len()));
        }
        let mut fa = a.clone();
        let mut fb = b.clone();
        self.process(&mut fa, Direction::Forward)?;
        self.process(&mut fb, Direction::Forward)?;

        let mut product = ComplexList::<T>::new(a.len());
        for i in 0..a.len() {
            let (are, aim) = fa.get(i)?;
            let (bre, bim) = fb.get(i)?;
            product.set(i, are * bre - aim * bim, are * bim + aim * bre)?;
        }

        self.process(&mut product, Direction::Inverse)?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_to_radix2_for_power_of_two() {
        let engine = DynamicFft::<f64>::new();
        let mut data = ComplexList::<f64>::from_reals(&[1.0, 0.0, -1.0, 0.0]);
        engine.process(&mut data, Direction::Forward).unwrap();
        let (re, im) = data.get(0).unwrap();
        assert!((re - 0.0).abs() < 1e-9);
        assert!((im - 0.0).abs() < 1e-9);
    }

    #[test]
    fn dispatches_to_bluestein_for_non_power_of_two() {
        let engine = DynamicFft::<f64>::new();
        let input: Vec<f64> = (0..7).map(|i| i as f64).collect();
        let mut data = ComplexList::<f64>::from_reals(&input);
        let original = data.clone();
        engine.process(&mut data, Direction::Forward).unwrap();
        engine.process(&mut data, Direction::Inverse).unwrap();
        for i in 0..7 {
            let (re, _) = data.get(i).unwrap();
            let (ore, _) = original.get(i).unwrap();
            assert!((re - ore).abs() < 1e-6);
        }
    }

    #[test]
    fn convolve_matches_known_vector() {
        let engine = DynamicFft::<f64>::new();
        let a = ComplexList::<f64>::from_reals(&[1.0, 0.75, 0.5, 0.25, 0.0, -0.25, -0.5, -0.75]);
        let b = ComplexList::<f64>::from_reals(&[0.5, -0.5, 0.25, -0.25, 0.0, 0.75, -0.75, 1.0]);
        let result = engine.convolve(&a, &b).unwrap();
        let expected = [1.375, 0.125, 0.375, -0.375, -0.625, 0.625, -1.125, 0.625];
        for i in 0..8 {
            let (re, _) = result.get(i).unwrap();
            assert!(
                (re - expected[i]).abs() < 1e-6,
                "index {i}: got {re}, want {}",
                expected[i]
            );
        }
    }
}
