//! Forward/inverse DFT, radix-2 FFT, Bluestein FFT, and convolution.
//!
//! Two variants share the algorithms in this module: [`static_fft::StaticFft`]
//! (a sized-at-construction engine that asserts its length on every call —
//! the nearest stable-Rust approximation to a compile-time-sized engine,
//! per the spec's own fallback note) and [`dynamic::DynamicFft`] (arbitrary
//! length, dispatching to radix-2 for powers of two and Bluestein
//! otherwise).

mod algorithms;
pub mod dynamic;
pub mod static_fft;

pub use algorithms::Direction;
pub use dynamic::DynamicFft;
pub use static_fft::StaticFft;

use crate::complex::{ComplexList, MagnitudeScale};
use crate::error::ComplexError;
use crate::sample::Sample;

/// Allocating variant of [`ComplexList::magnitude`].
pub fn magnitude_alloc<T: Sample>(
    list: &ComplexList<T>,
    scale: MagnitudeScale,
) -> Result<Vec<T>, ComplexError> {
    let mut out = vec![T::ZERO; list.len()];
    list.magnitude(scale, &mut out)?;
    Ok(out)
}

/// Allocating variant of [`ComplexList::phase`].
pub fn phase_alloc<T: Sample>(list: &ComplexList<T>) -> Result<Vec<T>, ComplexError> {
    let mut out = vec![T::ZERO; list.len()];
    list.phase(&mut out)?;
    Ok(out)
}

/// The first `N/2` bin centers `k * sample_rate / N` for an `N`-point
/// transform, i.e. the positive half of the spectrum excluding Nyquist.
pub fn frequency_bins<T: Sample>(n: usize, sample_rate: T) -> Vec<T> {
    (0..n / 2)
        .map(|k| T::from_usize(k) * sample_rate / T::from_usize(n))
        .collect()
}
