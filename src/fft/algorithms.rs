//! Radix-2 Cooley-Tukey and Bluestein chirp-Z kernels shared by the static
//! and dynamic FFT engines.

use crate::complex::ComplexList;
use crate::error::FftError;
use crate::sample::Sample;

/// Transform direction. Inverse applies a final `1/N` normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

fn cmul<T: Sample>(a: (T, T), b: (T, T)) -> (T, T) {
    (a.0 * b.0 - a.1 * b.1, a.0 * b.1 + a.1 * b.0)
}

/// Reverse the low `bits` bits of `i`.
fn bit_reverse(i: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    i.reverse_bits() >> (usize::BITS - bits)
}

/// Twiddle factor `e^{-i*2*pi*k/n}` (forward) or `e^{+i*2*pi*k/n}` (inverse).
fn twiddle<T: Sample>(k: usize, n: usize, direction: Direction) -> (T, T) {
    let angle = Sample::to_f64(T::TWO) * std::f64::consts::PI * k as f64 / n as f64;
    match direction {
        Direction::Forward => (T::from_f64(angle.cos()), T::from_f64(-angle.sin())),
        Direction::Inverse => (T::from_f64(angle.cos()), T::from_f64(angle.sin())),
    }
}

/// In-place Cooley-Tukey decimation-in-time radix-2 FFT. `data.len()` must
/// be a power of two (lengths 0 and 1 are trivially accepted as no-ops).
pub(crate) fn radix2_in_place<T: Sample>(
    data: &mut ComplexList<T>,
    direction: Direction,
) -> Result<(), FftError> {
    let n = data.len();
    if n == 0 {
        return Ok(());
    }
    if !n.is_power_of_two() {
        return Err(FftError::InvalidInputSize(n));
    }
    let bits = n.trailing_zeros();

    for i in 0..n {
        let j = bit_reverse(i, bits);
        if i < j {
            let a = data.get(i)?;
            let b = data.get(j)?;
            data.set(i, b.0, b.1)?;
            data.set(j, a.0, a.1)?;
        }
    }

    let twiddles: Vec<(T, T)> = (0..n / 2).map(|k| twiddle::<T>(k, n, direction)).collect();

    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let step = n / size;
        let mut start = 0;
        while start < n {
            for k in 0..half {
                let w = twiddles[k * step];
                let x = data.get(start + k)?;
                let y = data.get(start + k + half)?;
                let t = cmul(y, w);
                data.set(start + k, x.0 + t.0, x.1 + t.1)?;
                data.set(start + k + half, x.0 - t.0, x.1 - t.1)?;
            }
            start += size;
        }
        size *= 2;
    }

    if direction == Direction::Inverse {
        data.normalize();
    }
    Ok(())
}

/// Smallest power of two `>= x`. Errors if that would overflow `usize / 2`.
fn next_pow2_at_least(x: usize) -> Result<usize, FftError> {
    if x <= 1 {
        return Ok(1);
    }
    if x > usize::MAX / 2 {
        return Err(FftError::Overflow);
    }
    let mut m = 1usize;
    while m < x {
        m <<= 1;
    }
    Ok(m)
}

/// In-place Bluestein chirp-Z transform for arbitrary-length input.
///
/// Builds `a_i = x_i * e^{sign*i*pi*i^2/n}`, a symmetric conjugate chirp
/// kernel `b`, convolves the two via power-of-two FFTs, and recovers the
/// spectrum by multiplying the convolution result by the same chirp again.
pub(crate) fn bluestein_in_place<T: Sample>(
    data: &mut ComplexList<T>,
    direction: Direction,
) -> Result<(), FftError> {
    let n = data.len();
    if n == 0 {
        return Ok(());
    }
    if n > usize::MAX / 2 {
        return Err(FftError::Overflow);
    }
    let m = next_pow2_at_least(2 * n)?;

    let sign: f64 = match direction {
        Direction::Forward => -1.0,
        Direction::Inverse => 1.0,
    };

    let chirp: Vec<(T, T)> = (0..n)
        .map(|i| {
            let angle = sign * std::f64::consts::PI * (i * i) as f64 / n as f64;
            (T::from_f64(angle.cos()), T::from_f64(angle.sin()))
        })
        .collect();

    let mut a = ComplexList::<T>::new(m);
    for i in 0..n {
        let x = data.get(i)?;
        let v = cmul(x, chirp[i]);
        a.set(i, v.0, v.1)?;
    }

    let mut b = ComplexList::<T>::new(m);
    b.set(0, chirp[0].0, -chirp[0].1)?;
    for i in 1..n {
        let conj = (chirp[i].0, -chirp[i].1);
        b.set(i, conj.0, conj.1)?;
        b.set(m - i, conj.0, conj.1)?;
    }

    radix2_in_place(&mut a, Direction::Forward)?;
    radix2_in_place(&mut b, Direction::Forward)?;
    for i in 0..m {
        let v = cmul(a.get(i)?, b.get(i)?);
        a.set(i, v.0, v.1)?;
    }
    radix2_in_place(&mut a, Direction::Inverse)?;

    for k in 0..n {
        let v = cmul(chirp[k], a.get(k)?);
        data.set(k, v.0, v.1)?;
    }

    if direction == Direction::Inverse {
        data.normalize();
    }
    Ok(())
}
