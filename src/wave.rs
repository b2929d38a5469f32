//! Simple sine oscillator, used as the driving test node for the graph
//! scheduler and the STFT engine's test vectors.

use crate::sample::Sample;

/// A sine wave generator with persistent phase state.
#[derive(Debug, Clone, Copy)]
pub struct Wave<T: Sample> {
    freq: T,
    amp: T,
    sample_rate: T,
    phase: T,
    increment: T,
}

impl<T: Sample> Wave<T> {
    pub fn new(freq: T, amp: T, sample_rate: T) -> Self {
        let mut wave = Self {
            freq,
            amp,
            sample_rate,
            phase: T::ZERO,
            increment: T::ZERO,
        };
        wave.recompute_increment();
        wave
    }

    fn recompute_increment(&mut self) {
        self.increment = T::TWO * T::PI * self.freq / self.sample_rate;
    }

    pub fn freq(&self) -> T {
        self.freq
    }

    pub fn amp(&self) -> T {
        self.amp
    }

    pub fn sample_rate(&self) -> T {
        self.sample_rate
    }

    pub fn phase(&self) -> T {
        self.phase
    }

    pub fn set_freq(&mut self, freq: T) {
        self.freq = freq;
        self.recompute_increment();
    }

    pub fn set_amp(&mut self, amp: T) {
        self.amp = amp;
    }

    /// Update the sample rate, recomputing the per-sample phase increment.
    pub fn set_sample_rate(&mut self, sample_rate: T) {
        self.sample_rate = sample_rate;
        self.recompute_increment();
    }

    /// Advance by one sample, returning its value, wrapping phase into
    /// `[0, 2*pi)`.
    pub fn tick(&mut self) -> T {
        let value = self.amp * self.phase.sin();
        self.phase = self.phase + self.increment;
        let two_pi = T::TWO * T::PI;
        while self.phase >= two_pi {
            self.phase = self.phase - two_pi;
        }
        while self.phase < T::ZERO {
            self.phase = self.phase + two_pi;
        }
        value
    }

    /// Fill `out` with `out.len()` consecutive samples.
    pub fn fill(&mut self, out: &mut [T]) {
        for slot in out.iter_mut() {
            *slot = self.tick();
        }
    }
}
