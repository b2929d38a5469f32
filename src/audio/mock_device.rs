//! A scriptable [`Device`] for exercising xrun/suspend recovery
//! deterministically, without a real sound card — the audio-thread
//! counterpart of the graph module's `MockNode` test doubles.

use std::collections::VecDeque;

use crate::error::DeviceError;

use super::device::{Device, DevicePrepareContext, MmapAreas};
use super::device::DeviceState;
use super::sample_format::SampleFormat;

pub struct MockDevice {
    channels: usize,
    block_size: usize,
    buffer: Vec<u8>,
    state_queue: VecDeque<DeviceState>,
    avail_queue: VecDeque<i64>,
    resume_failures_remaining: u32,
    wait_failures_remaining: u32,
    prepare_calls: usize,
    start_calls: usize,
}

impl MockDevice {
    pub fn new(channels: usize, block_size: usize) -> Self {
        let byte_rate = SampleFormat::F32 { big_endian: false }.byte_rate();
        Self {
            channels,
            block_size,
            buffer: vec![0u8; channels * block_size * byte_rate],
            state_queue: VecDeque::new(),
            avail_queue: VecDeque::new(),
            resume_failures_remaining: 0,
            wait_failures_remaining: 0,
            prepare_calls: 0,
            start_calls: 0,
        }
    }

    pub fn push_state(&mut self, state: DeviceState) {
        self.state_queue.push_back(state);
    }

    pub fn push_avail(&mut self, avail: i64) {
        self.avail_queue.push_back(avail);
    }

    /// Make the next `n` calls to `resume()` fail with `Suspended`; the call
    /// after that succeeds.
    pub fn push_resume_failure(&mut self, n: u32) {
        self.resume_failures_remaining = n;
    }

    /// Make the next `n` calls to `wait()` fail with `Xrun`.
    pub fn push_wait_failure(&mut self, n: u32) {
        self.wait_failures_remaining = n;
    }

    pub fn prepare_calls(&self) -> usize {
        self.prepare_calls
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls
    }
}

impl Device for MockDevice {
    fn prepare_context(&self) -> DevicePrepareContext {
        DevicePrepareContext {
            n_channels: self.channels,
            block_size: self.block_size,
            sample_rate: 44100,
            format: SampleFormat::F32 { big_endian: false },
        }
    }

    fn state(&mut self) -> DeviceState {
        self.state_queue.pop_front().unwrap_or(DeviceState::Running)
    }

    fn avail(&mut self) -> i64 {
        self.avail_queue.pop_front().unwrap_or(self.block_size as i64)
    }

    fn wait(&mut self, _timeout: std::time::Duration) -> Result<(), DeviceError> {
        if self.wait_failures_remaining > 0 {
            self.wait_failures_remaining -= 1;
            Err(DeviceError::Xrun)
        } else {
            Ok(())
        }
    }

    fn start(&mut self) -> Result<(), DeviceError> {
        self.start_calls += 1;
        Ok(())
    }

    fn prepare(&mut self) -> Result<(), DeviceError> {
        self.prepare_calls += 1;
        Ok(())
    }

    fn resume(&mut self) -> Result<bool, DeviceError> {
        if self.resume_failures_remaining > 0 {
            self.resume_failures_remaining -= 1;
            Err(DeviceError::Suspended)
        } else {
            Ok(true)
        }
    }

    fn mmap_begin(&mut self) -> Result<MmapAreas<'_>, DeviceError> {
        Ok(MmapAreas {
            bytes: &mut self.buffer,
            offset: 0,
            expected: self.block_size,
        })
    }

    fn mmap_commit(&mut self, _offset: usize, expected: usize) -> Result<usize, DeviceError> {
        Ok(expected)
    }

    fn close(&mut self) {}
}
