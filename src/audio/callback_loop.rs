//! The MMAP transfer loop: §4.8's state machine plus the per-tick
//! avail/wait/transfer sequence, generalized from the teacher's
//! `cpal`-callback wiring in [`crate::audio::cpal_device`] down to the
//! driver-agnostic primitives in [`super::device`].

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::DeviceError;

use super::device::{AudioData, Device, DeviceState};

/// Initial resume backoff; doubles on every failed attempt.
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(100);
/// Resume attempts exhausted before a `suspended` device surfaces `timeout`.
pub const MAX_RETRY: u32 = 50;

/// Drives one `Device` through repeated ticks until `running` is cleared.
/// `sleep` is injected so tests can drive resume backoff without actually
/// blocking the thread.
pub struct CallbackLoop {
    buffer_size: usize,
    stopped: bool,
}

impl CallbackLoop {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size,
            stopped: true,
        }
    }

    /// Run ticks until `callback` returns `false` (cooperative cancellation:
    /// "setting running = false ends the loop at the next state check").
    pub fn run<D, F, S>(
        &mut self,
        device: &mut D,
        sleep: &mut S,
        mut callback: F,
        mut running: impl FnMut() -> bool,
    ) -> Result<(), DeviceError>
    where
        D: Device,
        F: FnMut(AudioData<'_>),
        S: FnMut(Duration),
    {
        while running() {
            self.tick(device, sleep, &mut callback)?;
        }
        Ok(())
    }

    /// One iteration of the main loop: state poll, recovery, then the
    /// transfer loop over `buffer_size` frames.
    pub fn tick<D, F, S>(&mut self, device: &mut D, sleep: &mut S, callback: &mut F) -> Result<(), DeviceError>
    where
        D: Device,
        F: FnMut(AudioData<'_>),
        S: FnMut(Duration),
    {
        match device.state() {
            DeviceState::Xrun => {
                self.recover_xrun(device)?;
                return Ok(());
            }
            DeviceState::Suspended => {
                self.resume_with_backoff(device, sleep)?;
            }
            DeviceState::Unexpected => return Err(DeviceError::Unexpected),
            DeviceState::Idle | DeviceState::Running => {}
        }

        let avail = device.avail();
        if avail < 0 {
            self.recover_xrun(device)?;
            return Ok(());
        }

        if (avail as usize) < self.buffer_size {
            if self.stopped {
                device.start()?;
                self.stopped = false;
                return Ok(());
            }
            if device.wait(Duration::from_millis(1000)).is_err() {
                self.recover_xrun(device)?;
                return Ok(());
            }
            return Ok(());
        }

        self.transfer(device, callback)
    }

    fn transfer<D, F>(&mut self, device: &mut D, callback: &mut F) -> Result<(), DeviceError>
    where
        D: Device,
        F: FnMut(AudioData<'_>),
    {
        let ctx = device.prepare_context();
        let byte_rate = ctx.byte_rate();
        let mut to_transfer = self.buffer_size;

        while to_transfer > 0 {
            let areas = device.mmap_begin()?;
            let offset = areas.offset;
            let expected = areas.expected;
            let len = expected * byte_rate;
            debug_assert!(areas.bytes.len() >= len);
            let data = AudioData::new(&mut areas.bytes[..len], ctx.n_channels, ctx.sample_rate, byte_rate);
            callback(data);

            match device.mmap_commit(offset, expected) {
                Ok(committed) if committed >= expected => {
                    to_transfer = to_transfer.saturating_sub(committed);
                }
                Ok(committed) => {
                    // Fewer frames committed than requested: an xrun.
                    to_transfer = to_transfer.saturating_sub(committed);
                    self.recover_xrun(device)?;
                    return Ok(());
                }
                Err(err) => {
                    self.recover_xrun(device)?;
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    fn recover_xrun<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        warn!("xrun recovery");
        device.prepare()?;
        self.stopped = true;
        Ok(())
    }

    fn resume_with_backoff<D, S>(&mut self, device: &mut D, sleep: &mut S) -> Result<(), DeviceError>
    where
        D: Device,
        S: FnMut(Duration),
    {
        let mut backoff = INITIAL_BACKOFF;
        for attempt in 0..MAX_RETRY {
            match device.resume() {
                Ok(true) => {
                    debug!(attempt, "resumed without prepare");
                    return Ok(());
                }
                Ok(false) => {
                    device.prepare()?;
                    debug!(attempt, "resumed, re-prepared");
                    self.stopped = true;
                    return Ok(());
                }
                Err(DeviceError::Suspended) => {
                    sleep(backoff);
                    backoff *= 2;
                }
                Err(other) => return Err(other),
            }
        }
        Err(DeviceError::Timeout(MAX_RETRY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock_device::MockDevice;

    fn noop_sleep(_: Duration) {}

    #[test]
    fn happy_path_transfers_without_recovery() {
        let mut device = MockDevice::new(2, 4);
        device.push_avail(4);
        let mut loop_ = CallbackLoop::new(4);
        let mut sleep = noop_sleep;
        let mut frames_seen = 0usize;
        loop_
            .tick(&mut device, &mut sleep, &mut |data| {
                frames_seen = data.frames();
            })
            .unwrap();
        assert_eq!(frames_seen, 4);
    }

    #[test]
    fn negative_avail_triggers_xrun_recovery() {
        let mut device = MockDevice::new(2, 4);
        device.push_avail(-1);
        let mut loop_ = CallbackLoop::new(4);
        let mut sleep = noop_sleep;
        loop_.tick(&mut device, &mut sleep, &mut |_| {}).unwrap();
        assert_eq!(device.prepare_calls(), 1);
    }

    #[test]
    fn suspend_resumes_before_max_retry() {
        let mut device = MockDevice::new(2, 4);
        device.push_state(DeviceState::Suspended);
        device.push_resume_failure(3);
        device.push_avail(4);
        let mut loop_ = CallbackLoop::new(4);
        let mut sleep_calls = 0usize;
        let mut sleep = |_: Duration| sleep_calls += 1;
        loop_.tick(&mut device, &mut sleep, &mut |_| {}).unwrap();
        assert_eq!(sleep_calls, 3);
    }

    #[test]
    fn failed_wait_recovers_locally_instead_of_propagating() {
        let mut device = MockDevice::new(2, 4);
        device.push_avail(0);
        device.push_wait_failure(1);
        let mut loop_ = CallbackLoop::new(4);
        loop_.stopped = false;
        let mut sleep = noop_sleep;
        loop_
            .tick(&mut device, &mut sleep, &mut |_| {})
            .expect("a failed wait is locally recoverable, not a propagated error");
        assert_eq!(device.prepare_calls(), 1);
    }

    #[test]
    fn suspend_past_max_retry_times_out() {
        let mut device = MockDevice::new(2, 4);
        device.push_state(DeviceState::Suspended);
        device.push_resume_failure(MAX_RETRY + 10);
        let mut loop_ = CallbackLoop::new(4);
        let mut sleep = noop_sleep;
        let err = loop_.tick(&mut device, &mut sleep, &mut |_| {}).unwrap_err();
        assert!(matches!(err, DeviceError::Timeout(MAX_RETRY)));
    }
}
