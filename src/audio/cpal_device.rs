//! Cross-platform host adapter for the example binary, grounded directly in
//! the teacher's `AudioEngine`/`build_stream` pair. `cpal` has no raw
//! mmap/avail/wait primitives, so this does **not** implement [`super::device::Device`] —
//! it drives the [`crate::scheduler::Scheduler`] from cpal's own
//! callback instead of going through [`super::callback_loop::CallbackLoop`].

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};

use crate::channel_view::AccessPattern;
use crate::node::PrepareContext;
use crate::scheduler::Scheduler;

pub struct CpalOutput {
    sample_rate: u32,
    channels: usize,
    _stream: cpal::Stream,
}

impl CpalOutput {
    /// Open the default output device and start pulling ticks from
    /// `scheduler`, one `block_size`-frame block per cpal callback.
    pub fn new(scheduler: Arc<Mutex<Scheduler>>, block_size: usize) -> Result<Self, Box<dyn std::error::Error>> {
        let host = cpal::default_host();
        info!("audio host: {:?}", host.id());

        let device = host
            .default_output_device()
            .ok_or("no audio output device found")?;
        info!("audio device: {}", device.name()?);

        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        {
            let mut sched = scheduler.lock().unwrap();
            sched.prepare(PrepareContext {
                n_channels: channels,
                block_size,
                sample_rate: sample_rate as f64,
                access_pattern: AccessPattern::Interleaved,
            })?;
        }

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &config.into(), scheduler, channels, block_size)
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &config.into(), scheduler, channels, block_size)
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &config.into(), scheduler, channels, block_size)
            }
            _ => return Err("unsupported sample format".into()),
        }?;

        stream.play()?;
        info!("audio stream started at {sample_rate} Hz");

        Ok(Self {
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        scheduler: Arc<Mutex<Scheduler>>,
        channels: usize,
        block_size: usize,
    ) -> Result<cpal::Stream, Box<dyn std::error::Error>>
    where
        T: cpal::SizedSample + cpal::FromSample<f32>,
    {
        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let mut sched = scheduler.lock().unwrap();
                if sched.process().is_err() {
                    for sample in data.iter_mut() {
                        *sample = T::from_sample(0.0);
                    }
                    return;
                }
                let Ok(output) = sched.get_output_buffer() else {
                    return;
                };
                for (frame, chunk) in data.chunks_mut(channels).enumerate() {
                    if frame >= block_size {
                        break;
                    }
                    for (c, slot) in chunk.iter_mut().enumerate() {
                        *slot = T::from_sample(output.read_sample(c.min(channels - 1), frame));
                    }
                }
            },
            |err| error!("audio stream error: {err}"),
            None,
        )?;
        Ok(stream)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}
