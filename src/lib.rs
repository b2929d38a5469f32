//! # Aurora Engine
//!
//! A real-time-safe block DSP engine: an FFT kernel (static and dynamic,
//! radix-2 and Bluestein), a windowed short-time transform, a topologically
//! scheduled audio node graph with static buffer-reuse planning, and an
//! xrun-recovering MMAP audio callback loop.
//!
//! ## Layout
//!
//! - [`complex`] / [`complex_matrix`] — interleaved complex containers.
//! - [`fft`] — [`fft::StaticFft`] and [`fft::DynamicFft`] (radix-2 +
//!   Bluestein), plus [`fft::algorithms`] for the shared butterfly/chirp
//!   machinery.
//! - [`stft`] — windowed, hopped block-FFT into a frequency × time matrix.
//! - [`wave`] — the sine source used to validate the graph end to end.
//! - [`channel_view`] — channel/frame-addressed buffer views and the
//!   [`channel_view::UniformChannelViews`] arena the scheduler allocates
//!   from.
//! - [`node`] / [`nodes`] — the erased [`node::Node`] trait and its two
//!   built-in implementations.
//! - [`graph`] — the mutable DAG builder and its Kahn's-algorithm
//!   topological sort.
//! - [`buffer_planner`] — greedy reference-counted buffer-index assignment
//!   over a sorted queue.
//! - [`scheduler`] — binds a graph to a buffer arena and drives process
//!   ticks.
//! - [`audio`] — the driver-agnostic [`audio::Device`] trait, the MMAP
//!   [`audio::CallbackLoop`], and the sample formats at the write boundary.
//! - [`config`] — host configuration (sample rate, block size, format).
//! - [`error`] — the error taxonomy each subsystem raises, composing into
//!   [`error::EngineError`].
//!
//! ## Example: sine through gain, one tick
//!
//! ```
//! use aurora_engine::channel_view::AccessPattern;
//! use aurora_engine::node::PrepareContext;
//! use aurora_engine::scheduler::{build_sine_gain_demo, Scheduler};
//!
//! let mut scheduler = Scheduler::new();
//! build_sine_gain_demo(&mut scheduler, 540.0, 0.01);
//! scheduler
//!     .prepare(PrepareContext {
//!         n_channels: 2,
//!         block_size: 256,
//!         sample_rate: 44100.0,
//!         access_pattern: AccessPattern::Interleaved,
//!     })
//!     .unwrap();
//! scheduler.process().unwrap();
//! let output = scheduler.get_output_buffer().unwrap();
//! assert!(output.read_sample(0, 0).abs() <= 0.01 + 1e-6);
//! ```

pub mod audio;
pub mod buffer_planner;
pub mod channel_view;
pub mod complex;
pub mod complex_matrix;
pub mod config;
pub mod error;
pub mod fft;
pub mod graph;
pub mod node;
pub mod nodes;
pub mod sample;
pub mod scheduler;
pub mod stft;
pub mod wave;
