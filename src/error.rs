//! Error taxonomy for the CORE: DSP kernel, graph scheduler, and audio
//! callback loop. Each subsystem gets its own enum so a caller can match on
//! the failure mode without unwrapping through an unrelated layer; they
//! compose into [`EngineError`] at the public API boundary.

use thiserror::Error;

/// Errors raised by [`crate::complex::ComplexList`] and
/// [`crate::complex_matrix::ComplexMatrix`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexError {
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("input length {got} is shorter than required axis length {want}")]
    InvalidInputLength { got: usize, want: usize },

    #[error("invalid matrix dimensions: {rows} rows x {cols} cols")]
    InvalidMatrixDimensions { rows: usize, cols: usize },
}

/// Errors raised by the FFT engine (static and dynamic variants).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    #[error("invalid input size {0}")]
    InvalidInputSize(usize),

    #[error("size computation overflowed")]
    Overflow,

    #[error(transparent)]
    Complex(#[from] ComplexError),
}

/// Errors raised by the STFT engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StftError {
    #[error("invalid input size {0}")]
    InvalidInputSize(usize),

    #[error("invalid hop size: hop ({hop}) must be > 0 and <= window ({window})")]
    InvalidHopSize { hop: usize, window: usize },

    #[error(transparent)]
    Fft(#[from] FftError),
}

/// Errors raised while building or sorting a [`crate::graph::Graph`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("node index {0} does not exist")]
    InvalidNode(usize),

    #[error("cycle detected: graph is not a DAG")]
    CycleDetected,

    #[error("graph has {node_count} nodes, exceeding max_static_size {max}")]
    TooManyNodes { node_count: usize, max: usize },
}

/// Errors raised by [`crate::scheduler::Scheduler`].
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("scheduler has not been prepared")]
    NotPrepared,

    #[error("channel view access out of bounds: {0}")]
    InvalidBufferLength(String),
}

/// Errors raised by the audio callback loop and device abstraction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    #[error("device entered an unrecoverable state")]
    Unexpected,

    #[error("device failed to start")]
    DeviceStart,

    #[error("resume timed out after {0} attempts")]
    Timeout(u32),

    #[error("xrun (underrun/overrun) recovered")]
    Xrun,

    #[error("device suspended, resume in progress")]
    Suspended,
}

/// Top-level error for the public API surface.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Complex(#[from] ComplexError),

    #[error(transparent)]
    Fft(#[from] FftError),

    #[error(transparent)]
    Stft(#[from] StftError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Device(#[from] DeviceError),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
