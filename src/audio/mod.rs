//! Audio I/O: the driver-agnostic [`device::Device`] trait and MMAP
//! [`callback_loop::CallbackLoop`] that drive the scheduler from a hardware
//! callback, plus the sample formats at the write boundary.
//!
//! [`cpal_device::CpalOutput`] is the example-host adapter — it talks to a
//! real sound card via `cpal` but doesn't implement `Device`, since `cpal`
//! has no MMAP/avail/wait primitives to expose.

pub mod callback_loop;
pub mod cpal_device;
pub mod device;
pub mod mock_device;
pub mod sample_format;

pub use callback_loop::CallbackLoop;
pub use device::{AudioData, Device, DevicePrepareContext, DeviceState, MmapAreas};
pub use sample_format::SampleFormat;
