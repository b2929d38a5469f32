//! Channel/frame-addressed views over a flat buffer, and the uniform arena
//! the scheduler carves buffers from.
//!
//! # Example
//! ```
//! use aurora_engine::channel_view::{AccessPattern, UniformChannelViews};
//!
//! let mut arena = UniformChannelViews::<f32>::new(2, 2, 4, AccessPattern::Interleaved);
//! {
//!     let mut view = arena.get_view_mut(0);
//!     view.write_sample(0, 0, 1.0);
//! }
//! assert_eq!(arena.get_view(0).read_sample(0, 0), 1.0);
//! ```

use crate::sample::Sample;

/// Memory layout a [`ChannelView`] addresses its buffer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPattern {
    Interleaved,
    Planar,
}

fn offset(n_channels: usize, block_size: usize, access: AccessPattern, channel: usize, frame: usize) -> usize {
    match access {
        AccessPattern::Interleaved => frame * n_channels + channel,
        AccessPattern::Planar => {
            let _ = n_channels;
            channel * block_size + frame
        }
    }
}

/// A view over a borrowed buffer slice, shaped by `{n_channels, block_size,
/// access}`. Carries no ownership — a zero-cost handle into an arena.
pub struct UnmanagedChannelView<'a, T: Sample> {
    buffer: &'a mut [T],
    n_channels: usize,
    block_size: usize,
    access: AccessPattern,
}

impl<'a, T: Sample> UnmanagedChannelView<'a, T> {
    pub fn new(buffer: &'a mut [T], n_channels: usize, block_size: usize, access: AccessPattern) -> Self {
        debug_assert_eq!(buffer.len(), n_channels * block_size);
        Self {
            buffer,
            n_channels,
            block_size,
            access,
        }
    }

    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn access(&self) -> AccessPattern {
        self.access
    }

    pub fn read_sample(&self, channel: usize, frame: usize) -> T {
        self.buffer[offset(self.n_channels, self.block_size, self.access, channel, frame)]
    }

    pub fn write_sample(&mut self, channel: usize, frame: usize, value: T) {
        let idx = offset(self.n_channels, self.block_size, self.access, channel, frame);
        self.buffer[idx] = value;
    }

    pub fn as_slice(&self) -> &[T] {
        self.buffer
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buffer
    }

    /// Zero every sample.
    pub fn clear(&mut self) {
        for v in self.buffer.iter_mut() {
            *v = T::ZERO;
        }
    }

    /// Copy `src`'s contents into `self`; both must share shape.
    pub fn copy_from(&mut self, src: &UnmanagedChannelView<'_, T>) {
        debug_assert_eq!(self.buffer.len(), src.buffer.len());
        self.buffer.copy_from_slice(src.buffer);
    }
}

/// Owning variant of [`UnmanagedChannelView`] over a buffer it allocated.
pub struct ChannelView<T: Sample> {
    buffer: Vec<T>,
    n_channels: usize,
    block_size: usize,
    access: AccessPattern,
}

impl<T: Sample> ChannelView<T> {
    pub fn new(n_channels: usize, block_size: usize, access: AccessPattern) -> Self {
        Self {
            buffer: vec![T::ZERO; n_channels * block_size],
            n_channels,
            block_size,
            access,
        }
    }

    pub fn read_sample(&self, channel: usize, frame: usize) -> T {
        self.buffer[offset(self.n_channels, self.block_size, self.access, channel, frame)]
    }

    pub fn write_sample(&mut self, channel: usize, frame: usize, value: T) {
        let idx = offset(self.n_channels, self.block_size, self.access, channel, frame);
        self.buffer[idx] = value;
    }

    pub fn as_unmanaged(&mut self) -> UnmanagedChannelView<'_, T> {
        UnmanagedChannelView::new(&mut self.buffer, self.n_channels, self.block_size, self.access)
    }

    pub fn as_unmanaged_ref(&self) -> UnmanagedChannelViewRef<'_, T> {
        UnmanagedChannelViewRef {
            buffer: &self.buffer,
            n_channels: self.n_channels,
            block_size: self.block_size,
            access: self.access,
        }
    }
}

/// `n_views` equally shaped channel views packed into one allocation.
/// `get_view`/`get_view_mut` return zero-cost unmanaged views into a slice
/// of the shared backing storage.
pub struct UniformChannelViews<T: Sample> {
    buffer: Vec<T>,
    n_channels: usize,
    block_size: usize,
    access: AccessPattern,
    n_views: usize,
}

impl<T: Sample> UniformChannelViews<T> {
    pub fn new(n_views: usize, n_channels: usize, block_size: usize, access: AccessPattern) -> Self {
        Self {
            buffer: vec![T::ZERO; n_views * n_channels * block_size],
            n_channels,
            block_size,
            access,
            n_views,
        }
    }

    pub fn n_views(&self) -> usize {
        self.n_views
    }

    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    fn view_len(&self) -> usize {
        self.n_channels * self.block_size
    }

    /// Grow the arena in place to hold at least `n_views` views, preserving
    /// existing contents in the views that still exist.
    pub fn ensure_views(&mut self, n_views: usize) {
        if n_views <= self.n_views {
            return;
        }
        self.buffer.resize(n_views * self.view_len(), T::ZERO);
        self.n_views = n_views;
    }

    pub fn get_view(&self, index: usize) -> UnmanagedChannelViewRef<'_, T> {
        let len = self.view_len();
        let start = index * len;
        UnmanagedChannelViewRef {
            buffer: &self.buffer[start..start + len],
            n_channels: self.n_channels,
            block_size: self.block_size,
            access: self.access,
        }
    }

    pub fn get_view_mut(&mut self, index: usize) -> UnmanagedChannelView<'_, T> {
        let len = self.view_len();
        let start = index * len;
        UnmanagedChannelView::new(
            &mut self.buffer[start..start + len],
            self.n_channels,
            self.block_size,
            self.access,
        )
    }
}

/// Read-only counterpart of [`UnmanagedChannelView`].
pub struct UnmanagedChannelViewRef<'a, T: Sample> {
    buffer: &'a [T],
    n_channels: usize,
    block_size: usize,
    access: AccessPattern,
}

impl<'a, T: Sample> UnmanagedChannelViewRef<'a, T> {
    pub fn read_sample(&self, channel: usize, frame: usize) -> T {
        self.buffer[offset(self.n_channels, self.block_size, self.access, channel, frame)]
    }

    pub fn as_slice(&self) -> &[T] {
        self.buffer
    }
}
