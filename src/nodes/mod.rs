//! Concrete [`crate::node::Node`] implementations.
//!
//! - [`sine::SineNode`] — fixed-frequency sine source.
//! - [`gain::GainNode`] — single-input amplitude scale.
//!
//! This is deliberately small: the spec scopes the built-in node library to
//! what's needed to validate the graph, not a general DSP effects library.

pub mod gain;
pub mod sine;

pub use gain::GainNode;
pub use sine::SineNode;
