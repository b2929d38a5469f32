//! Sine source node — the driving test node for the scheduler and STFT
//! test vectors, wrapping [`crate::wave::Wave`].

use crate::node::{Node, NodeStatus, PrepareContext, ProcessContext};
use crate::wave::Wave;

/// A fixed-frequency sine source, written identically to every channel of
/// its output buffer.
pub struct SineNode {
    wave: Wave<f32>,
}

impl SineNode {
    pub fn new(freq: f32, amp: f32) -> Self {
        Self {
            wave: Wave::new(freq, amp, 44100.0),
        }
    }
}

impl Node for SineNode {
    fn prepare(&mut self, ctx: &PrepareContext) {
        self.wave.set_sample_rate(ctx.sample_rate as f32);
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) {
        let n_channels = ctx.output.n_channels();
        let block_size = ctx.output.block_size();
        for f in 0..block_size {
            let sample = self.wave.tick();
            for c in 0..n_channels {
                ctx.output.write_sample(c, f, sample);
            }
        }
        ctx.status.store(NodeStatus::Processed);
    }

    fn name(&self) -> &str {
        "SineNode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel_view::{AccessPattern, ChannelView};
    use crate::node::AtomicNodeStatus;

    #[test]
    fn writes_same_phase_to_every_channel() {
        let mut node = SineNode::new(440.0, 1.0);
        node.prepare(&PrepareContext {
            n_channels: 2,
            block_size: 8,
            sample_rate: 44100.0,
            access_pattern: AccessPattern::Interleaved,
        });
        let mut buffer = ChannelView::<f32>::new(2, 8, AccessPattern::Interleaved);
        let status = AtomicNodeStatus::default();
        {
            let mut ctx = ProcessContext {
                output: buffer.as_unmanaged(),
                status: &status,
            };
            node.process(&mut ctx);
        }
        for f in 0..8 {
            assert_eq!(buffer.read_sample(0, f), buffer.read_sample(1, f));
        }
        assert_eq!(status.load(), NodeStatus::Processed);
    }
}
