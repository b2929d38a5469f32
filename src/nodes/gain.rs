//! Gain node: out = input * gain. A simplified multiplication node, the
//! minimal effect needed to validate scheduler wiring end to end.

use crate::node::{Node, NodeStatus, PrepareContext, ProcessContext};

/// Scales its single input by a fixed gain.
pub struct GainNode {
    gain: f32,
}

impl GainNode {
    pub fn new(gain: f32) -> Self {
        Self { gain }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }
}

impl Node for GainNode {
    fn prepare(&mut self, _ctx: &PrepareContext) {}

    fn process(&mut self, ctx: &mut ProcessContext<'_>) {
        let n_channels = ctx.output.n_channels();
        let block_size = ctx.output.block_size();
        for c in 0..n_channels {
            for f in 0..block_size {
                let value = ctx.output.read_sample(c, f) * self.gain;
                ctx.output.write_sample(c, f, value);
            }
        }
        ctx.status.store(NodeStatus::Processed);
    }

    fn name(&self) -> &str {
        "GainNode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel_view::{AccessPattern, ChannelView};
    use crate::node::AtomicNodeStatus;

    #[test]
    fn multiplies_input_by_gain() {
        let mut output = ChannelView::<f32>::new(1, 4, AccessPattern::Interleaved);
        for f in 0..4 {
            output.write_sample(0, f, (f + 1) as f32);
        }

        let status = AtomicNodeStatus::default();
        let mut node = GainNode::new(0.5);
        {
            let mut ctx = ProcessContext {
                output: output.as_unmanaged(),
                status: &status,
            };
            node.process(&mut ctx);
        }
        for f in 0..4 {
            assert_eq!(output.read_sample(0, f), (f + 1) as f32 * 0.5);
        }
        assert_eq!(status.load(), NodeStatus::Processed);
    }

    #[test]
    fn zero_gain_silences() {
        let mut output = ChannelView::<f32>::new(1, 4, AccessPattern::Interleaved);
        for f in 0..4 {
            output.write_sample(0, f, 1.0);
        }

        let status = AtomicNodeStatus::default();
        let mut node = GainNode::new(0.0);
        {
            let mut ctx = ProcessContext {
                output: output.as_unmanaged(),
                status: &status,
            };
            node.process(&mut ctx);
        }
        for f in 0..4 {
            assert_eq!(output.read_sample(0, f), 0.0);
        }
    }
}
