//! Binds a [`Graph`] to prepared buffer views and drives one process tick
//! per call, generalized from the teacher's buffer-manager/block-processor
//! pair into the spec's single lifecycle object.

use tracing::{debug, trace};

use crate::buffer_planner;
use crate::channel_view::{AccessPattern, UniformChannelViews, UnmanagedChannelViewRef};
use crate::error::SchedulerError;
use crate::graph::{Graph, TopologyQueue};
use crate::node::{AtomicNodeStatus, NodeId, NodeStatus, PrepareContext, ProcessContext};

/// Owns the graph, the topology plan, and the buffer arena; drives ticks.
/// Each queue slot's `AtomicNodeStatus` is the same atomic a node's own
/// `ProcessContext` writes through during `process` — the scheduler reads
/// it back rather than tracking completion in a second, separate place.
pub struct Scheduler {
    graph: Graph,
    queue: Option<TopologyQueue>,
    arena: Option<UniformChannelViews<f32>>,
    statuses: Vec<AtomicNodeStatus>,
    prepare_ctx: Option<PrepareContext>,
}

impl Scheduler {
    /// `init(allocator)` in the spec's lifecycle — here just an empty
    /// scheduler, since Rust's global allocator plays that role.
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            queue: None,
            arena: None,
            statuses: Vec::new(),
            prepare_ctx: None,
        }
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Prepare every node, compute the topological order, run the buffer
    /// planner, and (re)allocate the arena only if its current view count
    /// is insufficient.
    pub fn prepare(&mut self, ctx: PrepareContext) -> Result<(), SchedulerError> {
        for id in 0..self.graph.node_count() {
            if let Some(node) = self.graph.node_mut(id) {
                node.prepare(&ctx);
            }
        }

        let mut queue = self.graph.topological_sort()?;
        let n_buffers = buffer_planner::plan(&mut queue);
        debug!(n_buffers, n_nodes = queue.len(), "scheduler prepared");

        match &mut self.arena {
            Some(arena) if arena.n_views() >= n_buffers => {}
            _ => {
                self.arena = Some(UniformChannelViews::new(
                    n_buffers,
                    ctx.n_channels,
                    ctx.block_size,
                    ctx.access_pattern,
                ));
            }
        }

        self.statuses = (0..queue.len())
            .map(|_| AtomicNodeStatus::new(NodeStatus::Ready))
            .collect();
        self.queue = Some(queue);
        self.prepare_ctx = Some(ctx);
        Ok(())
    }

    /// Run one tick: every node whose predecessors are all `Processed` runs
    /// once its inputs are copied into place; iterate until every node has
    /// processed (acyclicity guarantees termination).
    pub fn process(&mut self) -> Result<(), SchedulerError> {
        let queue = self.queue.as_ref().ok_or(SchedulerError::NotPrepared)?;
        let arena = self.arena.as_mut().ok_or(SchedulerError::NotPrepared)?;
        let n = queue.len();

        let mut remaining = n;
        while remaining > 0 {
            let mut made_progress = false;
            for i in 0..n {
                if self.statuses[i].load() == NodeStatus::Processed {
                    continue;
                }
                let node = &queue.nodes()[i];
                let ready = node.inputs.iter().all(|&pred| {
                    queue
                        .queue_index_of(pred)
                        .map(|qi| self.statuses[qi].load() == NodeStatus::Processed)
                        .unwrap_or(true)
                });
                if !ready {
                    continue;
                }

                let own_buffer = node.buffer_index.expect("buffer planned before process");
                for &pred in &node.inputs {
                    let Some(pred_qi) = queue.queue_index_of(pred) else {
                        continue;
                    };
                    let pred_buffer = queue.nodes()[pred_qi]
                        .buffer_index
                        .expect("buffer planned before process");
                    if pred_buffer != own_buffer {
                        copy_and_zero_source(arena, pred_buffer, own_buffer);
                    }
                }

                let graph_index = node.graph_index;
                // Every predecessor's data now lives in own_buffer: either it
                // was already colocated there (buffer reuse handed this node
                // its predecessor's slot) or the copy above just moved it. The
                // node reads and writes through that single view in place,
                // and stores Processed into its own status itself.
                {
                    let mut process_ctx = ProcessContext {
                        output: arena.get_view_mut(own_buffer),
                        status: &self.statuses[i],
                    };
                    let node_ref = self
                        .graph
                        .node_mut(graph_index)
                        .expect("graph_index valid by construction");
                    node_ref.process(&mut process_ctx);
                }

                debug_assert_eq!(
                    self.statuses[i].load(),
                    NodeStatus::Processed,
                    "node did not set ctx.status to Processed"
                );
                made_progress = true;
                remaining -= 1;
                trace!(graph_index, "node processed");
            }
            if !made_progress {
                unreachable!("acyclic graph guarantees progress every pass");
            }
        }
        Ok(())
    }

    /// The view assigned to the last queue entry, i.e. the tick's final
    /// output. Also resets every node's status to `Ready` for the next
    /// tick.
    pub fn get_output_buffer(&mut self) -> Result<UnmanagedChannelViewRef<'_, f32>, SchedulerError> {
        let queue = self.queue.as_ref().ok_or(SchedulerError::NotPrepared)?;
        let last = queue
            .nodes()
            .last()
            .ok_or(SchedulerError::NotPrepared)?
            .buffer_index
            .expect("buffer planned before output is read");
        for status in self.statuses.iter() {
            status.store(NodeStatus::Ready);
        }
        let arena = self.arena.as_ref().ok_or(SchedulerError::NotPrepared)?;
        Ok(arena.get_view(last))
    }

    pub fn deinit(&mut self) {
        self.graph = Graph::new();
        self.queue = None;
        self.arena = None;
        self.statuses.clear();
        self.prepare_ctx = None;
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy `src_buffer`'s contents into `dst_buffer`, then zero `src_buffer` so
/// it can be safely reused by a later node in the plan. This is the
/// retained (not inferred) `copyFrom` behavior: the source is zeroed after
/// every cross-buffer copy.
fn copy_and_zero_source(arena: &mut UniformChannelViews<f32>, src_buffer: usize, dst_buffer: usize) {
    let n_channels = arena.n_channels();
    let block_size = arena.block_size();
    for c in 0..n_channels {
        for f in 0..block_size {
            let value = arena.get_view(src_buffer).read_sample(c, f);
            arena.get_view_mut(dst_buffer).write_sample(c, f, value);
        }
    }
    arena.get_view_mut(src_buffer).clear();
}

/// Convenience used by the example host and tests to build a
/// sine->gain chain wired for `build_graph(sample_rate)` per the spec's
/// literal scenario.
pub fn build_sine_gain_demo(scheduler: &mut Scheduler, freq: f32, gain: f32) -> (NodeId, NodeId) {
    let sine = scheduler
        .graph_mut()
        .add_node(Box::new(crate::nodes::SineNode::new(freq, 1.0)));
    let gain_node = scheduler
        .graph_mut()
        .add_node(Box::new(crate::nodes::GainNode::new(gain)));
    scheduler
        .graph_mut()
        .connect(sine, gain_node)
        .expect("two freshly added nodes are always valid endpoints");
    (sine, gain_node)
}
