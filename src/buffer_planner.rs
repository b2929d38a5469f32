//! Greedy reference-counted buffer-index assignment over a [`TopologyQueue`].
//!
//! Assigns each node a `buffer_index` such that a live node never shares its
//! output with a node that still has unread successors, minimizing the
//! total number of physical buffers the scheduler needs to allocate.

use crate::graph::TopologyQueue;

/// Run the planner over `queue`, writing each node's `buffer_index` in
/// place. Returns the total number of physical buffers required.
pub fn plan(queue: &mut TopologyQueue) -> usize {
    let n = queue.len();
    let mut ref_count = vec![0usize; n];
    for i in 0..n {
        for &pred in &queue.nodes()[i].inputs {
            if let Some(qi) = queue.queue_index_of(pred) {
                ref_count[qi] += 1;
            }
        }
    }

    let mut free_list: Vec<usize> = Vec::new();
    let mut next_buffer_idx = 0usize;

    for i in 0..n {
        let inputs = queue.nodes()[i].inputs.clone();
        for pred in inputs {
            if let Some(qi) = queue.queue_index_of(pred) {
                ref_count[qi] -= 1;
                if ref_count[qi] == 0 {
                    if let Some(buf) = queue.nodes()[qi].buffer_index {
                        free_list.push(buf);
                    }
                }
            }
        }

        let assigned = free_list.pop().unwrap_or_else(|| {
            let idx = next_buffer_idx;
            next_buffer_idx += 1;
            idx
        });
        queue.nodes_mut()[i].buffer_index = Some(assigned);
    }

    next_buffer_idx
}
