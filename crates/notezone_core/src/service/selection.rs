//! Selection continuity across re-scans.
//!
//! # Responsibility
//! - Re-locate a previously selected node in a freshly scanned tree by id.
//!
//! # Invariants
//! - Matching is by canonical id only, never by object identity or path.
//! - A match returns the fresh node; stale snapshots are never reused.
//! - A renamed folder never matches its old id (folder id is its path).

use crate::model::node::Node;

/// Depth-first, pre-order search for `id` across the whole tree.
pub fn find_node_by_id<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node_by_id(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// Returns the fresh node matching `previous_id`, or `None` to clear selection.
pub fn reconcile_selection(tree: &[Node], previous_id: Option<&str>) -> Option<Node> {
    previous_id.and_then(|id| find_node_by_id(tree, id).cloned())
}

/// Visits every node in depth-first pre-order.
pub fn flatten(nodes: &[Node]) -> Vec<&Node> {
    let mut out = Vec::new();
    let mut stack: Vec<&Node> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children().iter().rev());
    }
    out
}
