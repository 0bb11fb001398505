//! NodeArena creation methods.

use std::sync::Arc;

use unawait_common::TextRange;
use unawait_common::limits::MAX_NODE_PREALLOC;

use super::base::NodeIndex;
use super::node::{Node, NodeArena, NodeKind, SourceFileData};

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity.min(MAX_NODE_PREALLOC)),
            source: SourceFileData::default(),
        }
    }

    pub(crate) fn set_source(&mut self, file_name: String, text: Arc<str>) {
        self.source = SourceFileData { file_name, text };
    }

    /// Append a node and adopt its children.
    pub fn add(&mut self, kind: NodeKind, range: TextRange) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            range,
            parent: NodeIndex::NONE,
        });
        for child in self.children(index) {
            if let Some(node) = self.nodes.get_mut(child.0 as usize) {
                node.parent = index;
            }
        }
        index
    }

    /// Drop every node created at or after `len` (speculative parse rollback).
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }
}
