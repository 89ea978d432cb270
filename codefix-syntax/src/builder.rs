use crate::kind::SyntaxKind;
use crate::tree::{Node, NodeId, SyntaxTree};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("finish_node called with no open node")]
    UnbalancedFinish,

    #[error("{open} node(s) still open at finish")]
    UnclosedNodes { open: usize },

    #[error("token at {pos} starts before previous end {previous_end}")]
    TokenOutOfOrder { pos: u32, previous_end: u32 },

    #[error("token at {pos} has trivia width {trivia} past its end {end}")]
    TriviaPastEnd { pos: u32, trivia: u32, end: u32 },

    #[error("{kind} is not a token kind")]
    NotAToken { kind: SyntaxKind },

    #[error("source file ends at {end} but the last token ends at {last_end}")]
    EndBeforeLastToken { end: u32, last_end: u32 },
}

/// A position among the children of the currently open node, for wrapping
/// already-emitted children in a node opened later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    parent: NodeId,
    child_count: usize,
}

/// Assembles a [`SyntaxTree`] from a stream of tokens and node boundaries.
///
/// Node offsets are derived from their children: a node starts where its first
/// child starts (trivia included) and ends where its last child ends. An empty
/// node sits at the end of the previous token.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    open: Vec<NodeId>,
    last_end: u32,
}

impl TreeBuilder {
    /// Opens the [`SyntaxKind::SourceFile`] root.
    pub fn new() -> Self {
        let root = Node {
            kind: SyntaxKind::SourceFile,
            pos: 0,
            end: 0,
            leading_trivia_width: 0,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            open: vec![NodeId(0)],
            last_end: 0,
        }
    }

    pub fn start_node(&mut self, kind: SyntaxKind) -> NodeId {
        let id = self.push(Node {
            kind,
            pos: self.last_end,
            end: self.last_end,
            leading_trivia_width: 0,
            parent: None,
            children: Vec::new(),
        });
        self.open.push(id);
        id
    }

    pub fn checkpoint(&self) -> Checkpoint {
        let parent = self.open.last().copied().unwrap_or(NodeId(0));
        Checkpoint {
            parent,
            child_count: self.nodes[parent.index()].children.len(),
        }
    }

    /// Opens a node that adopts every child emitted since `checkpoint`.
    ///
    /// The checkpoint must belong to the node that is open now; otherwise the
    /// node is opened empty at the current position.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) -> NodeId {
        let current = self.open.last().copied();
        if current != Some(checkpoint.parent)
            || checkpoint.child_count > self.nodes[checkpoint.parent.index()].children.len()
        {
            return self.start_node(kind);
        }
        let adopted = self.nodes[checkpoint.parent.index()]
            .children
            .split_off(checkpoint.child_count);
        let id = self.start_node(kind);
        for child in &adopted {
            self.nodes[child.index()].parent = Some(id);
        }
        self.nodes[id.index()].children = adopted;
        id
    }

    /// Adds a token spanning `[pos, end)` whose first `trivia` bytes are leading trivia.
    pub fn token(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        trivia: u32,
        end: u32,
    ) -> Result<NodeId, TreeError> {
        if !kind.is_token() {
            return Err(TreeError::NotAToken { kind });
        }
        if pos < self.last_end {
            return Err(TreeError::TokenOutOfOrder {
                pos,
                previous_end: self.last_end,
            });
        }
        if pos.checked_add(trivia).is_none_or(|significant| significant > end) {
            return Err(TreeError::TriviaPastEnd { pos, trivia, end });
        }
        let id = self.push(Node {
            kind,
            pos,
            end,
            leading_trivia_width: trivia,
            parent: None,
            children: Vec::new(),
        });
        self.last_end = end;
        Ok(id)
    }

    pub fn finish_node(&mut self) -> Result<NodeId, TreeError> {
        // The root is closed by `finish`, never here.
        if self.open.len() <= 1 {
            return Err(TreeError::UnbalancedFinish);
        }
        let id = self.open.pop().ok_or(TreeError::UnbalancedFinish)?;
        self.close(id);
        Ok(id)
    }

    /// Closes the root; the source file always spans the whole text.
    pub fn finish(mut self, text_len: u32) -> Result<SyntaxTree, TreeError> {
        if self.open.len() != 1 {
            return Err(TreeError::UnclosedNodes {
                open: self.open.len() - 1,
            });
        }
        if text_len < self.last_end {
            return Err(TreeError::EndBeforeLastToken {
                end: text_len,
                last_end: self.last_end,
            });
        }
        let root = NodeId(0);
        self.close(root);
        let node = &mut self.nodes[0];
        node.end = text_len;
        Ok(SyntaxTree { nodes: self.nodes })
    }

    fn push(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = self.open.last().copied();
        node.parent = parent;
        self.nodes.push(node);
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn close(&mut self, id: NodeId) {
        let children = &self.nodes[id.index()].children;
        let (Some(first), Some(last)) = (children.first().copied(), children.last().copied())
        else {
            return;
        };
        let (pos, trivia) = {
            let f = &self.nodes[first.index()];
            (f.pos, f.leading_trivia_width)
        };
        let end = self.nodes[last.index()].end;
        let node = &mut self.nodes[id.index()];
        node.pos = pos;
        node.leading_trivia_width = trivia;
        node.end = end;
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
