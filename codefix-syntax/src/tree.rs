use crate::kind::SyntaxKind;
use codefix_types::TextRange;

/// Index of a node inside the [`SyntaxTree`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) kind: SyntaxKind,
    pub(crate) pos: u32,
    pub(crate) end: u32,
    pub(crate) leading_trivia_width: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Full start, including leading trivia.
    pub fn pos(&self) -> u32 {
        self.pos
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn leading_trivia_width(&self) -> u32 {
        self.leading_trivia_width
    }

    /// Offset of the first significant character.
    pub fn start(&self) -> u32 {
        self.pos + self.leading_trivia_width
    }

    /// `[start, end)`: the node without its leading trivia.
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start(), self.end)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Immutable arena tree. The root is always a [`SyntaxKind::SourceFile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub(crate) nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> Option<SyntaxKind> {
        self.get(id).map(Node::kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// Strict ancestors of `id`, innermost first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Every node in pre-order (source order).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }
}

impl std::ops::Index<NodeId> for SyntaxTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
