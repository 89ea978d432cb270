use codefix_syntax::{NodeId, SyntaxTree};
use codefix_types::{PositionOrRange, TextRange};

/// Deepest node that claims `range`.
///
/// A node claims a range when `range.pos >= node.start()` and `range.end < node.end()`;
/// the node's end is exclusive, so a range ending exactly at a node boundary belongs to
/// whatever starts there. Children are tried in source order. `None` when even the
/// root does not claim the range (leading trivia of the file, or end of file).
pub fn locate(tree: &SyntaxTree, range: TextRange) -> Option<NodeId> {
    let claims = |id: NodeId| {
        tree.get(id).is_some_and(|node| {
            let own = node.range();
            own.contains(range.pos) && own.contains(range.end)
        })
    };

    let mut id = tree.root();
    if !claims(id) {
        return None;
    }
    while let Some(child) = tree.children(id).iter().copied().find(|c| claims(*c)) {
        id = child;
    }
    Some(id)
}

/// The empty range `locate` is probed with for a host request.
///
/// The probe sits at the caret (or selection start). Combined with the exclusive
/// node end this selects the node owning the character right after the caret: a
/// caret immediately before an identifier, one-character identifiers included,
/// resolves to that identifier.
pub fn probe_range(position_or_range: PositionOrRange) -> TextRange {
    TextRange::empty(position_or_range.anchor())
}
