use crate::tree::{NodeId, SyntaxTree};
use camino::{Utf8Path, Utf8PathBuf};

/// One file version as seen by the analysis service: its name, text and tree.
#[derive(Debug, Clone)]
pub struct SourceFile {
    file_name: Utf8PathBuf,
    text: String,
    tree: SyntaxTree,
}

impl SourceFile {
    pub fn new(file_name: impl Into<Utf8PathBuf>, text: impl Into<String>, tree: SyntaxTree) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
            tree,
        }
    }

    pub fn file_name(&self) -> &Utf8Path {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Source text of `id` without its leading trivia; empty for a foreign id.
    pub fn node_text(&self, id: NodeId) -> &str {
        let Some(node) = self.tree.get(id) else {
            return "";
        };
        self.text
            .get(node.start() as usize..node.end() as usize)
            .unwrap_or("")
    }
}
