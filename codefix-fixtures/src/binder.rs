use codefix_syntax::{NodeId, SourceFile, SyntaxKind, SyntaxTree};
use codefix_types::Diagnostic;
use codefix_types::codes::CANNOT_ASSIGN_TO_CONSTANT;
use std::collections::HashMap;

pub(crate) const CANNOT_FIND_NAME: u32 = 2304;

#[derive(Debug, Clone)]
pub(crate) struct SymbolData {
    pub name: String,
    /// `VariableDeclaration` nodes, in source order.
    pub declarations: Vec<NodeId>,
    pub is_const: bool,
}

/// Names resolved for one file, plus the diagnostics they imply.
#[derive(Debug, Clone, Default)]
pub(crate) struct Binding {
    pub symbols: Vec<SymbolData>,
    /// Identifier token -> index into `symbols`.
    pub references: HashMap<NodeId, usize>,
    pub diagnostics: Vec<Diagnostic>,
}

struct Scope {
    parent: Option<usize>,
    names: HashMap<String, usize>,
}

struct Binder<'a> {
    source: &'a SourceFile,
    scopes: Vec<Scope>,
    binding: Binding,
}

/// Block-scoped binding: every declaration is visible in its whole scope, and a
/// redeclaration in the same scope adds a declaration to the existing symbol.
pub(crate) fn bind(source: &SourceFile) -> Binding {
    let mut binder = Binder {
        source,
        scopes: Vec::new(),
        binding: Binding::default(),
    };
    let root = source.tree().root();
    let scope = binder.new_scope(None);
    binder.bind_scope(root, scope);
    binder.check_assignments();
    binder.binding
}

fn opens_scope(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::Block | SyntaxKind::ForOfStatement)
}

impl Binder<'_> {
    fn tree(&self) -> &SyntaxTree {
        self.source.tree()
    }

    fn new_scope(&mut self, parent: Option<usize>) -> usize {
        self.scopes.push(Scope {
            parent,
            names: HashMap::new(),
        });
        self.scopes.len() - 1
    }

    fn bind_scope(&mut self, node: NodeId, scope: usize) {
        let mut declarations = Vec::new();
        self.collect_declarations(node, true, &mut declarations);
        for declaration in declarations {
            self.declare(declaration, scope);
        }
        for child in self.tree().children(node).to_vec() {
            self.resolve(child, scope);
        }
    }

    /// Declarations owned by the scope `node` opens, without entering nested scopes.
    fn collect_declarations(&self, node: NodeId, is_scope_root: bool, out: &mut Vec<NodeId>) {
        let kind = self.tree()[node].kind();
        if !is_scope_root && opens_scope(kind) {
            return;
        }
        if kind == SyntaxKind::VariableDeclaration {
            out.push(node);
        }
        for child in self.tree().children(node) {
            self.collect_declarations(*child, false, out);
        }
    }

    fn declared_name(&self, declaration: NodeId) -> Option<NodeId> {
        self.tree()
            .children(declaration)
            .iter()
            .copied()
            .find(|c| self.tree()[*c].kind() == SyntaxKind::Identifier)
    }

    fn is_const_declaration(&self, declaration: NodeId) -> bool {
        let tree = self.tree();
        tree.parent(declaration).is_some_and(|list| {
            tree.children(list)
                .iter()
                .any(|c| tree[*c].kind() == SyntaxKind::ConstKeyword)
        })
    }

    fn declare(&mut self, declaration: NodeId, scope: usize) {
        let Some(name_node) = self.declared_name(declaration) else {
            return;
        };
        let name = self.source.node_text(name_node).to_string();
        let is_const = self.is_const_declaration(declaration);
        let existing = self.scopes[scope].names.get(&name).copied();
        let index = match existing {
            Some(index) => index,
            None => {
                self.binding.symbols.push(SymbolData {
                    name: name.clone(),
                    declarations: Vec::new(),
                    is_const,
                });
                let index = self.binding.symbols.len() - 1;
                self.scopes[scope].names.insert(name, index);
                index
            }
        };
        self.binding.symbols[index].declarations.push(declaration);
        self.binding.references.insert(name_node, index);
    }

    fn lookup(&self, name: &str, mut scope: usize) -> Option<usize> {
        loop {
            if let Some(index) = self.scopes[scope].names.get(name) {
                return Some(*index);
            }
            scope = self.scopes[scope].parent?;
        }
    }

    fn resolve(&mut self, node: NodeId, scope: usize) {
        let source = self.source;
        let kind = source.tree()[node].kind();
        if opens_scope(kind) {
            let inner = self.new_scope(Some(scope));
            self.bind_scope(node, inner);
            return;
        }
        if kind == SyntaxKind::Identifier && !self.binding.references.contains_key(&node) {
            let name = source.node_text(node);
            match self.lookup(name, scope) {
                Some(index) => {
                    self.binding.references.insert(node, index);
                }
                None => {
                    let diagnostic = Diagnostic::new(CANNOT_FIND_NAME, source.tree()[node].start())
                        .with_length(name.len() as u32)
                        .with_message(format!("Cannot find name '{name}'."));
                    self.binding.diagnostics.push(diagnostic);
                }
            }
            return;
        }
        for child in source.tree().children(node) {
            self.resolve(*child, scope);
        }
    }

    /// 2588 for `name = ...` where `name` binds to a const symbol.
    fn check_assignments(&mut self) {
        let source = self.source;
        let tree = source.tree();
        let mut found = Vec::new();
        for node in tree.descendants(tree.root()) {
            if tree[node].kind() != SyntaxKind::BinaryExpression {
                continue;
            }
            let children = tree.children(node);
            let (Some(target), Some(operator)) = (children.first(), children.get(1)) else {
                continue;
            };
            if tree[*target].kind() != SyntaxKind::Identifier
                || tree[*operator].kind() != SyntaxKind::EqualsToken
            {
                continue;
            }
            let Some(index) = self.binding.references.get(target) else {
                continue;
            };
            if self.binding.symbols[*index].is_const {
                let name = source.node_text(*target);
                found.push(
                    Diagnostic::new(CANNOT_ASSIGN_TO_CONSTANT, tree[*target].start())
                        .with_length(name.len() as u32)
                        .with_message(format!(
                            "Cannot assign to '{name}' because it is a constant."
                        )),
                );
            }
        }
        self.binding.diagnostics.extend(found);
        self.binding
            .diagnostics
            .sort_by_key(|d| (d.start.unwrap_or(0), d.code));
    }
}
