//! Resolved symbols attached to syntax nodes by the host's type checker.

use std::collections::HashMap;

use crate::ast::{Ident, NodeId, SelectorExpr};

/// What kind of entity a [`Symbol`] names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// A named type.
    TypeName,
    /// A function, or a method when `receiver` is set.
    Func {
        /// Receiver type as written by the type checker, e.g. `*pkg.T`.
        receiver: Option<String>,
    },
    /// A variable, parameter or struct field.
    Var,
    /// A constant.
    Const,
    /// An imported package name.
    PkgName {
        /// Path of the imported package.
        imported: String,
    },
    /// A statement label.
    Label,
    /// A predeclared function such as `len`.
    Builtin,
    /// The predeclared `nil`.
    Nil,
}

/// A resolved named entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Unqualified name.
    pub name: String,
    /// Path of the declaring package; `None` for predeclared symbols.
    pub package: Option<String>,
    /// Entity kind.
    pub kind: SymbolKind,
}

impl Symbol {
    /// A named type, e.g. `Symbol::type_name(Some("context"), "Context")`.
    #[must_use]
    pub fn type_name(package: Option<&str>, name: &str) -> Self {
        Self::with_kind(package, name, SymbolKind::TypeName)
    }

    /// A free function.
    #[must_use]
    pub fn func(package: Option<&str>, name: &str) -> Self {
        Self::with_kind(package, name, SymbolKind::Func { receiver: None })
    }

    /// A method on `receiver`.
    #[must_use]
    pub fn method(package: &str, receiver: &str, name: &str) -> Self {
        Self::with_kind(
            Some(package),
            name,
            SymbolKind::Func {
                receiver: Some(receiver.to_string()),
            },
        )
    }

    /// A variable.
    #[must_use]
    pub fn var(package: Option<&str>, name: &str) -> Self {
        Self::with_kind(package, name, SymbolKind::Var)
    }

    /// A constant.
    #[must_use]
    pub fn constant(package: Option<&str>, name: &str) -> Self {
        Self::with_kind(package, name, SymbolKind::Const)
    }

    /// An imported package name declared in `package`.
    #[must_use]
    pub fn pkg_name(package: &str, name: &str, imported: &str) -> Self {
        Self::with_kind(
            Some(package),
            name,
            SymbolKind::PkgName {
                imported: imported.to_string(),
            },
        )
    }

    fn with_kind(package: Option<&str>, name: &str, kind: SymbolKind) -> Self {
        Self {
            name: name.to_string(),
            package: package.map(String::from),
            kind,
        }
    }

    /// Returns the fully-qualified name of a type or function.
    ///
    /// - type: `pkg/path.Name`, or `Name` when predeclared
    /// - free function: `pkg/path.name`, or `name` when predeclared
    /// - method: `(Receiver).name`
    ///
    /// Other kinds have no full name.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match &self.kind {
            SymbolKind::Func {
                receiver: Some(recv),
            } => Some(format!("({recv}).{}", self.name)),
            SymbolKind::TypeName | SymbolKind::Func { receiver: None } => {
                Some(match &self.package {
                    Some(pkg) => format!("{pkg}.{}", self.name),
                    None => self.name.clone(),
                })
            }
            SymbolKind::Var
            | SymbolKind::Const
            | SymbolKind::PkgName { .. }
            | SymbolKind::Label
            | SymbolKind::Builtin
            | SymbolKind::Nil => None,
        }
    }
}

/// How a selector expression selects its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// `x.f` is a struct field.
    FieldVal,
    /// `x.m` is a method value.
    MethodVal,
    /// `T.m` is a method expression.
    MethodExpr,
}

/// A selector resolved through a value or type, as opposed to a
/// package-qualified reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selection kind.
    pub kind: SelectionKind,
    /// Selected field or method.
    pub obj: Symbol,
}

/// Mapping from syntax nodes to the symbols they denote.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    uses: HashMap<NodeId, Symbol>,
    selections: HashMap<NodeId, Selection>,
}

impl TypeInfo {
    /// Creates empty type information.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the symbol an identifier refers to.
    pub fn record_use(&mut self, ident: &Ident, symbol: Symbol) {
        self.uses.insert(ident.id, symbol);
    }

    /// Records the selection a selector expression denotes.
    pub fn record_selection(&mut self, sel: &SelectorExpr, selection: Selection) {
        self.selections.insert(sel.id, selection);
    }

    /// Symbol an identifier refers to, if any.
    #[must_use]
    pub fn uses(&self, ident: &Ident) -> Option<&Symbol> {
        self.uses.get(&ident.id)
    }

    /// Selection a selector denotes, if it selects through a value or type.
    #[must_use]
    pub fn selection(&self, sel: &SelectorExpr) -> Option<&Selection> {
        self.selections.get(&sel.id)
    }
}
