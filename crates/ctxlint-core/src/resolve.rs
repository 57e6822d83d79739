//! Resolution of syntax nodes to fully-qualified symbol names.

use crate::ast::Expr;
use crate::typeinfo::{Symbol, TypeInfo};
use crate::visit::Node;

/// Returns the fully-qualified name of the symbol `node` refers to, in the
/// form `package/path.Name` (or `(Receiver).Name` for methods).
///
/// Only types and functions have names; anything else, and any node the
/// type information knows nothing about, yields `None`.
#[must_use]
pub fn name_of(node: Node<'_>, info: &TypeInfo) -> Option<String> {
    object_for(node, info)?.full_name()
}

/// Same as [`name_of`] for an expression.
#[must_use]
pub fn expr_name(expr: &Expr, info: &TypeInfo) -> Option<String> {
    name_of(Node::Expr(expr), info)
}

/// Returns the symbol a node refers to, if there is one.
///
/// Selectors are first looked up as selections (fields and methods reached
/// through a value), then as package-qualified references through the
/// selected identifier.
#[must_use]
pub fn object_for<'i>(node: Node<'_>, info: &'i TypeInfo) -> Option<&'i Symbol> {
    match node {
        Node::Ident(ident) => info.uses(ident),
        Node::Expr(expr) => match expr.unparen() {
            Expr::Ident(ident) => info.uses(ident),
            Expr::Selector(sel) => info
                .selection(sel)
                .map(|selection| &selection.obj)
                .or_else(|| info.uses(&sel.sel)),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Ident, NodeId, SelectorExpr};
    use crate::position::{FileId, Pos};
    use crate::typeinfo::{Selection, SelectionKind};

    fn ident(id: u32, name: &str) -> Ident {
        Ident {
            id: NodeId(id),
            name: name.to_string(),
            pos: Pos::new(FileId(0), id),
        }
    }

    fn selector(id: u32, base: Ident, sel: Ident) -> SelectorExpr {
        SelectorExpr {
            id: NodeId(id),
            base: Box::new(Expr::Ident(base)),
            sel,
        }
    }

    #[test]
    fn test_qualified_reference_resolves_through_selected_ident() {
        let mut info = TypeInfo::new();
        let sel = selector(3, ident(1, "context"), ident(2, "Background"));
        info.record_use(&sel.sel, Symbol::func(Some("context"), "Background"));

        let expr = Expr::Selector(sel);
        assert_eq!(
            expr_name(&expr, &info).as_deref(),
            Some("context.Background")
        );
    }

    #[test]
    fn test_selection_takes_precedence() {
        let mut info = TypeInfo::new();
        let sel = selector(3, ident(1, "srv"), ident(2, "Run"));
        info.record_use(&sel.sel, Symbol::func(Some("other"), "Run"));
        info.record_selection(
            &sel,
            Selection {
                kind: SelectionKind::MethodVal,
                obj: Symbol::method("example.com/app", "*example.com/app.Server", "Run"),
            },
        );

        let expr = Expr::Selector(sel);
        assert_eq!(
            expr_name(&expr, &info).as_deref(),
            Some("(*example.com/app.Server).Run")
        );
    }

    #[test]
    fn test_parentheses_are_stripped() {
        let mut info = TypeInfo::new();
        let id = ident(1, "Background");
        info.record_use(&id, Symbol::func(Some("context"), "Background"));

        let expr = Expr::Paren {
            pos: Pos::new(FileId(0), 0),
            inner: Box::new(Expr::Paren {
                pos: Pos::new(FileId(0), 0),
                inner: Box::new(Expr::Ident(id)),
            }),
        };
        assert_eq!(
            expr_name(&expr, &info).as_deref(),
            Some("context.Background")
        );
    }

    #[test]
    fn test_unknown_and_unsupported_nodes_resolve_to_none() {
        let mut info = TypeInfo::new();
        let x = ident(1, "x");
        info.record_use(&x, Symbol::var(Some("p"), "x"));

        assert_eq!(expr_name(&Expr::Ident(x), &info), None);
        assert_eq!(expr_name(&Expr::Ident(ident(2, "y")), &info), None);

        let lit = Expr::Lit {
            pos: Pos::new(FileId(0), 0),
            kind: crate::ast::LitKind::Int,
            value: "1".to_string(),
        };
        assert_eq!(expr_name(&lit, &info), None);
    }

    #[test]
    fn test_bare_ident_node_uses_uses_map() {
        let mut info = TypeInfo::new();
        let id = ident(1, "Context");
        info.record_use(&id, Symbol::type_name(Some("context"), "Context"));
        assert_eq!(
            name_of(Node::Ident(&id), &info).as_deref(),
            Some("context.Context")
        );
    }
}
