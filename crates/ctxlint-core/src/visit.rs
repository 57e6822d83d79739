//! Depth-first traversal with per-node pruning.
//!
//! A [`Visitor`] is consulted on entry to every node and answers whether
//! the walk should continue into that node's children.
//!
//! ```ignore
//! struct CountCalls(usize);
//!
//! impl<'a> Visitor<'a> for CountCalls {
//!     fn enter(&mut self, node: Node<'a>) -> Walk {
//!         if let Node::Expr(Expr::Call(_)) = node {
//!             self.0 += 1;
//!         }
//!         Walk::Descend
//!     }
//! }
//! ```

use crate::ast::{
    Block, CaseClause, CommClause, Decl, Expr, Field, FieldList, FuncDecl, FuncType, Ident,
    SourceFile, Spec, Stmt,
};

/// Any node reachable from a source file.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// The file itself.
    File(&'a SourceFile),
    /// A top-level declaration.
    Decl(&'a Decl),
    /// A function declaration.
    FuncDecl(&'a FuncDecl),
    /// A parameter, result or receiver group.
    Field(&'a Field),
    /// A specification of a general declaration.
    Spec(&'a Spec),
    /// A block.
    Block(&'a Block),
    /// A statement.
    Stmt(&'a Stmt),
    /// A `case` or `default` clause of a switch.
    CaseClause(&'a CaseClause),
    /// A `case` or `default` clause of a select.
    CommClause(&'a CommClause),
    /// An expression.
    Expr(&'a Expr),
    /// A bare identifier that is not itself an expression: declared names and
    /// the selected name of a selector.
    Ident(&'a Ident),
}

/// Decision returned by [`Visitor::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Visit the node's children.
    Descend,
    /// Do not visit the node's children.
    Skip,
}

/// Receives every node of a walk in pre-order.
pub trait Visitor<'a> {
    /// Called on entry to `node`; the result decides whether its children
    /// are visited.
    fn enter(&mut self, node: Node<'a>) -> Walk;
}

/// Walks a whole file.
pub fn walk_file<'a, V: Visitor<'a>>(visitor: &mut V, file: &'a SourceFile) {
    walk(visitor, Node::File(file));
}

/// Walks the subtree rooted at `node`.
pub fn walk<'a, V: Visitor<'a>>(visitor: &mut V, node: Node<'a>) {
    if visitor.enter(node) == Walk::Skip {
        return;
    }
    node.for_each_child(&mut |child| walk(visitor, child));
}

impl<'a> Node<'a> {
    /// Calls `f` with each direct child, in source order.
    pub fn for_each_child(self, f: &mut dyn FnMut(Node<'a>)) {
        match self {
            Self::File(file) => file.decls.iter().for_each(|d| f(Self::Decl(d))),
            Self::Decl(Decl::Func(func)) => f(Self::FuncDecl(func)),
            Self::Decl(Decl::Gen(decl)) => decl.specs.iter().for_each(|s| f(Self::Spec(s))),
            Self::FuncDecl(func) => {
                if let Some(recv) = &func.recv {
                    fields(recv, f);
                }
                f(Self::Ident(&func.name));
                signature(&func.ty, f);
                if let Some(body) = &func.body {
                    f(Self::Block(body));
                }
            }
            Self::Field(field) => {
                field.names.iter().for_each(|n| f(Self::Ident(n)));
                f(Self::Expr(&field.ty));
            }
            Self::Spec(spec) => spec_children(spec, f),
            Self::Block(block) => block.stmts.iter().for_each(|s| f(Self::Stmt(s))),
            Self::Stmt(stmt) => stmt_children(stmt, f),
            Self::CaseClause(clause) => {
                exprs(&clause.list, f);
                stmts(&clause.body, f);
            }
            Self::CommClause(clause) => {
                if let Some(comm) = &clause.comm {
                    f(Self::Stmt(comm));
                }
                stmts(&clause.body, f);
            }
            Self::Expr(expr) => expr_children(expr, f),
            Self::Ident(_) => {}
        }
    }
}

fn fields<'a>(list: &'a FieldList, f: &mut dyn FnMut(Node<'a>)) {
    list.fields.iter().for_each(|field| f(Node::Field(field)));
}

fn exprs<'a>(list: &'a [Expr], f: &mut dyn FnMut(Node<'a>)) {
    list.iter().for_each(|e| f(Node::Expr(e)));
}

fn stmts<'a>(list: &'a [Stmt], f: &mut dyn FnMut(Node<'a>)) {
    list.iter().for_each(|s| f(Node::Stmt(s)));
}

fn opt_expr<'a>(expr: Option<&'a Expr>, f: &mut dyn FnMut(Node<'a>)) {
    if let Some(expr) = expr {
        f(Node::Expr(expr));
    }
}

fn signature<'a>(ty: &'a FuncType, f: &mut dyn FnMut(Node<'a>)) {
    fields(&ty.params, f);
    if let Some(results) = &ty.results {
        fields(results, f);
    }
}

fn spec_children<'a>(spec: &'a Spec, f: &mut dyn FnMut(Node<'a>)) {
    match spec {
        Spec::Import { name, .. } => {
            if let Some(name) = name {
                f(Node::Ident(name));
            }
        }
        Spec::Value { names, ty, values } => {
            names.iter().for_each(|n| f(Node::Ident(n)));
            if let Some(ty) = ty {
                f(Node::Expr(ty));
            }
            exprs(values, f);
        }
        Spec::Type { name, ty } => {
            f(Node::Ident(name));
            f(Node::Expr(ty));
        }
    }
}

fn stmt_children<'a>(stmt: &'a Stmt, f: &mut dyn FnMut(Node<'a>)) {
    match stmt {
        Stmt::Expr(expr) => f(Node::Expr(expr)),
        Stmt::Assign { lhs, rhs, .. } => {
            exprs(lhs, f);
            exprs(rhs, f);
        }
        Stmt::Decl(decl) => decl.specs.iter().for_each(|s| f(Node::Spec(s))),
        Stmt::Return { results, .. } => exprs(results, f),
        Stmt::Block(block) => f(Node::Block(block)),
        Stmt::If {
            init,
            cond,
            then,
            els,
            ..
        } => {
            if let Some(init) = init {
                f(Node::Stmt(init));
            }
            f(Node::Expr(cond));
            f(Node::Block(then));
            if let Some(els) = els {
                f(Node::Stmt(els));
            }
        }
        Stmt::For {
            init,
            cond,
            post,
            body,
            ..
        } => {
            if let Some(init) = init {
                f(Node::Stmt(init));
            }
            if let Some(cond) = cond {
                f(Node::Expr(cond));
            }
            if let Some(post) = post {
                f(Node::Stmt(post));
            }
            f(Node::Block(body));
        }
        Stmt::Go { call, .. } | Stmt::Defer { call, .. } => f(Node::Expr(call)),
        Stmt::Labeled { label, stmt } => {
            f(Node::Ident(label));
            f(Node::Stmt(stmt));
        }
        Stmt::Send { chan, value } => {
            f(Node::Expr(chan));
            f(Node::Expr(value));
        }
        Stmt::IncDec { expr, .. } => f(Node::Expr(expr)),
        Stmt::Branch { label, .. } => {
            if let Some(label) = label {
                f(Node::Ident(label));
            }
        }
        Stmt::Switch {
            init, tag, clauses, ..
        } => {
            if let Some(init) = init {
                f(Node::Stmt(init));
            }
            opt_expr(tag.as_ref(), f);
            clauses.iter().for_each(|c| f(Node::CaseClause(c)));
        }
        Stmt::TypeSwitch {
            init,
            assign,
            clauses,
            ..
        } => {
            if let Some(init) = init {
                f(Node::Stmt(init));
            }
            f(Node::Stmt(assign));
            clauses.iter().for_each(|c| f(Node::CaseClause(c)));
        }
        Stmt::Select { clauses, .. } => clauses.iter().for_each(|c| f(Node::CommClause(c))),
        Stmt::Range {
            key,
            value,
            expr,
            body,
            ..
        } => {
            opt_expr(key.as_ref(), f);
            opt_expr(value.as_ref(), f);
            f(Node::Expr(expr));
            f(Node::Block(body));
        }
    }
}

fn expr_children<'a>(expr: &'a Expr, f: &mut dyn FnMut(Node<'a>)) {
    match expr {
        Expr::Ident(_) | Expr::Lit { .. } => {}
        Expr::Selector(sel) => {
            f(Node::Expr(&sel.base));
            f(Node::Ident(&sel.sel));
        }
        Expr::Paren { inner, .. } => f(Node::Expr(inner)),
        Expr::Call(call) => {
            f(Node::Expr(&call.func));
            exprs(&call.args, f);
        }
        Expr::Unary { operand, .. } => f(Node::Expr(operand)),
        Expr::Binary { lhs, rhs, .. } => {
            f(Node::Expr(lhs));
            f(Node::Expr(rhs));
        }
        Expr::Index { base, index } => {
            f(Node::Expr(base));
            f(Node::Expr(index));
        }
        Expr::Composite { ty, elts, .. } => {
            if let Some(ty) = ty {
                f(Node::Expr(ty));
            }
            exprs(elts, f);
        }
        Expr::KeyValue { key, value } => {
            f(Node::Expr(key));
            f(Node::Expr(value));
        }
        Expr::FuncLit(lit) => {
            signature(&lit.ty, f);
            f(Node::Block(&lit.body));
        }
        Expr::TypeAssert { base, ty } => {
            f(Node::Expr(base));
            opt_expr(ty.as_deref(), f);
        }
        Expr::Slice {
            base,
            low,
            high,
            max,
        } => {
            f(Node::Expr(base));
            opt_expr(low.as_deref(), f);
            opt_expr(high.as_deref(), f);
            opt_expr(max.as_deref(), f);
        }
        Expr::Ellipsis { elt, .. } => opt_expr(elt.as_deref(), f),
        Expr::ArrayType { len, elem, .. } => {
            opt_expr(len.as_deref(), f);
            f(Node::Expr(elem));
        }
        Expr::MapType { key, value, .. } => {
            f(Node::Expr(key));
            f(Node::Expr(value));
        }
        Expr::ChanType { value, .. } => f(Node::Expr(value)),
        Expr::FuncType(ty) => signature(ty, f),
        Expr::StructType { fields: list, .. } | Expr::InterfaceType { methods: list, .. } => {
            fields(list, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Field;
    use crate::builder::PackageBuilder;
    use crate::typeinfo::Symbol;

    /// Records identifier names in visit order, skipping any function
    /// named in `prune`.
    struct Names {
        seen: Vec<String>,
        prune: &'static str,
    }

    impl<'a> Visitor<'a> for Names {
        fn enter(&mut self, node: Node<'a>) -> Walk {
            match node {
                Node::FuncDecl(func) if func.name.name == self.prune => return Walk::Skip,
                Node::Ident(ident) | Node::Expr(Expr::Ident(ident)) => {
                    self.seen.push(ident.name.clone());
                }
                _ => {}
            }
            Walk::Descend
        }
    }

    fn sample() -> crate::ast::Package {
        // func (s S) run(ctx context.Context) { fmt.Println(ctx) }
        // func skip() { hidden() }
        let mut pkg = PackageBuilder::new("p");
        let mut file = pkg.file("p/a.go");
        let s = file.ident(6, "s");
        let s_ty = Expr::Ident(file.use_ident(8, "S", Symbol::type_name(Some("p"), "S")));
        let name = file.ident(11, "run");
        let ctx = file.ident(15, "ctx");
        let ctx_ty = file.qualified(
            19,
            "context",
            "Context",
            Symbol::type_name(Some("context"), "Context"),
        );
        let println = file.qualified(38, "fmt", "Println", Symbol::func(Some("fmt"), "Println"));
        let arg = Expr::Ident(file.use_ident(50, "ctx", Symbol::var(Some("p"), "ctx")));
        let call = file.call(println, vec![arg]);
        file.method(
            0,
            Field::new(vec![s], s_ty),
            name,
            vec![Field::new(vec![ctx], ctx_ty)],
            vec![Stmt::Expr(call)],
        );

        let skip = file.ident(62, "skip");
        let hidden = file.external(71, "hidden", None);
        let call = file.call(Expr::Ident(hidden), vec![]);
        file.func(57, skip, vec![], vec![Stmt::Expr(call)]);
        file.finish();
        pkg.build()
    }

    #[test]
    fn test_walk_is_preorder_in_source_order() {
        let pkg = sample();
        let mut names = Names {
            seen: Vec::new(),
            prune: "",
        };
        walk_file(&mut names, &pkg.files[0]);
        assert_eq!(
            names.seen,
            vec![
                "s", "S", "run", "ctx", "context", "Context", "fmt", "Println", "ctx", "skip",
                "hidden"
            ]
        );
    }

    #[test]
    fn test_skip_prunes_children() {
        let pkg = sample();
        let mut names = Names {
            seen: Vec::new(),
            prune: "skip",
        };
        walk_file(&mut names, &pkg.files[0]);
        assert_eq!(names.seen.last().map(String::as_str), Some("ctx"));
        assert!(!names.seen.iter().any(|n| n == "hidden"));
    }

    fn var(file: &mut crate::builder::FileBuilder<'_>, offset: u32, name: &str) -> Expr {
        Expr::Ident(file.use_ident(offset, name, Symbol::var(Some("p"), name)))
    }

    #[test]
    fn test_walk_reaches_labeled_loops_and_type_expressions() {
        // func f() {
        // outer:
        //     for { ch <- a; i++; m[b:c]; break outer }
        //     d.(map[k]v)
        // }
        let mut pkg = PackageBuilder::new("p");
        let mut file = pkg.file("p/b.go");
        let send = Stmt::Send {
            chan: var(&mut file, 20, "ch"),
            value: var(&mut file, 26, "a"),
        };
        let inc = Stmt::IncDec {
            expr: var(&mut file, 29, "i"),
            inc: true,
        };
        let slice = Stmt::Expr(Expr::Slice {
            base: Box::new(var(&mut file, 34, "m")),
            low: Some(Box::new(var(&mut file, 36, "b"))),
            high: Some(Box::new(var(&mut file, 38, "c"))),
            max: None,
        });
        let branch = Stmt::Branch {
            pos: file.pos(42),
            kind: crate::ast::BranchKind::Break,
            label: Some(file.ident(48, "outer")),
        };
        let body = crate::ast::Block {
            pos: file.pos(18),
            stmts: vec![send, inc, slice, branch],
        };
        let labeled = Stmt::Labeled {
            label: file.ident(11, "outer"),
            stmt: Box::new(Stmt::For {
                pos: file.pos(14),
                init: None,
                cond: None,
                post: None,
                body,
            }),
        };
        let map = Expr::MapType {
            pos: file.pos(60),
            key: Box::new(var(&mut file, 64, "k")),
            value: Box::new(var(&mut file, 66, "v")),
        };
        let assert = Stmt::Expr(Expr::TypeAssert {
            base: Box::new(var(&mut file, 57, "d")),
            ty: Some(Box::new(map)),
        });
        let name = file.ident(5, "f");
        file.func(0, name, vec![], vec![labeled, assert]);
        file.finish();
        let pkg = pkg.build();

        let mut names = Names {
            seen: Vec::new(),
            prune: "",
        };
        walk_file(&mut names, &pkg.files[0]);
        assert_eq!(
            names.seen,
            vec!["f", "outer", "ch", "a", "i", "m", "b", "c", "outer", "d", "k", "v"]
        );
    }
}
