//! Incremental construction of a [`Package`].
//!
//! Hosts that translate their own compiler output into the ctxlint model
//! use these builders to allocate node identities, record resolved symbols
//! and keep each file's set of unresolved identifiers in step with the tree.
//!
//! # Example
//!
//! ```ignore
//! let mut pkg = PackageBuilder::new("example.com/app");
//! let mut file = pkg.file("app.go").text(SOURCE);
//! let background = Symbol::func(Some("context"), "Background");
//! let bg = file.qualified(40, "context", "Background", background);
//! let call = file.call(bg, vec![]);
//! let name = file.ident(10, "run");
//! file.func(5, name, vec![], vec![Stmt::Expr(call)]);
//! file.finish();
//! let package = pkg.build();
//! ```

use std::path::PathBuf;

use crate::ast::{
    Block, CallExpr, Decl, Expr, Field, FieldList, FuncDecl, FuncType, Ident, NodeId, Package,
    SelectorExpr, SourceFile, Stmt,
};
use crate::position::{FileId, LineIndex, Pos};
use crate::typeinfo::{Selection, Symbol, TypeInfo};

/// Builds a [`Package`] file by file.
#[derive(Debug)]
pub struct PackageBuilder {
    path: String,
    files: Vec<SourceFile>,
    info: TypeInfo,
    next_id: u32,
}

impl PackageBuilder {
    /// Starts a package with the given import path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            files: Vec::new(),
            info: TypeInfo::new(),
            next_id: 0,
        }
    }

    /// Starts the next file of the package.
    ///
    /// The file is added to the package when [`FileBuilder::finish`] is
    /// called; files keep the order in which they are finished.
    pub fn file(&mut self, path: impl Into<PathBuf>) -> FileBuilder<'_> {
        let id = FileId(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
        FileBuilder {
            pkg: self,
            id,
            path: path.into(),
            lines: LineIndex::default(),
            decls: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    /// Finishes the package.
    #[must_use]
    pub fn build(self) -> Package {
        Package {
            path: self.path,
            files: self.files,
            info: self.info,
        }
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Builds one [`SourceFile`] of a package.
#[derive(Debug)]
pub struct FileBuilder<'p> {
    pkg: &'p mut PackageBuilder,
    id: FileId,
    path: PathBuf,
    lines: LineIndex,
    decls: Vec<Decl>,
    unresolved: Vec<Ident>,
}

impl FileBuilder<'_> {
    /// Attaches the file text so positions resolve to real lines.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.lines = LineIndex::new(text);
        self
    }

    /// Position at `offset` in this file.
    #[must_use]
    pub fn pos(&self, offset: u32) -> Pos {
        Pos::new(self.id, offset)
    }

    /// A fresh identifier with no resolved symbol (a declared name, or an
    /// unresolvable reference).
    pub fn ident(&mut self, offset: u32, name: &str) -> Ident {
        Ident {
            id: self.pkg.fresh_id(),
            name: name.to_string(),
            pos: self.pos(offset),
        }
    }

    /// An identifier referring to `symbol`, declared in this file or
    /// predeclared.
    pub fn use_ident(&mut self, offset: u32, name: &str, symbol: Symbol) -> Ident {
        let ident = self.ident(offset, name);
        self.pkg.info.record_use(&ident, symbol);
        ident
    }

    /// An identifier referring to something declared outside this file; it
    /// is added to the file's unresolved set.
    pub fn external(&mut self, offset: u32, name: &str, symbol: Option<Symbol>) -> Ident {
        let ident = self.ident(offset, name);
        if let Some(symbol) = symbol {
            self.pkg.info.record_use(&ident, symbol);
        }
        self.unresolved.push(ident.clone());
        ident
    }

    /// A package-qualified reference `pkg.name` starting at `offset`.
    ///
    /// The package name is recorded as an unresolved identifier, the way an
    /// import is seen from inside a file, and the selected name resolves to
    /// `symbol`.
    pub fn qualified(&mut self, offset: u32, pkg: &str, name: &str, symbol: Symbol) -> Expr {
        let imported = symbol.package.clone().unwrap_or_else(|| pkg.to_string());
        let pkg_name = Symbol::pkg_name(&self.pkg.path, pkg, &imported);
        let base = self.external(offset, pkg, Some(pkg_name));
        let sel = self.use_ident(offset + len32(pkg) + 1, name, symbol);
        Expr::Selector(SelectorExpr {
            id: self.pkg.fresh_id(),
            base: Box::new(Expr::Ident(base)),
            sel,
        })
    }

    /// A selector `base.name` whose selected name starts at `sel_offset`,
    /// optionally resolved as a field or method selection.
    pub fn select(
        &mut self,
        base: Expr,
        sel_offset: u32,
        name: &str,
        selection: Option<Selection>,
    ) -> Expr {
        let sel = SelectorExpr {
            id: self.pkg.fresh_id(),
            base: Box::new(base),
            sel: self.ident(sel_offset, name),
        };
        if let Some(selection) = selection {
            self.pkg.info.record_selection(&sel, selection);
        }
        Expr::Selector(sel)
    }

    /// A call expression.
    #[must_use]
    pub fn call(&self, func: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call(CallExpr {
            func: Box::new(func),
            args,
        })
    }

    /// Adds a free function `func name(params) { body }` whose `func`
    /// keyword is at `offset`.
    pub fn func(&mut self, offset: u32, name: Ident, params: Vec<Field>, body: Vec<Stmt>) {
        self.push_func(offset, None, name, params, body);
    }

    /// Adds a method `func (recv) name(params) { body }` whose `func`
    /// keyword is at `offset`.
    pub fn method(
        &mut self,
        offset: u32,
        recv: Field,
        name: Ident,
        params: Vec<Field>,
        body: Vec<Stmt>,
    ) {
        self.push_func(offset, Some(FieldList::new(vec![recv])), name, params, body);
    }

    fn push_func(
        &mut self,
        offset: u32,
        recv: Option<FieldList>,
        name: Ident,
        params: Vec<Field>,
        body: Vec<Stmt>,
    ) {
        let pos = self.pos(offset);
        self.decls.push(Decl::Func(FuncDecl {
            recv,
            name,
            ty: FuncType {
                pos,
                params: FieldList::new(params),
                results: None,
            },
            body: Some(Block { pos, stmts: body }),
        }));
    }

    /// Adds an arbitrary declaration.
    pub fn decl(&mut self, decl: Decl) {
        self.decls.push(decl);
    }

    /// Adds the finished file to the package.
    pub fn finish(self) {
        self.pkg.files.push(SourceFile {
            id: self.id,
            path: self.path,
            decls: self.decls,
            unresolved: self.unresolved,
            lines: self.lines,
        });
    }
}

fn len32(s: &str) -> u32 {
    u32::try_from(s.len()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_unique_across_files() {
        let mut pkg = PackageBuilder::new("p");
        let mut a = pkg.file("a.go");
        let x = a.ident(0, "x");
        let y = a.ident(2, "y");
        a.finish();
        let mut b = pkg.file("b.go");
        let z = b.ident(0, "z");
        b.finish();

        assert_ne!(x.id, y.id);
        assert_ne!(y.id, z.id);
        assert_eq!(x.pos.file, FileId(0));
        assert_eq!(z.pos.file, FileId(1));
    }

    #[test]
    fn test_qualified_records_package_name_as_unresolved() {
        let mut pkg = PackageBuilder::new("example.com/app");
        let mut file = pkg.file("app.go");
        let expr = file.qualified(
            10,
            "context",
            "Background",
            Symbol::func(Some("context"), "Background"),
        );
        file.finish();
        let package = pkg.build();

        let Expr::Selector(sel) = &expr else {
            panic!("expected selector");
        };
        assert_eq!(sel.sel.pos.offset, 18);
        assert_eq!(package.files[0].unresolved.len(), 1);
        assert_eq!(package.files[0].unresolved[0].name, "context");
        assert_eq!(
            package.info.uses(&sel.sel).and_then(Symbol::full_name).as_deref(),
            Some("context.Background")
        );
    }

    #[test]
    fn test_text_enables_line_resolution() {
        let mut pkg = PackageBuilder::new("p");
        let file = pkg.file("a.go").text("package p\n\nfunc f() {}\n");
        file.finish();
        let package = pkg.build();

        let position = package
            .position(Pos::new(FileId(0), 11))
            .expect("file exists");
        assert_eq!((position.line, position.column), (3, 1));
        assert!(package.position(Pos::new(FileId(7), 0)).is_none());
    }
}
