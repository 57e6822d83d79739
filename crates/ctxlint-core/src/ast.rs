//! Syntax tree of a type-checked package, as handed over by the host.
//!
//! The shapes mirror a Go-like source language: top-level function and
//! general declarations, parameter groups that bind zero or more names to a
//! single type expression, and an expression tree in which identifiers and
//! selectors carry a [`NodeId`] so that [`TypeInfo`](crate::TypeInfo) can
//! attach resolved symbols to them.

use std::path::PathBuf;

use crate::position::{FileId, LineIndex, Pos, Position};
use crate::typeinfo::TypeInfo;

/// Identity of a syntax node, unique within a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// An identifier occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// Node identity used for `uses` lookups.
    pub id: NodeId,
    /// Identifier text.
    pub name: String,
    /// Position of the first character.
    pub pos: Pos,
}

impl Ident {
    /// Whether this is the blank identifier `_`.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// A qualified reference `base.sel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorExpr {
    /// Node identity used for `selections` lookups.
    pub id: NodeId,
    /// Left-hand side (a package name or a value).
    pub base: Box<Expr>,
    /// The selected name.
    pub sel: Ident,
}

/// A call `func(args...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    /// Callee expression.
    pub func: Box<Expr>,
    /// Arguments in source order.
    pub args: Vec<Expr>,
}

/// A function literal `func(params) results { body }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncLit {
    /// Signature.
    pub ty: FuncType,
    /// Body.
    pub body: Block,
}

/// Kind of a literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    /// Integer literal.
    Int,
    /// Floating-point literal.
    Float,
    /// Rune literal.
    Char,
    /// String literal.
    String,
}

/// Expressions, including type expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `name`
    Ident(Ident),
    /// `base.sel`
    Selector(SelectorExpr),
    /// `(inner)`
    Paren {
        /// Position of the opening parenthesis.
        pos: Pos,
        /// Wrapped expression.
        inner: Box<Expr>,
    },
    /// `func(args)`
    Call(CallExpr),
    /// `op operand`, including `*T` and `&x`.
    Unary {
        /// Position of the operator.
        pos: Pos,
        /// Operator text.
        op: String,
        /// Operand.
        operand: Box<Expr>,
    },
    /// `lhs op rhs`
    Binary {
        /// Left operand.
        lhs: Box<Expr>,
        /// Operator text.
        op: String,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// `base[index]`
    Index {
        /// Indexed expression.
        base: Box<Expr>,
        /// Index expression.
        index: Box<Expr>,
    },
    /// `T{elts...}`
    Composite {
        /// Position of the literal (type, or brace when untyped).
        pos: Pos,
        /// Literal type, if written.
        ty: Option<Box<Expr>>,
        /// Elements in source order.
        elts: Vec<Expr>,
    },
    /// `key: value` inside a composite literal.
    KeyValue {
        /// Key.
        key: Box<Expr>,
        /// Value.
        value: Box<Expr>,
    },
    /// A function literal.
    FuncLit(Box<FuncLit>),
    /// A literal token.
    Lit {
        /// Position of the token.
        pos: Pos,
        /// Token kind.
        kind: LitKind,
        /// Token text as written.
        value: String,
    },
    /// `base.(ty)`, or `base.(type)` in a type switch when `ty` is `None`.
    TypeAssert {
        /// Asserted expression.
        base: Box<Expr>,
        /// Asserted type.
        ty: Option<Box<Expr>>,
    },
    /// `base[low:high:max]`
    Slice {
        /// Sliced expression.
        base: Box<Expr>,
        /// Lower bound.
        low: Option<Box<Expr>>,
        /// Upper bound.
        high: Option<Box<Expr>>,
        /// Capacity bound of a three-index slice.
        max: Option<Box<Expr>>,
    },
    /// `...elt` in a variadic parameter, or `...` in an array length.
    Ellipsis {
        /// Position of the `...`.
        pos: Pos,
        /// Element type.
        elt: Option<Box<Expr>>,
    },
    /// `[len]elem`, or `[]elem` when `len` is `None`.
    ArrayType {
        /// Position of the opening bracket.
        pos: Pos,
        /// Length expression.
        len: Option<Box<Expr>>,
        /// Element type.
        elem: Box<Expr>,
    },
    /// `map[key]value`
    MapType {
        /// Position of the `map` keyword.
        pos: Pos,
        /// Key type.
        key: Box<Expr>,
        /// Value type.
        value: Box<Expr>,
    },
    /// `chan T`, `chan<- T` or `<-chan T`.
    ChanType {
        /// Position of the `chan` keyword or the arrow.
        pos: Pos,
        /// Channel direction.
        dir: ChanDir,
        /// Element type.
        value: Box<Expr>,
    },
    /// `func(params) results`
    FuncType(Box<FuncType>),
    /// `struct { fields }`
    StructType {
        /// Position of the `struct` keyword.
        pos: Pos,
        /// Field groups.
        fields: FieldList,
    },
    /// `interface { methods }`
    InterfaceType {
        /// Position of the `interface` keyword.
        pos: Pos,
        /// Methods and embedded types.
        methods: FieldList,
    },
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

impl Expr {
    /// Returns the position of the first token of the expression.
    #[must_use]
    pub fn pos(&self) -> Pos {
        match self {
            Self::Ident(ident) => ident.pos,
            Self::Selector(sel) => sel.base.pos(),
            Self::Call(call) => call.func.pos(),
            Self::Binary { lhs, .. } => lhs.pos(),
            Self::Index { base, .. } => base.pos(),
            Self::KeyValue { key, .. } => key.pos(),
            Self::FuncLit(lit) => lit.ty.pos,
            Self::FuncType(ty) => ty.pos,
            Self::TypeAssert { base, .. } | Self::Slice { base, .. } => base.pos(),
            Self::Paren { pos, .. }
            | Self::Unary { pos, .. }
            | Self::Composite { pos, .. }
            | Self::Lit { pos, .. }
            | Self::Ellipsis { pos, .. }
            | Self::ArrayType { pos, .. }
            | Self::MapType { pos, .. }
            | Self::ChanType { pos, .. }
            | Self::StructType { pos, .. }
            | Self::InterfaceType { pos, .. } => *pos,
        }
    }

    /// Strips any number of enclosing parentheses.
    #[must_use]
    pub fn unparen(&self) -> &Self {
        let mut expr = self;
        while let Self::Paren { inner, .. } = expr {
            expr = inner;
        }
        expr
    }
}

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Self::Ident(ident)
    }
}

impl From<SelectorExpr> for Expr {
    fn from(sel: SelectorExpr) -> Self {
        Self::Selector(sel)
    }
}

impl From<CallExpr> for Expr {
    fn from(call: CallExpr) -> Self {
        Self::Call(call)
    }
}

/// A `{ ... }` statement list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Position of the opening brace.
    pub pos: Pos,
    /// Statements in source order.
    pub stmts: Vec<Stmt>,
}

/// Statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// An expression used as a statement.
    Expr(Expr),
    /// `lhs = rhs` or `lhs := rhs`.
    Assign {
        /// Assigned expressions.
        lhs: Vec<Expr>,
        /// Whether this is a short variable declaration (`:=`).
        define: bool,
        /// Assigned values.
        rhs: Vec<Expr>,
    },
    /// A local `var`/`const`/`type` declaration.
    Decl(GenDecl),
    /// `return results...`
    Return {
        /// Position of the `return` keyword.
        pos: Pos,
        /// Returned expressions.
        results: Vec<Expr>,
    },
    /// A nested block.
    Block(Block),
    /// `if init; cond { then } else els`
    If {
        /// Position of the `if` keyword.
        pos: Pos,
        /// Optional init statement.
        init: Option<Box<Stmt>>,
        /// Condition.
        cond: Expr,
        /// Then branch.
        then: Block,
        /// Else branch: a block or another `if`.
        els: Option<Box<Stmt>>,
    },
    /// `for init; cond; post { body }`
    For {
        /// Position of the `for` keyword.
        pos: Pos,
        /// Optional init statement.
        init: Option<Box<Stmt>>,
        /// Optional condition.
        cond: Option<Expr>,
        /// Optional post statement.
        post: Option<Box<Stmt>>,
        /// Loop body.
        body: Block,
    },
    /// `go call`
    Go {
        /// Position of the `go` keyword.
        pos: Pos,
        /// Spawned call.
        call: Expr,
    },
    /// `defer call`
    Defer {
        /// Position of the `defer` keyword.
        pos: Pos,
        /// Deferred call.
        call: Expr,
    },
    /// `label: stmt`
    Labeled {
        /// Label.
        label: Ident,
        /// Labeled statement.
        stmt: Box<Stmt>,
    },
    /// `chan <- value`
    Send {
        /// Channel.
        chan: Expr,
        /// Sent value.
        value: Expr,
    },
    /// `x++` or `x--`
    IncDec {
        /// Operand.
        expr: Expr,
        /// Whether this is `++`.
        inc: bool,
    },
    /// `break`, `continue`, `goto` or `fallthrough`.
    Branch {
        /// Position of the keyword.
        pos: Pos,
        /// Keyword.
        kind: BranchKind,
        /// Target label, if written.
        label: Option<Ident>,
    },
    /// `switch init; tag { clauses }`
    Switch {
        /// Position of the `switch` keyword.
        pos: Pos,
        /// Optional init statement.
        init: Option<Box<Stmt>>,
        /// Tag expression; `None` for `switch { ... }`.
        tag: Option<Expr>,
        /// Case clauses in source order.
        clauses: Vec<CaseClause>,
    },
    /// `switch init; x := y.(type) { clauses }`
    TypeSwitch {
        /// Position of the `switch` keyword.
        pos: Pos,
        /// Optional init statement.
        init: Option<Box<Stmt>>,
        /// The `x := y.(type)` or `y.(type)` statement.
        assign: Box<Stmt>,
        /// Case clauses in source order.
        clauses: Vec<CaseClause>,
    },
    /// `select { clauses }`
    Select {
        /// Position of the `select` keyword.
        pos: Pos,
        /// Communication clauses in source order.
        clauses: Vec<CommClause>,
    },
    /// `for key, value := range expr { body }`
    Range {
        /// Position of the `for` keyword.
        pos: Pos,
        /// Key or index, if written.
        key: Option<Expr>,
        /// Value, if written.
        value: Option<Expr>,
        /// Whether the loop variables are declared with `:=`.
        define: bool,
        /// Ranged-over expression.
        expr: Expr,
        /// Loop body.
        body: Block,
    },
}

/// Keyword of a branch statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `goto`
    Goto,
    /// `fallthrough`
    Fallthrough,
}

/// `case list: body` of a switch; `default:` when `list` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseClause {
    /// Position of the `case` or `default` keyword.
    pub pos: Pos,
    /// Case expressions, or types in a type switch.
    pub list: Vec<Expr>,
    /// Statements of the clause.
    pub body: Vec<Stmt>,
}

/// `case comm: body` of a select; `default:` when `comm` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommClause {
    /// Position of the `case` or `default` keyword.
    pub pos: Pos,
    /// Send or receive statement.
    pub comm: Option<Box<Stmt>>,
    /// Statements of the clause.
    pub body: Vec<Stmt>,
}

impl Stmt {
    /// Returns the position of the first token of the statement.
    #[must_use]
    pub fn pos(&self) -> Pos {
        match self {
            Self::Expr(expr) => expr.pos(),
            Self::Assign { lhs, rhs, .. } => lhs
                .first()
                .or_else(|| rhs.first())
                .map_or(Pos::new(FileId(0), 0), Expr::pos),
            Self::Decl(decl) => decl.pos,
            Self::Block(block) => block.pos,
            Self::Labeled { label, .. } => label.pos,
            Self::Send { chan, .. } => chan.pos(),
            Self::IncDec { expr, .. } => expr.pos(),
            Self::Return { pos, .. }
            | Self::If { pos, .. }
            | Self::For { pos, .. }
            | Self::Go { pos, .. }
            | Self::Defer { pos, .. }
            | Self::Branch { pos, .. }
            | Self::Switch { pos, .. }
            | Self::TypeSwitch { pos, .. }
            | Self::Select { pos, .. }
            | Self::Range { pos, .. } => *pos,
        }
    }
}

/// A parameter (or result, or receiver) group: zero or more names sharing
/// one type expression, e.g. `a, b int`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Bound names; empty for an anonymous parameter.
    pub names: Vec<Ident>,
    /// Declared type.
    pub ty: Expr,
}

impl Field {
    /// Creates a parameter group.
    #[must_use]
    pub fn new(names: Vec<Ident>, ty: impl Into<Expr>) -> Self {
        Self {
            names,
            ty: ty.into(),
        }
    }

    /// Returns the position of the first name, or of the type when anonymous.
    #[must_use]
    pub fn pos(&self) -> Pos {
        self.names.first().map_or_else(|| self.ty.pos(), |n| n.pos)
    }
}

/// A parenthesized list of parameter groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    /// Groups in source order.
    pub fields: Vec<Field>,
}

impl FieldList {
    /// Creates a list from groups.
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

/// A function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncType {
    /// Position of the `func` keyword.
    pub pos: Pos,
    /// Parameter groups.
    pub params: FieldList,
    /// Result groups, if any.
    pub results: Option<FieldList>,
}

/// A top-level function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    /// Receiver; `Some` makes this a method.
    pub recv: Option<FieldList>,
    /// Declared name.
    pub name: Ident,
    /// Signature.
    pub ty: FuncType,
    /// Body; `None` for an external declaration.
    pub body: Option<Block>,
}

impl FuncDecl {
    /// Whether this declares a method rather than a free function.
    #[must_use]
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }
}

/// Keyword of a general declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenKind {
    /// `import`
    Import,
    /// `const`
    Const,
    /// `type`
    Type,
    /// `var`
    Var,
}

/// One specification inside a general declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spec {
    /// `name "path"`
    Import {
        /// Local alias, if written.
        name: Option<Ident>,
        /// Imported package path.
        path: String,
    },
    /// `names type = values`
    Value {
        /// Declared names.
        names: Vec<Ident>,
        /// Declared type, if written.
        ty: Option<Expr>,
        /// Initial values.
        values: Vec<Expr>,
    },
    /// `name type`
    Type {
        /// Declared name.
        name: Ident,
        /// Underlying type expression.
        ty: Expr,
    },
}

/// An `import`, `const`, `type` or `var` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenDecl {
    /// Position of the keyword.
    pub pos: Pos,
    /// Keyword.
    pub kind: GenKind,
    /// Specifications in source order.
    pub specs: Vec<Spec>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// Function or method.
    Func(FuncDecl),
    /// Import, const, type or var.
    Gen(GenDecl),
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Index of this file within its package.
    pub id: FileId,
    /// Path as supplied by the host.
    pub path: PathBuf,
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
    /// Identifiers used in this file that refer to a declaration outside of
    /// it: symbols from other files of the package, and imported package
    /// names. Kept in host enumeration order.
    pub unresolved: Vec<Ident>,
    /// Line starts, for position resolution.
    pub lines: LineIndex,
}

impl SourceFile {
    /// Function declarations of this file, in source order.
    pub fn funcs(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Func(func) => Some(func),
            Decl::Gen(_) => None,
        })
    }
}

/// The unit of analysis: files type-checked together, with their shared
/// type information.
#[derive(Debug, Clone)]
pub struct Package {
    /// Import path of the package.
    pub path: String,
    /// Files in package order.
    pub files: Vec<SourceFile>,
    /// Resolved symbols for identifiers and selectors.
    pub info: TypeInfo,
}

impl Package {
    /// Returns the file a position belongs to.
    #[must_use]
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }

    /// Resolves a position into path, line and column.
    ///
    /// Returns `None` if the position names a file outside this package.
    #[must_use]
    pub fn position(&self, pos: Pos) -> Option<Position<'_>> {
        let file = self.file(pos.file)?;
        let (line, column) = file.lines.line_col(pos.offset);
        Some(Position {
            path: file.path.as_path(),
            line,
            column,
            offset: pos.offset as usize,
        })
    }
}
