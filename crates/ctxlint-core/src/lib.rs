//! # ctxlint-core
//!
//! Core framework for linting type-checked Go-style packages.
//!
//! The host loads and type-checks packages, then hands them over as a
//! [`Package`]: syntax trees per file plus a [`TypeInfo`] mapping identifier
//! and selector nodes to the symbols they resolve to. This crate provides:
//!
//! - [`Rule`] trait for per-package rules
//! - [`Registry`] for building the set of available rules explicitly
//! - [`Analyzer`] for running rules and turning findings into [`Violation`]s
//! - [`walk`] and [`Visitor`] for traversals with explicit pruning
//! - [`object_for`] and [`name_of`] for resolving references to symbols
//! - [`PackageBuilder`] for assembling packages by hand
//!
//! ## Example
//!
//! ```ignore
//! use ctxlint_core::{Analyzer, Config};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())?
//!     .config(Config::from_file("ctxlint.toml".as_ref())?)
//!     .build()?;
//!
//! let result = analyzer.analyze(&packages);
//! print!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod ast;
mod builder;
mod config;
mod position;
mod registry;
mod resolve;
mod rule;
mod testfile;
mod typeinfo;
mod types;

/// Syntax tree traversal.
pub mod visit;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use ast::{
    Block, BranchKind, CallExpr, CaseClause, ChanDir, CommClause, Decl, Expr, Field, FieldList,
    FuncDecl, FuncLit, FuncType, GenDecl, GenKind, Ident, LitKind, NodeId, Package, SelectorExpr,
    SourceFile, Spec, Stmt,
};
pub use builder::{FileBuilder, PackageBuilder};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use position::{FileId, LineIndex, Pos, Position};
pub use registry::{Registry, RegistryError};
pub use resolve::{expr_name, name_of, object_for};
pub use rule::{Rule, RuleBox};
pub use testfile::{TestFileConvention, DEFAULT_TEST_SUFFIX};
pub use typeinfo::{Selection, SelectionKind, Symbol, SymbolKind, TypeInfo};
pub use types::{Diagnostic, LintResult, Location, Severity, Violation, ViolationDiagnostic};
pub use visit::{walk, walk_file, Node, Visitor, Walk};
