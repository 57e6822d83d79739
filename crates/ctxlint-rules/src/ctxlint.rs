//! Rule governing the use of cancellation contexts.
//!
//! # Rationale
//!
//! A function that needs a context should receive it from its caller, so
//! that cancellation and deadlines propagate. Creating a fresh root context
//! with `context.Background()` cuts that chain. Passing the context as the
//! first parameter, named `ctx`, keeps call sites uniform.
//!
//! # Detected Patterns
//!
//! - A parameter group of the context type that is not the first group, or
//!   that binds more than one name
//! - A context parameter named anything other than `ctx` or `_`
//! - Any reference to the background constructor outside test files
//!
//! # Allowed Patterns
//!
//! - `context.Background()` in test files
//! - `context.Background()` inside the free functions `init` and `main`
//!
//! # Configuration
//!
//! - `context_type`: full name of the context type (default `context.Context`)
//! - `background_func`: full name of the background constructor
//!   (default `context.Background`)

use ctxlint_core::{
    expr_name, name_of, walk_file, Diagnostic, FuncDecl, Node, Package, Pos, Rule, SourceFile,
    TestFileConvention, TypeInfo, Visitor, Walk,
};
use tracing::{debug, trace};

/// Rule code for ctxlint.
pub const CODE: &str = "CL001";

/// Rule name for ctxlint.
pub const NAME: &str = "ctxlint";

/// Default full name of the context type.
pub const DEFAULT_CONTEXT_TYPE: &str = "context.Context";

/// Default full name of the background constructor.
pub const DEFAULT_BACKGROUND_FUNC: &str = "context.Background";

/// Checks context parameters and forbids the background constructor.
#[derive(Debug, Clone)]
pub struct ContextRule {
    context_type: String,
    background_func: String,
    test_files: TestFileConvention,
}

impl Default for ContextRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextRule {
    /// Creates a new rule recognizing the standard context package.
    #[must_use]
    pub fn new() -> Self {
        Self {
            context_type: DEFAULT_CONTEXT_TYPE.to_string(),
            background_func: DEFAULT_BACKGROUND_FUNC.to_string(),
            test_files: TestFileConvention::default(),
        }
    }

    /// Sets the full name of the context type, e.g. `example.com/ctx.Context`.
    #[must_use]
    pub fn with_context_type(mut self, name: impl Into<String>) -> Self {
        self.context_type = name.into();
        self
    }

    /// Sets the full name of the background constructor.
    #[must_use]
    pub fn with_background_func(mut self, name: impl Into<String>) -> Self {
        self.background_func = name.into();
        self
    }

    /// Sets how test files are recognized.
    #[must_use]
    pub fn with_test_files(mut self, test_files: TestFileConvention) -> Self {
        self.test_files = test_files;
        self
    }

    fn first_parameter_message(&self) -> String {
        format!("{} should be the first parameter", bare_name(&self.context_type))
    }

    fn parameter_name_message(&self) -> String {
        format!(
            "{} parameter should be called 'ctx'",
            bare_name(&self.context_type)
        )
    }

    fn background_message(&self) -> String {
        let (package, name) = split_full_name(&self.background_func);
        let display = match package {
            Some(package) => format!("{}.{name}()", package.rsplit('/').next().unwrap_or(package)),
            None => format!("{name}()"),
        };
        format!("do not use {display} outside tests")
    }

    /// Reports context parameters that are misplaced or misnamed.
    fn check_parameters(&self, file: &SourceFile, info: &TypeInfo, out: &mut Vec<Diagnostic>) {
        for func in file.funcs() {
            for (i, param) in func.ty.params.fields.iter().enumerate() {
                if expr_name(&param.ty, info).as_deref() != Some(self.context_type.as_str()) {
                    continue;
                }
                if i != 0 || param.names.len() > 1 {
                    out.push(Diagnostic::new(param.pos(), self.first_parameter_message()));
                }
                // Unnamed parameters have nothing to check.
                if let Some(name) = param.names.first() {
                    if name.name != "ctx" && !name.is_blank() {
                        out.push(Diagnostic::new(param.pos(), self.parameter_name_message()));
                    }
                }
            }
        }
    }

    /// Reports every reference to the background constructor.
    fn check_background(&self, file: &SourceFile, info: &TypeInfo, out: &mut Vec<Diagnostic>) {
        let mut visitor = BackgroundVisitor {
            target: &self.background_func,
            message: self.background_message(),
            info,
            out,
        };
        walk_file(&mut visitor, file);
    }
}

impl Rule for ContextRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "prohibits context.Background in most cases, as well as checking that \
         Context is always the first parameter and is named ctx."
    }

    fn run(&self, pkg: &Package) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for file in &pkg.files {
            self.check_parameters(file, &pkg.info, &mut diagnostics);

            if self.test_files.is_test(&file.path) {
                debug!("{NAME}: allowing background contexts in {}", file.path.display());
                continue;
            }
            self.check_background(file, &pkg.info, &mut diagnostics);
        }
        diagnostics
    }
}

struct BackgroundVisitor<'r, 'i> {
    target: &'r str,
    message: String,
    info: &'i TypeInfo,
    out: &'r mut Vec<Diagnostic>,
}

impl<'a> Visitor<'a> for BackgroundVisitor<'_, '_> {
    fn enter(&mut self, node: Node<'a>) -> Walk {
        if name_of(node, self.info).as_deref() == Some(self.target) {
            if let Some(pos) = node_pos(node) {
                trace!("{NAME}: background constructor at offset {}", pos.offset);
                self.out.push(Diagnostic::new(pos, self.message.clone()));
            }
            // The selected name resolves to the same function.
            return Walk::Skip;
        }
        if let Node::FuncDecl(func) = node {
            if is_entry_point(func) {
                return Walk::Skip;
            }
        }
        Walk::Descend
    }
}

/// Free functions `init` and `main` have no caller context to inherit.
fn is_entry_point(func: &FuncDecl) -> bool {
    !func.is_method() && matches!(func.name.name.as_str(), "init" | "main")
}

fn node_pos(node: Node<'_>) -> Option<Pos> {
    match node {
        Node::Expr(expr) => Some(expr.pos()),
        Node::Ident(ident) => Some(ident.pos),
        _ => None,
    }
}

/// Splits `path/to/pkg.Name` into its package path and name.
fn split_full_name(full: &str) -> (Option<&str>, &str) {
    match full.rsplit_once('.') {
        Some((package, name)) => (Some(package), name),
        None => (None, full),
    }
}

fn bare_name(full: &str) -> &str {
    split_full_name(full).1
}
