//! # ctxlint
//!
//! Lint rules for context parameters and file-private symbols in
//! type-checked Go-style packages.
//!
//! This is the facade crate that re-exports the core framework and the
//! built-in rules, and adds configuration discovery.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ctxlint::{load_config, run};
//!
//! let config = load_config(project_root, None)?;
//! let result = run(config, &packages)?;
//! if result.has_violations_at(Severity::Error) {
//!     eprint!("{}", result.format_report());
//! }
//! ```
//!
//! ## Configuration
//!
//! `ctxlint.toml` (or `.ctxlint.toml`) in the project root:
//!
//! ```toml
//! fail_on = "error"
//!
//! [analyzer]
//! exclude = ["**/generated/**"]
//! test_suffix = "_test"
//!
//! [rules.ctxlint]
//! severity = "warning"
//! context_type = "context.Context"
//! background_func = "context.Background"
//!
//! [rules.underscorevisibility]
//! enabled = false
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use ctxlint_core::*;

/// Built-in rules and registries.
pub mod rules {
    pub use ctxlint_rules::*;
}

mod runner;

pub use runner::{find_config, load_config, run, RunError, CONFIG_CANDIDATES};
