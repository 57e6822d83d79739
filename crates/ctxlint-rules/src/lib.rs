//! # ctxlint-rules
//!
//! Built-in lint rules for ctxlint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CL001 | `ctxlint` | Context first and named `ctx`; no `context.Background()` outside tests |
//! | CL002 | `underscorevisibility` | `_`-prefixed symbols stay in their own file |
//!
//! ## Usage
//!
//! ```ignore
//! use ctxlint_core::Analyzer;
//! use ctxlint_rules::default_registry;
//!
//! let analyzer = Analyzer::builder()
//!     .registry(default_registry()?)?
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ctxlint;
mod presets;
pub mod underscore_visibility;

pub use ctxlint::ContextRule;
pub use presets::{all_rules, default_registry, registry_from_config};
pub use underscore_visibility::VisibilityRule;
