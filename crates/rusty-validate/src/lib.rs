//! # rusty-validate
//!
//! Struct field validation driven by per-field directives and a registry of
//! named, user-supplied validator functions.
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_validate::{anyhow, Record, Validators};
//!
//! #[derive(Record)]
//! struct Signup {
//!     #[validate("long")]
//!     username: String,
//!
//!     #[validate("long,short")]
//!     nickname: String,
//!
//!     bio: String,
//! }
//!
//! let mut vd = Validators::new();
//! vd.insert("long", |v| match v.downcast_ref::<String>() {
//!     Some(s) if s.len() < 5 => Err(anyhow!("{:?} is too short", s)),
//!     _ => Ok(()),
//! });
//! vd.insert("short", |v| match v.downcast_ref::<String>() {
//!     Some(s) if s.len() >= 5 => Err(anyhow!("{:?} is too long", s)),
//!     _ => Ok(()),
//! });
//!
//! let errors = vd.validate(&Signup {
//!     username: "hello there".into(),
//!     nickname: "help me".into(),
//!     bio: "not validated".into(),
//! });
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].to_string(), r#"field nickname is invalid: "help me" is too long"#);
//! ```
//!
//! ## Directives
//!
//! A field's `validate` directive is a comma separated list of validator
//! names, each optionally followed by bracketed parameters:
//! `long,between[4,7],struct`. The reserved name `struct` validates the
//! field's value as a nested record, prefixing its paths with the field's
//! own name.
//!
//! ## Features
//!
//! - **`builtins`** (default) - stock validators such as `nonzero`,
//!   `min_len[n]`, `between[lo,hi]` and `regex[pattern]`

// Lets the derive's `::rusty_validate::` paths resolve inside this crate's own tests.
extern crate self as rusty_validate;

pub mod directive;
pub mod error;
pub mod options;
pub mod record;
pub mod registry;

mod engine;

#[cfg(feature = "builtins")]
pub mod builtins;

pub use directive::{parse_directive, Directive, STRUCT_DIRECTIVE};
pub use error::{BadField, FieldError, FieldReport, ValidationErrors};
pub use options::{ValidateOptions, DEFAULT_DIRECTIVE_KEY};
pub use record::{Access, Field, Inspect, Record, Tags};
pub use registry::{Validator, Validators};

// Re-export derive macro
pub use rusty_validate_derive::Record;

// Validators report failures as anyhow errors
pub use anyhow::{anyhow, bail, Error, Result};
