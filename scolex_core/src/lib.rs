//! # Scolex Core
//!
//! Dynamic S-expression values backed by an interned symbol registry.
//!
//! - **Values**: a tagged union over nil, boolean, number, string, symbol and
//!   list, with deep-copy value semantics and cons-style list access
//! - **Symbols**: thread-safe interning with O(1) identity equality
//! - **Rendering**: a canonical, deterministic text form
//! - **Error Handling**: result types and error definitions

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod render;
pub mod symbol;
pub mod value;

pub use error::{ScolexError, ScolexResult};
pub use symbol::{CollisionPolicy, GLOBAL_REGISTRY, RegistryConfig, Symbol, SymbolRegistry};
pub use value::{Tag, Value};

/// Scolex version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
