//! Semantic analysis pass
//!
//! This module hosts the per-compilation semantic machinery:
//! - Function signatures and the builtin signature catalog
//! - Overload resolution producing static or dynamic call plans
//! - The EXCLUDE-path subsumption compiler
//! - The analyzer that annotates expression trees with types and plans

mod analyzer;
mod exclude;
mod resolver;
mod signature;

pub use analyzer::*;
pub use exclude::*;
pub use resolver::*;
pub use signature::*;
