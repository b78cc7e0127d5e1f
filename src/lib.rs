//! Context-free grammars, their Chomsky normal form, and CYK membership.
//!
//! A [`grammar::Grammar`] is validated on construction, wrapped as a
//! [`grammar::ContextFreeGrammar`], and handed to [`cyk::Cyk`], which
//! normalizes it once and then answers `predict` queries.

pub mod cyk;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
pub mod session;
