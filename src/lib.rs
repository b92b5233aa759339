//! Doccov - public API documentation coverage analysis
//!
//! Measures how much of a project's (or solution's) public API carries
//! documentation comments and reports the result through one of several
//! CI-aware output channels.

pub mod analyzer;
pub mod cli;
pub mod health;
pub mod models;
pub mod parser;
pub mod reporters;
pub mod resolver;
