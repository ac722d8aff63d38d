//! G-Code tokenizing and interpretation
//!
//! This module provides:
//! - Statement tokenizing with soft numeric parsing
//! - Command classification (`G0`/`G1` motion, `G90`/`G91` distance mode)
//! - Absolute-mode position tracking and node extraction
//! - Duplicate node detection
//! - Text normalisation

pub mod command;
pub mod formatter;
pub mod interpreter;
pub mod parser;
pub mod validator;

pub use command::*;
pub use formatter::*;
pub use interpreter::*;
pub use parser::*;
pub use validator::*;
