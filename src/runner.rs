//! Runtime of the analysis engine.

pub mod ds;
pub mod eval;
pub mod plugin;
pub mod std_lib;
