//! Command handlers, one module per subcommand.

pub mod atoms;
pub mod check;
pub mod completion;
pub mod config_cmd;
pub mod expand;
pub mod explain;
pub mod normalize;
pub mod parse;
pub mod rank;
