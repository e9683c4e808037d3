pub mod interface;

pub use interface::{execute, init_logging, run, Cli, DEFAULT_PROMPT};
