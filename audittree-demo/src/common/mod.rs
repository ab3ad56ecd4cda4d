pub mod cli;
pub mod utils;
