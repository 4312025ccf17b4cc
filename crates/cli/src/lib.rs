pub mod browser;
pub mod cli;
pub mod env;
pub mod logging;
