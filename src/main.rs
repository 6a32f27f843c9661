use crate::{config::ShellConfig, logger::init_logger, shell::start_shell};

mod array;
mod config;
mod disk;
mod logger;
mod shell;
mod utils;

fn main() {
    let config = ShellConfig::from_env();
    init_logger(config.log_level);
    start_shell(&config);
}
