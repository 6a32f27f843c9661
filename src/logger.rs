use std::io::{stderr, Write};

use chrono::Local;
use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// 输出到 stderr 的彩色日志，不与 shell 的 stdout 输出混在一起
struct ShellLogger;

static LOGGER: ShellLogger = ShellLogger;

impl Log for ShellLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green(),
            Level::Debug => "DEBUG".blue(),
            Level::Trace => "TRACE".bright_black(),
        };
        let _ = writeln!(
            stderr(),
            "{} {} {}: {}",
            Local::now().format("%H:%M:%S%.3f").to_string().bright_black(),
            level,
            record.target().bright_black(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = stderr().flush();
    }
}

/// 初始化 log 门面，重复调用时只调整级别
pub fn init_logger(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
