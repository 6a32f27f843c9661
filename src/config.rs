use std::{env, path::PathBuf};

use log::LevelFilter;

/// 镜像目录，未设置时使用 `./jbod`
pub const DIR_ENV: &str = "MINIJBOD_DIR";
/// 日志级别：off / error / warn / info / debug / trace
pub const LOG_ENV: &str = "MINIJBOD_LOG";

const DEFAULT_DIR: &str = "jbod";
const HISTORY_FILE: &str = ".minijbod_history";
const HISTORY_SIZE: usize = 100;

/// shell 运行配置
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub image_dir: PathBuf,    // 磁盘镜像所在目录
    pub history_path: PathBuf, // 命令历史文件
    pub history_size: usize,   // 历史保留条数
    pub log_level: LevelFilter,
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_vars(env::var(DIR_ENV).ok(), env::var(LOG_ENV).ok())
    }

    fn from_vars(dir: Option<String>, level: Option<String>) -> Self {
        let image_dir = dir
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));

        let log_level = level
            .and_then(|l| l.trim().parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Warn);

        let history_path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(HISTORY_FILE);

        Self {
            image_dir,
            history_path,
            history_size: HISTORY_SIZE,
            log_level,
        }
    }
}
