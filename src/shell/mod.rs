pub mod command;
pub mod parse;

use crate::{
    array::{LinearArray, MountState},
    config::ShellConfig,
    disk::{init::perform_disk_initialization, DeviceError, FileJbod, TracedDevice},
    shell::{
        command::{execute_command, Command},
        parse::parse_command,
    },
};
use colored::*;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use reedline::{DefaultCompleter, DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::{io::stdout, sync::mpsc, thread};

/// shell 使用的阵列：镜像文件设备外面包一层操作记录
pub type ShellArray = LinearArray<TracedDevice<FileJbod>>;

/// 后台初始化线程发回的启动进度
#[derive(Debug)]
pub enum BootProgress {
    Step(&'static str),
    Progress(u64),
    Finished(Result<TracedDevice<FileJbod>, DeviceError>),
}

pub fn start_shell(config: &ShellConfig) {
    let mut array = match boot(config) {
        Ok(device) => LinearArray::new(device),
        Err(e) => {
            println!("{} {}", "❌ Boot failed:".red().bold(), e);
            return;
        }
    };

    let username = whoami::username();
    let hostname = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());

    println!(
        "{}",
        "Type 'help' for available commands. Use ↑↓ for history, Tab for auto-completion.\n"
            .bright_black()
    );

    let mut line_editor = Reedline::create();
    match FileBackedHistory::with_file(config.history_size, config.history_path.clone()) {
        Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
        Err(e) => warn!("command history disabled: {}", e),
    }

    // 命令补全
    let commands = vec![
        "help", "mount", "unmount", "read", "info", "trace", "format", "exit",
    ];
    let completer =
        DefaultCompleter::new_with_wordlen(commands.iter().map(|c| c.to_string()).collect(), 2);
    line_editor = line_editor.with_completer(Box::new(completer));

    loop {
        let state = if array.state() == MountState::Mounted {
            "mounted".green()
        } else {
            "unmounted".red()
        };
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(format!(
                "{}:{}",
                format!("{}@{}", username, hostname).green(),
                state
            )),
            DefaultPromptSegment::Basic("MiniJBOD".bright_blue().bold().to_string()),
        );

        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(buffer)) => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_command(trimmed) {
                    Some(cmd) => {
                        if let Err(e) = execute_command(&cmd, &mut array) {
                            println!("{} {}", "❌ Error:".red().bold(), e);
                        }
                        if matches!(cmd, Command::Exit) {
                            break;
                        }
                    }
                    None => println!(
                        "{}",
                        "⚠️  Unknown command. Type 'help' for command list.".yellow()
                    ),
                }
            }
            Ok(Signal::CtrlD) => {
                println!("{}", "Exiting MiniJBOD...".yellow());
                break;
            }
            Ok(_) => {
                println!();
                continue;
            }
            Err(e) => {
                println!("Error reading line: {}", e);
                break;
            }
        }
    }

    // 退出前卸载，保证镜像落盘
    if array.state() == MountState::Mounted {
        if let Err(e) = array.unmount() {
            println!("{} {}", "❌ Error:".red().bold(), e);
        }
    }
    println!("{}", "GoodBye!".bright_yellow());
}

/// 启动动画：后台线程打开镜像目录，这里跟随进度刷新进度条
fn boot(config: &ShellConfig) -> Result<TracedDevice<FileJbod>, DeviceError> {
    let mut stdout = stdout();
    let _ = execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0));
    println!("{}", "[MiniJBOD Booting...]".bright_yellow().bold());

    let (tx, rx) = mpsc::channel();
    let dir = config.image_dir.clone();
    thread::spawn(move || perform_disk_initialization(dir, tx));

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut result = None;
    for progress in rx {
        match progress {
            BootProgress::Step(step) => pb.println(step),
            BootProgress::Progress(n) => pb.set_position(n),
            BootProgress::Finished(r) => {
                result = Some(r);
                break;
            }
        }
    }

    let device = match result {
        Some(Ok(device)) => device,
        Some(Err(e)) => {
            pb.abandon_with_message("❌ Boot failed");
            return Err(e);
        }
        None => {
            pb.abandon_with_message("❌ Initialization thread exited");
            return Err(DeviceError::Corrupted(
                "disk initialization did not finish".to_string(),
            ));
        }
    };
    pb.finish_with_message("✅ Ready!");

    let _ = execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print(format!("Welcome to MiniJBOD v{}\n", env!("CARGO_PKG_VERSION"))),
        ResetColor
    );
    Ok(device)
}
