use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;

use crate::{
    array::{ArrayError, MountState},
    disk::{ARRAY_SIZE, BLOCK_SIZE, DISK_COUNT, DISK_SIZE, MAX_READ_SIZE},
    shell::ShellArray,
    utils::hex_dump,
};

#[derive(Debug)]
pub enum Command {
    Help,
    Mount,
    Unmount,
    Read(u32, u32),
    Info,
    Trace,
    TraceClear,
    Format,
    Exit,
}

pub fn execute_command(cmd: &Command, array: &mut ShellArray) -> Result<(), Box<dyn Error>> {
    match cmd {
        Command::Help => print_help(),
        Command::Mount => {
            array.mount()?;
            println!("✅ {}", "Array mounted".green());
        }
        Command::Unmount => {
            array.unmount()?;
            println!("📤 {}", "Array unmounted".yellow());
        }
        Command::Read(start, len) => {
            // 超限的长度交给 read 拒绝，缓冲区不按用户给的长度分配
            let mut buf = vec![0u8; (*len).min(MAX_READ_SIZE) as usize];
            let n = array.read(*start, *len, &mut buf)?;
            println!(
                "📖 Read {} bytes at {}",
                n,
                format!("{:#x}", start).cyan()
            );
            print!("{}", hex_dump(*start, &buf[..n]));
        }
        Command::Info => print_info(array),
        Command::Trace => {
            let device = array.device();
            println!(
                "{} ({} total)",
                "🔎 Recent device operations".bright_yellow().bold(),
                device.total()
            );
            for op in device.recent() {
                println!("  {:#06x}  {}", op.encode(), op);
            }
        }
        Command::TraceClear => {
            array.device_mut().clear();
            println!("🧹 {}", "Device trace cleared".yellow());
        }
        Command::Format => {
            if array.state() == MountState::Mounted {
                return Err(Box::new(ArrayError::AlreadyMounted));
            }
            println!("💾 Formatting disk images...");
            let pb = ProgressBar::new(DISK_COUNT as u64);
            pb.set_style(
                ProgressStyle::with_template("[{bar:40.green/black}] {pos:>2}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            array.device_mut().inner_mut().format(|_| pb.inc(1))?;
            pb.finish_with_message("✅ Images formatted successfully!");
        }
        Command::Exit => println!("{}", "👋 Exiting MiniJBOD shell...".yellow().bold()),
    }

    Ok(())
}

fn print_info(array: &ShellArray) {
    let disk = array.device().inner();
    let manifest = disk.manifest();
    let state = match array.state() {
        MountState::Mounted => "mounted".green(),
        MountState::Unmounted => "unmounted".red(),
    };
    println!(
        "{}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {} x {} bytes ({} bytes total)\n{}: {} bytes\n{}: {} bytes\n",
        "📊 Array Info".bright_yellow().bold(),
        "ID".blue(),
        manifest.array_id,
        "Created".blue(),
        manifest.created_at,
        "Images".blue(),
        disk.dir().display(),
        "State".blue(),
        state,
        "Disks".blue(),
        DISK_COUNT,
        DISK_SIZE,
        ARRAY_SIZE,
        "Block size".blue(),
        BLOCK_SIZE,
        "Max read".blue(),
        MAX_READ_SIZE
    );
}

fn print_help() {
    println!("{}", "📘 MiniJBOD Commands".bright_cyan().bold());
    println!(
        "{}",
        "
  mount              Attach the disk array
  unmount            Detach the disk array
  read <addr> <len>  Hex dump <len> bytes at linear address <addr> (0x.. accepted)
  info               Show array geometry and state
  trace              Show recent device operations
  trace clear        Forget recorded device operations
  format             Rewrite disk images with the initial pattern (unmounted only)
  help               Show this help message
  exit               Quit the shell
"
        .bright_black()
    );
}
