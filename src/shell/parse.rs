use crate::shell::command::Command;

pub fn parse_command(input: &str) -> Option<Command> {
    let tokens: Vec<&str> = input.trim().split_ascii_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    let cmd = tokens[0];
    let args = &tokens[1..];

    match cmd {
        "help" => Some(Command::Help),
        "mount" => Some(Command::Mount),
        "unmount" | "umount" => Some(Command::Unmount),
        "read" => {
            if args.len() == 2 {
                Some(Command::Read(parse_number(args[0])?, parse_number(args[1])?))
            } else {
                None
            }
        }
        "info" => Some(Command::Info),
        "trace" => match args {
            [] => Some(Command::Trace),
            ["clear"] => Some(Command::TraceClear),
            _ => None,
        },
        "format" => Some(Command::Format),
        "exit" | "quit" => Some(Command::Exit),
        _ => None,
    }
}

/// 十进制或 `0x` 前缀的十六进制
fn parse_number(token: &str) -> Option<u32> {
    match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}
