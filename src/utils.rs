use chrono::{Local, SecondsFormat};
use uuid::Uuid;

/// 当前本地时间，RFC 3339 格式
pub fn current_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// 生成一个随机唯一 ID
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// 初始化磁盘镜像时写入的确定性内容。
///
/// 每个线性地址对应一个字节：块内偏移异或上全局块号，偶数偏移混入块号低 8 位，
/// 奇数偏移混入高位。任意两个块的内容都不相同，读错块会被立刻看出来。
pub fn pattern_byte(addr: u32) -> u8 {
    let [lo, hi] = ((addr >> 8) as u16).to_le_bytes();
    let mix = if addr & 1 == 0 {
        lo
    } else {
        hi.rotate_left(4) ^ 0xA5
    };
    (addr as u8) ^ mix
}

/// 以 16 字节一行的格式输出十六进制转储，行首为线性地址
pub fn hex_dump(start: u32, data: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in data.chunks(16).enumerate() {
        let addr = start as usize + i * 16;
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        out.push_str(&format!("{:08x}  {:<47}  |{}|\n", addr, hex.join(" "), ascii));
    }
    out
}
