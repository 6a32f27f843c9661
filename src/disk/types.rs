/// 阵列中的磁盘数量
pub const DISK_COUNT: u32 = 16;

/// 每块磁盘的容量（字节）：64KB
pub const DISK_SIZE: u32 = 65536;

/// 每个逻辑块（Block）的大小：256B
/// 设备以“块”为最小读写单位。
pub const BLOCK_SIZE: usize = 256;

/// 每块磁盘包含的块数：64KB / 256B = 256 块
pub const BLOCKS_PER_DISK: u32 = DISK_SIZE / BLOCK_SIZE as u32;

/// 线性地址空间总大小：16 * 64KB = 1MB
pub const ARRAY_SIZE: u64 = DISK_COUNT as u64 * DISK_SIZE as u64;

/// 单次读取允许的最大长度（字节）
pub const MAX_READ_SIZE: u32 = 1024;

const _: () = assert!(DISK_SIZE as usize % BLOCK_SIZE == 0);

/// 一个逻辑块（256 字节），设备读写都以 Block 为单位进行。
pub type Block = [u8; BLOCK_SIZE];

/// 线性地址分解后的坐标：(磁盘号, 块号, 块内偏移)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockAddr {
    pub disk: u32,
    pub block: u32,
    pub offset: usize,
}

impl BlockAddr {
    /// 调用方保证 `addr < ARRAY_SIZE`
    pub fn from_linear(addr: u32) -> Self {
        let disk = addr / DISK_SIZE;
        let within_disk = addr % DISK_SIZE;
        Self {
            disk,
            block: within_disk / BLOCK_SIZE as u32,
            offset: (addr as usize) % BLOCK_SIZE,
        }
    }
}
