use thiserror::Error;

#[cfg(test)]
use crate::disk::op::JbodOp;
use crate::disk::types::Block;

/// 设备层错误
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Disk I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Device is not mounted")]
    NotMounted,
    #[error("Device is already mounted")]
    AlreadyMounted,
    #[error("Invalid disk index: {0}")]
    InvalidDisk(u32),
    #[error("Invalid block index: {0}")]
    InvalidBlock(u32),
    #[error("Read of disk {disk} block {block} does not match the device head")]
    HeadMismatch { disk: u32, block: u32 },
    #[cfg(test)]
    #[error("Device fault during {0}")]
    Fault(JbodOp),
    #[error("Array metadata corrupted: {0}")]
    Corrupted(String),
    #[error("Array metadata encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, DeviceError>;

/// JBOD 设备接口：挂载/卸载、寻道、按块读取。
///
/// 设备内部维护一个磁头位置 (disk, block)。`read_block` 带上调用方期望的坐标，
/// 与磁头不一致时返回 `HeadMismatch`；读取成功后磁头前进到同一磁盘的下一块，
/// 越过磁盘最后一块的读取返回 `InvalidBlock`。
pub trait JbodDevice: Send {
    fn mount(&mut self) -> Result<()>;
    fn unmount(&mut self) -> Result<()>;
    fn seek_to_disk(&mut self, disk: u32) -> Result<()>;
    fn seek_to_block(&mut self, block: u32) -> Result<()>;
    fn read_block(&mut self, disk: u32, block: u32, buf: &mut Block) -> Result<()>;
}
