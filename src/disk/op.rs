use std::fmt;

/// 设备命令码，位于操作字的高位（bit 12 起）
const MOUNT: u32 = 0;
const UNMOUNT: u32 = 1;
const SEEK_TO_DISK: u32 = 2;
const SEEK_TO_BLOCK: u32 = 3;
const READ_BLOCK: u32 = 4;

const COMMAND_SHIFT: u32 = 12;
const BLOCK_SHIFT: u32 = 4;

/// 一次设备操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JbodOp {
    Mount,
    Unmount,
    SeekToDisk(u32),
    SeekToBlock(u32),
    ReadBlock { disk: u32, block: u32 },
}

impl JbodOp {
    /// 打包成单个操作字：`command << 12 | block << 4 | disk`
    ///
    /// 磁盘号占 bit 0~3，块号占 bit 4~11。
    pub fn encode(&self) -> u32 {
        let (command, disk, block) = match *self {
            JbodOp::Mount => (MOUNT, 0, 0),
            JbodOp::Unmount => (UNMOUNT, 0, 0),
            JbodOp::SeekToDisk(disk) => (SEEK_TO_DISK, disk, 0),
            JbodOp::SeekToBlock(block) => (SEEK_TO_BLOCK, 0, block),
            JbodOp::ReadBlock { disk, block } => (READ_BLOCK, disk, block),
        };
        command << COMMAND_SHIFT | (block & 0xFF) << BLOCK_SHIFT | (disk & 0xF)
    }
}

impl fmt::Display for JbodOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mount => write!(f, "MOUNT"),
            Self::Unmount => write!(f, "UNMOUNT"),
            Self::SeekToDisk(disk) => write!(f, "SEEK_TO_DISK disk={}", disk),
            Self::SeekToBlock(block) => write!(f, "SEEK_TO_BLOCK block={}", block),
            Self::ReadBlock { disk, block } => {
                write!(f, "READ_BLOCK disk={} block={}", disk, block)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_and_unmount_words() {
        assert_eq!(JbodOp::Mount.encode(), 0x0000);
        assert_eq!(JbodOp::Unmount.encode(), 0x1000);
    }

    #[test]
    fn coordinates_land_in_low_bits() {
        assert_eq!(JbodOp::SeekToDisk(15).encode(), 0x200F);
        assert_eq!(JbodOp::SeekToBlock(255).encode(), 0x3FF0);
        assert_eq!(JbodOp::ReadBlock { disk: 3, block: 0x12 }.encode(), 0x4123);
    }

    #[test]
    fn display_names_the_operation() {
        let op = JbodOp::ReadBlock { disk: 1, block: 2 };
        assert_eq!(op.to_string(), "READ_BLOCK disk=1 block=2");
    }
}
