use log::warn;

use crate::{
    disk::{
        block_device::{DeviceError, JbodDevice, Result},
        op::JbodOp,
        types::{Block, ARRAY_SIZE, BLOCKS_PER_DISK, BLOCK_SIZE, DISK_COUNT, DISK_SIZE},
    },
    utils::pattern_byte,
};

/// 内存中的模拟阵列：16 块磁盘拼接成一段扁平字节数组。
#[derive(Debug, Clone)]
pub struct MemJbod {
    image: Vec<u8>,
    mounted: bool,
    disk: u32,
    block: u32,
    ops: usize,
    fail_at: Option<usize>,
}

impl MemJbod {
    /// 全零阵列
    pub fn new() -> Self {
        Self::from_image(vec![0; ARRAY_SIZE as usize])
    }

    /// 按 `pattern_byte` 填充的阵列
    pub fn with_pattern() -> Self {
        Self::from_image((0..ARRAY_SIZE as u32).map(pattern_byte).collect())
    }

    /// 使用给定内容，长度不足补零，超出截断
    pub fn from_image(mut image: Vec<u8>) -> Self {
        image.resize(ARRAY_SIZE as usize, 0);
        Self {
            image,
            mounted: false,
            disk: 0,
            block: 0,
            ops: 0,
            fail_at: None,
        }
    }

    /// 整个阵列的扁平内容，作为读取结果的参照
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// 让从现在起的第 `n` 个操作（从 0 计数）失败
    pub fn fail_at(&mut self, n: usize) {
        self.fail_at = Some(self.ops + n);
    }

    fn issue(&mut self, op: JbodOp) -> Result<()> {
        let seq = self.ops;
        self.ops += 1;
        if self.fail_at == Some(seq) {
            self.fail_at = None;
            warn!("injected fault on {}", op);
            return Err(DeviceError::Fault(op));
        }
        Ok(())
    }
}

impl Default for MemJbod {
    fn default() -> Self {
        Self::new()
    }
}

impl JbodDevice for MemJbod {
    fn mount(&mut self) -> Result<()> {
        self.issue(JbodOp::Mount)?;
        if self.mounted {
            return Err(DeviceError::AlreadyMounted);
        }
        self.mounted = true;
        Ok(())
    }

    fn unmount(&mut self) -> Result<()> {
        self.issue(JbodOp::Unmount)?;
        if !self.mounted {
            return Err(DeviceError::NotMounted);
        }
        self.mounted = false;
        Ok(())
    }

    fn seek_to_disk(&mut self, disk: u32) -> Result<()> {
        self.issue(JbodOp::SeekToDisk(disk))?;
        if !self.mounted {
            return Err(DeviceError::NotMounted);
        }
        if disk >= DISK_COUNT {
            return Err(DeviceError::InvalidDisk(disk));
        }
        self.disk = disk;
        Ok(())
    }

    fn seek_to_block(&mut self, block: u32) -> Result<()> {
        self.issue(JbodOp::SeekToBlock(block))?;
        if !self.mounted {
            return Err(DeviceError::NotMounted);
        }
        if block >= BLOCKS_PER_DISK {
            return Err(DeviceError::InvalidBlock(block));
        }
        self.block = block;
        Ok(())
    }

    fn read_block(&mut self, disk: u32, block: u32, buf: &mut Block) -> Result<()> {
        self.issue(JbodOp::ReadBlock { disk, block })?;
        if !self.mounted {
            return Err(DeviceError::NotMounted);
        }
        if (disk, block) != (self.disk, self.block) {
            return Err(DeviceError::HeadMismatch { disk, block });
        }
        if self.block >= BLOCKS_PER_DISK {
            return Err(DeviceError::InvalidBlock(self.block));
        }
        let start = (self.disk * DISK_SIZE) as usize + self.block as usize * BLOCK_SIZE;
        buf.copy_from_slice(&self.image[start..start + BLOCK_SIZE]);
        self.block += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_advances_head_within_disk() {
        let mut dev = MemJbod::with_pattern();
        dev.mount().unwrap();
        dev.seek_to_disk(2).unwrap();
        dev.seek_to_block(10).unwrap();

        let mut buf: Block = [0; BLOCK_SIZE];
        dev.read_block(2, 10, &mut buf).unwrap();
        let start = (2 * DISK_SIZE) as usize + 10 * BLOCK_SIZE;
        assert_eq!(&buf[..], &dev.image()[start..start + BLOCK_SIZE]);

        dev.read_block(2, 11, &mut buf).unwrap();
        let next = start + BLOCK_SIZE;
        assert_eq!(&buf[..], &dev.image()[next..next + BLOCK_SIZE]);
    }

    #[test]
    fn reading_past_last_block_fails() {
        let mut dev = MemJbod::new();
        dev.mount().unwrap();
        dev.seek_to_disk(0).unwrap();
        dev.seek_to_block(BLOCKS_PER_DISK - 1).unwrap();

        let mut buf: Block = [0; BLOCK_SIZE];
        dev.read_block(0, BLOCKS_PER_DISK - 1, &mut buf).unwrap();
        assert!(matches!(
            dev.read_block(0, BLOCKS_PER_DISK, &mut buf),
            Err(DeviceError::InvalidBlock(b)) if b == BLOCKS_PER_DISK
        ));
    }

    #[test]
    fn rejects_read_away_from_head() {
        let mut dev = MemJbod::with_pattern();
        dev.mount().unwrap();
        dev.seek_to_disk(1).unwrap();
        dev.seek_to_block(4).unwrap();

        let mut buf: Block = [0; BLOCK_SIZE];
        assert!(matches!(
            dev.read_block(1, 5, &mut buf),
            Err(DeviceError::HeadMismatch { disk: 1, block: 5 })
        ));
        assert!(matches!(
            dev.read_block(0, 4, &mut buf),
            Err(DeviceError::HeadMismatch { disk: 0, block: 4 })
        ));
        assert_eq!(buf, [0; BLOCK_SIZE]);

        // 磁头没有移动
        dev.read_block(1, 4, &mut buf).unwrap();
    }

    #[test]
    fn rejects_io_while_unmounted() {
        let mut dev = MemJbod::new();
        assert!(matches!(dev.seek_to_disk(0), Err(DeviceError::NotMounted)));
        assert!(matches!(dev.unmount(), Err(DeviceError::NotMounted)));
    }

    #[test]
    fn rejects_bad_coordinates() {
        let mut dev = MemJbod::new();
        dev.mount().unwrap();
        assert!(matches!(
            dev.seek_to_disk(DISK_COUNT),
            Err(DeviceError::InvalidDisk(16))
        ));
        assert!(matches!(
            dev.seek_to_block(BLOCKS_PER_DISK),
            Err(DeviceError::InvalidBlock(256))
        ));
    }

    #[test]
    fn injected_fault_hits_only_the_chosen_op() {
        let mut dev = MemJbod::new();
        dev.fail_at(1);
        dev.mount().unwrap();
        assert!(matches!(
            dev.seek_to_disk(4),
            Err(DeviceError::Fault(JbodOp::SeekToDisk(4)))
        ));
        dev.seek_to_disk(4).unwrap();
    }
}
