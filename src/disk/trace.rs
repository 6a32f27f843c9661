use std::collections::VecDeque;

use log::trace;

use crate::disk::{
    block_device::{JbodDevice, Result},
    op::JbodOp,
    types::Block,
};

/// 最近操作记录的保留条数
pub const TRACE_CAPACITY: usize = 64;

/// 记录设备操作的包装层。
///
/// 失败的操作同样计入。
#[derive(Debug)]
pub struct TracedDevice<D> {
    inner: D,
    recent: VecDeque<JbodOp>,
    total: usize,
}

impl<D: JbodDevice> TracedDevice<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            recent: VecDeque::with_capacity(TRACE_CAPACITY),
            total: 0,
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    /// 自创建（或上次 clear）以来发出的操作总数
    pub fn total(&self) -> usize {
        self.total
    }

    /// 最近的操作，按发出顺序
    pub fn recent(&self) -> impl Iterator<Item = &JbodOp> {
        self.recent.iter()
    }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.total = 0;
    }

    fn record(&mut self, op: JbodOp) {
        trace!("jbod op {:#06x} {}", op.encode(), op);
        if self.recent.len() == TRACE_CAPACITY {
            self.recent.pop_front();
        }
        self.recent.push_back(op);
        self.total += 1;
    }
}

impl<D: JbodDevice> JbodDevice for TracedDevice<D> {
    fn mount(&mut self) -> Result<()> {
        self.record(JbodOp::Mount);
        self.inner.mount()
    }

    fn unmount(&mut self) -> Result<()> {
        self.record(JbodOp::Unmount);
        self.inner.unmount()
    }

    fn seek_to_disk(&mut self, disk: u32) -> Result<()> {
        self.record(JbodOp::SeekToDisk(disk));
        self.inner.seek_to_disk(disk)
    }

    fn seek_to_block(&mut self, block: u32) -> Result<()> {
        self.record(JbodOp::SeekToBlock(block));
        self.inner.seek_to_block(block)
    }

    fn read_block(&mut self, disk: u32, block: u32, buf: &mut Block) -> Result<()> {
        self.record(JbodOp::ReadBlock { disk, block });
        self.inner.read_block(disk, block, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::{mem_disk::MemJbod, BLOCK_SIZE};

    #[test]
    fn records_ops_in_issue_order() {
        let mut dev = TracedDevice::new(MemJbod::new());
        let mut buf: Block = [0; BLOCK_SIZE];
        dev.mount().unwrap();
        dev.seek_to_disk(1).unwrap();
        dev.seek_to_block(7).unwrap();
        dev.read_block(1, 7, &mut buf).unwrap();
        dev.read_block(1, 8, &mut buf).unwrap();

        let ops: Vec<JbodOp> = dev.recent().copied().collect();
        assert_eq!(
            ops,
            vec![
                JbodOp::Mount,
                JbodOp::SeekToDisk(1),
                JbodOp::SeekToBlock(7),
                JbodOp::ReadBlock { disk: 1, block: 7 },
                JbodOp::ReadBlock { disk: 1, block: 8 },
            ]
        );
        assert_eq!(dev.total(), 5);
    }

    #[test]
    fn keeps_only_recent_ops() {
        let mut dev = TracedDevice::new(MemJbod::new());
        dev.mount().unwrap();
        for _ in 0..TRACE_CAPACITY + 10 {
            dev.seek_to_disk(0).unwrap();
        }
        assert_eq!(dev.recent().count(), TRACE_CAPACITY);
        assert_eq!(dev.total(), TRACE_CAPACITY + 11);
        assert_eq!(dev.recent().next(), Some(&JbodOp::SeekToDisk(0)));

        dev.clear();
        assert_eq!(dev.total(), 0);
    }
}
