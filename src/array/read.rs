use std::ops::Range;

use log::{debug, trace};

use crate::{
    array::{
        error::{ArrayError, Result},
        LinearArray,
    },
    disk::{BlockAddr, JbodDevice, ARRAY_SIZE, BLOCK_SIZE, DISK_SIZE, MAX_READ_SIZE},
};

/// 读取循环每一轮执行的动作，按优先级从高到低排列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// 游标刚走到下一块磁盘的起点：重新寻道并取块，不拷贝
    DiskCrossing,
    /// 起始地址不在块边界且请求超出首块：拷贝首块剩余部分
    LeadingPartial,
    /// 拷贝一整块
    FullBlock,
    /// 剩余字节都在当前块内：拷贝后结束
    Trailing,
}

/// 一轮之后设备侧要做的事
#[derive(Debug, PartialEq, Eq)]
enum Action {
    /// 重新定位到该线性地址并取块
    Reposition(u32),
    /// 从中转块的 `src` 拷到输出的 `dst`，`fetch` 为随后要预取的块所在地址
    Copy {
        src: Range<usize>,
        dst: Range<usize>,
        fetch: Option<u32>,
    },
}

/// 读取游标，只做地址运算，不碰设备
#[derive(Debug, Clone)]
struct Cursor {
    addr: u32,          // 当前线性地址
    remaining: usize,   // 还需拷贝的字节数
    written: usize,     // 已写入输出的字节数
    offset: usize,      // 当前块内的起始偏移，只有首块可能非零
    leading: bool,      // 是否仍处于首块阶段
    positioned_at: u32, // 设备最近一次寻道到的地址
}

impl Cursor {
    fn new(start: u32, len: usize) -> Self {
        let at = BlockAddr::from_linear(start);
        Self {
            addr: start,
            remaining: len,
            written: 0,
            offset: at.offset,
            leading: at.offset != 0,
            positioned_at: start,
        }
    }

    fn next_step(&self) -> Step {
        if self.addr % DISK_SIZE == 0 && self.addr != self.positioned_at {
            Step::DiskCrossing
        } else if self.leading && self.offset + self.remaining > BLOCK_SIZE {
            Step::LeadingPartial
        } else if !self.leading && self.remaining > BLOCK_SIZE {
            Step::FullBlock
        } else {
            Step::Trailing
        }
    }

    fn apply(&mut self, step: Step) -> Action {
        match step {
            Step::DiskCrossing => {
                self.positioned_at = self.addr;
                Action::Reposition(self.addr)
            }
            Step::LeadingPartial | Step::FullBlock => {
                let (src, dst) = self.take(BLOCK_SIZE - self.offset);
                // 落在磁盘边界时由 DiskCrossing 负责取块
                let fetch = (self.addr % DISK_SIZE != 0).then_some(self.addr);
                Action::Copy { src, dst, fetch }
            }
            Step::Trailing => {
                let (src, dst) = self.take(self.remaining);
                Action::Copy {
                    src,
                    dst,
                    fetch: None,
                }
            }
        }
    }

    fn take(&mut self, n: usize) -> (Range<usize>, Range<usize>) {
        let src = self.offset..self.offset + n;
        let dst = self.written..self.written + n;
        self.addr += n as u32;
        self.remaining -= n;
        self.written += n;
        self.offset = 0;
        self.leading = false;
        (src, dst)
    }
}

impl<D: JbodDevice> LinearArray<D> {
    /// 从线性地址 `start` 读取 `len` 字节到 `buf`，返回读取的字节数。
    ///
    /// 参数检查依次为：越界、长度上限、挂载状态、缓冲区长度，全部在访问设备前完成。
    /// 设备出错时立即返回，`buf` 中已拷贝的部分保留，其余内容不确定。
    pub fn read(&mut self, start: u32, len: u32, buf: &mut [u8]) -> Result<usize> {
        if start as u64 + len as u64 > ARRAY_SIZE {
            return Err(ArrayError::OutOfBounds { start, len });
        }
        if len > MAX_READ_SIZE {
            return Err(ArrayError::RequestTooLarge(len));
        }
        self.gate.check()?;

        let len = len as usize;
        if len == 0 {
            return Ok(0);
        }
        if buf.len() < len {
            return Err(ArrayError::InvalidBuffer {
                needed: len,
                got: buf.len(),
            });
        }

        debug!("read {} bytes at {:#x}", len, start);
        let out = &mut buf[..len];
        let mut cursor = Cursor::new(start, len);
        self.position(start)?;

        while cursor.remaining > 0 {
            let step = cursor.next_step();
            trace!(
                "{:?} at {:#x}, {} bytes left",
                step,
                cursor.addr,
                cursor.remaining
            );
            match cursor.apply(step) {
                Action::Reposition(addr) => self.position(addr)?,
                Action::Copy { src, dst, fetch } => {
                    out[dst].copy_from_slice(&self.scratch[src]);
                    if let Some(addr) = fetch {
                        self.fetch(addr)?;
                    }
                }
            }
        }

        Ok(len)
    }

    /// 两次寻道后把 `addr` 所在的块读入中转缓冲区
    fn position(&mut self, addr: u32) -> Result<()> {
        let at = BlockAddr::from_linear(addr);
        self.device.seek_to_disk(at.disk)?;
        self.device.seek_to_block(at.block)?;
        self.fetch(addr)
    }

    /// 读取 `addr` 所在的块，磁头应已停在该块上
    fn fetch(&mut self, addr: u32) -> Result<()> {
        let at = BlockAddr::from_linear(addr);
        self.device.read_block(at.disk, at.block, &mut self.scratch)?;
        Ok(())
    }
}
