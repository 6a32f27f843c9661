pub mod error;
pub mod mount;
pub mod read;

use crate::{
    array::{error::Result, mount::MountGate},
    disk::{Block, JbodDevice, BLOCK_SIZE},
};

pub use error::ArrayError;
pub use mount::MountState;

/// 线性阵列：把 16 块磁盘拼接成一段连续地址空间（JBOD，无冗余）。
///
/// 挂载状态和块中转缓冲区都归这个句柄所有，`&mut self` 保证同一时间只有一个调用在使用它们。
/// 需要跨线程共享时，由调用方把整个句柄放进一把锁里。
#[derive(Debug)]
pub struct LinearArray<D> {
    device: D,            // 底层设备
    gate: MountGate,      // 挂载闸门
    scratch: Block,       // 最近一次读取的设备块
}

impl<D: JbodDevice> LinearArray<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            gate: MountGate::default(),
            scratch: [0; BLOCK_SIZE],
        }
    }

    pub fn mount(&mut self) -> Result<()> {
        self.gate.mount(&mut self.device)
    }

    pub fn unmount(&mut self) -> Result<()> {
        self.gate.unmount(&mut self.device)
    }

    pub fn state(&self) -> MountState {
        self.gate.state()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}
