use log::{info, warn};

use crate::{
    array::error::{ArrayError, Result},
    disk::JbodDevice,
};

/// 挂载状态，只有两种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountState {
    #[default]
    Unmounted,
    Mounted,
}

/// 挂载闸门：未挂载时拒绝一切 I/O。
/// 状态只在设备操作成功后才翻转。
#[derive(Debug, Default)]
pub struct MountGate {
    state: MountState,
}

impl MountGate {
    pub fn state(&self) -> MountState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.state == MountState::Mounted
    }

    pub fn mount<D: JbodDevice>(&mut self, device: &mut D) -> Result<()> {
        if self.is_mounted() {
            return Err(ArrayError::AlreadyMounted);
        }
        if let Err(e) = device.mount() {
            warn!("device mount failed: {}", e);
            return Err(e.into());
        }
        self.state = MountState::Mounted;
        info!("array mounted");
        Ok(())
    }

    pub fn unmount<D: JbodDevice>(&mut self, device: &mut D) -> Result<()> {
        if !self.is_mounted() {
            return Err(ArrayError::NotMounted);
        }
        if let Err(e) = device.unmount() {
            warn!("device unmount failed: {}", e);
            return Err(e.into());
        }
        self.state = MountState::Unmounted;
        info!("array unmounted");
        Ok(())
    }

    /// 读写入口的检查
    pub fn check(&self) -> Result<()> {
        if self.is_mounted() {
            Ok(())
        } else {
            Err(ArrayError::NotMounted)
        }
    }
}
