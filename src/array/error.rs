use thiserror::Error;

use crate::disk::DeviceError;

/// 阵列层错误类型
#[derive(Error, Debug)]
pub enum ArrayError {
    #[error("Read of {len} bytes at {start:#x} runs past the end of the array")]
    OutOfBounds { start: u32, len: u32 },
    #[error("Read length {0} exceeds the per-call limit")]
    RequestTooLarge(u32),
    #[error("Array is not mounted")]
    NotMounted,
    #[error("Array is already mounted")]
    AlreadyMounted,
    #[error("Output buffer holds {got} bytes, {needed} required")]
    InvalidBuffer { needed: usize, got: usize },
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),
}

/// 阵列统一结果类型
pub type Result<T> = std::result::Result<T, ArrayError>;
