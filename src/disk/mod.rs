pub mod block_device;
pub mod file_disk;
pub mod init;
pub mod manifest;
#[cfg(test)]
pub mod mem_disk;
pub mod op;
pub mod trace;
pub mod types;

pub use block_device::{DeviceError, JbodDevice};
pub use file_disk::FileJbod;
pub use trace::TracedDevice;
pub use types::*;
