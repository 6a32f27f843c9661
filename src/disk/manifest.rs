use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    disk::{
        block_device::{DeviceError, Result},
        types::{BLOCK_SIZE, DISK_COUNT, DISK_SIZE, MAX_READ_SIZE},
    },
    utils::{current_timestamp, generate_uuid},
};

/// 魔数，用于识别阵列元数据文件
pub const MANIFEST_MAGIC: u64 = 0x4A42_4F44_4D44_4144;

/// 阵列元数据文件名
pub const MANIFEST_FILE: &str = "array.meta";

/// 阵列元数据：标识与几何参数，随镜像目录一起保存
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayManifest {
    pub magic: u64,        // 魔数
    pub array_id: String,  // 阵列唯一 ID
    pub created_at: String, // 创建时间
    pub disk_count: u32,   // 磁盘数量
    pub disk_size: u32,    // 每块磁盘容量（字节）
    pub block_size: u32,   // 块大小（字节）
    pub max_read: u32,     // 单次读取上限
}

impl ArrayManifest {
    pub fn new() -> Self {
        Self {
            magic: MANIFEST_MAGIC,
            array_id: generate_uuid(),
            created_at: current_timestamp(),
            disk_count: DISK_COUNT,
            disk_size: DISK_SIZE,
            block_size: BLOCK_SIZE as u32,
            max_read: MAX_READ_SIZE,
        }
    }

    /// 检查魔数和几何参数是否与当前编译的常量一致
    pub fn validate(&self) -> Result<()> {
        if self.magic != MANIFEST_MAGIC {
            return Err(DeviceError::Corrupted(format!(
                "bad magic {:#x}",
                self.magic
            )));
        }
        let expected = (DISK_COUNT, DISK_SIZE, BLOCK_SIZE as u32, MAX_READ_SIZE);
        let found = (self.disk_count, self.disk_size, self.block_size, self.max_read);
        if found != expected {
            return Err(DeviceError::Corrupted(format!(
                "geometry mismatch: expected {:?}, found {:?}",
                expected, found
            )));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let manifest: ArrayManifest = bincode::deserialize(&bytes)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn store(&self, path: &Path) -> Result<()> {
        let bytes = bincode::serialize(self)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
