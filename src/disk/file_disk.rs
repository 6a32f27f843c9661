use std::{
    fs::{self, File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    sync::mpsc::Sender,
};

use log::{debug, info};

use crate::{
    disk::{
        block_device::{DeviceError, JbodDevice, Result},
        manifest::{ArrayManifest, MANIFEST_FILE},
        types::{Block, BLOCKS_PER_DISK, BLOCK_SIZE, DISK_COUNT, DISK_SIZE},
    },
    shell::BootProgress,
    utils::pattern_byte,
};

/// 镜像文件支撑的阵列：每块磁盘一个 `diskNN.img` 文件
#[derive(Debug)]
pub struct FileJbod {
    dir: PathBuf,
    disks: Vec<File>,
    manifest: ArrayManifest,
    mounted: bool,
    disk: u32,
    block: u32,
}

impl FileJbod {
    /// 打开（必要时创建）镜像目录。新建或长度不足的镜像会被扩展并写入初始内容。
    pub fn open(dir: &Path, tx: &Sender<BootProgress>) -> Result<Self> {
        fs::create_dir_all(dir)?;

        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest = if manifest_path.exists() {
            ArrayManifest::load(&manifest_path)?
        } else {
            let _ = tx.send(BootProgress::Step("🪶 Writing array metadata..."));
            let manifest = ArrayManifest::new();
            manifest.store(&manifest_path)?;
            manifest
        };

        let mut disks = Vec::with_capacity(DISK_COUNT as usize);
        for disk in 0..DISK_COUNT {
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .open(disk_path(dir, disk))?;

            if file.metadata()?.len() < DISK_SIZE as u64 {
                debug!("provisioning image for disk {}", disk);
                file.set_len(DISK_SIZE as u64)?;
                provision(&mut file, disk)?;
            }
            disks.push(file);

            let _ = tx.send(BootProgress::Progress(((disk + 1) * 100 / DISK_COUNT) as u64));
        }

        info!(
            "opened array {} at {}",
            manifest.array_id,
            dir.display()
        );
        Ok(Self {
            dir: dir.to_path_buf(),
            disks,
            manifest,
            mounted: false,
            disk: 0,
            block: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest(&self) -> &ArrayManifest {
        &self.manifest
    }

    /// 重新写入所有镜像的初始内容，只允许在卸载状态下进行。
    /// 每完成一块磁盘回调一次 `on_disk`。
    pub fn format(&mut self, mut on_disk: impl FnMut(u32)) -> Result<()> {
        if self.mounted {
            return Err(DeviceError::AlreadyMounted);
        }
        for (disk, file) in self.disks.iter_mut().enumerate() {
            provision(file, disk as u32)?;
            on_disk(disk as u32);
        }
        info!("formatted array {}", self.manifest.array_id);
        Ok(())
    }
}

fn disk_path(dir: &Path, disk: u32) -> PathBuf {
    dir.join(format!("disk{:02}.img", disk))
}

fn provision(file: &mut File, disk: u32) -> std::io::Result<()> {
    let base = disk * DISK_SIZE;
    let content: Vec<u8> = (base..base + DISK_SIZE).map(pattern_byte).collect();
    file.seek(SeekFrom::Start(0))?;
    file.write_all(&content)?;
    file.sync_data()
}

impl JbodDevice for FileJbod {
    fn mount(&mut self) -> Result<()> {
        if self.mounted {
            return Err(DeviceError::AlreadyMounted);
        }
        self.mounted = true;
        self.disk = 0;
        self.block = 0;
        Ok(())
    }

    fn unmount(&mut self) -> Result<()> {
        if !self.mounted {
            return Err(DeviceError::NotMounted);
        }
        for file in &self.disks {
            file.sync_all()?;
        }
        self.mounted = false;
        Ok(())
    }

    fn seek_to_disk(&mut self, disk: u32) -> Result<()> {
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
        if !self.mounted {
            return Err(DeviceError::NotMounted);
        }
        if (disk, block) != (self.disk, self.block) {
            return Err(DeviceError::HeadMismatch { disk, block });
        }
        if self.block >= BLOCKS_PER_DISK {
            return Err(DeviceError::InvalidBlock(self.block));
        }
        let file = &mut self.disks[self.disk as usize];
        file.seek(SeekFrom::Start(self.block as u64 * BLOCK_SIZE as u64))?;
        file.read_exact(buf)?;
        self.block += 1;
        Ok(())
    }
}
