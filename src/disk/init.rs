use std::{path::PathBuf, sync::mpsc::Sender};

use crate::{
    disk::{file_disk::FileJbod, trace::TracedDevice},
    shell::BootProgress,
};

/// 在后台线程中打开镜像目录，进度通过 `tx` 回报给 shell
pub fn perform_disk_initialization(dir: PathBuf, tx: Sender<BootProgress>) {
    let _ = tx.send(BootProgress::Step("🧠 Initializing virtual disks..."));

    let disk = match FileJbod::open(&dir, &tx) {
        Ok(d) => d,
        Err(e) => {
            let _ = tx.send(BootProgress::Finished(Err(e)));
            return;
        }
    };

    let _ = tx.send(BootProgress::Step("⚙️ Attaching op trace..."));
    let _ = tx.send(BootProgress::Finished(Ok(TracedDevice::new(disk))));
}
