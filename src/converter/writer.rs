//! # ICO 写入模块
//!
//! ## 设计思路
//!
//! 目标文件只有在完整写入后才会出现：先写入同目录下的临时文件，
//! `sync_all` 之后再 `rename` 覆盖目标路径。
//!
//! ## 实现思路
//!
//! - 每一帧以 PNG 压缩后放入 ICO 目录（`IcoFrame::as_png`）。
//! - `TempFileGuard` 采用 RAII 模式：任一步骤失败提前返回时，`Drop` 自动删除临时文件。
//! - I/O 失败统一映射为 `Write`，编码器拒绝的帧映射为 `UnsupportedFormat`。

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::ExtendedColorType;
use image::codecs::ico::{IcoEncoder, IcoFrame};

use super::source::RenderedFrame;
use super::{ConvertError, IcoConverter};

/// 临时文件守卫：未 `persist` 前离开作用域即删除文件。
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn persist(mut self, destination: &Path) -> Result<(), ConvertError> {
        fs::rename(&self.path, destination).map_err(|e| {
            ConvertError::Write(format!("无法写入目标文件 {}：{}", destination.display(), e))
        })?;
        self.armed = false;
        Ok(())
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                log::warn!("清理临时文件失败 {}：{}", self.path.display(), err);
            }
        }
    }
}

impl IcoConverter {
    /// 将所有帧编码为 ICO 并原子写入 `destination`，返回写入字节数。
    pub(super) fn write_ico_atomically(
        &self,
        destination: &Path,
        frames: &[RenderedFrame],
    ) -> Result<u64, ConvertError> {
        let parent = Self::destination_dir(destination)?;
        let temp_path = Self::temp_path_for(parent, destination);
        let guard = TempFileGuard::new(temp_path.clone());

        log::debug!("📝 写入临时文件：{}", temp_path.display());

        let file = File::create(&temp_path).map_err(|e| {
            ConvertError::Write(format!("无法在 {} 创建文件：{}", parent.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        Self::encode_ico(&mut writer, frames)?;

        let file = writer
            .into_inner()
            .map_err(|e| ConvertError::Write(format!("刷新 ICO 数据失败：{}", e.error())))?;
        file.sync_all()
            .map_err(|e| ConvertError::Write(format!("同步 ICO 文件失败：{}", e)))?;
        let bytes_written = file
            .metadata()
            .map_err(|e| ConvertError::Write(format!("无法读取输出文件信息：{}", e)))?
            .len();
        drop(file);

        guard.persist(destination)?;

        log::info!(
            "💾 已写入 ICO：{}（{} 帧，{} 字节）",
            destination.display(),
            frames.len(),
            bytes_written
        );

        Ok(bytes_written)
    }

    /// 将帧编码为 ICO 容器写入任意 `Write`。
    pub(super) fn encode_ico<W: Write>(writer: W, frames: &[RenderedFrame]) -> Result<(), ConvertError> {
        let ico_frames = frames
            .iter()
            .map(|frame| {
                IcoFrame::as_png(
                    &frame.bytes,
                    frame.size.width,
                    frame.size.height,
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| {
                    ConvertError::UnsupportedFormat(format!("无法编码 {} 帧：{}", frame.size, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        IcoEncoder::new(writer)
            .encode_images(&ico_frames)
            .map_err(|e| match e {
                image::ImageError::IoError(io) => ConvertError::Write(format!("写入 ICO 数据失败：{}", io)),
                other => ConvertError::UnsupportedFormat(format!("ICO 编码失败：{}", other)),
            })
    }

    /// 目标路径所在目录必须已存在。
    fn destination_dir(destination: &Path) -> Result<&Path, ConvertError> {
        if destination.file_name().is_none() {
            return Err(ConvertError::Write(format!(
                "目标路径缺少文件名：{}",
                destination.display()
            )));
        }

        let parent = match destination.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        if !parent.is_dir() {
            return Err(ConvertError::Write(format!(
                "目标目录不存在：{}",
                parent.display()
            )));
        }

        if destination.is_dir() {
            return Err(ConvertError::Write(format!(
                "目标路径是目录：{}",
                destination.display()
            )));
        }

        Ok(parent)
    }

    fn temp_path_for(parent: &Path, destination: &Path) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "icon.ico".to_string());

        parent.join(format!(".{}.{}-{}.tmp", name, std::process::id(), nanos))
    }
}
