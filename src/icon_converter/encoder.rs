//! # ICO 编码与回读模块
//!
//! ## 设计思路
//!
//! 写入：每个尺寸编码为 32 位 RGBA 的 PNG 帧，由 `image` 的 ICO 编码器生成
//! 头部（图像数量）、目录项（宽、高、位深、大小、偏移）与帧数据。
//! 先在内存中完成整个容器的编码，再一次性覆盖写入目标文件，编码失败不会截断已有文件。
//!
//! 回读：使用 `ico` 解析目录并解码每一帧，用于写入后的自检与测试。

use std::io::Cursor;
use std::path::Path;

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{ExtendedColorType, RgbaImage};

use super::source::{IconEntrySummary, IconFrame};
use super::{ConvertError, IconConverter};

impl IconConverter {
    /// 把全部帧编码为一个 ICO 容器。
    pub(crate) fn encode_icon(&self, frames: &[IconFrame]) -> Result<Vec<u8>, ConvertError> {
        if frames.is_empty() {
            return Err(ConvertError::Encode("没有可写入的图标帧".to_string()));
        }

        let ico_frames = frames
            .iter()
            .map(|frame| {
                IcoFrame::as_png(&frame.rgba, frame.size, frame.size, ExtendedColorType::Rgba8)
                    .map_err(|e| ConvertError::Encode(format!("{}px 帧编码失败：{}", frame.size, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut bytes = Vec::new();
        IcoEncoder::new(&mut bytes)
            .encode_images(&ico_frames)
            .map_err(|e| ConvertError::Encode(format!("ICO 容器编码失败：{}", e)))?;

        Ok(bytes)
    }

    /// 覆盖写入输出文件。父目录必须已存在，不会自动创建。
    pub(crate) fn write_icon(&self, output: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(ConvertError::FileSystem(format!(
                    "输出目录不存在：{}",
                    parent.display()
                )));
            }
        }

        std::fs::write(output, bytes).map_err(|e| {
            ConvertError::FileSystem(format!("写入图标文件 '{}' 失败：{}", output.display(), e))
        })
    }
}

/// 读取 ICO 文件并返回每个目录项的摘要。
///
/// 每一帧都会被完整解码，确认目录项记录的宽高与帧数据一致。
///
/// # 示例
/// ```rust,no_run
/// use favicon_converter::icon_converter::inspect_icon;
///
/// for entry in inspect_icon("favicon_io/favicon.ico")? {
///     println!("{}x{} {}bpp", entry.width, entry.height, entry.bits_per_pixel);
/// }
/// # Ok::<(), favicon_converter::icon_converter::ConvertError>(())
/// ```
pub fn inspect_icon(path: impl AsRef<Path>) -> Result<Vec<IconEntrySummary>, ConvertError> {
    let bytes = read_icon_file(path.as_ref())?;
    inspect_icon_bytes(&bytes)
}

/// 与 [`inspect_icon`] 相同，但直接处理内存中的字节。
pub fn inspect_icon_bytes(bytes: &[u8]) -> Result<Vec<IconEntrySummary>, ConvertError> {
    let icon_dir = read_icon_dir(bytes)?;

    icon_dir
        .entries()
        .iter()
        .map(|entry| {
            let image = entry
                .decode()
                .map_err(|e| ConvertError::Encode(format!("图标帧解码失败：{}", e)))?;
            if image.width() != entry.width() || image.height() != entry.height() {
                return Err(ConvertError::Encode(format!(
                    "目录项尺寸 {}x{} 与帧数据 {}x{} 不一致",
                    entry.width(),
                    entry.height(),
                    image.width(),
                    image.height()
                )));
            }

            Ok(IconEntrySummary {
                width: entry.width(),
                height: entry.height(),
                bits_per_pixel: entry.bits_per_pixel(),
                is_png: entry.is_png(),
                byte_len: entry.data().len(),
            })
        })
        .collect()
}

/// 解码 ICO 中的全部帧为 RGBA 图像，顺序与目录一致。
pub fn decode_icon_images(bytes: &[u8]) -> Result<Vec<RgbaImage>, ConvertError> {
    let icon_dir = read_icon_dir(bytes)?;

    icon_dir
        .entries()
        .iter()
        .map(|entry| {
            let image = entry
                .decode()
                .map_err(|e| ConvertError::Encode(format!("图标帧解码失败：{}", e)))?;
            RgbaImage::from_raw(image.width(), image.height(), image.rgba_data().to_vec())
                .ok_or_else(|| ConvertError::Encode("图标帧像素数据长度异常".to_string()))
        })
        .collect()
}

fn read_icon_file(path: &Path) -> Result<Vec<u8>, ConvertError> {
    std::fs::read(path)
        .map_err(|e| ConvertError::FileSystem(format!("无法读取图标文件 '{}'：{}", path.display(), e)))
}

fn read_icon_dir(bytes: &[u8]) -> Result<ico::IconDir, ConvertError> {
    let icon_dir = ico::IconDir::read(Cursor::new(bytes))
        .map_err(|e| ConvertError::InvalidFormat(format!("无法解析 ICO 目录：{}", e)))?;

    if !matches!(icon_dir.resource_type(), ico::ResourceType::Icon) {
        return Err(ConvertError::InvalidFormat("文件不是图标（ICO）资源".to_string()));
    }

    Ok(icon_dir)
}
