//! # 中间模型与结果类型
//!
//! ## 设计思路
//!
//! 将“流水线中间结果”和“对外结果”解耦：
//! - `RawImageData` 表示已加载但未解码的字节
//! - `NormalizedImage` 表示统一为 RGBA 的源图
//! - `IconFrame` 表示某一尺寸的缩放结果
//! - `ConvertOutcome` / `IconEntrySummary` 是对外可见的结果

use std::fmt;
use std::path::PathBuf;

use image::RgbaImage;

/// 加载阶段输出：原始字节与来源路径。
pub(crate) struct RawImageData {
    pub(crate) bytes: Vec<u8>,
    /// 来源路径（用于日志与诊断）。
    pub(crate) path: PathBuf,
}

/// 归一化阶段输出：RGBA 源图。
pub(crate) struct NormalizedImage {
    pub(crate) rgba: RgbaImage,
}

impl NormalizedImage {
    pub(crate) fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub(crate) fn height(&self) -> u32 {
        self.rgba.height()
    }
}

/// 缩放阶段输出：单个正方形帧。
pub(crate) struct IconFrame {
    /// 边长（像素）。
    pub(crate) size: u32,
    /// RGBA 字节数组（`size * size * 4`）。
    pub(crate) rgba: Vec<u8>,
}

/// ICO 目录项摘要（回读结果）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconEntrySummary {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    /// 帧数据是否为 PNG 压缩（否则为 BMP）。
    pub is_png: bool,
    /// 帧数据字节数。
    pub byte_len: usize,
}

/// 一次转换的结果。
///
/// 输入文件不存在不是错误，而是 `InputMissing` 分支。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    Converted {
        input: PathBuf,
        output: PathBuf,
        entries: Vec<IconEntrySummary>,
    },
    InputMissing {
        input: PathBuf,
    },
}

impl ConvertOutcome {
    /// 面向用户的一行提示。
    pub fn notice(&self) -> String {
        self.to_string()
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}

impl fmt::Display for ConvertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converted { input, output, .. } => {
                write!(f, "Converted {} to {}", input.display(), output.display())
            }
            Self::InputMissing { input } => {
                write!(f, "Input file not found: {}", input.display())
            }
        }
    }
}
