//! # 图标转换模块（icon_converter）
//!
//! ## 设计思路
//!
//! 该模块将“存在性检查 → 加载校验 → 解码归一化 → 多尺寸缩放 → ICO 编码写入”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `converter`：编排整条处理流水线
//! - `loader`：负责文件读取与签名、体积校验
//! - `pipeline`：负责解码、像素限制、RGBA 归一化与缩放
//! - `encoder`：负责 ICO 编码、写入与回读
//! - `config/error/sizes/source`：配置、错误、尺寸集合、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! main.rs（初始化日志，使用默认配置）
//!    ↓
//! converter.rs（存在性检查 + 阶段耗时日志）
//!    ├─ loader.rs（读取 + 体积/签名校验）
//!    ├─ pipeline.rs（解码 + 像素限制 + RGBA + 缩放）
//!    └─ encoder.rs（ICO 编码 + 覆盖写入 + 回读自检）
//!    ↓
//! 返回 ConvertOutcome 或 ConvertError
//! ```
//!
//! 缩放默认使用 Lanczos3 滤镜（`fast_image_resize` 卷积实现），
//! 不同图像库的像素级结果会有差异，但容器结构与通道语义一致。

mod config;
mod converter;
mod encoder;
mod error;
mod loader;
mod pipeline;
mod sizes;
mod source;

pub use config::{ConvertConfig, ResizeFilter, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
pub use converter::{convert, convert_with_defaults, IconConverter};
pub use encoder::{decode_icon_images, inspect_icon, inspect_icon_bytes};
pub use error::ConvertError;
pub use sizes::{ResolutionSet, DEFAULT_ICON_SIZES, MAX_ICON_DIMENSION};
pub use source::{ConvertOutcome, IconEntrySummary};
