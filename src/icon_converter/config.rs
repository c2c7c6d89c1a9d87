//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ConvertConfig`，原脚本中写死的输入路径、输出路径和尺寸列表
//! 只作为 `Default` 的取值存在，不再是隐式全局状态。
//!
//! ## 实现思路
//!
//! - `Default` 提供与原始行为一致的配置。
//! - `ResizeFilter` 负责滤镜名称解析与反向输出，并映射到两套缩放实现。
//! - 支持 JSON 序列化，缺省字段回落到默认值。

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use fast_image_resize as fr;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::{ConvertError, ResolutionSet};

/// 默认输入文件。
pub const DEFAULT_INPUT_PATH: &str = "airbamin-logo.png";
/// 默认输出文件（父目录需预先存在）。
pub const DEFAULT_OUTPUT_PATH: &str = "favicon_io/favicon.ico";

/// 图标转换配置。
///
/// 字段覆盖了读取、解码、缩放三个阶段。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// 源图片路径。
    pub input_path: PathBuf,
    /// 输出 ICO 路径。
    pub output_path: PathBuf,
    /// 需要嵌入的正方形尺寸。
    pub sizes: ResolutionSet,
    /// 降采样滤镜。
    pub resize_filter: ResizeFilter,
    /// 为 `true` 时丢弃大于源图短边的尺寸，而不是放大。
    pub skip_upscale: bool,
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            sizes: ResolutionSet::default(),
            resize_filter: ResizeFilter::Lanczos3,
            skip_upscale: false,
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
        }
    }
}

impl ConvertConfig {
    /// 从 JSON 文本解析配置，缺省字段使用默认值。
    ///
    /// # 示例
    /// ```rust
    /// use favicon_converter::icon_converter::ConvertConfig;
    ///
    /// let config = ConvertConfig::from_json(r#"{ "sizes": [32, 16] }"#)?;
    /// assert_eq!(config.sizes.as_slice(), &[32, 16]);
    /// # Ok::<(), favicon_converter::icon_converter::ConvertError>(())
    /// ```
    pub fn from_json(content: &str) -> Result<Self, ConvertError> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| ConvertError::InvalidFormat(format!("解析配置失败：{}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConvertError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConvertError::InvalidFormat(format!("序列化配置失败：{}", e)))
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.max_file_size == 0 {
            return Err(ConvertError::InvalidFormat("max_file_size 必须大于 0".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(ConvertError::InvalidFormat("max_decoded_pixels 必须大于 0".to_string()));
        }
        Ok(())
    }
}

/// 降采样滤镜。
///
/// 默认 `Lanczos3`，与常见图像库生成 ICO 帧时使用的滤镜一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ResizeFilter {
    Nearest,
    Bilinear,
    CatmullRom,
    Mitchell,
    Lanczos3,
}

impl ResizeFilter {
    /// 输出稳定字符串，供日志与持久化使用。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::CatmullRom => "catmull_rom",
            Self::Mitchell => "mitchell",
            Self::Lanczos3 => "lanczos3",
        }
    }

    pub(crate) fn to_fast_alg(self) -> fr::ResizeAlg {
        match self {
            Self::Nearest => fr::ResizeAlg::Nearest,
            Self::Bilinear => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
            Self::CatmullRom => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
            Self::Mitchell => fr::ResizeAlg::Convolution(fr::FilterType::Mitchell),
            Self::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
        }
    }

    /// `image` 回退路径使用的近似滤镜（`image` 没有 Mitchell，用 Gaussian 代替）。
    pub(crate) fn to_image_filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Mitchell => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for ResizeFilter {
    type Err = ConvertError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" | "triangle" => Ok(Self::Bilinear),
            "catmull_rom" | "catmullrom" => Ok(Self::CatmullRom),
            "mitchell" => Ok(Self::Mitchell),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(ConvertError::InvalidFormat(format!(
                "未知缩放滤镜：{}（可选：nearest / bilinear / catmull_rom / mitchell / lanczos3）",
                other
            ))),
        }
    }
}

impl TryFrom<String> for ResizeFilter {
    type Error = ConvertError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<ResizeFilter> for &'static str {
    fn from(filter: ResizeFilter) -> Self {
        filter.as_str()
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_original_constants() {
        let config = ConvertConfig::default();
        assert_eq!(config.input_path, PathBuf::from("airbamin-logo.png"));
        assert_eq!(config.output_path, PathBuf::from("favicon_io/favicon.ico"));
        assert_eq!(config.sizes.as_slice(), &[256, 128, 64, 48, 32, 16]);
        assert_eq!(config.resize_filter, ResizeFilter::Lanczos3);
        assert!(!config.skip_upscale);
    }

    #[test]
    fn json_round_trip_and_partial_override() {
        let mut config = ConvertConfig::default();
        config.resize_filter = ResizeFilter::CatmullRom;
        config.skip_upscale = true;

        let json = config.to_json_pretty().expect("serialize");
        assert!(json.contains("\"catmull_rom\""));

        let parsed = ConvertConfig::from_json(&json).expect("parse");
        assert_eq!(parsed.resize_filter, ResizeFilter::CatmullRom);
        assert!(parsed.skip_upscale);

        let partial = ConvertConfig::from_json(r#"{ "output_path": "out/icon.ico" }"#).expect("parse");
        assert_eq!(partial.output_path, PathBuf::from("out/icon.ico"));
        assert_eq!(partial.sizes, ResolutionSet::default());
    }

    #[test]
    fn rejects_unknown_filter_and_bad_limits() {
        assert!(matches!(
            "bicubic-ish".parse::<ResizeFilter>(),
            Err(ConvertError::InvalidFormat(_))
        ));
        assert!(ConvertConfig::from_json(r#"{ "resize_filter": "bogus" }"#).is_err());
        assert!(ConvertConfig::from_json(r#"{ "max_file_size": 0 }"#).is_err());
        assert!(ConvertConfig::from_json(r#"{ "sizes": [300] }"#).is_err());
    }

    #[test]
    fn filter_names_are_case_insensitive() {
        assert_eq!(" Lanczos3 ".parse::<ResizeFilter>().ok(), Some(ResizeFilter::Lanczos3));
        assert_eq!("TRIANGLE".parse::<ResizeFilter>().ok(), Some(ResizeFilter::Bilinear));
        assert_eq!(ResizeFilter::Mitchell.to_string(), "mitchell");
    }
}
