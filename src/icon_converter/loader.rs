//! # 源文件加载模块
//!
//! 读取本地图片字节，并在解码前完成体积与文件签名校验。
//! 签名探测只用于拒绝“明确不是图片”的内容（压缩包、文档等）；
//! 无法识别的签名交给解码器按内容或扩展名判断（TGA 等格式没有魔数）。

use std::path::Path;

use super::source::RawImageData;
use super::{ConvertError, IconConverter};

impl IconConverter {
    /// 读取本地图片文件。
    ///
    /// 调用方已完成存在性检查；此处若文件在检查后消失，按文件错误处理。
    pub(super) fn load_from_file(&self, path: &Path) -> Result<RawImageData, ConvertError> {
        log::info!("📁 开始读取源图片 - 路径: {}", path.display());

        let metadata = std::fs::metadata(path)
            .map_err(|e| ConvertError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(ConvertError::FileSystem(format!(
                "输入路径不是文件：{}",
                path.display()
            )));
        }

        if metadata.len() > self.config.max_file_size {
            return Err(ConvertError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                self.config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| ConvertError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            path: path.to_path_buf(),
        })
    }

    /// 按文件头识别内容类型，仅拒绝被明确识别为非图片的数据。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), ConvertError> {
        if bytes.is_empty() {
            return Err(ConvertError::InvalidFormat("图片内容为空".to_string()));
        }

        match infer::get(bytes) {
            Some(kind) if kind.matcher_type() != infer::MatcherType::Image => {
                Err(ConvertError::InvalidFormat(format!(
                    "文件签名不是图片类型：{}",
                    kind.mime_type()
                )))
            }
            Some(_) => Ok(()),
            None => {
                log::debug!("🔍 文件签名未知，交由解码器按内容/扩展名识别");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon_converter::ConvertConfig;

    fn converter() -> IconConverter {
        IconConverter::new(ConvertConfig::default()).expect("converter init failed")
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .expect("encode png");
        buf
    }

    #[test]
    fn load_from_file_accepts_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logo.png");
        std::fs::write(&path, png_bytes()).expect("write png");

        let raw = converter().load_from_file(&path).expect("png should load");
        assert_eq!(raw.path, path);
        assert!(!raw.bytes.is_empty());
    }

    #[test]
    fn load_from_file_rejects_empty_and_known_non_image_payload() {
        let dir = tempfile::tempdir().expect("tempdir");

        let empty = dir.path().join("empty.png");
        std::fs::write(&empty, b"").expect("write");
        assert!(matches!(
            converter().load_from_file(&empty),
            Err(ConvertError::InvalidFormat(_))
        ));

        let zip = dir.path().join("archive.png");
        std::fs::write(&zip, b"PK\x03\x04\x14\x00\x00\x00\x08\x00").expect("write");
        assert!(matches!(
            converter().load_from_file(&zip),
            Err(ConvertError::InvalidFormat(_))
        ));
    }

    #[test]
    fn load_from_file_passes_unknown_signature_to_decoder() {
        let dir = tempfile::tempdir().expect("tempdir");

        // 无魔数的 TGA 头（未压缩真彩色）
        let tga = dir.path().join("logo.tga");
        std::fs::write(&tga, [0u8, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 24, 0, 1, 2, 3])
            .expect("write");
        assert!(converter().load_from_file(&tga).is_ok());

        let text = dir.path().join("notes.png");
        std::fs::write(&text, b"definitely not an image").expect("write");
        assert!(converter().load_from_file(&text).is_ok());
    }

    #[test]
    fn load_from_file_enforces_size_limit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logo.png");
        std::fs::write(&path, png_bytes()).expect("write png");

        let config = ConvertConfig {
            max_file_size: 8,
            ..ConvertConfig::default()
        };
        let converter = IconConverter::new(config).expect("converter init failed");
        assert!(matches!(
            converter.load_from_file(&path),
            Err(ConvertError::ResourceLimit(_))
        ));
    }

    #[test]
    fn load_from_file_rejects_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            converter().load_from_file(dir.path()),
            Err(ConvertError::FileSystem(_))
        ));
    }
}
