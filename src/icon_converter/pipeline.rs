//! # 解码与缩放流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → RGBA → 多尺寸帧”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低超大输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 按内容魔数识别格式（无魔数时按扩展名），读取 header 尺寸并按像素上限快速拒绝
//! 2. 完整解码，统一转换为 RGBA（调色板/灰度展开为彩色，缺失的 alpha 补 255）
//! 3. 按配置决定放大策略，得到最终尺寸列表
//! 4. 逐尺寸缩放为正方形帧（`fast_image_resize`，失败回退 `image`）

use fast_image_resize as fr;
use image::{ImageBuffer, ImageFormat, ImageReader, Rgba, RgbaImage};
use std::io::Cursor;

use super::source::{IconFrame, NormalizedImage, RawImageData};
use super::{ConvertError, IconConverter, ResolutionSet};

impl IconConverter {
    /// 将原始字节解码并归一化为 RGBA。
    pub(crate) fn decode_and_normalize(&self, raw: RawImageData) -> Result<NormalizedImage, ConvertError> {
        let (header_width, header_height) = Self::image_reader(&raw)?
            .into_dimensions()
            .map_err(|e| ConvertError::Decode(format!("无法读取图片尺寸：{}", e)))?;
        self.validate_pixel_limits(header_width, header_height)?;

        let decoded = Self::image_reader(&raw)?
            .decode()
            .map_err(|e| ConvertError::Decode(format!("图片解码失败：{}", e)))?;
        let color = decoded.color();

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        self.validate_pixel_limits(width, height)?;

        let expected_len = Self::rgba_len(width, height)?;
        if rgba.as_raw().len() != expected_len {
            return Err(ConvertError::Decode("解码后像素数据长度异常".to_string()));
        }

        log::info!(
            "✅ 图片解码成功 - 来源: {} 尺寸: {}x{} 原始色彩: {:?}",
            raw.path.display(),
            width,
            height,
            color
        );

        Ok(NormalizedImage { rgba })
    }

    /// 根据源图尺寸与放大策略，确定最终需要生成的尺寸。
    pub(crate) fn resolve_target_sizes(
        &self,
        source: &NormalizedImage,
        sizes: &ResolutionSet,
    ) -> Result<ResolutionSet, ConvertError> {
        let limit = source.width().min(source.height());

        if self.config.skip_upscale {
            let (kept, dropped) = sizes.split_by_limit(limit);
            if !dropped.is_empty() {
                log::warn!(
                    "⚠️ 源图短边 {}px，跳过需要放大的尺寸：{:?}",
                    limit,
                    dropped
                );
            }
            return kept.ok_or_else(|| {
                ConvertError::InvalidSize(format!(
                    "源图短边 {}px 小于所有目标尺寸：{:?}",
                    limit,
                    sizes.as_slice()
                ))
            });
        }

        for size in sizes.iter().filter(|&size| size > limit) {
            log::warn!("⚠️ 目标尺寸 {}px 大于源图短边 {}px，将放大生成", size, limit);
        }
        Ok(sizes.clone())
    }

    /// 逐尺寸生成正方形帧，顺序与 `sizes` 一致。
    pub(crate) fn resample_frames(
        &self,
        source: &NormalizedImage,
        sizes: &ResolutionSet,
    ) -> Result<Vec<IconFrame>, ConvertError> {
        let filter = self.config.resize_filter;
        let src_image = fr::images::ImageRef::new(
            source.width(),
            source.height(),
            source.rgba.as_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| ConvertError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new().resize_alg(filter.to_fast_alg());

        let mut frames = Vec::with_capacity(sizes.len());
        for size in sizes.iter() {
            let resized =
                Self::resize_with_fast_image_resize(&mut resizer, &src_image, size, &options);
            let rgba = match resized {
                Ok(rgba) => rgba,
                Err(err) => {
                    log::warn!(
                        "⚠️ fast_image_resize 缩放 {}px 失败，回退 image::imageops::resize：{}",
                        size,
                        err
                    );
                    image::imageops::resize(&source.rgba, size, size, filter.to_image_filter())
                }
            };

            if rgba.as_raw().len() != Self::rgba_len(size, size)? {
                return Err(ConvertError::Decode(format!("{}px 帧像素数据长度异常", size)));
            }

            log::debug!(
                "🧩 生成图标帧：{}x{} -> {}x{}（filter={}）",
                source.width(),
                source.height(),
                size,
                size,
                filter
            );
            frames.push(IconFrame {
                size,
                rgba: rgba.into_raw(),
            });
        }

        Ok(frames)
    }

    /// 构建解码器：优先按内容识别格式，识别失败时使用扩展名对应的格式。
    ///
    /// TGA 等没有魔数的格式只能依赖扩展名。
    fn image_reader(raw: &RawImageData) -> Result<ImageReader<Cursor<&[u8]>>, ConvertError> {
        let mut reader = ImageReader::new(Cursor::new(raw.bytes.as_slice()));
        if let Ok(format) = ImageFormat::from_path(&raw.path) {
            reader.set_format(format);
        }

        let reader = reader
            .with_guessed_format()
            .map_err(|e| ConvertError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        if reader.format().is_none() {
            return Err(ConvertError::InvalidFormat(format!(
                "不支持的图片格式：{}",
                raw.path.display()
            )));
        }

        Ok(reader)
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(&self, width: u32, height: u32) -> Result<(), ConvertError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ConvertError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels == 0 {
            return Err(ConvertError::Decode("图片尺寸为 0".to_string()));
        }

        if pixels > self.config.max_decoded_pixels {
            return Err(ConvertError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, self.config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn rgba_len(width: u32, height: u32) -> Result<usize, ConvertError> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| ConvertError::ResourceLimit("图片尺寸导致内存溢出风险".to_string()))
    }

    fn resize_with_fast_image_resize(
        resizer: &mut fr::Resizer,
        src_image: &fr::images::ImageRef<'_>,
        size: u32,
        options: &fr::ResizeOptions,
    ) -> Result<RgbaImage, ConvertError> {
        let mut dst_image = fr::images::Image::new(size, size, fr::PixelType::U8x4);

        resizer
            .resize(src_image, &mut dst_image, Some(options))
            .map_err(|e| ConvertError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

        ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(size, size, dst_image.into_vec())
            .ok_or_else(|| ConvertError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
    }
}

/// 仅用于测试：把任意 `DynamicImage` 编码为 PNG 字节。
#[cfg(test)]
pub(crate) fn encode_png(image: &image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png");
    buf
}
