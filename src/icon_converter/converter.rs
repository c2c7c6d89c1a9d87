//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconConverter` 只负责流程编排与配置持有，各阶段实现在同级子模块中。
//! 处理链路固定为：
//! 1. 检查输入文件是否存在（不存在则给出提示并正常返回）
//! 2. 读取原始字节
//! 3. 解码并归一化为 RGBA
//! 4. 逐尺寸缩放
//! 5. 编码 ICO 并覆盖写入
//!
//! ## 实现思路
//!
//! - 记录 `load/decode/resize/encode/total` 阶段耗时，便于性能诊断。
//! - 提示行（成功或未找到输入）同时输出到 stdout 与日志。

use std::path::Path;
use std::time::Instant;

use super::source::ConvertOutcome;
use super::{inspect_icon_bytes, ConvertConfig, ConvertError, ResolutionSet};

/// 图标转换器。
pub struct IconConverter {
    pub(super) config: ConvertConfig,
}

impl IconConverter {
    /// 根据配置创建转换器，配置非法时直接返回错误。
    ///
    /// # 示例
    /// ```rust
    /// use favicon_converter::icon_converter::{ConvertConfig, IconConverter};
    ///
    /// let converter = IconConverter::new(ConvertConfig::default())?;
    /// assert_eq!(converter.config().sizes.len(), 6);
    /// # Ok::<(), favicon_converter::icon_converter::ConvertError>(())
    /// ```
    pub fn new(config: ConvertConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// 使用配置中的路径与尺寸执行一次转换。
    pub fn run(&self) -> Result<ConvertOutcome, ConvertError> {
        self.convert(
            &self.config.input_path,
            &self.config.output_path,
            &self.config.sizes,
        )
    }

    /// 处理主入口：把 `input` 转换为包含 `sizes` 各尺寸的 ICO 并写入 `output`。
    ///
    /// 输入不存在时返回 `ConvertOutcome::InputMissing`，不创建也不修改输出文件。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use std::path::Path;
    /// use favicon_converter::icon_converter::{ConvertConfig, IconConverter, ResolutionSet};
    ///
    /// let converter = IconConverter::new(ConvertConfig::default())?;
    /// let outcome = converter.convert(
    ///     Path::new("airbamin-logo.png"),
    ///     Path::new("favicon_io/favicon.ico"),
    ///     &ResolutionSet::default(),
    /// )?;
    /// println!("{}", outcome.notice());
    /// # Ok::<(), favicon_converter::icon_converter::ConvertError>(())
    /// ```
    pub fn convert(
        &self,
        input: &Path,
        output: &Path,
        sizes: &ResolutionSet,
    ) -> Result<ConvertOutcome, ConvertError> {
        if !input.exists() {
            let outcome = ConvertOutcome::InputMissing {
                input: input.to_path_buf(),
            };
            log::warn!("⚠️ {}", outcome.notice());
            println!("{}", outcome.notice());
            return Ok(outcome);
        }

        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = self.load_from_file(input)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let normalized = self.decode_and_normalize(raw)?;
        let decode_elapsed = decode_start.elapsed();

        let resize_start = Instant::now();
        let targets = self.resolve_target_sizes(&normalized, sizes)?;
        let frames = self.resample_frames(&normalized, &targets)?;
        let resize_elapsed = resize_start.elapsed();

        let encode_start = Instant::now();
        let bytes = self.encode_icon(&frames)?;
        let entries = inspect_icon_bytes(&bytes)?;
        if entries.len() != targets.len() {
            return Err(ConvertError::Encode(format!(
                "ICO 目录项数量 {} 与目标尺寸数量 {} 不一致",
                entries.len(),
                targets.len()
            )));
        }
        self.write_icon(output, &bytes)?;
        let encode_elapsed = encode_start.elapsed();

        for entry in &entries {
            log::debug!(
                "📦 目录项 {}x{} bpp={} png={} bytes={}",
                entry.width,
                entry.height,
                entry.bits_per_pixel,
                entry.is_png,
                entry.byte_len
            );
        }

        log::info!(
            "✅ 图标转换完成 - 帧数={} 文件大小={}B load={}ms decode={}ms resize={}ms encode={}ms total={}ms",
            entries.len(),
            bytes.len(),
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            resize_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        let outcome = ConvertOutcome::Converted {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            entries,
        };
        println!("{}", outcome.notice());
        Ok(outcome)
    }
}

/// 使用默认配置（除尺寸外）执行一次转换。
pub fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    sizes: &ResolutionSet,
) -> Result<ConvertOutcome, ConvertError> {
    IconConverter::new(ConvertConfig::default())?.convert(input.as_ref(), output.as_ref(), sizes)
}

/// 以原始默认值运行：`airbamin-logo.png` → `favicon_io/favicon.ico`，六种尺寸。
pub fn convert_with_defaults() -> Result<ConvertOutcome, ConvertError> {
    IconConverter::new(ConvertConfig::default())?.run()
}
