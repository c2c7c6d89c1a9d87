//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图标转换链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 注意：“输入文件不存在”不是错误，而是 `ConvertOutcome::InputMissing`。

/// 图标转换统一错误类型。
///
/// 该类型会在二进制入口被上转为 `AppError`，最终以非零退出码结束进程。
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("尺寸错误：{0}")]
    InvalidSize(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("编码错误：{0}")]
    Encode(String),
}
