//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 进程边界只认一个错误类型 `AppError`。库内部的 `ConvertError`
//! 通过 `#[from]` 自动上转，`main` 拿到后打印诊断信息并以非零退出码结束。

use crate::icon_converter::ConvertError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图标转换流水线错误（读取 / 解码 / 缩放 / 编码 / 写入）
    #[error("{0}")]
    Convert(#[from] ConvertError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_error_message_passes_through() {
        let err: AppError = ConvertError::Decode("图片解码失败：eof".to_string()).into();
        assert_eq!(err.to_string(), "解码错误：图片解码失败：eof");
    }
}
