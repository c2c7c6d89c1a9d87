//! # Favicon 转换工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs   env_logger 初始化 + 默认配置下的一次转换       │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Result<ConvertOutcome, AppError>
//! ┌───────┴──────────────────────────────────────────────────┐
//! │  ┌─ error ────────── AppError (进程边界错误类型)          │
//! │  │                                                       │
//! │  └─ icon_converter ─ PNG → 多尺寸 ICO                     │
//! │      ├─ loader       读取 + 体积/签名校验                 │
//! │      ├─ pipeline     解码 + RGBA 归一化 + 缩放            │
//! │      └─ encoder      ICO 编码 + 写入 + 回读               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，二进制入口的返回类型 |
//! | [`icon_converter`] | 把一张图片转换为包含 256/128/64/48/32/16 像素帧的 favicon.ico |

pub mod error;
pub mod icon_converter;
