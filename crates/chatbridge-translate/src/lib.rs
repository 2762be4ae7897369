//! ChatBridge Translate - 中英互译调度
//!
//! 提供商多态的文本翻译：
//! - OpenAI 兼容聊天后端（openai / deepseek）
//! - Google 翻译
//! - 百度翻译（MD5 签名）
//! - 有道翻译（SHA-256 v3 签名）
//!
//! 对外契约是「尽力而为」：任何失败都只记日志并返回 `None`，
//! 绝不阻断外层的消息投递。

pub mod providers;
pub mod service;

pub use providers::*;
pub use service::*;
