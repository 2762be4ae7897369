//! ChatBridge Channels - 消息投递
//!
//! 出站投递管线：
//! - 分片与载荷构造（纯文本 2000 字符、富文本 4096 字符）
//! - 四条线路：Webhook JSON / Webhook multipart / Bot API JSON / Bot API multipart
//! - 已知拒绝模式（不支持回复引用）的一次性剥离重发
//! - 批量编排：跨消息并发、单消息内分片顺序投递
//! - 飞书交互卡片侧信道

pub mod builder;
pub mod discord;
pub mod feishu;
pub mod transport;
pub mod types;

pub use builder::*;
pub use discord::*;
pub use feishu::*;
pub use transport::*;
pub use types::*;
