//! 投递线路类型定义

use chatbridge_core::{Embed, FileKind};
use serde::{Deserialize, Serialize};

/// 单条平台消息的载荷
///
/// Webhook 与 Bot API 共用同一结构；Bot 线路不序列化
/// `username`/`avatar_url`（接口不支持伪装字段，构造时即置空）。
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
    pub allowed_mentions: AllowedMentions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,
}

impl Default for MessagePayload {
    fn default() -> Self {
        Self {
            content: None,
            embeds: Vec::new(),
            components: Vec::new(),
            username: None,
            avatar_url: None,
            message_reference: None,
            allowed_mentions: AllowedMentions::default(),
            attachments: Vec::new(),
        }
    }
}

/// 回复引用
#[derive(Debug, Clone, Serialize)]
pub struct MessageReference {
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// 引用目标已删除时照常发送而不是整条失败
    pub fail_if_not_exists: bool,
}

/// 提及控制：转发消息不触发任何提及
#[derive(Debug, Clone, Serialize)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
    pub replied_user: bool,
}

impl Default for AllowedMentions {
    fn default() -> Self {
        Self {
            parse: Vec::new(),
            replied_user: false,
        }
    }
}

/// multipart 载荷中的附件声明
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentRef {
    pub id: usize,
    pub filename: String,
}

/// 创建成功后的消息对象（`?wait=true` 响应）
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedMessage {
    pub id: Option<String>,
    pub channel_id: Option<String>,
}

/// 已抓取到内存的待上传文件
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub filename: String,
    pub kind: FileKind,
    pub bytes: Vec<u8>,
}

/// 投递线路
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Webhook 直发
    Webhook,
    /// Bot Token 中继到指定频道
    Bot { channel_id: String },
}
