//! 消息模型定义

use serde::{Deserialize, Serialize};

/// 待转发的逻辑消息
///
/// 由调用方按事件构造，`send_batch` 消费一次后即丢弃。
#[derive(Debug, Clone, Default)]
pub struct OutboundMessage {
    /// 消息正文
    pub content: String,
    /// 源平台消息 ID（仅随首个分片写入投递结果）
    pub source_id: Option<String>,
    /// 回复目标（源消息本身是回复时设置）
    pub reply_to: Option<ReplyTarget>,
    /// 展示用昵称
    pub username: Option<String>,
    /// 展示用头像
    pub avatar_url: Option<String>,
    /// 是否使用富文本（embed）格式
    pub use_embed: bool,
    /// 调用方附带的结构化区块
    pub embeds: Vec<Embed>,
    /// 待上传的文件描述
    pub uploads: Vec<FileUpload>,
    /// 交互组件（原样透传）
    pub components: Vec<serde_json::Value>,
}

impl OutboundMessage {
    /// 纯文本消息
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

/// 回复目标
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyTarget {
    /// 目标频道 ID
    pub channel_id: String,
    /// 目标消息 ID
    pub message_id: String,
}

/// 文件上传描述
///
/// 投递前才抓取到内存（受大小与超时限制），请求结束即丢弃。
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// 远端地址
    pub url: String,
    /// 文件名
    pub filename: String,
    /// 媒体类型提示
    pub kind: FileKind,
}

/// 媒体类型提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Other,
}

/// 富文本区块（对应 Discord embed）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<EmbedField>,
}

/// 区块作者
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// 区块脚注
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// 区块图片引用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedImage {
    pub url: String,
}

/// 区块字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

/// 单个分片的投递结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResult {
    /// 源消息 ID（仅首个分片携带）
    pub source_id: Option<String>,
    /// 目标消息 ID
    pub message_id: String,
    /// 目标频道 ID
    pub channel_id: String,
}

/// Webhook 元数据
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookInfo {
    /// 所属服务器 ID
    pub guild_id: Option<String>,
    /// 默认频道 ID
    pub channel_id: Option<String>,
    /// Webhook 展示名
    pub name: Option<String>,
}
