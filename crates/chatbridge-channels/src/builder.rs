//! 载荷构造与分片
//!
//! 单条消息严格按「翻译一次 → 按长度分片 → 按序投递」处理；
//! 分片粒度由富文本与否决定，上传消息永不分片。

use chatbridge_core::{
    choose_translate_target, Embed, EmbedImage, FileKind, OutboundMessage, TRANSLATION_SEPARATOR,
};
use chatbridge_translate::TranslateService;

use crate::types::{AttachmentRef, DownloadedFile, MessagePayload, MessageReference};

/// 纯文本分片长度
pub const PLAIN_CHUNK_SIZE: usize = 2000;
/// 富文本分片长度
pub const EMBED_CHUNK_SIZE: usize = 4096;
/// 区块描述长度上限
pub const EMBED_DESC_LIMIT: usize = 4096;

/// 分片长度
pub fn chunk_size(use_embed: bool) -> usize {
    if use_embed {
        EMBED_CHUNK_SIZE
    } else {
        PLAIN_CHUNK_SIZE
    }
}

/// 按字符数切分文本
pub fn split_chunks(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    chars.chunks(size).map(|c| c.iter().collect()).collect()
}

/// 决定消息的分片序列
///
/// - 有上传：单片（上传永不分片）
/// - 空文本但带结构化区块：单个空片
/// - 空文本且无区块无上传：空操作，直接丢弃
/// - 其余按分片长度切分
pub fn plan_chunks(message: &OutboundMessage, text: &str) -> Vec<String> {
    if !message.uploads.is_empty() {
        return vec![text.to_string()];
    }
    if text.is_empty() {
        if !message.embeds.is_empty() {
            return vec![String::new()];
        }
        return Vec::new();
    }
    split_chunks(text, chunk_size(message.use_embed))
}

/// 截断到指定字符数
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    text.chars().take(limit).collect()
}

/// 为文本补上译文
///
/// 已含分隔符的文本视为「已带翻译」，不再调用翻译服务；
/// 语言占比门控决定方向；翻译失败时保持原文。
pub async fn maybe_bilingual(service: &TranslateService, text: &str) -> String {
    if text.is_empty() || text.contains(TRANSLATION_SEPARATOR) {
        return text.to_string();
    }
    if !service.is_active() {
        return text.to_string();
    }
    let Some(target) = choose_translate_target(text) else {
        return text.to_string();
    };
    match service.translate(text, target).await {
        Some(translated) => format!("{}{}{}", text, TRANSLATION_SEPARATOR, translated),
        None => text.to_string(),
    }
}

async fn translate_opt(service: &TranslateService, text: Option<String>) -> Option<String> {
    match text {
        Some(t) => Some(maybe_bilingual(service, &t).await),
        None => None,
    }
}

/// 逐字段翻译结构化区块，字段之间并发执行
pub async fn translate_embed(service: &TranslateService, embed: Embed) -> Embed {
    let Embed {
        title,
        description,
        url,
        color,
        author,
        footer,
        image,
        thumbnail,
        fields,
    } = embed;

    let (title, description, author, footer, fields) = futures::join!(
        translate_opt(service, title),
        translate_opt(service, description),
        async {
            match author {
                Some(mut a) => {
                    a.name = maybe_bilingual(service, &a.name).await;
                    Some(a)
                }
                None => None,
            }
        },
        async {
            match footer {
                Some(mut f) => {
                    f.text = maybe_bilingual(service, &f.text).await;
                    Some(f)
                }
                None => None,
            }
        },
        futures::future::join_all(fields.into_iter().map(|mut f| async move {
            let (name, value) = futures::join!(
                maybe_bilingual(service, &f.name),
                maybe_bilingual(service, &f.value)
            );
            f.name = name;
            f.value = value;
            f
        })),
    );

    Embed {
        title,
        description,
        url,
        color,
        author,
        footer,
        image,
        thumbnail,
        fields,
    }
}

/// 构造单个分片的载荷
///
/// Bot 中继线路不携带展示身份字段（接口不支持伪装）。
pub async fn build_chunk_payload(
    chunk: &str,
    message: &OutboundMessage,
    files: &[DownloadedFile],
    via_bot: bool,
    service: &TranslateService,
) -> MessagePayload {
    let mut payload = MessagePayload::default();

    if let Some(reply) = &message.reply_to {
        payload.message_reference = Some(MessageReference {
            message_id: reply.message_id.clone(),
            channel_id: Some(reply.channel_id.clone()),
            fail_if_not_exists: false,
        });
    }

    if !via_bot {
        payload.username = message.username.clone();
        payload.avatar_url = message.avatar_url.clone();
    }

    payload.components = message.components.clone();

    let extra_embeds = futures::future::join_all(
        message
            .embeds
            .iter()
            .cloned()
            .map(|e| translate_embed(service, e)),
    )
    .await;

    if !files.is_empty() {
        // 上传分片：正文作为区块描述，首个图片内联进区块
        let mut block = Embed::default();
        if !chunk.is_empty() {
            block.description = Some(truncate_chars(chunk, EMBED_DESC_LIMIT));
        }
        if files[0].kind == FileKind::Image {
            block.image = Some(EmbedImage {
                url: format!("attachment://{}", files[0].filename),
            });
        }
        payload.embeds = vec![block];
        payload.embeds.extend(extra_embeds);
        payload.attachments = files
            .iter()
            .enumerate()
            .map(|(id, f)| AttachmentRef {
                id,
                filename: f.filename.clone(),
            })
            .collect();
    } else if message.use_embed {
        let mut embeds = Vec::with_capacity(extra_embeds.len() + 1);
        if !chunk.is_empty() {
            embeds.push(Embed {
                description: Some(chunk.to_string()),
                ..Default::default()
            });
        }
        embeds.extend(extra_embeds);
        payload.embeds = embeds;
    } else {
        if !chunk.is_empty() {
            payload.content = Some(chunk.to_string());
        }
        payload.embeds = extra_embeds;
    }

    payload
}
