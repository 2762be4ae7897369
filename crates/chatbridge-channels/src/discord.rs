//! Discord 发送端
//!
//! 批量编排：消息之间并发投递，单条消息内分片顺序投递；
//! 结果按消息完成顺序汇总，仅保证同一消息内的分片次序。

use chatbridge_core::{
    apply_replacements, BridgeConfig, DeliveryResult, OutboundMessage, Result, WebhookInfo,
};
use chatbridge_translate::TranslateService;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::RwLock;

use crate::builder::{build_chunk_payload, maybe_bilingual, plan_chunks};
use crate::transport::Transport;
use crate::types::Route;

/// Discord 发送端
pub struct DiscordSender {
    config: BridgeConfig,
    transport: Transport,
    translator: TranslateService,
    webhook_info: RwLock<Option<WebhookInfo>>,
}

impl DiscordSender {
    /// 创建发送端
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let transport = Transport::new(
            config.webhook_url.clone(),
            config.bot.token.clone(),
            config.proxy.as_deref(),
        )?;
        let translator = TranslateService::new(&config.translate);

        Ok(Self {
            config,
            transport,
            translator,
            webhook_info: RwLock::new(None),
        })
    }

    /// 尽力拉取 Webhook 元数据，为 Bot 中继解析默认频道
    ///
    /// 失败时只记日志，发送端退化为纯 Webhook 投递。
    pub async fn prepare(&self) {
        match self.transport.fetch_webhook_info().await {
            Ok(info) => {
                tracing::info!(
                    "Webhook 元数据就绪: guild={:?} channel={:?} name={:?}",
                    info.guild_id,
                    info.channel_id,
                    info.name
                );
                *self.webhook_info.write().await = Some(info);
            }
            Err(e) => {
                tracing::warn!("获取 Webhook 元数据失败，退化为 Webhook 投递: {}", e);
            }
        }
    }

    /// 已解析的默认频道 ID
    pub async fn default_channel_id(&self) -> Option<String> {
        self.webhook_info
            .read()
            .await
            .as_ref()
            .and_then(|info| info.channel_id.clone())
    }

    /// 批量投递
    ///
    /// 空批次为空操作。所有消息并发处理，互不阻塞；
    /// 返回值为各消息结果按完成顺序的拼接。
    pub async fn send_batch(&self, messages: Vec<OutboundMessage>) -> Vec<DeliveryResult> {
        if messages.is_empty() {
            return Vec::new();
        }

        let mut tasks: FuturesUnordered<_> = messages
            .into_iter()
            .map(|message| self.process_message(message))
            .collect();

        let mut results = Vec::new();
        while let Some(message_results) = tasks.next().await {
            results.extend(message_results);
        }
        results
    }

    /// 处理单条消息：替换 → 翻译一次 → 分片 → 顺序投递
    async fn process_message(&self, message: OutboundMessage) -> Vec<DeliveryResult> {
        let text = apply_replacements(&message.content, &self.config.replacements);
        let text = maybe_bilingual(&self.translator, &text).await;

        let chunks = plan_chunks(&message, &text);
        if chunks.is_empty() {
            return Vec::new();
        }

        // Bot 中继需要启用且默认频道已解析，否则走 Webhook
        let bot_channel = if self.config.bot.enabled && self.config.bot.token.is_some() {
            self.default_channel_id().await
        } else {
            None
        };

        // 上传文件顺序抓取；任一文件失败则整条消息放弃
        let mut files = Vec::new();
        for upload in &message.uploads {
            match self.transport.download_file(upload).await {
                Ok(file) => files.push(file),
                Err(e) => {
                    tracing::warn!("抓取上传文件失败，放弃该消息: {}", e);
                    return Vec::new();
                }
            }
        }

        let via_bot = bot_channel.is_some();
        let route = match bot_channel {
            Some(channel_id) => Route::Bot { channel_id },
            None => Route::Webhook,
        };

        let mut results = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let payload =
                build_chunk_payload(chunk, &message, &files, via_bot, &self.translator).await;

            match self.transport.deliver(&route, payload, &files).await {
                Ok(Some((message_id, channel_id))) => {
                    results.push(DeliveryResult {
                        source_id: if index == 0 {
                            message.source_id.clone()
                        } else {
                            None
                        },
                        message_id,
                        channel_id,
                    });
                }
                Ok(None) => {
                    tracing::debug!("分片 {} 无投递确认，不记录结果", index);
                }
                Err(e) => {
                    tracing::warn!("分片 {} 投递失败: {}", index, e);
                }
            }
        }
        results
    }
}
