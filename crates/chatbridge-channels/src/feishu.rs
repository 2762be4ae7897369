//! 飞书卡片发送端
//!
//! 次平台侧信道：纯卡片构造加单次 JSON POST，无重试、无并发。

use chatbridge_core::{BridgeError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// 飞书发送端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeishuConfig {
    /// 卡片 Webhook 地址
    pub webhook: String,
    /// 是否启用
    pub enabled: bool,
}

/// 飞书卡片发送端
pub struct FeishuSender {
    config: FeishuConfig,
    client: Client,
}

/// 交互式卡片
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub config: CardConfig,
    pub header: CardHeader,
    pub elements: Vec<CardElement>,
}

/// 卡片全局配置
#[derive(Debug, Clone, Serialize)]
pub struct CardConfig {
    pub wide_screen_mode: bool,
}

/// 卡片标题栏
#[derive(Debug, Clone, Serialize)]
pub struct CardHeader {
    pub title: CardTitle,
    pub template: String,
}

/// 卡片标题文本
#[derive(Debug, Clone, Serialize)]
pub struct CardTitle {
    pub tag: String,
    pub content: String,
}

/// 卡片内容元素
#[derive(Debug, Clone, Serialize)]
pub struct CardElement {
    pub tag: String,
    pub content: String,
}

impl FeishuSender {
    /// 创建新的飞书发送端
    pub fn new(config: FeishuConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// 构造转发卡片
    pub fn build_card(title: &str, body: &str) -> Card {
        Card {
            config: CardConfig {
                wide_screen_mode: true,
            },
            header: CardHeader {
                title: CardTitle {
                    tag: "plain_text".to_string(),
                    content: title.to_string(),
                },
                template: "blue".to_string(),
            },
            elements: vec![CardElement {
                tag: "markdown".to_string(),
                content: body.to_string(),
            }],
        }
    }

    /// 发送交互式卡片
    pub async fn send_card(&self, title: &str, body: &str) -> Result<()> {
        if !self.config.enabled {
            return Err(BridgeError::Config("飞书发送端未启用".to_string()));
        }

        let card = Self::build_card(title, body);
        let payload = json!({
            "msg_type": "interactive",
            "card": card,
        });

        let response = self
            .client
            .post(&self.config.webhook)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| BridgeError::Http(format!("飞书 API 请求失败: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BridgeError::Api(format!("飞书 API 错误: {}", error_text)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_card_shape() {
        let card = FeishuSender::build_card("标题", "**正文**");
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["header"]["title"]["tag"], "plain_text");
        assert_eq!(json["header"]["title"]["content"], "标题");
        assert_eq!(json["elements"][0]["tag"], "markdown");
        assert_eq!(json["elements"][0]["content"], "**正文**");
    }

    #[tokio::test]
    async fn test_disabled_sender_rejects_send() {
        let sender = FeishuSender::new(FeishuConfig {
            webhook: "https://open.feishu.cn/open-apis/bot/v2/hook/xxx".to_string(),
            enabled: false,
        });
        assert!(sender.send_card("t", "b").await.is_err());
    }
}
