//! OpenAI 兼容聊天后端翻译
//!
//! openai 与 deepseek 共用同一实现，仅默认 API 地址与名称不同。

use async_trait::async_trait;
use chatbridge_core::{AiChatConfig, BridgeError, Result, TargetLang};
use reqwest::Client;

use crate::providers::{Translator, TRANSLATE_TIMEOUT};

/// 固定低温度，减少意译漂移
const TEMPERATURE: f32 = 0.3;

/// OpenAI 兼容翻译后端
pub struct AiChatTranslator {
    config: AiChatConfig,
    name: &'static str,
    default_base_url: &'static str,
    client: Client,
}

impl AiChatTranslator {
    pub fn openai(config: AiChatConfig) -> Self {
        Self {
            config,
            name: "openai",
            default_base_url: "https://api.openai.com/v1",
            client: Client::new(),
        }
    }

    pub fn deepseek(config: AiChatConfig) -> Self {
        Self {
            config,
            name: "deepseek",
            default_base_url: "https://api.deepseek.com/v1",
            client: Client::new(),
        }
    }

    fn get_base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(self.default_base_url)
    }

    /// 系统指令：钉死翻译方向，只输出译文
    fn system_prompt(target: TargetLang) -> String {
        let lang = match target {
            TargetLang::Zh => "中文",
            TargetLang::En => "英文",
        };
        format!(
            "你是专业的翻译引擎。将用户消息翻译成{}，\
             保留标点、链接、表情符号和数字，不要解释，只输出译文。",
            lang
        )
    }
}

#[async_trait]
impl Translator for AiChatTranslator {
    fn name(&self) -> &str {
        self.name
    }

    async fn translate(&self, text: &str, target: TargetLang) -> Result<String> {
        let url = format!("{}/chat/completions", self.get_base_url());

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": Self::system_prompt(target) },
                { "role": "user", "content": text }
            ],
            "temperature": TEMPERATURE,
        });

        let response = self
            .client
            .post(&url)
            .timeout(TRANSLATE_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| BridgeError::Http(format!("{} API 请求失败: {}", self.name, e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BridgeError::Api(format!(
                "{} API 错误: {}",
                self.name, error_text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BridgeError::Parse(format!("解析响应失败: {}", e)))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| BridgeError::Parse("响应缺少译文".to_string()))?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_pins_direction() {
        assert!(AiChatTranslator::system_prompt(TargetLang::Zh).contains("中文"));
        assert!(AiChatTranslator::system_prompt(TargetLang::En).contains("英文"));
    }

    #[test]
    fn test_base_url_override() {
        let translator = AiChatTranslator::deepseek(AiChatConfig {
            api_key: "k".to_string(),
            base_url: None,
            model: "deepseek-chat".to_string(),
        });
        assert_eq!(translator.get_base_url(), "https://api.deepseek.com/v1");

        let translator = AiChatTranslator::openai(AiChatConfig {
            api_key: "k".to_string(),
            base_url: Some("https://proxy.local/v1".to_string()),
            model: "gpt-4o-mini".to_string(),
        });
        assert_eq!(translator.get_base_url(), "https://proxy.local/v1");
    }
}
