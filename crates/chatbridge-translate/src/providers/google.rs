//! Google 翻译
//!
//! 简单的 JSON 调用，API Key 放在查询参数，无签名。

use async_trait::async_trait;
use chatbridge_core::{BridgeError, GoogleConfig, Result, TargetLang};
use reqwest::Client;

use crate::providers::{Translator, TRANSLATE_TIMEOUT};

const API_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Google 翻译后端
pub struct GoogleTranslator {
    config: GoogleConfig,
    client: Client,
}

impl GoogleTranslator {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn target_code(target: TargetLang) -> &'static str {
        match target {
            TargetLang::Zh => "zh-CN",
            TargetLang::En => "en",
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(&self, text: &str, target: TargetLang) -> Result<String> {
        let body = serde_json::json!({
            "q": text,
            "target": Self::target_code(target),
            "format": "text",
        });

        let response = self
            .client
            .post(API_URL)
            .timeout(TRANSLATE_TIMEOUT)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| BridgeError::Http(format!("Google API 请求失败: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BridgeError::Api(format!("Google API 错误: {}", error_text)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BridgeError::Parse(format!("解析响应失败: {}", e)))?;

        let translated = json["data"]["translations"][0]["translatedText"]
            .as_str()
            .ok_or_else(|| BridgeError::Parse("响应缺少译文".to_string()))?;

        Ok(translated.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_code() {
        assert_eq!(GoogleTranslator::target_code(TargetLang::Zh), "zh-CN");
        assert_eq!(GoogleTranslator::target_code(TargetLang::En), "en");
    }
}
