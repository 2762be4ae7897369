//! 有道翻译
//!
//! v3 签名：`sha256(appKey + input + salt + curtime + secret)`。
//! 超过 20 字符的文本按接口要求截断为「前 10 + 长度 + 后 10」参与签名。

use async_trait::async_trait;
use chatbridge_core::{BridgeError, Result, TargetLang, YoudaoConfig};
use reqwest::Client;
use sha2::{Digest, Sha256};

use crate::providers::{Translator, TRANSLATE_TIMEOUT};

const API_URL: &str = "https://openapi.youdao.com/api";

/// 有道翻译后端
pub struct YoudaoTranslator {
    config: YoudaoConfig,
    client: Client,
}

impl YoudaoTranslator {
    pub fn new(config: YoudaoConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn target_code(target: TargetLang) -> &'static str {
        match target {
            TargetLang::Zh => "zh-CHS",
            TargetLang::En => "en",
        }
    }

    /// 签名用的文本截断：超过 20 字符时取「前 10 + 字符数 + 后 10」
    fn truncate_input(text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= 20 {
            return text.to_string();
        }
        let first: String = chars[..10].iter().collect();
        let last: String = chars[chars.len() - 10..].iter().collect();
        format!("{}{}{}", first, chars.len(), last)
    }

    /// 计算 v3 签名
    fn sign(app_key: &str, secret: &str, text: &str, salt: &str, curtime: &str) -> String {
        let input = format!(
            "{}{}{}{}{}",
            app_key,
            Self::truncate_input(text),
            salt,
            curtime,
            secret
        );
        hex::encode(Sha256::digest(input.as_bytes()))
    }
}

#[async_trait]
impl Translator for YoudaoTranslator {
    fn name(&self) -> &str {
        "youdao"
    }

    async fn translate(&self, text: &str, target: TargetLang) -> Result<String> {
        let salt = uuid::Uuid::new_v4().to_string();
        let curtime = chrono::Utc::now().timestamp().to_string();
        let sign = Self::sign(&self.config.app_key, &self.config.secret, text, &salt, &curtime);

        let form = [
            ("q", text),
            ("from", "auto"),
            ("to", Self::target_code(target)),
            ("appKey", self.config.app_key.as_str()),
            ("salt", salt.as_str()),
            ("sign", sign.as_str()),
            ("signType", "v3"),
            ("curtime", curtime.as_str()),
        ];

        let response = self
            .client
            .post(API_URL)
            .timeout(TRANSLATE_TIMEOUT)
            .form(&form)
            .send()
            .await
            .map_err(|e| BridgeError::Http(format!("有道 API 请求失败: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BridgeError::Api(format!("有道 API 错误: {}", error_text)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BridgeError::Parse(format!("解析响应失败: {}", e)))?;

        let error_code = json["errorCode"].as_str().unwrap_or("");
        if error_code != "0" {
            return Err(BridgeError::Api(format!(
                "有道 API 返回错误: {}",
                error_code
            )));
        }

        let translated = json["translation"][0]
            .as_str()
            .ok_or_else(|| BridgeError::Parse("响应缺少译文".to_string()))?;

        Ok(translated.to_string())
    }
}
