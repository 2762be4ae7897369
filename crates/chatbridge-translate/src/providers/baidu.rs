//! 百度翻译
//!
//! 签名规则：`md5(appid + q + salt + secret)`，salt 取当前时间戳。

use async_trait::async_trait;
use chatbridge_core::{BaiduConfig, BridgeError, Result, TargetLang};
use md5::{Digest, Md5};
use reqwest::Client;

use crate::providers::{Translator, TRANSLATE_TIMEOUT};

const API_URL: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";

/// 百度翻译后端
pub struct BaiduTranslator {
    config: BaiduConfig,
    client: Client,
}

impl BaiduTranslator {
    pub fn new(config: BaiduConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn target_code(target: TargetLang) -> &'static str {
        match target {
            TargetLang::Zh => "zh",
            TargetLang::En => "en",
        }
    }

    /// 计算请求签名
    fn sign(app_id: &str, secret: &str, text: &str, salt: &str) -> String {
        let input = format!("{}{}{}{}", app_id, text, salt, secret);
        hex::encode(Md5::digest(input.as_bytes()))
    }
}

#[async_trait]
impl Translator for BaiduTranslator {
    fn name(&self) -> &str {
        "baidu"
    }

    async fn translate(&self, text: &str, target: TargetLang) -> Result<String> {
        let salt = chrono::Utc::now().timestamp_millis().to_string();
        let sign = Self::sign(&self.config.app_id, &self.config.secret, text, &salt);

        let response = self
            .client
            .get(API_URL)
            .timeout(TRANSLATE_TIMEOUT)
            .query(&[
                ("q", text),
                ("from", "auto"),
                ("to", Self::target_code(target)),
                ("appid", self.config.app_id.as_str()),
                ("salt", salt.as_str()),
                ("sign", sign.as_str()),
            ])
            .send()
            .await
            .map_err(|e| BridgeError::Http(format!("百度 API 请求失败: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BridgeError::Api(format!("百度 API 错误: {}", error_text)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BridgeError::Parse(format!("解析响应失败: {}", e)))?;

        if let Some(code) = json.get("error_code").and_then(|v| v.as_str()) {
            let msg = json["error_msg"].as_str().unwrap_or_default();
            return Err(BridgeError::Api(format!(
                "百度 API 返回错误: {} - {}",
                code, msg
            )));
        }

        let segments = json["trans_result"]
            .as_array()
            .ok_or_else(|| BridgeError::Parse("响应缺少译文".to_string()))?;

        let translated: Vec<&str> = segments
            .iter()
            .filter_map(|seg| seg["dst"].as_str())
            .collect();

        if translated.is_empty() {
            return Err(BridgeError::Parse("响应缺少译文".to_string()));
        }

        Ok(translated.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_fixture() {
        // 固定 appid/密钥/salt 下的已知签名
        let sign = BaiduTranslator::sign(
            "20240501000123456",
            "s3cr3tkey",
            "hello world",
            "1717000000",
        );
        assert_eq!(sign, "ae37e6c8ecdc64fdfef258b75393b6c2");
    }

    #[test]
    fn test_sign_changes_with_salt() {
        let a = BaiduTranslator::sign("id", "sec", "text", "1");
        let b = BaiduTranslator::sign("id", "sec", "text", "2");
        assert_ne!(a, b);
    }
}
