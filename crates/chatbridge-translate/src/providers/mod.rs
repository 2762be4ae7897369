//! 翻译提供商实现

mod baidu;
mod google;
mod openai;
mod youdao;

pub use baidu::*;
pub use google::*;
pub use openai::*;
pub use youdao::*;

use async_trait::async_trait;
use chatbridge_core::{Result, TargetLang, TranslateConfig, TranslateProvider};
use std::time::Duration;

/// 第三方翻译调用统一超时
pub const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(60);

/// 翻译提供商 Trait
///
/// 仅支持中英互译，其余语言组合由上游的语言占比门控过滤。
#[async_trait]
pub trait Translator: Send + Sync {
    /// 提供商名称
    fn name(&self) -> &str;

    /// 翻译文本到目标语言
    async fn translate(&self, text: &str, target: TargetLang) -> Result<String>;
}

/// 按配置构造翻译提供商
///
/// 凭据缺失时返回 `None`，调用方据此静默降级为「不翻译」。
pub fn create_translator(config: &TranslateConfig) -> Option<Box<dyn Translator>> {
    match config.provider {
        TranslateProvider::OpenAI => config
            .openai
            .as_ref()
            .filter(|c| !c.api_key.is_empty())
            .map(|c| Box::new(AiChatTranslator::openai(c.clone())) as Box<dyn Translator>),
        TranslateProvider::DeepSeek => config
            .openai
            .as_ref()
            .filter(|c| !c.api_key.is_empty())
            .map(|c| Box::new(AiChatTranslator::deepseek(c.clone())) as Box<dyn Translator>),
        TranslateProvider::Google => config
            .google
            .as_ref()
            .filter(|c| !c.api_key.is_empty())
            .map(|c| Box::new(GoogleTranslator::new(c.clone())) as Box<dyn Translator>),
        TranslateProvider::Baidu => config
            .baidu
            .as_ref()
            .filter(|c| !c.app_id.is_empty() && !c.secret.is_empty())
            .map(|c| Box::new(BaiduTranslator::new(c.clone())) as Box<dyn Translator>),
        TranslateProvider::Youdao => config
            .youdao
            .as_ref()
            .filter(|c| !c.app_key.is_empty() && !c.secret.is_empty())
            .map(|c| Box::new(YoudaoTranslator::new(c.clone())) as Box<dyn Translator>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbridge_core::{AiChatConfig, BaiduConfig};

    #[test]
    fn test_factory_without_credentials() {
        let config = TranslateConfig {
            enabled: true,
            provider: TranslateProvider::Baidu,
            ..Default::default()
        };
        assert!(create_translator(&config).is_none());
    }

    #[test]
    fn test_factory_rejects_empty_key() {
        let config = TranslateConfig {
            enabled: true,
            provider: TranslateProvider::OpenAI,
            openai: Some(AiChatConfig {
                api_key: String::new(),
                base_url: None,
                model: "gpt-4o-mini".to_string(),
            }),
            ..Default::default()
        };
        assert!(create_translator(&config).is_none());
    }

    #[test]
    fn test_factory_selects_provider() {
        let config = TranslateConfig {
            enabled: true,
            provider: TranslateProvider::Baidu,
            baidu: Some(BaiduConfig {
                app_id: "app".to_string(),
                secret: "sec".to_string(),
            }),
            ..Default::default()
        };
        let translator = create_translator(&config).unwrap();
        assert_eq!(translator.name(), "baidu");
    }
}
