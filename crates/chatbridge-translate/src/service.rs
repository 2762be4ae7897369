//! 翻译调度服务
//!
//! 把提供商的 `Result` 收敛为「尽力而为」的 `Option`：
//! 未启用、缺凭据、空文本、无语言信号、远端失败或响应不可解析
//! 一律返回 `None`，只记诊断日志，不向上传播错误。

use chatbridge_core::{language_stats, TargetLang, TranslateConfig};

use crate::providers::{create_translator, Translator};

/// 翻译服务
pub struct TranslateService {
    enabled: bool,
    translator: Option<Box<dyn Translator>>,
}

impl TranslateService {
    pub fn new(config: &TranslateConfig) -> Self {
        if !config.enabled {
            return Self {
                enabled: false,
                translator: None,
            };
        }

        let translator = create_translator(config);
        if translator.is_none() {
            tracing::warn!("翻译提供商缺少凭据，翻译功能不可用");
        }

        Self {
            enabled: true,
            translator,
        }
    }

    /// 使用自定义提供商构造（测试或扩展用）
    pub fn with_translator(translator: Box<dyn Translator>) -> Self {
        Self {
            enabled: true,
            translator: Some(translator),
        }
    }

    /// 翻译功能是否就绪
    pub fn is_active(&self) -> bool {
        self.enabled && self.translator.is_some()
    }

    /// 翻译文本，失败时返回 `None`
    pub async fn translate(&self, text: &str, target: TargetLang) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let translator = self.translator.as_ref()?;

        if text.trim().is_empty() {
            return None;
        }

        let stats = language_stats(text);
        if stats.chinese == 0.0 && stats.english == 0.0 {
            return None;
        }

        match translator.translate(text, target).await {
            Ok(translated) if !translated.trim().is_empty() => Some(translated),
            Ok(_) => {
                tracing::debug!("{} 返回空译文", translator.name());
                None
            }
            Err(e) => {
                tracing::warn!("{} 翻译失败: {}", translator.name(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbridge_core::{TranslateConfig, TranslateProvider, YoudaoConfig};

    fn disabled_service() -> TranslateService {
        TranslateService::new(&TranslateConfig::default())
    }

    #[tokio::test]
    async fn test_disabled_returns_none() {
        let service = disabled_service();
        assert!(!service.is_active());
        assert!(service.translate("hello", TargetLang::Zh).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_credentials_returns_none() {
        let config = TranslateConfig {
            enabled: true,
            provider: TranslateProvider::Google,
            ..Default::default()
        };
        let service = TranslateService::new(&config);
        assert!(!service.is_active());
        assert!(service.translate("hello", TargetLang::Zh).await.is_none());
    }

    #[tokio::test]
    async fn test_blank_and_no_signal_skip_remote_call() {
        // 凭据齐全但文本无信号时不应发起远端调用，直接返回 None
        let config = TranslateConfig {
            enabled: true,
            provider: TranslateProvider::Youdao,
            youdao: Some(YoudaoConfig {
                app_key: "k".to_string(),
                secret: "s".to_string(),
            }),
            ..Default::default()
        };
        let service = TranslateService::new(&config);
        assert!(service.is_active());
        assert!(service.translate("   ", TargetLang::Zh).await.is_none());
        assert!(service.translate("12345", TargetLang::Zh).await.is_none());
    }
}
