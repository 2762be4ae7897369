//! 配置管理

use serde::{Deserialize, Serialize};

/// 发送端配置
///
/// 进程级只读，构造后随 sender 实例共享。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// 目标 Webhook 地址
    pub webhook_url: String,
    /// 出站代理（http/socks5，可选）
    pub proxy: Option<String>,
    /// 翻译配置
    pub translate: TranslateConfig,
    /// Bot 中继配置
    pub bot: BotRelayConfig,
    /// 替换词典（按插入顺序生效）
    pub replacements: Vec<ReplacementRule>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            proxy: None,
            translate: TranslateConfig::default(),
            bot: BotRelayConfig::default(),
            replacements: Vec::new(),
        }
    }
}

/// 翻译配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// 是否启用
    pub enabled: bool,
    /// 选用的提供商
    pub provider: TranslateProvider,
    /// OpenAI 兼容后端（openai / deepseek 共用）
    pub openai: Option<AiChatConfig>,
    /// Google 翻译
    pub google: Option<GoogleConfig>,
    /// 百度翻译
    pub baidu: Option<BaiduConfig>,
    /// 有道翻译
    pub youdao: Option<YoudaoConfig>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: TranslateProvider::OpenAI,
            openai: None,
            google: None,
            baidu: None,
            youdao: None,
        }
    }
}

/// 翻译提供商
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TranslateProvider {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    Google,
    Baidu,
    Youdao,
}

/// OpenAI 兼容聊天后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiChatConfig {
    pub api_key: String,
    /// 自定义 API 地址（deepseek 等兼容后端）
    pub base_url: Option<String>,
    pub model: String,
}

/// Google 翻译配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
}

/// 百度翻译配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaiduConfig {
    pub app_id: String,
    pub secret: String,
}

/// 有道翻译配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoudaoConfig {
    pub app_key: String,
    pub secret: String,
}

/// Bot 中继配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BotRelayConfig {
    /// 是否启用 Bot API 投递
    pub enabled: bool,
    /// Bot Token
    pub token: Option<String>,
}

/// 替换规则
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementRule {
    pub pattern: String,
    pub replacement: String,
}

impl BridgeConfig {
    /// 从文件加载配置
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::BridgeError::Config(format!("读取配置文件失败: {}", e)))?;

        let config: BridgeConfig = serde_json::from_str(&content)
            .map_err(|e| crate::BridgeError::Config(format!("解析配置文件失败: {}", e)))?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| crate::BridgeError::Config(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| crate::BridgeError::Config(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}
