//! 统一错误处理

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("翻译服务错误: {0}")]
    Translate(String),

    #[error("消息通道错误: {0}")]
    Channel(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP 请求错误: {0}")]
    Http(String),

    #[error("API 错误: {0}")]
    Api(String),

    #[error("解析错误: {0}")]
    Parse(String),

    #[error("资源超限: {0}")]
    ResourceLimit(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
