//! 投递传输层
//!
//! 四条线路共享同一条重试规则：目标以 4xx 拒绝且载荷带回复引用时，
//! 剥离引用恰好重发一次；其余失败原样上抛，由编排层丢弃该分片。

use chatbridge_core::{BridgeError, FileUpload, Result, WebhookInfo};
use futures::{Stream, StreamExt};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;

use crate::types::{CreatedMessage, DownloadedFile, MessagePayload, Route};

/// 单次请求超时
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// 文件下载超时
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);
/// 单文件下载上限
pub const MAX_DOWNLOAD_SIZE: usize = 10 * 1024 * 1024;

const BOT_API_BASE: &str = "https://discord.com/api/v10";

/// 是否剥离回复引用后重发
pub fn should_strip_reference(status: StatusCode, has_reference: bool) -> bool {
    status.is_client_error() && has_reference
}

/// 出站传输
pub struct Transport {
    client: Client,
    webhook_url: String,
    bot_token: Option<String>,
    api_base: String,
}

impl Transport {
    /// 创建传输层，可选出站代理
    pub fn new(webhook_url: String, bot_token: Option<String>, proxy: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy_url) = proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| BridgeError::Config(format!("代理配置无效: {}", e)))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| BridgeError::Http(format!("构建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            client,
            webhook_url,
            bot_token,
            api_base: BOT_API_BASE.to_string(),
        })
    }

    /// 覆盖 Bot API 地址（测试或私有部署用）
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn bot_api_url(&self, channel_id: &str) -> String {
        format!("{}/channels/{}/messages", self.api_base, channel_id)
    }

    /// 获取 Webhook 元数据
    pub async fn fetch_webhook_info(&self) -> Result<WebhookInfo> {
        let response = self
            .client
            .get(&self.webhook_url)
            .send()
            .await
            .map_err(|e| BridgeError::Http(format!("Webhook 元数据请求失败: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BridgeError::Api(format!(
                "Webhook 元数据错误: {}",
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BridgeError::Parse(format!("解析响应失败: {}", e)))
    }

    /// 投递一个分片
    ///
    /// 成功响应只有同时带目标消息 ID 与频道 ID 才计入结果，
    /// 否则视作「无确认」返回 `None`。
    pub async fn deliver(
        &self,
        route: &Route,
        mut payload: MessagePayload,
        files: &[DownloadedFile],
    ) -> Result<Option<(String, String)>> {
        let mut response = self.send_once(route, &payload, files).await?;

        if should_strip_reference(response.status(), payload.message_reference.is_some()) {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("目标拒绝回复引用 ({}): {}，剥离后重发", status, body);
            payload.message_reference = None;
            response = self.send_once(route, &payload, files).await?;
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::Channel(format!(
                "投递失败 ({}): {}",
                status, body
            )));
        }

        let created: CreatedMessage = match response.json().await {
            Ok(v) => v,
            Err(_) => return Ok(None),
        };

        match (created.id, created.channel_id) {
            (Some(id), Some(channel_id)) => Ok(Some((id, channel_id))),
            _ => Ok(None),
        }
    }

    /// 单次请求，按线路与有无附件选择四种编码之一
    async fn send_once(
        &self,
        route: &Route,
        payload: &MessagePayload,
        files: &[DownloadedFile],
    ) -> Result<Response> {
        let request = match route {
            Route::Webhook => {
                let builder = self
                    .client
                    .post(&self.webhook_url)
                    .query(&[("wait", "true")]);
                self.encode_body(builder, payload, files)?
            }
            Route::Bot { channel_id } => {
                let token = self
                    .bot_token
                    .as_ref()
                    .ok_or_else(|| BridgeError::Config("未配置 Bot Token".to_string()))?;
                let builder = self
                    .client
                    .post(self.bot_api_url(channel_id))
                    .header("Authorization", format!("Bot {}", token));
                self.encode_body(builder, payload, files)?
            }
        };

        request
            .send()
            .await
            .map_err(|e| BridgeError::Http(format!("投递请求失败: {}", e)))
    }

    /// JSON 或 multipart（payload_json + files[n]）编码
    fn encode_body(
        &self,
        builder: RequestBuilder,
        payload: &MessagePayload,
        files: &[DownloadedFile],
    ) -> Result<RequestBuilder> {
        if files.is_empty() {
            return Ok(builder.json(payload));
        }

        let payload_json = serde_json::to_string(payload)?;
        let mut form = reqwest::multipart::Form::new().text("payload_json", payload_json);
        for (index, file) in files.iter().enumerate() {
            let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                .file_name(file.filename.clone());
            form = form.part(format!("files[{}]", index), part);
        }
        Ok(builder.multipart(form))
    }

    /// 抓取远端文件到内存
    ///
    /// 超过大小上限时中途放弃传输。
    pub async fn download_file(&self, upload: &FileUpload) -> Result<DownloadedFile> {
        let response = self
            .client
            .get(&upload.url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|e| BridgeError::Http(format!("下载请求失败: {}", e)))?;

        if !response.status().is_success() {
            return Err(BridgeError::Http(format!(
                "下载失败 ({}): {}",
                response.status(),
                upload.url
            )));
        }

        let stream = response.bytes_stream().boxed();
        let bytes = read_capped(stream, MAX_DOWNLOAD_SIZE, &upload.filename).await?;

        Ok(DownloadedFile {
            filename: upload.filename.clone(),
            kind: upload.kind,
            bytes,
        })
    }
}

/// 读取字节流，累计超过上限时立即中止
async fn read_capped<S, B, E>(mut stream: S, cap: usize, name: &str) -> Result<Vec<u8>>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut bytes: Vec<u8> = Vec::new();
    while let Some(piece) = stream.next().await {
        let piece = piece.map_err(|e| BridgeError::Http(format!("下载中断: {}", e)))?;
        let piece = piece.as_ref();
        if bytes.len() + piece.len() > cap {
            return Err(BridgeError::ResourceLimit(format!(
                "文件超过 {} 字节上限: {}",
                cap, name
            )));
        }
        bytes.extend_from_slice(piece);
    }
    Ok(bytes)
}
