//! OpenShift ImageStream API client
//!
//! `{url}/oapi/v1/namespaces/{namespace}/imagestreams` に対して
//! 取得・作成・再インポートを行います。

use crate::auth::TokenResolver;
use crate::error::{OpenShiftError, Result};
use crate::model::{ImageStream, strip_repository_check};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use streamsync_core::{
    ClientConnector, PlatformClient, PlatformError, PlatformSettings, StreamDescriptor,
};

/// namespace 未指定時に使う namespace
pub const DEFAULT_NAMESPACE: &str = "default";

const API_PREFIX: [&str; 2] = ["oapi", "v1"];

/// OpenShift API client
pub struct OpenShiftClient {
    client: reqwest::Client,
    base_url: Url,
    default_namespace: String,
    token: Option<String>,
}

impl OpenShiftClient {
    /// 接続設定からクライアントを作成
    pub fn from_settings(settings: &PlatformSettings, resolver: &TokenResolver) -> Result<Self> {
        let base_url = normalize_url(&settings.url)?;
        let token = resolver.resolve(settings.use_auth, settings.token.as_deref())?;

        if !settings.verify_ssl {
            tracing::warn!("TLS certificate verification is disabled for {}", base_url);
        }

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!settings.verify_ssl)
            .build()?;

        Ok(Self {
            client,
            base_url,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            token,
        })
    }

    /// namespace 未指定時の namespace を変更
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// ImageStream コレクション（`name` 指定時は個別リソース）の URL
    ///
    /// namespace と name は一つのパスセグメントとしてエンコードされます。
    /// 空文字や `.` / `..` は送信前に `PlatformError::InvalidRequest` になります。
    pub fn stream_url(
        &self,
        namespace: Option<&str>,
        name: Option<&str>,
    ) -> std::result::Result<Url, PlatformError> {
        let namespace = namespace.unwrap_or(&self.default_namespace);
        check_segment("namespace", namespace)?;
        if let Some(name) = name {
            check_segment("name", name)?;
        }

        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                PlatformError::InvalidRequest(format!("{} cannot be a base URL", self.base_url))
            })?;
            path.pop_if_empty()
                .extend(API_PREFIX)
                .push("namespaces")
                .push(namespace)
                .push("imagestreams");
            if let Some(name) = name {
                path.push(name);
            }
        }
        Ok(url)
    }

    /// リクエストを送り、2xx 以外を `PlatformError::Response` に変換
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<reqwest::Response, PlatformError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
        Err(PlatformError::response(status.as_u16(), message))
    }

    async fn fetch_raw(
        &self,
        name: &str,
        namespace: Option<&str>,
    ) -> std::result::Result<Value, PlatformError> {
        let url = self.stream_url(namespace, Some(name))?;
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        response
            .json()
            .await
            .map_err(|e| PlatformError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PlatformClient for OpenShiftClient {
    async fn get_image_stream(
        &self,
        name: &str,
        namespace: Option<&str>,
    ) -> std::result::Result<StreamDescriptor, PlatformError> {
        let raw = self.fetch_raw(name, namespace).await?;
        let stream: ImageStream = serde_json::from_value(raw)
            .map_err(|e| PlatformError::InvalidResponse(e.to_string()))?;
        Ok(stream.into())
    }

    async fn create_image_stream(
        &self,
        name: &str,
        repository: &str,
        namespace: Option<&str>,
    ) -> std::result::Result<StreamDescriptor, PlatformError> {
        let url = self.stream_url(namespace, None)?;
        tracing::debug!("POST {}", url);

        let body = ImageStream::for_repository(name, repository);
        let response = self.send(self.client.post(url).json(&body)).await?;
        let created: ImageStream = response
            .json()
            .await
            .map_err(|e| PlatformError::InvalidResponse(e.to_string()))?;
        Ok(created.into())
    }

    async fn import_image(
        &self,
        name: &str,
        namespace: Option<&str>,
    ) -> std::result::Result<(), PlatformError> {
        let mut raw = self.fetch_raw(name, namespace).await?;

        if !strip_repository_check(&mut raw) {
            tracing::debug!("{} has no repository check annotation yet", name);
        }

        let url = self.stream_url(namespace, Some(name))?;
        tracing::debug!("PUT {}", url);
        self.send(self.client.put(url).json(&raw)).await?;
        Ok(())
    }
}

/// URL を検証し末尾の `/` を取り除く
fn normalize_url(url: &str) -> Result<Url> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(OpenShiftError::InvalidUrl(url.to_string()));
    }
    Url::parse(trimmed).map_err(|_| OpenShiftError::InvalidUrl(url.to_string()))
}

/// 一つのパスセグメントとして使えない値を拒否
fn check_segment(what: &str, value: &str) -> std::result::Result<(), PlatformError> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(PlatformError::InvalidRequest(format!(
            "ImageStream {} '{}' is not a valid path segment",
            what, value
        )));
    }
    Ok(())
}

/// プラグインランナー向けのコネクタ
#[derive(Debug, Clone, Default)]
pub struct OpenShiftConnector {
    resolver: TokenResolver,
    default_namespace: Option<String>,
}

impl OpenShiftConnector {
    pub fn new(resolver: TokenResolver) -> Self {
        Self {
            resolver,
            default_namespace: None,
        }
    }

    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = Some(namespace.into());
        self
    }
}

impl ClientConnector for OpenShiftConnector {
    fn connect(
        &self,
        settings: &PlatformSettings,
    ) -> std::result::Result<Box<dyn PlatformClient>, PlatformError> {
        let mut client = OpenShiftClient::from_settings(settings, &self.resolver)?;
        if let Some(namespace) = &self.default_namespace {
            client = client.with_default_namespace(namespace.clone());
        }
        Ok(Box::new(client))
    }
}
