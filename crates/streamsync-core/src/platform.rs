//! Platform client trait definition

use crate::config::PlatformSettings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// HTTP status the platform uses for a missing resource
pub const STATUS_NOT_FOUND: u16 = 404;

/// Image stream platform abstraction
///
/// `namespace` が `None` の場合、クライアントは namespace を指定せずに
/// 呼び出します（既定スコープはクライアント側で決まる）。
/// `Some("")` とは区別されます。
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Fetch an image stream by name
    async fn get_image_stream(
        &self,
        name: &str,
        namespace: Option<&str>,
    ) -> Result<StreamDescriptor, PlatformError>;

    /// Create an image stream tracking `repository`
    async fn create_image_stream(
        &self,
        name: &str,
        repository: &str,
        namespace: Option<&str>,
    ) -> Result<StreamDescriptor, PlatformError>;

    /// Refresh tag metadata of an existing image stream from its repository
    async fn import_image(&self, name: &str, namespace: Option<&str>)
    -> Result<(), PlatformError>;
}

/// 接続設定からクライアントを作るファクトリ
///
/// クライアントの構築はビルドコンテキストの解決後に行われます。
pub trait ClientConnector: Send + Sync {
    fn connect(
        &self,
        settings: &PlatformSettings,
    ) -> Result<Box<dyn PlatformClient>, PlatformError>;
}

/// Platform client errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("platform responded with HTTP {status}: {message}")]
    Response { status: u16, message: String },

    #[error("platform request failed: {0}")]
    Transport(String),

    #[error("unexpected platform response: {0}")]
    InvalidResponse(String),

    #[error("invalid platform request: {0}")]
    InvalidRequest(String),
}

impl PlatformError {
    pub fn response(status: u16, message: impl Into<String>) -> Self {
        Self::Response {
            status,
            message: message.into(),
        }
    }

    /// HTTP status, if the platform answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            PlatformError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 404 のみを「存在しない」とみなす
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(STATUS_NOT_FOUND)
    }
}

/// Decoded image stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub name: String,

    pub namespace: Option<String>,

    /// Backing repository (e.g. "registry.example.com/library/app")
    pub docker_image_repository: Option<String>,

    /// Tags currently known to the stream
    #[serde(default)]
    pub tags: Vec<String>,

    pub resource_version: Option<String>,
}

impl StreamDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.docker_image_repository = Some(repository.into());
        self
    }

    pub fn with_namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace.map(str::to_string);
        self
    }
}
