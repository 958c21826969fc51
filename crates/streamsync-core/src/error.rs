//! ImageStream 同期のエラー型
//!
//! 各ステージ（コンテキスト解決・接続・存在確認・作成・インポート）の失敗は
//! [`SyncError`] で表現し、プラグイン境界で [`PluginExecutionFailed`] に
//! 正規化してホストへ返します。

use crate::platform::PlatformError;
use thiserror::Error;

/// 同期処理の各ステージで発生するエラー
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Build context is unavailable: ${key} is not set")]
    ContextUnavailable { key: String },

    #[error("Build context is not valid JSON: {0}")]
    ContextMalformed(#[from] serde_json::Error),

    #[error("Could not connect to the platform: {source}")]
    PlatformConnect {
        #[source]
        source: PlatformError,
    },

    #[error("Failed to look up ImageStream '{name}': {source}")]
    PlatformLookup {
        name: String,
        #[source]
        source: PlatformError,
    },

    #[error("Failed to create ImageStream '{name}': {source}")]
    PlatformCreate {
        name: String,
        #[source]
        source: PlatformError,
    },

    #[error("Failed to import tags for ImageStream '{name}': {source}")]
    PlatformImport {
        name: String,
        #[source]
        source: PlatformError,
    },
}

impl SyncError {
    /// プラットフォームへの呼び出しを始める前に失敗したかどうか
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SyncError::ContextUnavailable { .. }
                | SyncError::ContextMalformed(_)
                | SyncError::PlatformConnect { .. }
        )
    }
}

/// プラグイン実行失敗
///
/// どのステージで失敗してもホストから見える形はこの一つだけです。
#[derive(Debug, Error)]
#[error("Plugin '{plugin}' failed: {cause}")]
pub struct PluginExecutionFailed {
    pub plugin: String,
    #[source]
    pub cause: SyncError,
}

impl PluginExecutionFailed {
    pub fn new(plugin: impl Into<String>, cause: SyncError) -> Self {
        Self {
            plugin: plugin.into(),
            cause,
        }
    }
}

/// プラグイン設定のエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required plugin option '{0}' is missing or empty")]
    MissingField(&'static str),

    #[error("Invalid plugin arguments: {0}")]
    InvalidArgs(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
