//! Bearer トークンの解決
//!
//! 以下の優先順位でトークンを探します:
//! 1. 設定で明示されたトークン
//! 2. 環境変数 STREAMSYNC_TOKEN
//! 3. サービスアカウントのトークンファイル

use crate::error::{OpenShiftError, Result};
use std::path::{Path, PathBuf};

/// トークンを指定する環境変数
pub const TOKEN_ENV: &str = "STREAMSYNC_TOKEN";

/// ビルド Pod 内のサービスアカウントトークン
pub const SERVICE_ACCOUNT_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// トークン探索の設定
#[derive(Debug, Clone)]
pub struct TokenResolver {
    token_path: PathBuf,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResolver {
    pub fn new() -> Self {
        Self {
            token_path: PathBuf::from(SERVICE_ACCOUNT_TOKEN_PATH),
        }
    }

    /// 指定したトークンファイルを使用
    pub fn with_token_path(token_path: impl Into<PathBuf>) -> Self {
        Self {
            token_path: token_path.into(),
        }
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// トークンを解決
    ///
    /// # Returns
    /// * `Ok(None)` - 認証を使わない場合
    /// * `Ok(Some(token))` - トークンが見つかった場合
    /// * `Err(TokenNotFound)` - 認証が有効なのにトークンが無い場合
    pub fn resolve(&self, use_auth: bool, explicit: Option<&str>) -> Result<Option<String>> {
        if !use_auth {
            return Ok(None);
        }

        if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
            return Ok(Some(token.to_string()));
        }

        if let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.trim().is_empty()
        {
            tracing::debug!("Using token from {}", TOKEN_ENV);
            return Ok(Some(token.trim().to_string()));
        }

        if !self.token_path.exists() {
            return Err(OpenShiftError::TokenNotFound(self.token_path.clone()));
        }

        let token =
            std::fs::read_to_string(&self.token_path).map_err(|source| OpenShiftError::TokenRead {
                path: self.token_path.clone(),
                source,
            })?;
        let token = token.trim();

        if token.is_empty() {
            return Err(OpenShiftError::TokenNotFound(self.token_path.clone()));
        }

        tracing::debug!("Using service account token from {:?}", self.token_path);
        Ok(Some(token.to_string()))
    }
}
