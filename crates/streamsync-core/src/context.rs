//! ビルドコンテキストの解決
//!
//! ビルドの JSON ドキュメント（`{"metadata": {"namespace": ...}}`）から
//! namespace を取り出します。ドキュメント自体が存在しない場合は
//! プラットフォームを呼ぶ前に失敗します。

use crate::error::{Result, SyncError};
use serde_json::Value;

/// ビルドコンテキストを格納する既定の環境変数
pub const DEFAULT_BUILD_KEY: &str = "BUILD";

/// ビルドコンテキストの供給元
pub trait ContextSource: Send + Sync {
    /// 生のドキュメントを読み込む。存在しなければ `ContextUnavailable`
    fn load(&self) -> Result<String>;
}

/// 環境変数からビルドコンテキストを読むソース
#[derive(Debug, Clone)]
pub struct EnvContextSource {
    key: String,
}

impl Default for EnvContextSource {
    fn default() -> Self {
        Self::new(DEFAULT_BUILD_KEY)
    }
}

impl EnvContextSource {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl ContextSource for EnvContextSource {
    fn load(&self) -> Result<String> {
        std::env::var(&self.key).map_err(|_| SyncError::ContextUnavailable {
            key: self.key.clone(),
        })
    }
}

/// 固定値のソース（CLI の `--build-json` やテスト用）
#[derive(Debug, Clone, Default)]
pub struct StaticContextSource {
    document: Option<String>,
}

impl StaticContextSource {
    pub fn new(document: Option<String>) -> Self {
        Self { document }
    }

    pub fn present(document: impl Into<String>) -> Self {
        Self::new(Some(document.into()))
    }

    pub fn absent() -> Self {
        Self::new(None)
    }
}

impl ContextSource for StaticContextSource {
    fn load(&self) -> Result<String> {
        self.document
            .clone()
            .ok_or_else(|| SyncError::ContextUnavailable {
                key: DEFAULT_BUILD_KEY.to_string(),
            })
    }
}

/// 解決済みのビルドコンテキスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    /// ImageStream を置く namespace。None は既定スコープ
    pub namespace: Option<String>,

    /// ビルド名（ログ用）
    pub build_name: Option<String>,
}

impl BuildContext {
    /// ドキュメントをパース
    ///
    /// JSON として不正なら `ContextMalformed`。`metadata` が無い・
    /// オブジェクトでない場合は namespace なしとして扱います。
    pub fn parse(document: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(document)?;

        let Some(metadata) = value.get("metadata").and_then(Value::as_object) else {
            tracing::debug!("Build context has no metadata section");
            return Ok(Self::default());
        };

        let namespace = match metadata.get("namespace") {
            None => None,
            Some(Value::String(ns)) => Some(ns.clone()),
            Some(other) => {
                tracing::warn!(
                    "Ignoring non-string namespace in build context: {}",
                    other
                );
                None
            }
        };

        let build_name = metadata
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            namespace,
            build_name,
        })
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

/// ソースを一度だけ読み込んでコンテキストを解決
pub fn resolve(source: &dyn ContextSource) -> Result<BuildContext> {
    let document = source.load()?;
    let context = BuildContext::parse(&document)?;

    tracing::debug!(
        namespace = context.namespace().unwrap_or("<default>"),
        build = context.build_name.as_deref().unwrap_or("<unknown>"),
        "Resolved build context"
    );

    Ok(context)
}
