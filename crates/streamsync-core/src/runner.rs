//! ポストビルドプラグインランナー
//!
//! パイプラインから渡される `[{"name": ..., "args": {...}}]` を順に実行します。
//! プラグインが失敗した時点で残りは実行せず `RunnerError::PluginFailed` を返します。

use crate::config::{PluginArgs, PluginConfig};
use crate::context::ContextSource;
use crate::error::{ConfigError, PluginExecutionFailed};
use crate::platform::ClientConnector;
use crate::plugin::ImportImagePlugin;
use crate::reconcile::Applied;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 実行するプラグイン一件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRequest {
    pub name: String,

    #[serde(default)]
    pub args: serde_json::Value,
}

/// 成功したプラグインの結果
#[derive(Debug)]
pub struct PluginReport {
    pub plugin: String,
    pub outcome: Applied,
}

/// Plugin runner errors
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Invalid plugin list: {0}")]
    InvalidPlan(#[from] serde_json::Error),

    #[error("Unknown plugin: {0}")]
    UnknownPlugin(String),

    #[error("Invalid arguments for plugin '{plugin}': {source}")]
    InvalidArgs {
        plugin: String,
        #[source]
        source: ConfigError,
    },

    #[error("Post-build plugin '{plugin}' aborted the build")]
    PluginFailed {
        plugin: String,
        #[source]
        source: PluginExecutionFailed,
    },
}

pub type Result<T> = std::result::Result<T, RunnerError>;

/// プラグイン一覧を実行するランナー
pub struct PluginRunner<'a> {
    connector: &'a dyn ClientConnector,
    context: &'a dyn ContextSource,
    requests: Vec<PluginRequest>,
}

impl<'a> PluginRunner<'a> {
    pub fn new(
        connector: &'a dyn ClientConnector,
        context: &'a dyn ContextSource,
        requests: Vec<PluginRequest>,
    ) -> Self {
        Self {
            connector,
            context,
            requests,
        }
    }

    /// JSON のプラグイン一覧をパース
    pub fn parse_requests(json: &str) -> Result<Vec<PluginRequest>> {
        Ok(serde_json::from_str(json)?)
    }

    /// 全プラグインを順に実行
    pub async fn run(&self) -> Result<Vec<PluginReport>> {
        let mut reports = Vec::with_capacity(self.requests.len());

        for request in &self.requests {
            tracing::debug!("Running plugin {}", request.name);
            let outcome = self.run_one(request).await?;
            reports.push(PluginReport {
                plugin: request.name.clone(),
                outcome,
            });
        }

        Ok(reports)
    }

    async fn run_one(&self, request: &PluginRequest) -> Result<Applied> {
        if request.name != ImportImagePlugin::KEY {
            return Err(RunnerError::UnknownPlugin(request.name.clone()));
        }

        let invalid = |source| RunnerError::InvalidArgs {
            plugin: request.name.clone(),
            source,
        };
        let args = PluginArgs::from_value(request.args.clone()).map_err(invalid)?;
        let config = PluginConfig::try_from(args).map_err(invalid)?;

        ImportImagePlugin::new(config, self.connector, self.context)
            .run()
            .await
            .map_err(|source| RunnerError::PluginFailed {
                plugin: request.name.clone(),
                source,
            })
    }
}
