//! import_image ポストビルドプラグイン
//!
//! コンテキスト解決 → クライアント接続 → 存在確認 → 作成/インポートを順に実行し、
//! どこで失敗しても [`PluginExecutionFailed`] として返します。

use crate::config::PluginConfig;
use crate::context::{self, ContextSource};
use crate::error::{PluginExecutionFailed, SyncError};
use crate::lookup;
use crate::platform::ClientConnector;
use crate::reconcile::{self, Applied};

/// ImageStream へビルド結果のタグを反映するプラグイン
pub struct ImportImagePlugin<'a> {
    config: PluginConfig,
    connector: &'a dyn ClientConnector,
    context: &'a dyn ContextSource,
}

impl<'a> ImportImagePlugin<'a> {
    /// プラグインキー
    pub const KEY: &'static str = "import_image";

    pub fn new(
        config: PluginConfig,
        connector: &'a dyn ClientConnector,
        context: &'a dyn ContextSource,
    ) -> Self {
        Self {
            config,
            connector,
            context,
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// プラグインを実行
    ///
    /// ビルドコンテキストを読めない場合はクライアントを作らずに失敗します。
    ///
    /// # Returns
    /// * `Ok(Created | Imported)` - 反映に成功した場合
    /// * `Err(PluginExecutionFailed)` - いずれかのステージで失敗した場合
    pub async fn run(&self) -> Result<Applied, PluginExecutionFailed> {
        let build = context::resolve(self.context).map_err(|e| {
            tracing::error!("No build context available, probably not running in a build: {}", e);
            PluginExecutionFailed::new(Self::KEY, e)
        })?;
        let namespace = build.namespace();

        let client = self.connector.connect(self.config.settings()).map_err(|source| {
            let e = SyncError::PlatformConnect { source };
            tracing::error!("{}", e);
            PluginExecutionFailed::new(Self::KEY, e)
        })?;

        let found =
            lookup::check(client.as_ref(), self.config.image_stream_name(), namespace).await;
        let outcome =
            reconcile::reconcile(client.as_ref(), &self.config, found, namespace).await;

        match outcome.into_result() {
            Ok(done) => {
                tracing::info!(
                    "ImageStream {} {}",
                    self.config.image_stream_name(),
                    done.label()
                );
                Ok(done)
            }
            Err(e) => {
                tracing::error!("{}", e);
                Err(PluginExecutionFailed::new(Self::KEY, e))
            }
        }
    }
}
