//! 存在確認の結果に応じた作成 / インポート
//!
//! ```text
//! Found          → import_image          → Imported | Failed
//! NotFound       → create_image_stream   → Created  | Failed
//! PlatformError  →                         Failed
//! ```
//!
//! 作成とインポートは排他的で、一回の実行でどちらか一方だけを試みます。

use crate::config::PluginConfig;
use crate::error::SyncError;
use crate::lookup::StreamLookupResult;
use crate::platform::{PlatformClient, StreamDescriptor};

/// 一回の実行の最終結果
#[derive(Debug)]
pub enum ReconciliationOutcome {
    Created(StreamDescriptor),
    Imported,
    Failed(SyncError),
}

impl ReconciliationOutcome {
    /// 成功なら [`Applied`]、失敗なら原因の `SyncError` に分ける
    pub fn into_result(self) -> Result<Applied, SyncError> {
        match self {
            ReconciliationOutcome::Created(stream) => Ok(Applied::Created(stream)),
            ReconciliationOutcome::Imported => Ok(Applied::Imported),
            ReconciliationOutcome::Failed(e) => Err(e),
        }
    }
}

/// ホストから見える成功結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Created(StreamDescriptor),
    Imported,
}

impl Applied {
    pub fn label(&self) -> &'static str {
        match self {
            Applied::Created(_) => "created",
            Applied::Imported => "imported",
        }
    }
}

/// 存在確認の結果から一つだけアクションを実行
pub async fn reconcile(
    client: &dyn PlatformClient,
    config: &PluginConfig,
    lookup: StreamLookupResult,
    namespace: Option<&str>,
) -> ReconciliationOutcome {
    let name = config.image_stream_name();

    match lookup {
        StreamLookupResult::Found(_) => {
            tracing::info!("Importing tags for {}", name);
            match client.import_image(name, namespace).await {
                Ok(()) => ReconciliationOutcome::Imported,
                Err(source) => ReconciliationOutcome::Failed(SyncError::PlatformImport {
                    name: name.to_string(),
                    source,
                }),
            }
        }
        StreamLookupResult::NotFound => {
            let repository = config.image_repository();
            tracing::info!("Creating ImageStream {} for {}", name, repository);
            match client
                .create_image_stream(name, repository, namespace)
                .await
            {
                Ok(descriptor) => ReconciliationOutcome::Created(descriptor),
                Err(source) => ReconciliationOutcome::Failed(SyncError::PlatformCreate {
                    name: name.to_string(),
                    source,
                }),
            }
        }
        StreamLookupResult::PlatformError(source) => {
            ReconciliationOutcome::Failed(SyncError::PlatformLookup {
                name: name.to_string(),
                source,
            })
        }
    }
}
