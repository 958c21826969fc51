//! ImageStream の存在確認

use crate::platform::{PlatformClient, PlatformError, StreamDescriptor};

/// 存在確認の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamLookupResult {
    Found(StreamDescriptor),
    NotFound,
    PlatformError(PlatformError),
}

/// ImageStream を一度だけ問い合わせて結果を分類
///
/// 404 のみ `NotFound`。それ以外のエラーはリトライせず `PlatformError`。
pub async fn check(
    client: &dyn PlatformClient,
    name: &str,
    namespace: Option<&str>,
) -> StreamLookupResult {
    tracing::debug!(
        "Looking up ImageStream {} (namespace: {})",
        name,
        namespace.unwrap_or("<default>")
    );

    match client.get_image_stream(name, namespace).await {
        Ok(descriptor) => StreamLookupResult::Found(descriptor),
        Err(e) if e.is_not_found() => StreamLookupResult::NotFound,
        Err(e) => {
            tracing::warn!("ImageStream lookup for {} failed: {}", name, e);
            StreamLookupResult::PlatformError(e)
        }
    }
}
