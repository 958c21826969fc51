//! ImageStream のワイヤーフォーマット

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use streamsync_core::StreamDescriptor;

/// このアノテーションが消えるとプラットフォームがタグを再インポートする
pub const REPOSITORY_CHECK_ANNOTATION: &str = "openshift.io/image.dockerRepositoryCheck";

/// ImageStream リソース
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStream {
    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: ImageStreamSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ImageStreamStatus>,
}

fn default_kind() -> String {
    "ImageStream".to_string()
}

fn default_api_version() -> String {
    "v1".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStreamSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_image_repository: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStreamStatus {
    #[serde(default)]
    pub docker_image_repository: Option<String>,

    #[serde(default)]
    pub tags: Vec<NamedTagEventList>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedTagEventList {
    pub tag: String,
}

impl ImageStream {
    /// 作成リクエストのボディ
    pub fn for_repository(name: &str, repository: &str) -> Self {
        Self {
            kind: default_kind(),
            api_version: default_api_version(),
            metadata: ObjectMeta {
                name: name.to_string(),
                ..Default::default()
            },
            spec: ImageStreamSpec {
                docker_image_repository: Some(repository.to_string()),
            },
            status: None,
        }
    }
}

impl From<ImageStream> for StreamDescriptor {
    fn from(stream: ImageStream) -> Self {
        let status = stream.status.unwrap_or_default();
        StreamDescriptor {
            name: stream.metadata.name,
            namespace: stream.metadata.namespace,
            docker_image_repository: stream
                .spec
                .docker_image_repository
                .or(status.docker_image_repository),
            tags: status.tags.into_iter().map(|t| t.tag).collect(),
            resource_version: stream.metadata.resource_version,
        }
    }
}

/// 生の ImageStream からリポジトリチェックのアノテーションを外す
///
/// 未知のフィールドを保ったまま PUT し直すため `Value` のまま扱います。
/// 外した場合は true
pub fn strip_repository_check(stream: &mut Value) -> bool {
    stream
        .get_mut("metadata")
        .and_then(|m| m.get_mut("annotations"))
        .and_then(Value::as_object_mut)
        .map(|annotations| annotations.remove(REPOSITORY_CHECK_ANNOTATION).is_some())
        .unwrap_or(false)
}
