//! プラグイン設定
//!
//! ImageStream 名とリポジトリは必須。接続設定はクライアントへそのまま渡します。

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// プラットフォーム接続設定（判定ロジックでは参照しない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
    /// API エンドポイント（例: "https://openshift.example.com:8443"）
    #[serde(default)]
    pub url: String,

    /// TLS 証明書を検証するか
    #[serde(default = "default_true")]
    pub verify_ssl: bool,

    /// Bearer トークンで認証するか
    #[serde(default = "default_true")]
    pub use_auth: bool,

    /// 明示的なトークン。None の場合はクライアントが探索する
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            verify_ssl: true,
            use_auth: true,
            token: None,
        }
    }
}

/// import_image プラグインの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    image_stream_name: String,
    image_repository: String,
    settings: PlatformSettings,
}

impl PluginConfig {
    /// 新しい PluginConfig を作成
    ///
    /// 名前かリポジトリが空（空白のみを含む）なら `ConfigError::MissingField`
    pub fn new(
        image_stream_name: impl Into<String>,
        image_repository: impl Into<String>,
        settings: PlatformSettings,
    ) -> Result<Self, ConfigError> {
        let image_stream_name = image_stream_name.into();
        let image_repository = image_repository.into();

        if image_stream_name.trim().is_empty() {
            return Err(ConfigError::MissingField("imagestream"));
        }
        if image_repository.trim().is_empty() {
            return Err(ConfigError::MissingField("docker_image_repo"));
        }

        Ok(Self {
            image_stream_name,
            image_repository,
            settings,
        })
    }

    pub fn image_stream_name(&self) -> &str {
        &self.image_stream_name
    }

    pub fn image_repository(&self) -> &str {
        &self.image_repository
    }

    pub fn settings(&self) -> &PlatformSettings {
        &self.settings
    }
}

/// パイプラインから渡される `args` テーブル
///
/// 歴史的なキー名（`imagestream`, `docker_image_repo`, `url`）と
/// 正式名の両方を受け付けます。
#[derive(Debug, Clone, Deserialize)]
pub struct PluginArgs {
    #[serde(alias = "imagestream", default)]
    pub image_stream_name: String,

    #[serde(alias = "docker_image_repo", default)]
    pub image_repository: String,

    #[serde(alias = "url", default)]
    pub platform_url: String,

    #[serde(default = "default_true")]
    pub verify_ssl: bool,

    #[serde(default = "default_true")]
    pub use_auth: bool,

    #[serde(default)]
    pub token: Option<String>,
}

impl PluginArgs {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl TryFrom<PluginArgs> for PluginConfig {
    type Error = ConfigError;

    fn try_from(args: PluginArgs) -> Result<Self, Self::Error> {
        PluginConfig::new(
            args.image_stream_name,
            args.image_repository,
            PlatformSettings {
                url: args.platform_url,
                verify_ssl: args.verify_ssl,
                use_auth: args.use_auth,
                token: args.token,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_rejects_empty_name() {
        let err = PluginConfig::new("", "registry.example.com/app", PlatformSettings::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("imagestream")));
    }

    #[test]
    fn test_new_rejects_blank_repository() {
        let err = PluginConfig::new("app", "   ", PlatformSettings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("docker_image_repo")));
    }

    #[test]
    fn test_args_historical_keys() {
        let args = PluginArgs::from_value(json!({
            "imagestream": "library-imagestream1",
            "docker_image_repo": "registry.example.com/library/imagestream1",
            "url": "",
            "verify_ssl": false,
            "use_auth": false
        }))
        .unwrap();

        let config = PluginConfig::try_from(args).unwrap();
        assert_eq!(config.image_stream_name(), "library-imagestream1");
        assert_eq!(
            config.image_repository(),
            "registry.example.com/library/imagestream1"
        );
        assert!(!config.settings().verify_ssl);
        assert!(!config.settings().use_auth);
        assert_eq!(config.settings().token, None);
    }

    #[test]
    fn test_args_defaults() {
        let args = PluginArgs::from_value(json!({
            "image_stream_name": "app",
            "image_repository": "quay.io/org/app",
            "platform_url": "https://openshift.example.com"
        }))
        .unwrap();

        assert!(args.verify_ssl);
        assert!(args.use_auth);
        assert_eq!(args.platform_url, "https://openshift.example.com");
    }

    #[test]
    fn test_args_missing_repository() {
        let args = PluginArgs::from_value(json!({ "imagestream": "app" })).unwrap();
        let err = PluginConfig::try_from(args).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("docker_image_repo")));
    }

    #[test]
    fn test_args_wrong_type() {
        let err = PluginArgs::from_value(json!({ "imagestream": 42 })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgs(_)));
    }
}
