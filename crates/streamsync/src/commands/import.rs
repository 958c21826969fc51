use clap::ArgAction;
use colored::Colorize;
use streamsync_core::{EnvContextSource, ImportImagePlugin, PlatformSettings, PluginConfig};
use streamsync_openshift::{OpenShiftConnector, TokenResolver};

use streamsync_core::context::DEFAULT_BUILD_KEY;

/// プラットフォーム接続オプション
#[derive(clap::Args)]
pub struct ConnectionArgs {
    /// OpenShift API の URL
    #[arg(long, env = "STREAMSYNC_URL")]
    pub url: String,
    /// TLS 証明書を検証する
    #[arg(long, env = "STREAMSYNC_VERIFY_SSL", default_value_t = true, action = ArgAction::Set)]
    pub verify_ssl: bool,
    /// Bearer トークンで認証する
    #[arg(long, env = "STREAMSYNC_USE_AUTH", default_value_t = true, action = ArgAction::Set)]
    pub use_auth: bool,
    /// 認証トークン（省略時はサービスアカウントのトークン）
    #[arg(long, env = "STREAMSYNC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// ビルドコンテキストを読む環境変数
    #[arg(long, default_value = DEFAULT_BUILD_KEY)]
    pub build_key: String,
    /// namespace 未指定時に使う namespace
    #[arg(long, env = "STREAMSYNC_DEFAULT_NAMESPACE")]
    pub default_namespace: Option<String>,
}

pub async fn handle(
    imagestream: String,
    repository: String,
    connection: ConnectionArgs,
) -> anyhow::Result<()> {
    let settings = PlatformSettings {
        url: connection.url,
        verify_ssl: connection.verify_ssl,
        use_auth: connection.use_auth,
        token: connection.token,
    };
    let config = PluginConfig::new(imagestream, repository, settings)?;

    let mut connector = OpenShiftConnector::new(TokenResolver::new());
    if let Some(namespace) = connection.default_namespace {
        connector = connector.with_default_namespace(namespace);
    }
    let context = EnvContextSource::new(connection.build_key);

    println!(
        "{} {} → {}",
        "ImageStream を同期中:".green(),
        config.image_stream_name().cyan(),
        config.image_repository()
    );

    let plugin = ImportImagePlugin::new(config, &connector, &context);
    let name = plugin.config().image_stream_name().to_string();
    let outcome = plugin.run().await?;
    super::print_outcome(&name, &outcome);

    Ok(())
}
