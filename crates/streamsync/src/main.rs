mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use streamsync_core::context::DEFAULT_BUILD_KEY;

#[derive(Parser)]
#[command(name = "streamsync")]
#[command(about = "ビルドしたイメージのタグを ImageStream に反映する", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ImageStream を作成、または既存の ImageStream にタグをインポート
    Import {
        /// ImageStream 名
        #[arg(long, env = "STREAMSYNC_IMAGESTREAM")]
        imagestream: String,
        /// ImageStream が追跡するリポジトリ（例: registry.example.com/library/app）
        #[arg(long, env = "STREAMSYNC_REPOSITORY")]
        repository: String,
        #[command(flatten)]
        connection: commands::import::ConnectionArgs,
    },
    /// プラグイン一覧（JSON）を順に実行
    Run {
        /// `[{"name": "import_image", "args": {...}}]` 形式のファイル（`-` で stdin）
        #[arg(long)]
        plugins: PathBuf,
        /// ビルドコンテキストを読む環境変数
        #[arg(long, default_value = DEFAULT_BUILD_KEY)]
        build_key: String,
        /// namespace 未指定時に使う namespace
        #[arg(long, env = "STREAMSYNC_DEFAULT_NAMESPACE")]
        default_namespace: Option<String>,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログは stderr、結果表示は stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Import {
            imagestream,
            repository,
            connection,
        } => {
            commands::import::handle(imagestream, repository, connection).await?;
        }
        Commands::Run {
            plugins,
            build_key,
            default_namespace,
        } => {
            commands::run::handle(&plugins, &build_key, default_namespace).await?;
        }
        Commands::Version => {
            println!("streamsync {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
