use anyhow::Context;
use colored::Colorize;
use std::io::Read;
use std::path::Path;
use streamsync_core::{EnvContextSource, PluginRunner};
use streamsync_openshift::{OpenShiftConnector, TokenResolver};

/// プラグイン一覧を読み込む（`-` は stdin）
fn read_plugins(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("stdin からプラグイン一覧を読み込めませんでした")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("プラグイン一覧を読み込めませんでした: {}", path.display()))
}

pub async fn handle(
    plugins: &Path,
    build_key: &str,
    default_namespace: Option<String>,
) -> anyhow::Result<()> {
    let requests = PluginRunner::parse_requests(&read_plugins(plugins)?)?;
    tracing::debug!("Loaded {} plugin request(s) from {}", requests.len(), plugins.display());

    let mut connector = OpenShiftConnector::new(TokenResolver::new());
    if let Some(namespace) = default_namespace {
        connector = connector.with_default_namespace(namespace);
    }
    let context = EnvContextSource::new(build_key);

    println!(
        "{} {} 件",
        "プラグインを実行中:".green(),
        requests.len()
    );

    let runner = PluginRunner::new(&connector, &context, requests);
    let reports = runner.run().await?;

    for report in &reports {
        super::print_outcome(&report.plugin, &report.outcome);
    }

    Ok(())
}
