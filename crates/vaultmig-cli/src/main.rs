use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vaultmig_core::impls::JsonFileStateStore;
use vaultmig_core::{Bootstrap, Migrator, MigratorConfig, SchemaVersion};

mod wallet;

/// Migrate a persisted wallet state file to the latest schema.
#[derive(Debug, Parser)]
#[command(name = "vaultmig", version)]
struct Cli {
    /// Path of the JSON state file (`{"meta": {"version": N}, "data": ...}`).
    #[arg(long)]
    state: PathBuf,

    /// Migrator config file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Version stamped on freshly created state. Overrides the config file.
    #[arg(long)]
    default_version: Option<u32>,

    /// Migrate and print, but do not write the state file.
    #[arg(long)]
    dry_run: bool,

    /// Initial payload (JSON) used when the state file does not exist.
    #[arg(long)]
    init: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // (A) ログ（RUST_LOG で上書き可、出力は stderr）
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // (B) 設定: ファイル → フラグの順に上書き
    let mut config = match &cli.config {
        Some(path) => MigratorConfig::from_path(path)
            .await
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MigratorConfig::default(),
    };
    if let Some(version) = cli.default_version {
        config.default_version = Some(SchemaVersion::new(version));
    }

    let initial = cli
        .init
        .as_deref()
        .map(|raw| serde_json::from_str::<serde_json::Value>(raw))
        .transpose()
        .context("--init is not valid JSON")?;

    // (C) Migrator と StateStore をつないで起動シーケンスを実行
    let migrator = Migrator::builder()
        .migrations(wallet::migrations())
        .config(&config)
        .build();
    let store = Arc::new(JsonFileStateStore::new(&cli.state));
    let bootstrap = Bootstrap::new(migrator, store);

    let report = if cli.dry_run {
        bootstrap.run_dry(initial).await
    } else {
        bootstrap.run(initial).await
    }
    .with_context(|| format!("migrating {}", cli.state.display()))?;

    if cli.dry_run {
        info!(path = %cli.state.display(), "dry run, state file left untouched");
    }

    // (D) 結果の envelope を stdout へ
    println!("{}", serde_json::to_string_pretty(&report.state)?);
    Ok(())
}
