use anyhow::Context;
use bookshop::server::{self, AppState};
use bookshop::utils::{logger, validation::Validate};
use bookshop::{app, CliConfig};
use clap::Parser;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 先載入配置，才知道日誌格式
    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    logger::init_logger(config.logging.format, cli.verbose);

    tracing::info!("Starting bookshop catalog service");
    if cli.verbose {
        tracing::debug!("Service config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let service = app::build_service(&config).context("failed to build catalog service")?;
    let users = app::build_users(&config);
    if config.auth.enabled && users.is_empty() {
        tracing::warn!("⚠️ Auth is enabled but no users are configured; every read will be rejected");
    }

    let router = server::router(AppState::new(service, users), &config.service.base_path);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        "✅ {} listening on http://{}{}",
        config.service.name,
        addr,
        config.service.base_path
    );

    server::serve(listener, router).await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}
