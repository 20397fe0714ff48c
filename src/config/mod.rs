pub mod toml_config;

pub use toml_config::ServiceConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "bookshop")]
#[command(about = "Serves the Books catalog with computed discounts")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Override the CSV seed file (switches the source to csv)
    #[arg(long)]
    pub data: Option<String>,

    /// Require Admin or Viewer role for reads
    #[arg(long)]
    pub require_auth: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔 (若有) 並套用命令列覆蓋
    pub fn load(&self) -> crate::utils::error::Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ServiceConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = &self.data {
            config.data.source = toml_config::SourceKind::Csv;
            config.data.path = Some(path.clone());
        }
        if self.require_auth {
            config.auth.enabled = true;
        }
    }
}
