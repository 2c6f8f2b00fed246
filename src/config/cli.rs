use crate::config::toml_config::SyncConfig;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-sync")]
#[command(about = "Synchronize the VTEX product catalog into the target product service")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "catalog-sync.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    pub monitor: Option<bool>,

    /// Build payloads without posting them to the target
    #[arg(long)]
    pub dry_run: bool,

    /// Only sync the first N products
    #[arg(long)]
    pub max_products: Option<usize>,

    /// Override the number of products processed concurrently per batch
    #[arg(long)]
    pub batch_size: Option<usize>,
}

impl CliArgs {
    /// 命令列參數優先於配置檔
    pub fn apply_overrides(&self, config: &mut SyncConfig) {
        if self.dry_run {
            config.sync.dry_run = Some(true);
        }
        if let Some(max) = self.max_products {
            config.sync.max_products = Some(max);
        }
        if let Some(batch_size) = self.batch_size {
            config.sync.batch_size = Some(batch_size);
        }
    }

    pub fn monitor_enabled(&self, config: &SyncConfig) -> bool {
        self.monitor.unwrap_or_else(|| config.monitoring_enabled())
    }
}
