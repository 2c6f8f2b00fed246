use catalog_sync::utils::error::{ErrorSeverity, SyncError};
use catalog_sync::utils::{logger, validation::Validate};
use catalog_sync::{CatalogSync, CliArgs, SyncConfig, TargetCatalogClient, VtexCatalogClient};
use clap::Parser;

fn exit_code(error: &SyncError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,      // 警告，但成功
        ErrorSeverity::Medium => 2,   // 重試錯誤
        ErrorSeverity::High => 1,     // 處理錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

fn fail(error: SyncError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 建議: {}", error.recovery_suggestion());
    std::process::exit(exit_code(&error));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 載入 TOML 配置
    let mut config = match SyncConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    args.apply_overrides(&mut config);

    // 初始化日誌
    logger::init_cli_logger(args.verbose, config.log_format());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        fail(e);
    }

    let monitor_enabled = args.monitor_enabled(&config);
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let source = VtexCatalogClient::new(&config.source).unwrap_or_else(|e| fail(e));
    let target = TargetCatalogClient::new(&config.target).unwrap_or_else(|e| fail(e));

    let sync = CatalogSync::new(source, target, config).with_monitoring(monitor_enabled);
    let report = sync.run().await;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.success {
        tracing::error!(
            "❌ Catalog sync failed: {}",
            report.error.as_deref().unwrap_or("unknown error")
        );
        std::process::exit(1);
    }

    tracing::info!("✅ Catalog sync completed successfully!");
    Ok(())
}
