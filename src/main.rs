use clap::Parser;
use pokedex_etl::core::ConfigProvider;
use pokedex_etl::utils::{logger, validation::Validate};
use pokedex_etl::{
    CliConfig, EtlEngine, EtlError, HttpTransport, LocalStorage, PokedexPipeline, TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting pokedex-etl");
    tracing::debug!("CLI config: {:?}", cli);

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => run(&config).await,
                Err(e) => Err(e),
            }
        }
        None => run(&cli).await,
    };

    match outcome {
        Ok(output_path) => {
            tracing::info!("✅ Pokedex written to: {}", output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }
}

async fn run<C>(config: &C) -> Result<String, EtlError>
where
    C: ConfigProvider + Validate,
{
    // 驗證配置
    config.validate()?;

    let storage = LocalStorage::new(config.output_root());
    let pipeline = PokedexPipeline::new(HttpTransport::new(), storage.clone(), config);

    let output_path = EtlEngine::new(pipeline).run().await?;
    Ok(storage.resolve(&output_path).display().to_string())
}
