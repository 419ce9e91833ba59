use clap::Parser;
use salary_stats::app::report;
use salary_stats::utils::error::{ErrorSeverity, StatsError};
use salary_stats::utils::{logger, validation::Validate};
use salary_stats::CliConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 需在解析參數前載入，SUPERJOB_KEY 才能經由 clap 的 env 讀到
    let _ = dotenvy::dotenv();
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting salary-stats");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config.clone().redacted());
    }

    let settings = match config.load_settings().and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let outcome = match settings.build_engine() {
        Ok(engine) => engine.run().await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(run_report) => {
            if !run_report.unavailable.is_empty() {
                tracing::warn!(
                    "⚠️ {} language/source pairs were skipped because of connection problems",
                    run_report.unavailable.len()
                );
            }
            println!("{}", report::render(&run_report, config.format)?);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn exit_with(e: StatsError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
