use clap::Parser;
use timeboxer::config::auth::{ensure_token, StdinTokenPrompt};
use timeboxer::utils::{logger, validation::Validate};
use timeboxer::{BoardConfig, CliArgs, TrelloClient, UpkeepEngine, UpkeepError};

fn fail(e: &UpkeepError) -> ! {
    tracing::error!(
        "❌ Board upkeep failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Loading configuration from: {}", args.config);
    let mut config = match BoardConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}'", args.config);
            fail(&e)
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    if let Err(e) = ensure_token(&mut config, &args.config, &StdinTokenPrompt) {
        fail(&e);
    }

    let client = match TrelloClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => fail(&e),
    };

    let engine = UpkeepEngine::new(client, config);
    match engine.run().await {
        Ok(summary) => {
            tracing::info!(
                "✅ Updated {} lists: {} due dates, {} member sets, {} moves",
                summary.lists,
                summary.due_dates_set,
                summary.members_set,
                summary.positions_moved
            );
        }
        Err(e) => fail(&e),
    }
}
