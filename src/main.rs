use clap::Parser;
use glucoguide::config::OutputFormat;
use glucoguide::utils::{logger, validation::Validate};
use glucoguide::{
    create_service, CliConfig, FormSession, GlucoError, MealPlanRequester, RequestSettings,
    TomlConfig,
};

fn fail(e: &GlucoError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入設定檔，缺檔時用預設值
    let mut config = match TomlConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file is valid TOML format");
            std::process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting GlucoGuide");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let service = match create_service(&config) {
        Ok(service) => service,
        Err(e) => fail(&e),
    };
    let requester = MealPlanRequester::new(service, RequestSettings::from_settings(&config));
    let mut session = FormSession::new(requester, config.api_key());

    let report = match session.submit(&cli.to_form()).await {
        Ok(report) => report,
        Err(e) => fail(&e),
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            if report.result.is_plan() {
                println!("Personalized Meal Plan:\n");
            }
            println!("{}", report.result.display_text());
        }
    }

    if !report.result.is_plan() {
        std::process::exit(2);
    }

    Ok(())
}
