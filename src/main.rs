use clap::{Parser, Subcommand};
use std::sync::Arc;

use mentions_bot::application::errors::BotError;
use mentions_bot::application::messaging::{CommandDispatcher, CommandParser, DispatchSettings};
use mentions_bot::application::services::MessageService;
use mentions_bot::domain::traits::{AliasStore, Notifier};
use mentions_bot::infrastructure::adapters::{ConsoleNotifier, GroupMeNotifier};
use mentions_bot::infrastructure::config::{Config, NotifierKind, StorageBackend};
use mentions_bot::infrastructure::server::{self, AppState};
use mentions_bot::infrastructure::storage::{MemoryStore, RedisStore};

#[derive(Parser)]
#[command(name = "mentions-bot")]
#[command(about = "Group chat alias mentions bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Log verbosity: debug
    #[arg(long)]
    debug: bool,

    /// Port to run the server at (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address (including port) of the redis server (overrides config)
    #[arg(long)]
    redis: Option<String>,

    /// Address of the GroupMe API server (overrides config)
    #[arg(long)]
    hostname: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.debug { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Run => {
            if let Err(e) = run_bot(&cli) {
                tracing::error!("mentions-bot stopped: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("mentions-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_bot(cli: &Cli) -> Result<(), BotError> {
    // Load config
    let mut config = if std::path::Path::new(&cli.config).exists() {
        Config::load(&cli.config).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(redis) = &cli.redis {
        config.set_redis_address(redis);
    }
    if let Some(hostname) = &cli.hostname {
        config.set_api_host(hostname);
    }
    config.validate()?;

    tracing::info!("Starting {}", config.bot.name);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;
    rt.block_on(serve_webhook(config))
}

async fn serve_webhook(config: Config) -> Result<(), BotError> {
    let store: Arc<dyn AliasStore> = match config.storage.backend {
        StorageBackend::Redis => {
            Arc::new(RedisStore::connect(&config.storage.redis_url, config.storage.key_prefix.clone()).await?)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, aliases are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let notifier: Arc<dyn Notifier> = match config.notifier.kind {
        NotifierKind::Groupme => Arc::new(GroupMeNotifier::new(config.notifier.api_base.clone())),
        NotifierKind::Console => Arc::new(ConsoleNotifier::new()),
    };

    let parser = CommandParser::new(&config.bot.prefix, config.bot.list_command, config.bot.mention_match)?;
    let dispatcher = CommandDispatcher::new(store, notifier).with_settings(DispatchSettings {
        suppress_empty_mentions: config.bot.suppress_empty_mentions,
    });
    let state = AppState::new(MessageService::new(parser, dispatcher));

    server::serve(&config.bind_address(), state, config.server.log_requests)
        .await
        .map_err(|e| BotError::Internal(format!("Server error: {}", e)))
}

fn init_config() {
    match serde_yaml::to_string(&Config::default()) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => eprintln!("Failed to render default config: {}", e),
    }
}
