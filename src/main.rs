use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use picto_amigos::{
    config::Config,
    models::{ImageOptions, PictogramId, PictogramRecord},
    services::PictogramClient,
};

#[derive(Parser)]
#[command(name = "picto-amigos")]
#[command(version)]
#[command(about = "Search and preview ARASAAC pictograms for PictoAmigos")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Pictogram language (overrides config file)
    #[arg(short = 'l', long, value_name = "CODE")]
    language: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search pictograms by keyword
    Search {
        text: String,
        /// Use the exact search endpoint instead of best search
        #[arg(long)]
        exact: bool,
    },
    /// Show a single pictogram
    Show { id: u64 },
    /// Print the image URL of a pictogram
    Url {
        id: u64,
        /// Background color, e.g. `#ffcc00`
        #[arg(long, value_name = "COLOR")]
        background: Option<String>,
        /// Black and white rendering
        #[arg(long)]
        monochrome: bool,
        #[arg(long, value_name = "COLOR")]
        skin: Option<String>,
        #[arg(long, value_name = "COLOR")]
        hair: Option<String>,
        #[arg(long, value_name = "PX")]
        size: Option<u32>,
    },
    /// Autocomplete a partial keyword
    Suggest { partial: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("picto_amigos={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load_from_file(&cli.config)?;
    debug!("Configuration loaded from: {}", cli.config);

    if let Some(language) = cli.language {
        config.api.language = language.trim().to_lowercase();
        config.validate()?;
    }
    info!(
        "Using {} in language '{}'",
        config.api.base_url, config.api.language
    );

    let client = PictogramClient::from_config(&config)?;

    match cli.command {
        Command::Search { text, exact } => {
            let results = if exact {
                client.search(&text).await
            } else {
                client.best_search(&text).await
            };
            if results.is_empty() {
                println!("No pictograms found for '{}'", text);
            }
            for record in &results {
                print_summary(record);
            }
        }
        Command::Show { id } => {
            let Some(record) = client.lookup_by_id(PictogramId::new(id)).await else {
                bail!("Pictogram {} could not be loaded", id);
            };
            println!("id:          {}", record.id);
            println!("keywords:    {}", record.keywords.join(", "));
            if !record.description.is_empty() {
                println!("description: {}", record.description);
            }
            if !record.categories.is_empty() {
                println!("categories:  {}", record.categories.join(", "));
            }
            println!("schematic:   {}", record.is_schematic);
            println!("image:       {}", record.image_url);
        }
        Command::Url {
            id,
            background,
            monochrome,
            skin,
            hair,
            size,
        } => {
            let mut options = ImageOptions::default();
            if let Some(background) = background {
                options = options.with_background(background);
            }
            if monochrome {
                options = options.monochrome();
            }
            if let Some(skin) = skin {
                options = options.with_skin(skin);
            }
            if let Some(hair) = hair {
                options = options.with_hair(hair);
            }
            if let Some(size) = size {
                options = options.with_size(size);
            }
            println!("{}", client.image_url(PictogramId::new(id), &options));
        }
        Command::Suggest { partial } => {
            if !client.load_keywords().await {
                bail!(
                    "Keyword list for '{}' is not available",
                    client.language().await
                );
            }
            for word in client.suggestions(&partial).await {
                println!("{}", word);
            }
        }
    }

    Ok(())
}

fn print_summary(record: &PictogramRecord) {
    println!(
        "{:>6}  {:<24} {}",
        record.id.value(),
        record.primary_keyword(),
        record.image_url
    );
}
