use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_catalog::{
    config::Config,
    generator::M3uGenerator,
    models::{ChannelEntry, PlaylistResult},
    services::channel_catalog,
    sources::M3uSourceHandler,
    utils::build_text_fetcher,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "m3u-catalog")]
#[command(version)]
#[command(about = "Parse M3U/M3U8 channel playlists into a structured catalog")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Log level (overrides config file)
    #[arg(short = 'v', long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a playlist file or URL and print the result
    Parse {
        /// Playlist file path or http(s) URL
        location: String,

        /// Identifier recorded in the result (defaults to the location)
        #[arg(long)]
        source_id: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,

        /// Only keep channels whose group title contains this text
        #[arg(short, long)]
        group: Option<String>,

        /// Only keep channels whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Run the HTTP API
    Serve {
        /// Listening IP address
        #[arg(short = 'H', long, value_name = "IP")]
        host: Option<String>,

        /// Listening port
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    M3u,
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_from_file(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // Logs go to stderr so `parse` output stays pipeable
    let log_filter = if config.logging.level == "trace" {
        format!("m3u_catalog={},tower_http=trace", config.logging.level)
    } else {
        format!("m3u_catalog={}", config.logging.level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Configuration loaded from: {}", cli.config);

    let fetcher = build_text_fetcher(&config.http)?;
    let handler = M3uSourceHandler::new(fetcher).with_max_file_bytes(config.http.max_body_bytes);

    match cli.command {
        Command::Parse {
            location,
            source_id,
            output,
            group,
            search,
        } => {
            let mut result = handler.load(&location).await?;
            if let Some(source_id) = source_id {
                result.source_id = source_id;
            }
            let result = apply_filters(result, group.as_deref(), search.as_deref());
            print_result(&result, output)?;
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.web.host = host;
            }
            if let Some(port) = port {
                config.web.port = port;
            }

            info!("Starting M3U Catalog v{}", env!("CARGO_PKG_VERSION"));
            let server = WebServer::new(config, handler)?;
            info!("Serving on {}:{}", server.host(), server.port());
            server.serve().await?;
        }
    }

    Ok(())
}

fn apply_filters(mut result: PlaylistResult, group: Option<&str>, search: Option<&str>) -> PlaylistResult {
    if group.is_none() && search.is_none() {
        return result;
    }

    let mut entries: Vec<ChannelEntry> = std::mem::take(&mut result.entries);
    if let Some(group) = group {
        entries = channel_catalog::filter_by_group(&entries, group)
            .into_iter()
            .cloned()
            .collect();
    }
    if let Some(query) = search {
        entries = channel_catalog::search(&entries, query)
            .into_iter()
            .cloned()
            .collect();
    }

    result.entry_count = entries.len();
    result.entries = entries;
    result
}

fn print_result(result: &PlaylistResult, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::M3u => print!("{}", M3uGenerator::new().generate(result)),
        OutputFormat::Summary => {
            println!("Source:   {}", result.source_id);
            println!("Format:   {}", result.format);
            if let Some(title) = &result.playlist_title {
                println!("Title:    {}", title);
            }
            println!("Channels: {}", result.entry_count);

            let groups = channel_catalog::group_titles(&result.entries);
            if !groups.is_empty() {
                println!("Groups:   {}", groups.join(", "));
            }

            for (priority, entry) in result.entries.iter().enumerate() {
                let priority = u32::try_from(priority).unwrap_or(u32::MAX);
                println!(
                    "  {}  {}",
                    channel_catalog::display_name_with_priority(entry, priority),
                    entry.url
                );
            }
        }
    }
    Ok(())
}
