use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rally_codriver::config::{get_config_path, CodriverConfig};
use rally_codriver::drive::{self, render_snapshot, DriveCommand};
use rally_codriver::session::Session;
use rally_codriver::source::NoteSource;
use rally_codriver::{api, parser};

#[derive(Parser)]
#[command(name = "codriver")]
#[command(about = "Step through rally pace notes")]
struct Cli {
    /// Use this config file instead of the one in the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse pace notes and report malformed lines
    Check {
        /// File path, URL, or `-` for stdin
        source: String,
    },
    /// Step through pace notes interactively
    Drive {
        /// File path, URL, or `-` for stdin. Defaults to the sample route.
        source: Option<String>,
    },
    /// Start the HTTP API
    Serve {
        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show the effective configuration
    Config,
}

/// Initialize tracing with output to stderr (for drive mode) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "rally_codriver=info,tower_http=debug".into()),
    );

    if use_stderr {
        // Drive and check modes: stdout is the note display
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = matches!(
        cli.command,
        Some(Commands::Drive { .. }) | Some(Commands::Check { .. })
    );
    init_tracing(use_stderr);

    let config = match cli.config {
        Some(ref path) => CodriverConfig::load_from(path),
        None => CodriverConfig::load(),
    };

    match cli.command {
        Some(Commands::Check { source }) => {
            check(&config, &NoteSource::from(source.as_str())).await?
        }
        Some(Commands::Drive { source }) => {
            let session = Session::from_config(&config);
            if let Some(source) = source {
                session.load_from(&NoteSource::from(source.as_str())).await?;
            }
            run_drive(session).await?;
        }
        Some(Commands::Serve { port }) => serve(&config, port.unwrap_or(config.port)).await?,
        Some(Commands::Config) => {
            match cli.config {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", get_config_path()?.display()),
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        None => serve(&config, config.port).await?,
    }

    Ok(())
}

async fn check(config: &CodriverConfig, source: &NoteSource) -> anyhow::Result<()> {
    let raw = source.read_to_string().await?;
    let outcome = parser::parse_with(
        &raw,
        &parser::ParseOptions {
            separator: config.separator,
        },
    );

    for note in &outcome.notes {
        println!("{}", note);
    }
    for diagnostic in &outcome.diagnostics {
        eprintln!("{}", diagnostic);
    }
    println!(
        "{} notes, {} malformed lines",
        outcome.notes.len(),
        outcome.diagnostics.len()
    );

    if !outcome.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}

async fn serve(config: &CodriverConfig, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting co-driver server on port {}", port);

    let app = api::create_router(Session::from_config(config));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Co-driver server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Terminal presentation layer.
///
/// A subscriber task prints every cursor update; the input loop only issues
/// commands.
async fn run_drive(session: Session) -> anyhow::Result<()> {
    let mut subscription = session.cursor().subscribe();
    let display = tokio::spawn(async move {
        while let Some(snapshot) = subscription.next().await {
            println!("{}", render_snapshot(&snapshot));
        }
    });

    println!("{}", drive::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match DriveCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                println!("{}", drive::HELP);
                continue;
            }
        };

        match command {
            DriveCommand::Next => {
                if !session.cursor().advance() {
                    println!("(last note)");
                }
            }
            DriveCommand::Previous => {
                if !session.cursor().retreat() {
                    println!("(first note)");
                }
            }
            DriveCommand::Load(source) => match session.load_from(&source).await {
                Ok(report) => print_report_summary(report.loaded, report.diagnostics.len()),
                Err(e) => tracing::error!("{}", e),
            },
            DriveCommand::Text(text) => {
                let report = session.load_text(&text, "dictation");
                print_report_summary(report.loaded, report.diagnostics.len());
            }
            DriveCommand::Quit => break,
        }
    }

    display.abort();
    Ok(())
}

fn print_report_summary(loaded: usize, rejected: usize) {
    println!("loaded {} notes, {} malformed lines", loaded, rejected);
}
