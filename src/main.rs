use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use complaint_desk::{
    cli::{Cli, Commands},
    config::Config,
    tui::{ui::truncate_to_width, App},
    ComplaintClient, ViewModel,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "complaint_desk=info");
    }

    let config = Config::from_env()?.with_base_url(cli.base_url.clone());
    config.validate()?;

    init_logging(&config, cli.is_tui())?;

    let client = ComplaintClient::new(&config).context("Failed to build HTTP client")?;
    info!("Using complaint service at {}", client.base_url());

    match cli.command {
        Some(Commands::List { limit, json }) => list_complaints(&client, limit, json).await,
        Some(Commands::Submit { title, body }) => submit_complaint(&client, title, body).await,
        None | Some(Commands::Tui) => run_tui(config, client).await,
    }
}

/// Log to the configured file, and to stderr unless the TUI owns the terminal
fn init_logging(config: &Config, tui_mode: bool) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let directory = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = config
        .log_file
        .file_name()
        .context("Log file path has no file name")?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let console_layer = (!tui_mode).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .with(console_layer)
        .init();

    Ok(())
}

async fn list_complaints(client: &ComplaintClient, limit: Option<usize>, json: bool) -> Result<()> {
    let mut view_model = ViewModel::new();
    view_model.refresh(client).await;

    if let Some(message) = view_model.list_status.error() {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }

    let shown = limit.unwrap_or(view_model.complaints.len());
    let complaints = &view_model.complaints[..shown.min(view_model.complaints.len())];

    if json {
        println!("{}", serde_json::to_string_pretty(complaints)?);
        return Ok(());
    }

    if complaints.is_empty() {
        println!("No complaints found");
        return Ok(());
    }

    println!("{:<8} {:<17} {:<32} {:<40}", "Id", "Created", "Title", "Body");
    println!("{}", "-".repeat(100));
    for complaint in complaints {
        println!(
            "{:<8} {:<17} {:<32} {:<40}",
            complaint.id,
            complaint.created_at_display(),
            truncate_to_width(&complaint.title, 30),
            truncate_to_width(&complaint.body, 40)
        );
    }
    println!();
    println!(
        "Showing {} of {} complaints",
        complaints.len(),
        view_model.complaints.len()
    );

    Ok(())
}

async fn submit_complaint(client: &ComplaintClient, title: String, body: String) -> Result<()> {
    let mut view_model = ViewModel::new();
    view_model.set_title(title);
    view_model.set_body(body);

    if let Err(e) = view_model.submit(client).await {
        error!("Submission failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Some(notice) = &view_model.notice {
        println!("{}", notice.text);
    }
    match view_model.list_status.error() {
        Some(message) => eprintln!("Warning: could not refresh complaints: {}", message),
        None => println!("{} complaints on file", view_model.complaints.len()),
    }

    Ok(())
}

async fn run_tui(config: Config, client: ComplaintClient) -> Result<()> {
    info!("Launching complaint TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, Arc::new(client));
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("Complaint TUI exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("Complaint TUI encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
