//! Kith API Server
//!
//! HTTP service over the denormalized friendship graph

use miette::IntoDiagnostic;

use kith_server::{ServerConfig, start_server};

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .rgb_colors(miette::RgbColors::Preferred)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))?;
    miette::set_panic_hook();

    let config = ServerConfig::load().into_diagnostic()?;
    init_logging(config.log.directory.as_deref());

    start_server(config).await.into_diagnostic()?;

    Ok(())
}

fn init_logging(log_dir: Option<&str>) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kith_core=debug,kith_server=debug,tower_http=info".into());

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_timer(tracing_subscriber::fmt::time::LocalTime::rfc_3339());

    match log_dir {
        Some(dir) => {
            // Create the log directory if it doesn't exist
            std::fs::create_dir_all(dir).ok();

            let file_appender = tracing_appender::rolling::daily(dir, "kith.log");
            let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

            // Leak the guard to keep the file sink alive for the entire program
            Box::leak(Box::new(_guard));

            let file = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .with(file)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .init();
        }
    }
}
