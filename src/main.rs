use clap::Parser;
use color_eyre::eyre::Result;
use rusqlite::OpenFlags;

mod batch;
mod cli;
mod db;
mod elevation;
mod error;
mod export;
mod extract;
mod timeline;

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();
    let sqlite = rusqlite::Connection::open_with_flags(
        &args.db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    let record = db::fetch_workout(&sqlite, &args.description)?;
    let provider = elevation::GoogleElevation::new(
        &args.api_key,
        std::time::Duration::from_secs(args.timeout_secs),
    )?;
    let gpx = extract::extract(
        &record,
        &provider,
        &args.description,
        &args.author,
        args.batch_limit,
    )?;

    let stdout = std::io::stdout().lock();
    export::write_document(&gpx, std::io::BufWriter::new(stdout))?;

    Ok(())
}
