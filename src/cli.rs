use clap::Parser;

/// Export a Sports Tracker workout that never synced as a GPX file on stdout.
#[derive(Parser, Debug)]
pub struct Cli {
    /// Google Maps Elevation API key
    pub api_key: String,

    /// Description of the workout to extract (exact match)
    pub description: String,

    /// Author name for the GPX metadata
    pub author: String,

    /// Path to the Sports Tracker client database
    #[arg(long, default_value = "stt.db")]
    pub db_path: String,

    /// Maximum rendered length of one elevation request's location list
    #[arg(long, default_value_t = 2000)]
    pub batch_limit: usize,

    /// Timeout for each elevation lookup, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}
