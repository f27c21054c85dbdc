use clap::Parser;

use crate::models::filter::Category;
use crate::source::remotive::DEFAULT_URL;

#[derive(Parser, Debug, Clone)]
#[command(name = "remoteboard", about = "Remote job board")]
pub struct Config {
    /// Endpoint returning `{ "jobs": [...] }`
    #[arg(long, env = "JOBS_API_URL", default_value = DEFAULT_URL)]
    pub jobs_api_url: String,

    /// Timeout for the job fetch, in seconds
    #[arg(long, env = "FETCH_TIMEOUT", default_value = "30")]
    pub fetch_timeout: u64,

    /// Jobs per page
    #[arg(long, env = "PAGE_SIZE", default_value = "10", value_parser = clap::value_parser!(u64).range(1..=100))]
    pub page_size: u64,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the web server (default when no subcommand given)
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        listen_addr: String,

        /// Directory served under /static
        #[arg(long, env = "STATIC_DIR", default_value = "static")]
        static_dir: String,
    },
    /// Fetch once, filter, and print one page of results as JSON
    Fetch {
        /// Case-insensitive search over title, company and tags
        #[arg(long, default_value = "")]
        search: String,

        /// Exact candidate location
        #[arg(long, default_value = "")]
        location: String,

        /// Required tag (repeatable, all must match)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Category preset
        #[arg(long, value_enum)]
        category: Option<Category>,

        #[arg(long, default_value = "1")]
        page: usize,
    },
}

impl Config {
    /// Resolve the command, defaulting to Serve if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or_else(|| Command::Serve {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size as usize
    }
}
