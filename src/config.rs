use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use crate::mojang::DEFAULT_PROFILE_URL;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Exports carpet player positions as unmined map markers", long_about = None)]
pub struct Config {
    /// Carpet status endpoint
    #[arg(short = 'c', long = "carpet-url", alias = "carpetURL", env = "CARPET_URL")]
    pub carpet_url: String,

    /// Shared secret sent in the X-Carpet header
    #[arg(short = 's', long = "carpet-secret", alias = "carpetSecret", env = "CARPET_SECRET", default_value = "", hide_env_values = true)]
    pub carpet_secret: String,

    /// Seconds to sleep between polls
    #[arg(short = 'i', long, env = "POLL_INTERVAL_SECS", default_value_t = 3600)]
    pub interval: u64,

    /// Folder holding <name>.png portraits and the Alex.png fallback
    #[arg(short = 'p', long, env = "PORTRAITS_FOLDER", default_value = "portraits")]
    pub portraits: PathBuf,

    /// Unmined output root, one sub-folder per dimension
    #[arg(short = 'u', long, env = "UNMINED_FOLDER", default_value = "unmined")]
    pub unmined: PathBuf,

    /// Timeout for every outbound request, 0 waits forever
    #[arg(long = "http-timeout", env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Profile lookup base, the uuid is appended
    #[arg(long = "profile-url", env = "MOJANG_PROFILE_URL", default_value = DEFAULT_PROFILE_URL)]
    pub profile_url: String,

    /// Poll once and exit
    #[arg(long)]
    pub once: bool,
}

impl Config {
    /// Reads flags, falling back to the environment (and `.env`).
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::parse()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        match self.http_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
