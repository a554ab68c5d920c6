use std::time::Duration;

/// Server configuration, loaded from the environment.
#[derive(Clone)]
pub struct Config {
    /// Address the dispatcher binds to.
    pub listen_addr: String,
    /// Bounded wait on `accept` so the running flag is re-checked periodically.
    pub accept_timeout: Duration,
    /// Per-read idle timeout on a client connection.
    pub read_timeout: Duration,
}

impl Config {
    pub fn load() -> Self {
        let listen_addr =
            std::env::var("LISTEN")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        Self {
            listen_addr,
            accept_timeout: Duration::from_secs(env_secs("ACCEPT_TIMEOUT_SECS", 30)),
            read_timeout: Duration::from_secs(env_secs("READ_TIMEOUT_SECS", 30)),
        }
    }
}

fn env_secs(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
