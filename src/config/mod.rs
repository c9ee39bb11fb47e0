//! Configuration module for the board backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Topics shown per forum page
    pub topics_per_page: u32,
    /// Posts shown per topic page
    pub posts_per_page: u32,
    /// Users shown per memberlist page
    pub users_per_page: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("BOARD_DB_PATH")
            .unwrap_or_else(|_| "./data/board.sqlite".to_string())
            .into();

        let bind_addr = env::var("BOARD_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid BOARD_BIND_ADDR format");

        let log_level = env::var("BOARD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            bind_addr,
            log_level,
            topics_per_page: per_page_from_env("BOARD_TOPICS_PER_PAGE", 10),
            posts_per_page: per_page_from_env("BOARD_POSTS_PER_PAGE", 10),
            users_per_page: per_page_from_env("BOARD_USERS_PER_PAGE", 20),
        }
    }
}

fn per_page_from_env(var: &str, default: u32) -> u32 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("BOARD_DB_PATH");
        env::remove_var("BOARD_BIND_ADDR");
        env::remove_var("BOARD_LOG_LEVEL");
        env::remove_var("BOARD_TOPICS_PER_PAGE");
        env::remove_var("BOARD_POSTS_PER_PAGE");
        env::remove_var("BOARD_USERS_PER_PAGE");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/board.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.topics_per_page, 10);
        assert_eq!(config.posts_per_page, 10);
        assert_eq!(config.users_per_page, 20);
    }

    #[test]
    fn test_per_page_rejects_zero() {
        env::set_var("BOARD_TEST_PER_PAGE", "0");
        assert_eq!(per_page_from_env("BOARD_TEST_PER_PAGE", 10), 10);
        env::remove_var("BOARD_TEST_PER_PAGE");
    }
}
