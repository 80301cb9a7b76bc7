//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Where the client reads content from and writes saves and logs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// RON question catalog; the built-in catalog when absent.
    pub questions_file: Option<PathBuf>,
    /// TOML settings and maze layout; defaults when absent.
    pub config_file: Option<PathBuf>,
    pub save_file: PathBuf,
    pub session_id: String,
    pub log_dir: PathBuf,
}

impl ClientConfig {
    pub const SAVE_FILE_NAME: &'static str = "gamesave.ser";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TRIVIA_QUESTIONS_FILE` - Question catalog (default: built in)
    /// - `TRIVIA_CONFIG_FILE` - Game settings TOML (default: built in)
    /// - `TRIVIA_SAVE_FILE` - Save file; `.json` saves are human readable
    ///   (default: platform data dir)
    /// - `TRIVIA_SESSION_ID` - Names the log directory (default: timestamp)
    /// - `TRIVIA_LOG_DIR` - Log root (default: platform cache dir)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.questions_file = read_env::<PathBuf>("TRIVIA_QUESTIONS_FILE");
        config.config_file = read_env::<PathBuf>("TRIVIA_CONFIG_FILE");

        if let Some(path) = read_env::<PathBuf>("TRIVIA_SAVE_FILE") {
            config.save_file = path;
        }
        if let Some(session_id) = read_env::<String>("TRIVIA_SESSION_ID") {
            config.session_id = session_id;
        }
        if let Some(path) = read_env::<PathBuf>("TRIVIA_LOG_DIR") {
            config.log_dir = path;
        }

        config
    }

    /// Log directory for this session.
    pub fn session_log_dir(&self) -> PathBuf {
        self.log_dir.join(&self.session_id)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let dirs = directories::ProjectDirs::from("", "", "trivia-maze");
        let save_dir = dirs
            .as_ref()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        let log_dir = dirs
            .as_ref()
            .map(|dirs| dirs.cache_dir().join("logs"))
            .unwrap_or_else(|| env::temp_dir().join("trivia-maze").join("logs"));

        Self {
            questions_file: None,
            config_file: None,
            save_file: save_dir.join(Self::SAVE_FILE_NAME),
            session_id: default_session_id(),
            log_dir,
        }
    }
}

fn default_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{}", timestamp)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = env::var(key).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_original_save_name() {
        let config = ClientConfig::default();

        assert_eq!(
            config.save_file.file_name().and_then(|name| name.to_str()),
            Some(ClientConfig::SAVE_FILE_NAME)
        );
        assert!(config.session_id.starts_with("session_"));
        assert!(config.questions_file.is_none());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn session_logs_are_nested_under_log_dir() {
        let config = ClientConfig {
            session_id: "abc".to_owned(),
            log_dir: PathBuf::from("/var/log/trivia"),
            ..ClientConfig::default()
        };

        assert_eq!(config.session_log_dir(), PathBuf::from("/var/log/trivia/abc"));
    }
}
