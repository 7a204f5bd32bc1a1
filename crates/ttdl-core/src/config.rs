use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Mail integration used by the contact form (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfig {
    /// Absolute URL the contact form is posted to.
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    /// Public key of the mail service account, if it requires one.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".to_string(),
            service_id: "service_o7ekpoq".to_string(),
            template_id: "template_krcnku7".to_string(),
            user_id: None,
        }
    }
}

/// Global configuration loaded from `~/.config/ttdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtdlConfig {
    /// Base URL of the downloader backend; endpoint paths are joined onto it.
    pub base_url: String,
    /// Quiet period after the last input change before the preview is fetched.
    pub debounce_ms: u64,
    /// Inputs shorter than this (after trimming) never trigger a preview.
    pub min_url_len: usize,
    pub connect_timeout_secs: u64,
    /// Whole-request timeout; downloads are transcoded server-side, so this is generous.
    pub request_timeout_secs: u64,
    /// Where downloads are saved (None = current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Optional mail settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub mail: Option<MailConfig>,
}

impl Default for TtdlConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/".to_string(),
            debounce_ms: 700,
            min_url_len: 6,
            connect_timeout_secs: 15,
            request_timeout_secs: 600,
            download_dir: None,
            mail: None,
        }
    }
}

impl TtdlConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn mail_or_default(&self) -> MailConfig {
        self.mail.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ttdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TtdlConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<TtdlConfig> {
    if !path.exists() {
        let default_cfg = TtdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: TtdlConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
