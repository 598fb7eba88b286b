use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;

pub const CONFIG_FILE: &str = "tasks.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".into(),
            log_filter: "warn".into(),
        }
    }
}

/// Defaults, then `tasks.toml` in the working directory, then the environment,
/// then `--server-url`.
pub fn load_settings(server_url: Option<String>) -> anyhow::Result<Settings> {
    load_settings_from(
        Path::new(CONFIG_FILE),
        |key| std::env::var(key).ok(),
        server_url,
    )
}

fn load_settings_from(
    path: &Path,
    var: impl Fn(&str) -> Option<String>,
    server_url: Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    if let Some(file_cfg) = read_config_file(path)? {
        apply_file(&mut settings, &file_cfg);
    }
    apply_env(&mut settings, var);
    if let Some(url) = server_url {
        settings.api_url = url;
    }
    Ok(settings)
}

fn read_config_file(path: &Path) -> anyhow::Result<Option<HashMap<String, String>>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;
    Ok(Some(file_cfg))
}

fn apply_file(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("api_url") {
        settings.api_url = v.clone();
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("TASKS_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = var("TASKS_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
