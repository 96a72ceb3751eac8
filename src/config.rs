use dotenvy::dotenv;
use log::error;
use serde::Deserialize;
use std::env;

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Config {
    pub templates_dir: String,
    pub export_dir: String,
    pub request_timeout_seconds: u32,
    pub search_deadline_seconds: u32,
    pub detail_concurrency: u32,
    pub http_bind_address: Option<String>,
}

pub fn create_test_config() -> Config {
    Config {
        templates_dir: "templates".to_string(),
        export_dir: "temp".to_string(),
        request_timeout_seconds: 30,
        search_deadline_seconds: 120,
        detail_concurrency: 1,
        http_bind_address: None,
    }
}

pub fn read_config() -> Config {
    dotenv().ok();
    env::var(CONFIG_PATH_ENV)
        .map_err(|_| format!("{CONFIG_PATH_ENV} .env not set"))
        .and_then(|config_path| std::fs::read(config_path).map_err(|e| e.to_string()))
        .and_then(|bytes| toml::from_slice(&bytes).map_err(|e| e.to_string()))
        .unwrap_or_else(|err| {
            error!("failed to read config: {err}");
            std::process::exit(1);
        })
}
