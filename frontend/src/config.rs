use common::config::PublicConfig;
use gloo_console::warn;
use gloo_net::http::Request;

const CONFIG_URL: &str = "/config.json";

/// Fetches `/config.json` once. Any failure (network, status, parse) is
/// logged and answered with the defaults; there is no retry.
pub async fn load_config() -> PublicConfig {
    let loaded = fetch().await;
    if let Err(e) = &loaded {
        warn!(format!("Using default configuration: {}", e));
    }
    PublicConfig::resolve(loaded)
}

async fn fetch() -> Result<PublicConfig, String> {
    let resp = Request::get(CONFIG_URL)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("{} answered {}", CONFIG_URL, resp.status()));
    }
    let raw = resp.text().await.map_err(|e| e.to_string())?;
    PublicConfig::from_json_str(&raw).map_err(|e| e.to_string())
}
