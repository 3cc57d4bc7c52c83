/// Server configuration, read once at startup from `BTK_*` environment
/// variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Base URL of the exchange-rate API.
    pub fx_api_url: String,
    /// Without a key the server falls back to base-currency-only rates.
    pub fx_api_key: Option<String>,
    /// Base URL of the backend order API.
    pub backend_api_url: String,
    /// Directory holding one cart JSON file per session.
    pub cart_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: env_or("BTK_LISTEN_ADDR", "0.0.0.0:8080"),
            fx_api_url: env_or("BTK_FX_API_URL", "https://v6.exchangerate-api.com/v6"),
            fx_api_key: std::env::var("BTK_FX_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            backend_api_url: env_or("BTK_BACKEND_API_URL", "http://localhost:8000/api"),
            cart_dir: env_or("BTK_CART_DIR", "data/carts"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
