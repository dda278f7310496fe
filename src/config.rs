use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub backend_base_url: String,
    pub bind_addr: String,
    pub page_size: usize,
    pub backend_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_base_url = env::var("BACKEND_BASE_URL")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let page_size = env::var("PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(10);
        let backend_timeout_secs = env::var("BACKEND_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);

        Ok(Self {
            backend_base_url,
            bind_addr,
            page_size,
            backend_timeout_secs,
        })
    }
}
