use std::path::PathBuf;

/// Server configuration, read once at startup from the environment.
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub fonts_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let fonts_dir = std::env::var("FONTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./fonts"));
        Self {
            host,
            port,
            fonts_dir,
        }
    }
}
