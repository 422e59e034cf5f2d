use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Destination phone for `wa.me` links. Non-digits are stripped when
    /// the link is built.
    pub whatsapp_number: String,
    pub catalogs_path: PathBuf,
    pub assets_root: PathBuf,
    /// Public URL prefix prepended to `<directory>/<filename>` for image
    /// references, e.g. `"/images"`.
    pub assets_base_url: String,
    /// Directory backing the file-based local store.
    pub cart_dir: PathBuf,
    pub cart_storage_key: String,
    pub max_line_quantity: u32,
    pub image_load_concurrency: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("whatsapp_number", &"[redacted]")
            .field("catalogs_path", &self.catalogs_path)
            .field("assets_root", &self.assets_root)
            .field("assets_base_url", &self.assets_base_url)
            .field("cart_dir", &self.cart_dir)
            .field("cart_storage_key", &self.cart_storage_key)
            .field("max_line_quantity", &self.max_line_quantity)
            .field("image_load_concurrency", &self.image_load_concurrency)
            .finish()
    }
}
