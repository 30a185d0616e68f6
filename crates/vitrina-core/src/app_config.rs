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
    /// Product API root, always without a trailing slash,
    /// e.g. `"http://localhost:8085/api"`.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_debounce_ms: u64,
    pub suggestion_limit: usize,
    pub full_results_limit: usize,
    pub description_preview_len: usize,
    pub suggestion_hide_delay_ms: u64,
    pub related_page_size: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("search_debounce_ms", &self.search_debounce_ms)
            .field("suggestion_limit", &self.suggestion_limit)
            .field("full_results_limit", &self.full_results_limit)
            .field("description_preview_len", &self.description_preview_len)
            .field("suggestion_hide_delay_ms", &self.suggestion_hide_delay_ms)
            .field("related_page_size", &self.related_page_size)
            .finish()
    }
}
