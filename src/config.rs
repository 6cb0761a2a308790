use crate::error::{AppError, AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// Tavily API 密钥（必填）
    pub tavily_api_key: String,
    /// Tavily 搜索接口地址
    pub tavily_api_url: String,
    /// 库存 CSV 路径
    pub input_csv: String,
    /// 输出 CSV 路径
    pub output_csv: String,
    /// 输出 JSON 路径
    pub output_json: String,
    /// 图片缓存文件路径
    pub cache_path: String,
    /// 每处理多少个商品写一次缓存
    pub checkpoint_every: usize,
    /// 搜索请求最大尝试次数
    pub search_max_retries: u32,
    /// 不可作为来源页的域名标记（聚合搜索页）
    pub non_authoritative_domains: Vec<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tavily_api_key: String::new(),
            tavily_api_url: "https://api.tavily.com/search".to_string(),
            input_csv: "public/inventory.csv".to_string(),
            output_csv: "public/product_cards.csv".to_string(),
            output_json: "public/product_cards.json".to_string(),
            cache_path: "public/tavily_image_cache.json".to_string(),
            checkpoint_every: 25,
            search_max_retries: 3,
            non_authoritative_domains: vec!["yandex.".to_string()],
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            tavily_api_key: std::env::var("TAVILY_API_KEY").map(|v| v.trim().to_string()).unwrap_or(default.tavily_api_key),
            tavily_api_url: std::env::var("TAVILY_API_URL").unwrap_or(default.tavily_api_url),
            input_csv: std::env::var("INPUT_CSV").unwrap_or(default.input_csv),
            output_csv: std::env::var("OUTPUT_CSV").unwrap_or(default.output_csv),
            output_json: std::env::var("OUTPUT_JSON").unwrap_or(default.output_json),
            cache_path: std::env::var("CACHE_PATH").unwrap_or(default.cache_path),
            checkpoint_every: std::env::var("CHECKPOINT_EVERY").ok().and_then(|v| v.parse().ok()).filter(|n| *n > 0).unwrap_or(default.checkpoint_every),
            search_max_retries: std::env::var("SEARCH_MAX_RETRIES").ok().and_then(|v| v.parse().ok()).filter(|n| *n > 0).unwrap_or(default.search_max_retries),
            non_authoritative_domains: std::env::var("NON_AUTHORITATIVE_DOMAINS").ok().map(|v| parse_domain_list(&v)).unwrap_or(default.non_authoritative_domains),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 检查运行前必须满足的条件
    ///
    /// 缺少 API 密钥是唯一的致命错误
    pub fn validate(&self) -> AppResult<()> {
        if self.tavily_api_key.is_empty() {
            return Err(AppError::Config(ConfigError::EnvVarNotFound {
                var_name: "TAVILY_API_KEY".to_string(),
            }));
        }
        Ok(())
    }
}

fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}
