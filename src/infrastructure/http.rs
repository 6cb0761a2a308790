//! HTTP 客户端 - 基础设施层
//!
//! 搜索接口和页面抓取共用一个 `reqwest::Client`，超时按请求单独设置

use crate::error::{AppResult, ConfigError};
use std::time::Duration;

/// 搜索接口单次请求超时
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(45);
/// 页面抓取超时
pub const PAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(20);

const USER_AGENT: &str = concat!("product_cards/", env!("CARGO_PKG_VERSION"));

/// 构建共享的 HTTP 客户端
pub fn build_http_client() -> AppResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(ConfigError::HttpClient)?;
    Ok(client)
}
