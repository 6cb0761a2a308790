//! 来源页图片抓取 - 业务能力层
//!
//! 搜索排名靠前的图片经常是通用的分类缩略图，而商品自己的页面通常在
//! 社交预览元数据（`og:image` / `twitter:image`）里放了具体的商品照片。

use crate::infrastructure::http::PAGE_FETCH_TIMEOUT;
use crate::services::source_resolver::is_web_url;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// 按优先级排列的 meta 标签模式
static META_IMAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)<meta[^>]+property=["']og:image["'][^>]+content=["']([^"']+)["']"#,
        r#"(?i)<meta[^>]+content=["']([^"']+)["'][^>]+property=["']og:image["']"#,
        r#"(?i)<meta[^>]+name=["']twitter:image["'][^>]+content=["']([^"']+)["']"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid meta image regex"))
    .collect()
});

/// 来源页抓取能力
#[async_trait]
pub trait PageScraper: Send + Sync {
    /// 抓取页面并返回其中的规范图片地址，任何失败都返回空字符串
    async fn fetch_og_image(&self, source_url: &str) -> String;
}

/// 从 HTML 中提取规范图片地址
///
/// 每个模式只取第一个匹配；匹配到的内容不是 http(s) 地址时继续尝试下一个模式
pub fn extract_og_image(html: &str) -> Option<String> {
    META_IMAGE_PATTERNS.iter().find_map(|re| {
        let candidate = re.captures(html)?.get(1)?.as_str().trim();
        is_web_url(candidate).then(|| candidate.to_string())
    })
}

/// 基于 HTTP 的来源页抓取
pub struct HttpPageScraper {
    client: reqwest::Client,
}

impl HttpPageScraper {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageScraper for HttpPageScraper {
    async fn fetch_og_image(&self, source_url: &str) -> String {
        if !is_web_url(source_url) {
            return String::new();
        }

        let response = match self
            .client
            .get(source_url)
            .timeout(PAGE_FETCH_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                debug!("来源页请求失败 {}: {}", source_url, e);
                return String::new();
            }
        };

        if !response.status().is_success() {
            debug!("来源页返回 {}: {}", response.status(), source_url);
            return String::new();
        }

        match response.text().await {
            Ok(html) => extract_og_image(&html).unwrap_or_default(),
            Err(e) => {
                debug!("来源页读取失败 {}: {}", source_url, e);
                String::new()
            }
        }
    }
}
