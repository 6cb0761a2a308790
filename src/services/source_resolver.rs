//! 来源页解析
//!
//! 把选中的图片映射回它所在的网页，并排除聚合搜索页这类不可信来源

use crate::models::SearchResultLink;
use url::Url;

/// 是否为 http(s) 地址
pub fn is_web_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// 取出地址的主机部分（含端口），无法解析时返回 `None`
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// 在搜索结果中找与图片同主机的网页
///
/// 找不到时退回第一个结果；没有结果时返回空字符串
pub fn match_source_url(image_url: &str, results: &[SearchResultLink]) -> String {
    let image_host = host_of(image_url);
    if image_host.is_some() {
        if let Some(hit) = results
            .iter()
            .map(SearchResultLink::url)
            .find(|url| !url.is_empty() && host_of(url) == image_host)
        {
            return hit.to_string();
        }
    }
    results
        .first()
        .map(|r| r.url().to_string())
        .unwrap_or_default()
}

/// 来源页策略：哪些域名不能作为"来源"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePolicy {
    non_authoritative: Vec<String>,
}

impl SourcePolicy {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            non_authoritative: domains
                .into_iter()
                .map(|d| d.into().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// 来源地址是否属于聚合搜索页等非权威域名
    pub fn is_non_authoritative(&self, source_url: &str) -> bool {
        if source_url.is_empty() {
            return false;
        }
        let haystack = host_of(source_url).unwrap_or_else(|| source_url.to_lowercase());
        self.non_authoritative
            .iter()
            .any(|marker| haystack.contains(marker.as_str()))
    }

    /// 来源是非权威域名时，用图片地址本身代替来源
    pub fn finalize_source(&self, image_url: &str, source_url: String) -> String {
        if self.is_non_authoritative(&source_url) {
            image_url.to_string()
        } else {
            source_url
        }
    }
}

impl Default for SourcePolicy {
    fn default() -> Self {
        Self::new(["yandex."])
    }
}
