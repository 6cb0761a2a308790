//! 测试用的确定性搜索和抓取实现

use crate::models::{ImageItem, SearchResponse, SearchResultLink};
use crate::services::{ImageSearch, PageScraper};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 调用记录，克隆后与被测对象共享
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// 构造只含图片和网页的响应
pub fn response(images: &[(&str, &str)], results: &[&str]) -> SearchResponse {
    SearchResponse {
        images: Some(
            images
                .iter()
                .map(|(url, description)| ImageItem::Described {
                    url: Some(url.to_string()),
                    description: Some(description.to_string()),
                })
                .collect(),
        ),
        results: Some(
            results
                .iter()
                .map(|u| SearchResultLink {
                    url: Some(u.to_string()),
                })
                .collect(),
        ),
    }
}

/// 按查询字符串返回预设响应，未预设的查询返回 `None`
#[derive(Default)]
pub struct ScriptedSearch {
    responses: HashMap<String, SearchResponse>,
    log: CallLog,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: impl Into<String>, response: SearchResponse) -> Self {
        self.responses.insert(query.into(), response);
        self
    }

    pub fn log(&self) -> CallLog {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl ImageSearch for ScriptedSearch {
    async fn search(&self, query: &str) -> Option<SearchResponse> {
        self.log.lock().unwrap().push(query.to_string());
        self.responses.get(query).cloned()
    }
}

/// 按页面地址返回预设的规范图片地址
#[derive(Default)]
pub struct ScriptedScraper {
    pages: HashMap<String, String>,
    log: CallLog,
}

impl ScriptedScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, page_url: impl Into<String>, og_image: impl Into<String>) -> Self {
        self.pages.insert(page_url.into(), og_image.into());
        self
    }

    pub fn log(&self) -> CallLog {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl PageScraper for ScriptedScraper {
    async fn fetch_og_image(&self, source_url: &str) -> String {
        self.log.lock().unwrap().push(source_url.to_string());
        self.pages.get(source_url).cloned().unwrap_or_default()
    }
}
