use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 搜索接口返回的图片项：可能是裸 URL，也可能带描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageItem {
    Url(String),
    Described {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    /// 无法识别的条目，评分时直接丢弃
    Other(JsonValue),
}

/// 图片候选
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCandidate {
    pub url: String,
    pub description: String,
}

impl ImageCandidate {
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
        }
    }
}

impl From<&ImageItem> for ImageCandidate {
    fn from(item: &ImageItem) -> Self {
        match item {
            ImageItem::Url(url) => ImageCandidate::new(url.clone(), ""),
            ImageItem::Described { url, description } => ImageCandidate::new(
                url.clone().unwrap_or_default(),
                description.clone().unwrap_or_default(),
            ),
            ImageItem::Other(_) => ImageCandidate::default(),
        }
    }
}

/// 打过分的候选，分数只在解析过程中使用，不持久化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub candidate: ImageCandidate,
    pub score: i32,
}

/// 搜索结果中的网页
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultLink {
    #[serde(default)]
    pub url: Option<String>,
}

impl SearchResultLink {
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }
}

/// 搜索接口的响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub images: Option<Vec<ImageItem>>,
    #[serde(default)]
    pub results: Option<Vec<SearchResultLink>>,
}

impl SearchResponse {
    /// 按接口返回顺序给出所有图片候选
    pub fn candidates(&self) -> Vec<ImageCandidate> {
        self.images
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(ImageCandidate::from)
            .collect()
    }

    pub fn results(&self) -> &[SearchResultLink] {
        self.results.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_images() {
        let body = r#"{
            "query": "x",
            "images": [
                "https://a.example/1.jpg",
                {"url": "https://b.example/2.jpg", "description": "GEZE TS 2000"},
                {"url": "https://c.example/3.jpg", "description": null},
                42
            ],
            "results": [{"url": "https://b.example/page", "title": "t", "score": 0.9}]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let candidates = response.candidates();

        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0], ImageCandidate::new("https://a.example/1.jpg", ""));
        assert_eq!(candidates[1].description, "GEZE TS 2000");
        assert_eq!(candidates[2].description, "");
        assert_eq!(candidates[3], ImageCandidate::default());
        assert_eq!(response.results()[0].url(), "https://b.example/page");
    }

    #[test]
    fn test_null_lists_are_empty() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"images": null, "results": null}"#).unwrap();
        assert!(response.candidates().is_empty());
        assert!(response.results().is_empty());
    }
}
