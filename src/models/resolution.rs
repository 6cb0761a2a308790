use serde::{Deserialize, Serialize};

/// 一个商品的图片解析结果
///
/// `image_url` 为空表示解析失败或没有合适的候选，这同样是最终结果，会被缓存
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionEntry {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub source_url: String,
}

impl ResolutionEntry {
    pub fn new(image_url: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            source_url: source_url.into(),
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}
