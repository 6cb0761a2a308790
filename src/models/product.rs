use serde::{Deserialize, Serialize};
use std::fmt;

/// 无法识别品牌时使用的占位品牌
pub const GENERIC_BRAND: &str = "Универсальный";

/// 库存表中的一行（原始字符串，未规范化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub name: String,
    pub stock: String,
}

/// 商品身份：规范化名称 + 推断出的品牌和分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIdentity {
    pub name: String,
    pub brand: String,
    pub category: String,
}

impl ProductIdentity {
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
        }
    }

    /// 品牌是否为具体品牌（不是占位品牌）
    pub fn has_specific_brand(&self) -> bool {
        !self.brand.is_empty() && self.brand != GENERIC_BRAND
    }
}

impl fmt::Display for ProductIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} / {}]", self.name, self.brand, self.category)
    }
}

/// 输出的商品卡片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: usize,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub stock: i64,
    pub availability: String,
    pub image_url: String,
    pub image_search_url: String,
    pub seo_title: String,
    pub seo_description: String,
    pub keywords: String,
}
