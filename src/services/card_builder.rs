//! 商品卡片构造
//!
//! slug、SEO 标题/描述、关键词等纯文本格式化

use crate::models::{ProductCard, ProductIdentity, ResolutionEntry};
use phf::phf_map;

const SEO_TITLE_LIMIT: usize = 70;
const SEO_DESCRIPTION_LIMIT: usize = 165;

/// 西里尔字母 → 拉丁字母转写表
static RU_TO_LAT: phf::Map<char, &'static str> = phf_map! {
    'а' => "a", 'б' => "b", 'в' => "v", 'г' => "g", 'д' => "d", 'е' => "e", 'ё' => "e",
    'ж' => "zh", 'з' => "z", 'и' => "i", 'й' => "y", 'к' => "k", 'л' => "l", 'м' => "m",
    'н' => "n", 'о' => "o", 'п' => "p", 'р' => "r", 'с' => "s", 'т' => "t", 'у' => "u",
    'ф' => "f", 'х' => "h", 'ц' => "ts", 'ч' => "ch", 'ш' => "sh", 'щ' => "sch",
    'ъ' => "", 'ы' => "y", 'ь' => "", 'э' => "e", 'ю' => "yu", 'я' => "ya",
};

/// 解析库存数量，无法解析时为 0
pub fn parse_stock(raw: &str) -> i64 {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if digits.is_empty() || digits == "-" {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

/// 生成 slug，总是以 `-{idx}` 结尾
pub fn slugify(name: &str, idx: usize) -> String {
    let mut raw = String::with_capacity(name.len());
    for ch in name.to_lowercase().chars() {
        if let Some(lat) = RU_TO_LAT.get(&ch) {
            raw.push_str(lat);
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            raw.push(ch);
        } else {
            raw.push('-');
        }
    }

    let mut slug = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(ch);
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        format!("tovar-{idx}-{idx}")
    } else {
        format!("{slug}-{idx}")
    }
}

/// 按字符数截断，尽量在空格处断开并追加省略号
pub fn crop(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let trimmed: String = text.chars().take(limit.saturating_sub(1)).collect();
    let trimmed = match trimmed.rfind(' ') {
        Some(pos) => &trimmed[..pos],
        None => trimmed.as_str(),
    };
    format!("{trimmed}…")
}

/// SEO 标题和描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seo {
    pub title: String,
    pub description: String,
}

pub fn build_seo(identity: &ProductIdentity, stock: i64) -> Seo {
    let title = crop(
        &format!("{} купить в наличии | Дорстор", identity.name),
        SEO_TITLE_LIMIT,
    );
    let availability = if stock > 0 {
        format!("В наличии {stock} шт.")
    } else {
        "Поставка под заказ, уточняйте срок.".to_string()
    };
    let description = format!(
        "{} — {} для входных и технических дверей. {} Бренд: {}. Доставка по РФ и самовывоз.",
        identity.name,
        identity.category.to_lowercase(),
        availability,
        identity.brand
    );
    Seo {
        title,
        description: crop(&description, SEO_DESCRIPTION_LIMIT),
    }
}

/// 关键词列表，忽略大小写去重
pub fn build_keywords(identity: &ProductIdentity) -> String {
    let base = [
        identity.name.clone(),
        identity.category.clone(),
        format!("{} фурнитура", identity.brand),
        "дверная фурнитура купить".to_string(),
        "фурнитура для дверей".to_string(),
    ];

    let mut seen = std::collections::HashSet::new();
    let mut cleaned = Vec::new();
    for item in &base {
        let item = item.trim();
        if !item.is_empty() && seen.insert(item.to_lowercase()) {
            cleaned.push(item);
        }
    }
    cleaned.join(", ")
}

/// 组装一张商品卡片
///
/// `id` 为商品在库存表中的位置（从 1 开始）
pub fn build_card(
    id: usize,
    identity: &ProductIdentity,
    raw_stock: &str,
    resolution: Option<&ResolutionEntry>,
) -> ProductCard {
    let stock = parse_stock(raw_stock);
    let seo = build_seo(identity, stock);
    let resolution = resolution.cloned().unwrap_or_default();

    ProductCard {
        id,
        slug: slugify(&identity.name, id),
        name: identity.name.clone(),
        category: identity.category.clone(),
        brand: identity.brand.clone(),
        stock,
        availability: if stock > 0 { "in_stock" } else { "out_of_stock" }.to_string(),
        image_url: resolution.image_url,
        image_search_url: resolution.source_url,
        seo_title: seo.title,
        seo_description: seo.description,
        keywords: build_keywords(identity),
    }
}
