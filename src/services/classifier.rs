//! 商品名称规范化与品牌/分类识别

use crate::models::{ProductIdentity, GENERIC_BRAND};
use regex::Regex;
use std::sync::LazyLock;

/// 已知品牌，按优先级排列（更长、更具体的在前）
const BRANDS: &[&str] = &[
    "ASSA ABLOY",
    "DORMAKABA",
    "SECUREMME",
    "ARMADILLO",
    "NOTEDO",
    "VANGER",
    "APECS",
    "ABLOY",
    "DORMA",
    "AVERS",
    "FUARO",
    "PALLADIUM",
    "RENZ",
    "GEZE",
    "CISA",
    "KALE",
    "PUNTO",
    "AJAX",
    "GUARDIAN",
    "PROTECTOR",
    "PHA",
];

/// 分类关键词规则，按顺序匹配
const CATEGORY_RULES: &[(&str, &str)] = &[
    ("доводчик", "Доводчики"),
    ("глазок", "Дверные глазки"),
    ("цилиндр", "Цилиндровые механизмы"),
    ("броненаклад", "Броненакладки"),
    ("ручк", "Дверные ручки"),
    ("замок", "Дверные замки"),
    ("защелк", "Защелки"),
    ("фиксатор", "Фиксаторы"),
    ("петл", "Дверные петли"),
    ("накладк", "Накладки"),
    ("антипан", "Антипаника"),
    ("шпингалет", "Шпингалеты"),
    ("девиатор", "Девиаторы"),
    ("привод", "Приводы двери"),
    ("стопор", "Ограничители"),
];

pub const DEFAULT_CATEGORY: &str = "Дверная фурнитура";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static LATIN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3,}\b").expect("valid latin word regex"));

/// 规范化商品名称，结果同时作为缓存键
pub fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('"').trim();
    let collapsed = WHITESPACE.replace_all(trimmed, " ");
    collapsed
        .trim_end_matches([',', ';', ' '])
        .to_string()
}

/// 识别品牌
///
/// 先按已知品牌列表匹配，再退回第一个独立的 ≥3 位拉丁大写单词，都没有时返回占位品牌
pub fn detect_brand(name: &str) -> String {
    let upper = name.to_uppercase().replace('Ё', "Е");
    if let Some(brand) = BRANDS.iter().find(|b| upper.contains(*b)) {
        return brand.to_string();
    }
    LATIN_WORD
        .find(&upper)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| GENERIC_BRAND.to_string())
}

/// 识别分类
pub fn detect_category(name: &str) -> String {
    let lowered = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|(_, category)| category.to_string())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// 从原始名称构造商品身份
pub fn identify(raw_name: &str) -> ProductIdentity {
    let name = normalize_name(raw_name);
    let brand = detect_brand(&name);
    let category = detect_category(&name);
    ProductIdentity {
        name,
        brand,
        category,
    }
}
