//! 商品卡片输出 - 业务能力层
//!
//! 只负责把卡片写成 CSV / JSON 文件

use crate::error::{AppError, AppResult};
use crate::models::ProductCard;
use std::path::Path;
use tracing::debug;

/// CSV 表头，与 `ProductCard` 的字段顺序一致
const CARD_COLUMNS: [&str; 12] = [
    "id",
    "slug",
    "name",
    "category",
    "brand",
    "stock",
    "availability",
    "image_url",
    "image_search_url",
    "seo_title",
    "seo_description",
    "keywords",
];

fn ensure_parent(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
    }
    Ok(())
}

/// 写出 CSV（带表头）
///
/// 没有卡片时只写表头
pub fn write_cards_csv(path: &Path, cards: &[ProductCard]) -> AppResult<()> {
    ensure_parent(path)?;
    let label = path.display().to_string();

    let mut writer = csv::Writer::from_path(path).map_err(|e| AppError::csv_failed(&label, e))?;
    if cards.is_empty() {
        writer
            .write_record(CARD_COLUMNS)
            .map_err(|e| AppError::csv_failed(&label, e))?;
    }
    for card in cards {
        writer
            .serialize(card)
            .map_err(|e| AppError::csv_failed(&label, e))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::file_write_failed(&label, e))?;

    debug!("已写出 {} 张卡片到 {}", cards.len(), label);
    Ok(())
}

/// 写出格式化的 JSON 数组
pub fn write_cards_json(path: &Path, cards: &[ProductCard]) -> AppResult<()> {
    ensure_parent(path)?;
    let label = path.display().to_string();

    let encoded =
        serde_json::to_string_pretty(cards).map_err(|e| AppError::json_failed(&label, e))?;
    std::fs::write(path, encoded).map_err(|e| AppError::file_write_failed(&label, e))?;

    debug!("已写出 {} 张卡片到 {}", cards.len(), label);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> ProductCard {
        ProductCard {
            id: 1,
            slug: "ruchka-1".to_string(),
            name: "Ручка, хром".to_string(),
            category: "Дверные ручки".to_string(),
            brand: "Универсальный".to_string(),
            stock: 3,
            availability: "in_stock".to_string(),
            image_url: "https://example.com/r.jpg".to_string(),
            image_search_url: String::new(),
            seo_title: "t".to_string(),
            seo_description: "d".to_string(),
            keywords: "k".to_string(),
        }
    }

    #[test]
    fn test_write_csv_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("cards.csv");
        write_cards_csv(&path, &[card()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("id,slug,name,category,brand,stock,availability,image_url,image_search_url,seo_title,seo_description,keywords")
        );
        assert_eq!(
            lines.next(),
            Some("1,ruchka-1,\"Ручка, хром\",Дверные ручки,Универсальный,3,in_stock,https://example.com/r.jpg,,t,d,k")
        );
    }

    #[test]
    fn test_write_csv_empty_has_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.csv");
        write_cards_csv(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec![CARD_COLUMNS.join(",")]);
    }

    #[test]
    fn test_header_matches_serialized_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.csv");
        write_cards_csv(&path, &[card()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().next(), Some(CARD_COLUMNS.join(",").as_str()));
    }

    #[test]
    fn test_write_json_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        write_cards_json(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        write_cards_json(&path, &[card()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"name\": \"Ручка, хром\""));
        let parsed: Vec<ProductCard> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec![card()]);
    }
}
