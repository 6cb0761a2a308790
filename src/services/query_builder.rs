//! 搜索查询构造
//!
//! 查询按精确度从高到低排列，流程层在第一个拿到图片的查询处停止

use crate::models::ProductIdentity;
use crate::services::tokenizer::extract_model_tokens;

/// 第二个查询最多使用的型号数量
const MODELS_PER_QUERY: usize = 3;

/// 为一个商品构造 2 到 3 个搜索查询
///
/// 1. 带引号的完整名称 + "фото товара"
/// 2. （仅当存在型号时）品牌 + 最多 3 个型号 + "product image"
/// 3. 名称 + 品牌 + 分类 + "product photo"
pub fn build_queries(identity: &ProductIdentity) -> Vec<String> {
    let mut queries = vec![format!("\"{}\" фото товара", identity.name)];

    let models = extract_model_tokens(&identity.name);
    if !models.is_empty() {
        let picked: Vec<&str> = models
            .iter()
            .take(MODELS_PER_QUERY)
            .map(String::as_str)
            .collect();
        queries.push(format!("{} {} product image", identity.brand, picked.join(" ")));
    }

    queries.push(format!(
        "{} {} {} product photo",
        identity.name, identity.brand, identity.category
    ));
    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_queries_with_models() {
        let identity = ProductIdentity::new(
            "Замок CISA 57535 A10 B20 C30 D40",
            "CISA",
            "Дверные замки",
        );
        let queries = build_queries(&identity);

        assert_eq!(queries.len(), 3);
        assert_eq!(queries[0], "\"Замок CISA 57535 A10 B20 C30 D40\" фото товара");
        assert_eq!(queries[1], "CISA A10 B20 C30 product image");
        assert_eq!(
            queries[2],
            "Замок CISA 57535 A10 B20 C30 D40 CISA Дверные замки product photo"
        );
    }

    #[test]
    fn test_two_queries_without_models() {
        let identity =
            ProductIdentity::new("Доводчик GEZE TS 2000 серебро", "GEZE", "Доводчики");
        let queries = build_queries(&identity);

        assert_eq!(
            queries,
            vec![
                "\"Доводчик GEZE TS 2000 серебро\" фото товара".to_string(),
                "Доводчик GEZE TS 2000 серебро GEZE Доводчики product photo".to_string(),
            ]
        );
    }
}
