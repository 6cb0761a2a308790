//! 型号分词 - 业务能力层
//!
//! 从商品名称中提取类似 SKU 的型号（字母和数字混合）

use regex::Regex;
use std::sync::LazyLock;

/// 参与构造查询的型号数量上限
pub const MAX_MODEL_TOKENS: usize = 6;
/// 仅用于评分的附加词数量上限
pub const MAX_EXTRA_SCORING_TOKENS: usize = 10;

static MODEL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-zА-Яа-я0-9./+-]+").expect("valid model run regex"));

static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-zА-Яа-я0-9]+").expect("valid word run regex"));

/// 提取型号 token
///
/// 名称转大写后按字母/数字/`./+-` 切分，去掉首尾的 `.` 和 `-`，
/// 只保留长度 ≥ 3 且同时包含字母和数字的片段。按出现顺序，最多 6 个，保留重复。
pub fn extract_model_tokens(name: &str) -> Vec<String> {
    let upper = name.to_uppercase();
    MODEL_RUN
        .find_iter(&upper)
        .map(|m| m.as_str().trim_matches(['.', '-']))
        .filter(|tok| is_model_like(tok))
        .take(MAX_MODEL_TOKENS)
        .map(str::to_string)
        .collect()
}

/// 评分用的 token 集合：全部型号 + 最多 10 个长度 ≥ 4 的字母数字词
pub fn scoring_tokens(name: &str) -> Vec<String> {
    let mut tokens = extract_model_tokens(name);
    tokens.extend(
        WORD_RUN
            .find_iter(name)
            .map(|m| m.as_str())
            .filter(|word| word.chars().count() >= 4)
            .take(MAX_EXTRA_SCORING_TOKENS)
            .map(str::to_string),
    );
    tokens
}

fn is_model_like(token: &str) -> bool {
    token.chars().count() >= 3
        && token.chars().any(|c| c.is_ascii_digit())
        && token.chars().any(char::is_alphabetic)
}
