//! 候选图片评分 - 业务能力层
//!
//! 只负责"给一次搜索返回的图片打分并选出最好的一张"，不关心流程

use crate::models::{ImageCandidate, ProductIdentity, ScoredCandidate, SearchResponse};
use crate::services::source_resolver::{is_web_url, match_source_url, SourcePolicy};
use crate::services::tokenizer::{extract_model_tokens, scoring_tokens};

/// 品牌命中的得分
const BRAND_SCORE: i32 = 4;
/// 含数字 token 命中的得分
const DIGIT_TOKEN_SCORE: i32 = 3;
/// 纯字母 token 命中的得分
const WORD_TOKEN_SCORE: i32 = 1;

/// 给一个候选图片打分
///
/// 在 `url + 描述` 的小写文本中查找品牌和每个 token
pub fn score_image(candidate: &ImageCandidate, tokens: &[String], identity: &ProductIdentity) -> i32 {
    let haystack = format!("{} {}", candidate.url, candidate.description).to_lowercase();

    let mut score = 0;
    if identity.has_specific_brand() && haystack.contains(&identity.brand.to_lowercase()) {
        score += BRAND_SCORE;
    }
    for token in tokens {
        if haystack.contains(&token.to_lowercase()) {
            score += if token.chars().any(|c| c.is_ascii_digit()) {
                DIGIT_TOKEN_SCORE
            } else {
                WORD_TOKEN_SCORE
            };
        }
    }
    score
}

/// 选出得分最高的候选
///
/// 非 http(s) 地址被丢弃；同分时保留先出现的（接口返回顺序）
pub fn rank_candidates(response: &SearchResponse, identity: &ProductIdentity) -> Option<ScoredCandidate> {
    let tokens = scoring_tokens(&identity.name);

    let mut best: Option<ScoredCandidate> = None;
    for candidate in response.candidates() {
        if !is_web_url(&candidate.url) {
            continue;
        }
        let score = score_image(&candidate, &tokens, identity);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(ScoredCandidate { candidate, score });
        }
    }
    best
}

/// 从一次搜索响应中选出图片和来源页
///
/// 返回 `(image_url, source_url)`，没有候选时两者都为空
pub fn pick_best_image(
    response: &SearchResponse,
    identity: &ProductIdentity,
    policy: &SourcePolicy,
) -> (String, String) {
    let Some(best) = rank_candidates(response, identity) else {
        return (String::new(), String::new());
    };

    let image_url = best.candidate.url;
    let source_url = match_source_url(&image_url, response.results());
    let source_url = policy.finalize_source(&image_url, source_url);
    (image_url, source_url)
}

/// 图片地址本身是否已经足够具体
///
/// 地址中包含任一型号或具体品牌名时返回 true，此时不需要再抓取来源页
pub fn looks_specific(identity: &ProductIdentity, image_url: &str) -> bool {
    if image_url.is_empty() {
        return false;
    }
    let low_url = image_url.to_lowercase();
    if extract_model_tokens(&identity.name)
        .iter()
        .any(|tok| low_url.contains(&tok.to_lowercase()))
    {
        return true;
    }
    identity.has_specific_brand() && low_url.contains(&identity.brand.to_lowercase())
}
