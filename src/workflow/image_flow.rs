//! 图片解析流程 - 流程层
//!
//! 核心职责：定义"一个商品"的完整图片解析流程
//!
//! 流程顺序：
//! 1. 按精确度依次查询，拿到第一张可用图片即停止
//! 2. 图片不够具体时，尝试用来源页的 og:image 替换
//! 3. 来源是聚合搜索页时，用图片地址代替来源
//!
//! 流程本身不持有状态，搜索和抓取能力通过 trait 注入。

use tracing::{debug, info};

use crate::config::Config;
use crate::models::{ProductIdentity, ResolutionEntry};
use crate::services::{
    build_queries, looks_specific, pick_best_image, ImageSearch, PageScraper, SourcePolicy,
};
use crate::utils::logging::truncate_text;
use crate::workflow::product_ctx::ProductCtx;

/// 图片解析流程
///
/// - 决定查询顺序、何时停止、何时抓取来源页
/// - 所有失败都吸收为空字符串结果，不返回错误
pub struct ImageFlow {
    search: Box<dyn ImageSearch>,
    scraper: Box<dyn PageScraper>,
    policy: SourcePolicy,
}

impl ImageFlow {
    pub fn new(
        search: Box<dyn ImageSearch>,
        scraper: Box<dyn PageScraper>,
        policy: SourcePolicy,
    ) -> Self {
        Self {
            search,
            scraper,
            policy,
        }
    }

    /// 按配置中的非权威域名构造
    pub fn from_config(
        search: Box<dyn ImageSearch>,
        scraper: Box<dyn PageScraper>,
        config: &Config,
    ) -> Self {
        Self::new(
            search,
            scraper,
            SourcePolicy::new(config.non_authoritative_domains.iter().cloned()),
        )
    }

    pub async fn run(&self, identity: &ProductIdentity, ctx: &ProductCtx) -> ResolutionEntry {
        let (mut image_url, source_url) = self.search_image(identity, ctx).await;

        if !source_url.is_empty() && !looks_specific(identity, &image_url) {
            debug!("{} 图片不够具体，尝试抓取来源页: {}", ctx, source_url);
            let og_image = self.scraper.fetch_og_image(&source_url).await;
            if !og_image.is_empty() {
                info!("{} ✓ 使用来源页图片: {}", ctx, og_image);
                image_url = og_image;
            }
        }

        let source_url = self.policy.finalize_source(&image_url, source_url);
        ResolutionEntry::new(image_url, source_url)
    }

    /// 依次执行查询，返回第一个拿到图片的 (image_url, source_url)
    async fn search_image(&self, identity: &ProductIdentity, ctx: &ProductCtx) -> (String, String) {
        let queries = build_queries(identity);

        for (i, query) in queries.iter().enumerate() {
            debug!(
                "{} 🔍 查询 {}/{}: {}",
                ctx,
                i + 1,
                queries.len(),
                truncate_text(query, 120)
            );

            let Some(response) = self.search.search(query).await else {
                debug!("{} 查询 {} 无结果", ctx, i + 1);
                continue;
            };

            let (image_url, source_url) = pick_best_image(&response, identity, &self.policy);
            if !image_url.is_empty() {
                info!(
                    "{} ✓ 查询 {} 找到图片: {}",
                    ctx,
                    i + 1,
                    truncate_text(&image_url, 120)
                );
                return (image_url, source_url);
            }
        }

        info!("{} ⚠️ 所有查询都没有找到图片", ctx);
        (String::new(), String::new())
    }
}
