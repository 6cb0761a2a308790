//! 批量图片解析 - 编排层
//!
//! ## 职责
//!
//! - 按库存顺序遍历商品，逐个解析
//! - 缓存命中时直接复用，不发起任何网络请求
//! - 每处理 N 个商品（按位置计数）写一次缓存，结束时再写一次
//! - 单个商品失败不影响整体，失败同样作为空结果写入缓存

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::infrastructure::ResolutionCache;
use crate::models::{InventoryRow, ResolutionEntry};
use crate::services::identify;
use crate::utils::logging::log_progress;
use crate::workflow::{ImageFlow, ProductCtx};

/// 解析统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionStats {
    /// 缓存命中数
    pub cache_hits: usize,
    /// 本次新解析的数量
    pub resolved: usize,
    /// 新解析中找到图片的数量
    pub with_image: usize,
}

/// 批量解析结果：规范化名称 → 解析结果
#[derive(Debug, Default)]
pub struct ResolutionOutcome {
    pub entries: HashMap<String, ResolutionEntry>,
    pub stats: ResolutionStats,
    /// 最后一次写缓存是否成功
    pub cache_saved: bool,
}

/// 解析所有商品的图片
///
/// 写缓存失败（包括最后一次）只记录警告，不中断运行。
pub async fn resolve_images(
    products: &[InventoryRow],
    flow: &ImageFlow,
    cache: &mut ResolutionCache,
    checkpoint_every: usize,
) -> ResolutionOutcome {
    let total = products.len();
    let checkpoint_every = checkpoint_every.max(1);
    let mut outcome = ResolutionOutcome::default();

    for (idx, row) in products.iter().enumerate() {
        let ctx = ProductCtx::new(idx + 1, total);
        let identity = identify(&row.name);

        if identity.name.is_empty() {
            debug!("{} 名称为空，跳过", ctx);
        } else if let Some(entry) = cache.get(&identity.name) {
            outcome.stats.cache_hits += 1;
            outcome.entries.insert(identity.name.clone(), entry.clone());
        } else {
            info!("{} {}", ctx, identity);
            let entry = flow.run(&identity, &ctx).await;

            outcome.stats.resolved += 1;
            if entry.has_image() {
                outcome.stats.with_image += 1;
            }
            cache.insert(identity.name.clone(), entry.clone());
            outcome.entries.insert(identity.name, entry);
        }

        if ctx.index % checkpoint_every == 0 {
            if let Err(e) = cache.save() {
                warn!("{} ⚠️ 缓存检查点写入失败: {}", ctx, e);
            }
            log_progress(ctx.index, total, cache.len());
        }
    }

    match cache.save() {
        Ok(()) => outcome.cache_saved = true,
        Err(e) => warn!("⚠️ 无法写入缓存文件 {}: {}", cache.path().display(), e),
    }

    outcome
}
