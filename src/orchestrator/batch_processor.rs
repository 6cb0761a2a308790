//! 批量商品处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整运行的资源管理和调度。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、创建 HTTP 客户端和搜索/抓取能力
//! 2. **加载库存**：读取库存 CSV（`Vec<InventoryRow>`）
//! 3. **图片解析**：委托 `image_resolver` 逐个解析，缓存定期落盘
//! 4. **卡片输出**：按库存顺序生成卡片，写出 CSV 和 JSON
//! 5. **全局统计**：汇总缓存命中和新解析的数量
//!
//! 所有商品严格顺序处理，不并发。

use crate::config::Config;
use crate::infrastructure::{build_http_client, ResolutionCache};
use crate::models::{read_products, InventoryRow, ProductCard};
use crate::orchestrator::image_resolver::{resolve_images, ResolutionOutcome};
use crate::services::{
    build_card, identify, write_cards_csv, write_cards_json, HttpPageScraper, TavilySearch,
};
use crate::utils::logging::{log_products_loaded, log_startup, print_final_stats};
use crate::workflow::ImageFlow;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    flow: ImageFlow,
}

impl App {
    /// 初始化应用
    ///
    /// 缺少 API 密钥时直接失败，不做任何网络请求
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        log_startup(&config);

        let client = build_http_client()?;
        let search = TavilySearch::new(client.clone(), &config);
        let scraper = HttpPageScraper::new(client);
        let flow = ImageFlow::from_config(Box::new(search), Box::new(scraper), &config);

        Ok(Self::with_flow(config, flow))
    }

    /// 使用已经组装好的解析流程
    pub fn with_flow(config: Config, flow: ImageFlow) -> Self {
        Self { config, flow }
    }

    /// 运行应用主逻辑，返回生成的卡片
    pub async fn run(&self) -> Result<Vec<ProductCard>> {
        let products = self.load_products()?;
        if products.is_empty() {
            warn!("⚠️ 库存表中没有商品，将写出空的卡片文件");
        }
        log_products_loaded(products.len());

        let mut cache = ResolutionCache::load(&self.config.cache_path);
        let outcome = resolve_images(
            &products,
            &self.flow,
            &mut cache,
            self.config.checkpoint_every,
        )
        .await;

        let cards = build_cards(&products, &outcome);
        self.write_outputs(&cards)?;

        print_final_stats(&outcome.stats, cards.len(), &self.config);
        Ok(cards)
    }

    /// 加载库存
    fn load_products(&self) -> Result<Vec<InventoryRow>> {
        info!("📁 正在读取库存表: {}", self.config.input_csv);
        let products = read_products(Path::new(&self.config.input_csv))
            .with_context(|| format!("无法读取库存表: {}", self.config.input_csv))?;
        Ok(products)
    }

    /// 写出 CSV 和 JSON
    fn write_outputs(&self, cards: &[ProductCard]) -> Result<()> {
        write_cards_csv(Path::new(&self.config.output_csv), cards)?;
        write_cards_json(Path::new(&self.config.output_json), cards)?;
        info!(
            "💾 已写出 {} 张卡片: {}, {}",
            cards.len(),
            self.config.output_csv,
            self.config.output_json
        );
        Ok(())
    }
}

/// 按库存顺序生成卡片
///
/// 编号是商品在库存表中的位置（从 1 开始），名称为空的行不出卡片但仍占用编号
fn build_cards(products: &[InventoryRow], outcome: &ResolutionOutcome) -> Vec<ProductCard> {
    products
        .iter()
        .enumerate()
        .map(|(idx, row)| (idx, identify(&row.name), row))
        .filter(|(_, identity, _)| !identity.name.is_empty())
        .map(|(idx, identity, row)| {
            build_card(
                idx + 1,
                &identity,
                &row.stock,
                outcome.entries.get(&identity.name),
            )
        })
        .collect()
}
