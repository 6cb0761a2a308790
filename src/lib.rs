//! # Product Cards
//!
//! 从库存表生成商品卡片，并通过 Tavily 搜索为每个商品解析一张图片
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有资源，只暴露能力
//! - `ResolutionCache` - 名称 → 图片结果的持久化缓存
//! - `Backoff` / `run_with_retry` - 限流退避状态机
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个商品
//! - `TavilySearch` - 图片搜索能力
//! - `HttpPageScraper` - 来源页 og:image 抓取能力
//! - 分词、查询构造、候选评分、来源判定、卡片构造
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个商品"的完整解析流程
//! - `ProductCtx` - 上下文封装（位置 + 总数）
//! - `ImageFlow` - 流程编排（query → score → og:image → source）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 应用入口，读库存、写卡片
//! - `orchestrator/image_resolver` - 顺序解析所有商品，定期保存缓存
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::ResolutionCache;
pub use models::{InventoryRow, ProductCard, ProductIdentity, ResolutionEntry};
pub use orchestrator::{resolve_images, App, ResolutionOutcome, ResolutionStats};
pub use services::{ImageSearch, PageScraper, SourcePolicy};
pub use workflow::{ImageFlow, ProductCtx};
