//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整批商品的处理和调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量商品处理器
//! - 管理应用生命周期（初始化、运行）
//! - 读取库存表（Vec<InventoryRow>）
//! - 生成并写出商品卡片
//! - 输出全局统计信息
//!
//! ### `image_resolver` - 批量图片解析
//! - 按顺序遍历所有商品
//! - 命中缓存时跳过，否则交给 ImageFlow
//! - 定期把缓存写回磁盘
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理整张库存表)
//!     ↓
//! image_resolver (处理 Vec<InventoryRow>)
//!     ↓
//! workflow::ImageFlow (处理单个商品)
//!     ↓
//! services (能力层：search / score / scrape)
//!     ↓
//! infrastructure (基础设施：http / retry / cache)
//! ```

pub mod batch_processor;
pub mod image_resolver;

// 重新导出主要类型
pub use batch_processor::App;
pub use image_resolver::{resolve_images, ResolutionOutcome, ResolutionStats};
