//! 日志工具模块
//!
//! 提供日志初始化和格式化输出的辅助函数

use crate::config::Config;
use crate::orchestrator::ResolutionStats;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；未设置时默认 info，详细模式下为 debug。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 商品图片解析");
    info!("📄 库存表: {}", config.input_csv);
    info!("🗂️ 缓存文件: {}", config.cache_path);
    info!("💾 每 {} 个商品保存一次缓存", config.checkpoint_every);
    info!("{}", "=".repeat(60));
}

/// 记录库存加载信息
pub fn log_products_loaded(total: usize) {
    info!("✓ 找到 {} 个待处理的商品", total);
    info!("💡 所有商品按顺序逐个处理\n");
}

/// 记录检查点进度
pub fn log_progress(processed: usize, total: usize, cached: usize) {
    info!("{}", "─".repeat(60));
    info!("📦 已处理 {}/{}（缓存 {} 条）", processed, total, cached);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &ResolutionStats, cards: usize, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🃏 商品卡片: {}", cards);
    info!("♻️ 缓存命中: {}", stats.cache_hits);
    info!("🔍 新解析: {}", stats.resolved);
    info!("🖼️ 新解析中找到图片: {}/{}", stats.with_image, stats.resolved);
    info!("{}", "=".repeat(60));
    info!("\n卡片已保存至: {}, {}", config.output_csv, config.output_json);
    info!("缓存已保存至: {}", config.cache_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
