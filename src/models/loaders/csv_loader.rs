use crate::error::{AppError, AppResult};
use crate::models::product::InventoryRow;
use std::io::Read;
use std::path::Path;

/// 期初余额行的标记，读取时跳过
const OPENING_BALANCE_MARKER: &str = "остаток на начало месяца";

/// 从库存 CSV 读取商品列表
///
/// 文件没有表头：第 0 列是名称，第 1 列是库存。空行、空名称和期初余额行会被跳过。
pub fn read_products(path: &Path) -> AppResult<Vec<InventoryRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
    read_products_from(file, &path.display().to_string())
}

/// 从任意读取源解析库存 CSV
pub fn read_products_from<R: Read>(reader: R, label: &str) -> AppResult<Vec<InventoryRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| AppError::csv_failed(label, e))?;
        if record.is_empty() {
            continue;
        }

        let name = record
            .get(0)
            .map(|s| s.trim_start_matches('\u{feff}').trim())
            .unwrap_or("");
        let stock = record.get(1).map(str::trim).unwrap_or("");

        if name.is_empty() || name.to_lowercase() == OPENING_BALANCE_MARKER {
            continue;
        }

        rows.push(InventoryRow {
            name: name.to_string(),
            stock: stock.to_string(),
        });
    }

    tracing::info!("从 {} 读取到 {} 个商品", label, rows.len());
    Ok(rows)
}
