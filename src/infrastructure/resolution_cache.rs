//! 解析结果缓存 - 基础设施层
//!
//! 以规范化商品名为键，持久化到单个 JSON 文件。
//! 一旦某个名称有了记录（包括空记录），后续运行不会再为它发起网络请求。

use crate::error::{AppError, AppResult};
use crate::models::ResolutionEntry;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// 名称 → 解析结果 的持久化映射
#[derive(Debug, Clone)]
pub struct ResolutionCache {
    path: PathBuf,
    entries: BTreeMap<String, ResolutionEntry>,
}

impl ResolutionCache {
    /// 加载缓存
    ///
    /// 文件不存在或内容损坏时退化为空缓存，不会返回错误
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("缓存文件 {} 解析失败，使用空缓存: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("缓存文件 {} 不存在，使用空缓存", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!("缓存文件 {} 读取失败，使用空缓存: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        info!("已加载 {} 条图片缓存: {}", entries.len(), path.display());
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&ResolutionEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: ResolutionEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &BTreeMap<String, ResolutionEntry> {
        &self.entries
    }

    /// 整个文件原子替换写入
    ///
    /// 先写同目录下的临时文件，再重命名覆盖，写到一半崩溃不会破坏已有缓存
    pub fn save(&self) -> AppResult<()> {
        let path_label = self.path.display().to_string();
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)
            .map_err(|e| AppError::file_write_failed(&path_label, e))?;

        let encoded = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| AppError::json_failed(&path_label, e))?;

        let mut tmp = NamedTempFile::new_in(&parent)
            .map_err(|e| AppError::file_write_failed(&path_label, e))?;
        tmp.write_all(encoded.as_bytes())
            .and_then(|_| tmp.flush())
            .map_err(|e| AppError::file_write_failed(&path_label, e))?;
        tmp.persist(&self.path)
            .map_err(|e| AppError::file_write_failed(&path_label, e.error))?;

        debug!("缓存已写入 {} ({} 条)", path_label, self.entries.len());
        Ok(())
    }
}
