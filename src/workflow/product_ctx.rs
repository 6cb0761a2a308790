//! 商品处理上下文
//!
//! 封装"我正在处理第几个商品"这一信息，只用于日志

use std::fmt::Display;

#[derive(Debug, Clone, Copy)]
pub struct ProductCtx {
    /// 商品在库存表中的位置（从 1 开始）
    pub index: usize,
    /// 商品总数
    pub total: usize,
}

impl ProductCtx {
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }
}

impl Display for ProductCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[商品 {}/{}]", self.index, self.total)
    }
}
