//! 数据实体模块
//!
//! 包含 games / reviews 两个 SeaORM 实体及其关系定义：
//! 一个游戏拥有多条评论（has_many），每条评论属于且仅属于一个游戏（belongs_to）。

pub mod prelude;

// === SeaORM 实体（对应数据库表）===
pub mod games;
pub mod reviews;

use std::fmt;

/// 可空列的显示辅助：`None` 原样输出为 `None`
pub(crate) struct Opt<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for Opt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => fmt::Display::fmt(v, f),
            None => f.write_str("None"),
        }
    }
}
