pub use sea_orm_migration::prelude::*;

mod backup;
mod m20230801_000001_create_games_table;
mod m20230801_000002_create_reviews_table;

pub use backup::{backup_sqlite_at, path_to_sqlite_url};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230801_000001_create_games_table::Migration),
            Box::new(m20230801_000002_create_reviews_table::Migration),
        ]
    }
}

/// 外键命名约定：`fk_<表名>_<列名>_<被引用表名>`
///
/// 固定的命名让迁移在 up/down 与自动比对时能找到同一个约束。
pub fn fk_name(table: &str, column: &str, referred_table: &str) -> String {
    format!("fk_{}_{}_{}", table, column, referred_table)
}

/// 索引命名约定：`idx_<表名>_<列名>`
pub fn idx_name(table: &str, column: &str) -> String {
    format!("idx_{}_{}", table, column)
}
