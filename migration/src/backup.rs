use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use reviews_path::backup_dir_for;
use sea_orm_migration::sea_orm::DbErr;

/// 备份 SQLite 数据库文件（回滚、重建等破坏性迁移之前调用）。
///
/// 备份到数据库所在目录的 `backups/` 子目录。
/// 数据库文件尚不存在时没有可备份的内容，返回 `Ok(None)`。
pub fn backup_sqlite_at(db_path: &Path, label: &str) -> Result<Option<PathBuf>, DbErr> {
    if !db_path.exists() {
        log::debug!("数据库文件不存在，跳过备份: {}", db_path.display());
        return Ok(None);
    }

    let target_dir = backup_dir_for(db_path);
    fs::create_dir_all(&target_dir)
        .map_err(|e| DbErr::Custom(format!("Failed to create backup dir: {}", e)))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = target_dir.join(format!("game_reviews_{}_{}.db", label, timestamp));

    fs::copy(db_path, &backup_path)
        .map_err(|e| DbErr::Custom(format!("Failed to copy database: {}", e)))?;

    log::info!("数据库已备份到: {}", backup_path.display());
    Ok(Some(backup_path))
}

/// 将文件路径转换为 sqlite 连接 URL
pub fn path_to_sqlite_url(path: &Path) -> Result<String, DbErr> {
    let db_url = url::Url::from_file_path(path)
        .map_err(|_| DbErr::Custom("Invalid database path".to_string()))?;
    Ok(format!("sqlite:{}?mode=rwc", db_url.path()))
}
