use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, RuntimeErr};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 数据库备份结果
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupResult {
    pub success: bool,
    pub path: Option<String>,
    pub message: String,
}

// ==================== 数据库连接管理 ====================

/// 打开（必要时创建）指定路径的 SQLite 数据库
pub async fn establish_connection(db_path: &Path) -> Result<DatabaseConnection, DbErr> {
    // 1. 如果数据库不存在，创建目录
    if !db_path.exists() {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DbErr::Conn(RuntimeErr::Internal(format!("无法创建数据库目录: {}", e)))
            })?;
        }
        log::info!("首次启动，创建数据库: {}", db_path.display());
    } else {
        log::info!("使用数据库: {}", db_path.display());
    }

    // 2. 由 migration 的 path_to_sqlite_url 构建连接字符串（需要绝对路径）
    let absolute = std::path::absolute(db_path).map_err(|e| {
        DbErr::Conn(RuntimeErr::Internal(format!(
            "Invalid database path {}: {}",
            db_path.display(),
            e
        )))
    })?;
    let connection_string = migration::path_to_sqlite_url(&absolute)?;

    connect(&connection_string).await
}

/// 打开一个仅存在于内存中的数据库，连接关闭后数据即消失
pub async fn connect_in_memory() -> Result<DatabaseConnection, DbErr> {
    connect("sqlite::memory:").await
}

/// 按连接字符串建立连接并打开外键约束
pub async fn connect(connection_string: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(connection_string.to_owned());
    options
        .max_connections(1) // 本地 SQLite 单连接即可，内存库也必须共享同一连接
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    log::debug!("Database connection string: {}", options.get_url());

    let conn = Database::connect(options).await?;

    // SQLite 默认不检查外键，级联删除依赖此开关
    conn.execute_unprepared("PRAGMA foreign_keys = ON").await?;

    Ok(conn)
}

/// 关闭数据库连接
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}

// ==================== 数据库备份 ====================

/// 生成带时间戳的备份文件名
fn generate_backup_filename() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f").to_string();
    format!("game_reviews_{}.db", timestamp)
}

/// 使用 VACUUM INTO 进行数据库热备份
///
/// VACUUM INTO 可以在连接打开时创建一个优化后的副本，原数据库不受影响。
///
/// # Arguments
///
/// * `db` - 当前数据库连接
/// * `backup_dir` - 备份目标目录，不存在时自动创建
pub async fn backup_database(
    db: &DatabaseConnection,
    backup_dir: &Path,
) -> Result<BackupResult, String> {
    if !backup_dir.exists() {
        fs::create_dir_all(backup_dir).map_err(|e| format!("无法创建备份目录: {}", e))?;
    }

    let target_path = backup_dir.join(generate_backup_filename());

    // SQLite 在 Windows 上也支持正斜杠，使用正斜杠可以避免转义问题
    let target_path_str = target_path
        .to_str()
        .ok_or("备份路径包含无效字符")?
        .replace('\\', "/");

    // 只需要转义单引号
    let escaped_path = target_path_str.replace('\'', "''");
    let vacuum_sql = format!("VACUUM INTO '{}'", escaped_path);

    db.execute_unprepared(&vacuum_sql)
        .await
        .map_err(|e| format!("VACUUM INTO 备份失败: {}", e))?;

    log::info!("数据库热备份成功: {}", target_path_str);

    Ok(BackupResult {
        success: true,
        path: Some(target_path_str),
        message: "数据库备份成功".to_string(),
    })
}
