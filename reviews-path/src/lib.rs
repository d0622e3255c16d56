use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 数据库相关路径常量
pub const DB_DATA_DIR: &str = "data";
pub const DB_FILE_NAME: &str = "game_reviews.db";
pub const DB_BACKUP_SUBDIR: &str = "backups";
pub const RESOURCE_DIR: &str = "resources";

/// 覆盖数据库文件路径的环境变量
pub const DB_PATH_ENV: &str = "GAME_REVIEWS_DB";

/// 判断是否处于便携模式
///
/// 检测逻辑：检查可执行文件同级目录下是否存在 resources/data/game_reviews.db
pub fn is_portable_mode() -> bool {
    exe_dir().is_some_and(|dir| portable_db_file(&dir).exists())
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

fn portable_db_file(exe_dir: &Path) -> PathBuf {
    exe_dir
        .join(RESOURCE_DIR)
        .join(DB_DATA_DIR)
        .join(DB_FILE_NAME)
}

/// 获取基础数据目录
pub fn get_base_data_dir() -> Result<PathBuf, String> {
    if is_portable_mode() {
        // 便携模式：使用可执行文件所在目录的 resources 子目录
        let dir = exe_dir().ok_or_else(|| "无法获取可执行文件父目录".to_string())?;
        Ok(dir.join(RESOURCE_DIR))
    } else {
        get_system_data_dir()
    }
}

/// 获取系统数据目录（跨平台）
fn get_system_data_dir() -> Result<PathBuf, String> {
    use directories::BaseDirs;

    let base_dirs = BaseDirs::new().ok_or_else(|| "无法获取系统目录信息".to_string())?;

    #[cfg(any(target_os = "windows", target_os = "macos"))]
    {
        Ok(base_dirs.data_dir().join("dev.game-reviews"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Ok(base_dirs.data_dir().join("game-reviews"))
    }
}

/// 从环境变量值解析数据库路径，空字符串视为未设置
pub fn db_path_from_env(value: Option<OsString>) -> Option<PathBuf> {
    value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// 获取数据库文件路径
///
/// 优先级：`GAME_REVIEWS_DB` 环境变量 > 便携模式 > 系统数据目录
pub fn get_db_path() -> Result<PathBuf, String> {
    if let Some(path) = db_path_from_env(std::env::var_os(DB_PATH_ENV)) {
        return Ok(path);
    }
    Ok(get_base_data_dir()?.join(DB_DATA_DIR).join(DB_FILE_NAME))
}

/// 获取数据库备份目录：与数据库文件同级的 backups/ 子目录
pub fn backup_dir_for(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .map(|p| p.join(DB_BACKUP_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(DB_BACKUP_SUBDIR))
}
