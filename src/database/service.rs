use std::path::{Path, PathBuf};

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::database::dto::{NewGame, NewReview};
use crate::database::repository::{
    games_repository::{CascadeDeleteResult, GamesRepository},
    reviews_repository::ReviewsRepository,
};
use crate::entity::{games, reviews};

// ==================== 组合类型 ====================

/// 游戏及其评论集合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameWithReviews {
    pub game: games::Model,
    pub reviews: Vec<reviews::Model>,
    pub average_score: Option<f64>,
}

impl GameWithReviews {
    /// 由已加载的评论集合计算平均分，未打分的评论不计入
    pub fn from_loaded(game: games::Model, reviews: Vec<reviews::Model>) -> Self {
        let scores: Vec<i32> = reviews.iter().filter_map(|r| r.score).collect();
        let average_score = (!scores.is_empty())
            .then(|| scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64);
        Self {
            game,
            reviews,
            average_score,
        }
    }
}

/// 评论及其所属游戏
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewWithGame {
    pub review: reviews::Model,
    pub game: Option<games::Model>,
}

/// 单个迁移的状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

// ==================== 游戏数据相关 ====================

/// 插入游戏
pub async fn insert_game(db: &DatabaseConnection, game: NewGame) -> Result<games::Model, String> {
    GamesRepository::insert(db, game)
        .await
        .map_err(|e| format!("插入游戏数据失败: {}", e))
}

/// 根据 ID 查询游戏
pub async fn find_game_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<games::Model>, String> {
    GamesRepository::find_by_id(db, id)
        .await
        .map_err(|e| format!("查询游戏数据失败: {}", e))
}

/// 获取所有游戏
pub async fn find_all_games(db: &DatabaseConnection) -> Result<Vec<games::Model>, String> {
    GamesRepository::find_all(db)
        .await
        .map_err(|e| format!("获取游戏列表失败: {}", e))
}

/// 查询游戏及其评论集合
pub async fn find_game_with_reviews(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<GameWithReviews>, String> {
    let Some(game) = find_game_by_id(db, id).await? else {
        return Ok(None);
    };
    let reviews = GamesRepository::find_reviews(db, &game)
        .await
        .map_err(|e| format!("获取游戏评论失败: {}", e))?;
    let average_score = ReviewsRepository::average_score(db, id)
        .await
        .map_err(|e| format!("计算平均分失败: {}", e))?;

    Ok(Some(GameWithReviews {
        game,
        reviews,
        average_score,
    }))
}

/// 删除游戏（级联删除评论）
pub async fn delete_game(
    db: &DatabaseConnection,
    id: i32,
) -> Result<CascadeDeleteResult, String> {
    GamesRepository::delete(db, id)
        .await
        .map_err(|e| format!("删除游戏失败: {}", e))
}

/// 获取游戏总数
pub async fn count_games(db: &DatabaseConnection) -> Result<u64, String> {
    GamesRepository::count(db)
        .await
        .map_err(|e| format!("获取游戏总数失败: {}", e))
}

// ==================== 评论数据相关 ====================

/// 为已存在的游戏添加评论
pub async fn insert_review(
    db: &DatabaseConnection,
    review: NewReview,
) -> Result<reviews::Model, String> {
    ReviewsRepository::insert(db, review)
        .await
        .map_err(|e| format!("插入评论失败: {}", e))
}

/// 查询评论及其所属游戏
pub async fn find_review_with_game(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<ReviewWithGame>, String> {
    ReviewsRepository::find_with_game(db, id)
        .await
        .map(|found| found.map(|(review, game)| ReviewWithGame { review, game }))
        .map_err(|e| format!("查询评论失败: {}", e))
}

/// 从游戏的评论集合中移除评论（即删除）
pub async fn remove_review_from_game(
    db: &DatabaseConnection,
    game_id: i32,
    review_id: i32,
) -> Result<u64, String> {
    ReviewsRepository::remove_from_game(db, game_id, review_id)
        .await
        .map_err(|e| format!("移除评论失败: {}", e))
}

/// 获取评论总数
pub async fn count_reviews(db: &DatabaseConnection) -> Result<u64, String> {
    ReviewsRepository::count(db)
        .await
        .map_err(|e| format!("获取评论总数失败: {}", e))
}

// ==================== 数据库迁移相关 ====================

/// 应用待执行的迁移，`steps` 为 None 时全部应用
pub async fn apply_migrations(db: &DatabaseConnection, steps: Option<u32>) -> Result<(), String> {
    Migrator::up(db, steps)
        .await
        .map_err(|e| format!("数据库迁移失败: {}", e))
}

/// 回滚迁移，`steps` 为 None 时全部回滚
pub async fn rollback_migrations(
    db: &DatabaseConnection,
    steps: Option<u32>,
) -> Result<(), String> {
    Migrator::down(db, steps)
        .await
        .map_err(|e| format!("回滚迁移失败: {}", e))
}

/// 破坏性迁移（回滚、重建）前备份数据库文件
///
/// 返回备份路径；文件不存在或备份失败时返回 None，失败只记录警告，迁移照常执行
pub async fn backup_before_migration(
    db: &DatabaseConnection,
    db_path: &Path,
    label: &str,
) -> Option<PathBuf> {
    // WAL 模式下先把日志写回主文件，拷贝才包含最近的写入
    if let Err(e) = db.execute_unprepared("PRAGMA wal_checkpoint(TRUNCATE)").await {
        log::warn!("备份前检查点失败: {}", e);
    }

    match migration::backup_sqlite_at(db_path, label) {
        Ok(Some(path)) => {
            log::info!("迁移前已备份数据库: {}", path.display());
            Some(path)
        }
        Ok(None) => None,
        Err(e) => {
            log::warn!("迁移前备份失败（继续执行）: {}", e);
            None
        }
    }
}

/// 删除所有表后重新应用全部迁移
pub async fn fresh_migrations(db: &DatabaseConnection) -> Result<(), String> {
    Migrator::fresh(db)
        .await
        .map_err(|e| format!("重建数据库失败: {}", e))
}

/// 列出所有迁移及其是否已应用
pub async fn migration_status(db: &DatabaseConnection) -> Result<Vec<MigrationState>, String> {
    let applied: Vec<String> = Migrator::get_applied_migrations(db)
        .await
        .map_err(|e| format!("读取迁移状态失败: {}", e))?
        .iter()
        .map(|m| m.name().to_string())
        .collect();

    Ok(Migrator::migrations()
        .iter()
        .map(|m| {
            let name = m.name().to_string();
            MigrationState {
                applied: applied.contains(&name),
                name,
            }
        })
        .collect())
}
