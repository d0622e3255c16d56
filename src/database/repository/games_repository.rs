//! 游戏数据仓库
//!
//! 游戏是关系中的"一"端：评论集合通过 `Related<reviews::Entity>` 加载，
//! 删除游戏时同一事务内一并删除其评论。

use crate::database::dto::{NewGame, UpdateGame};
use crate::entity::prelude::*;
use crate::entity::{games, reviews};
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// 级联删除结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeDeleteResult {
    pub games_deleted: u64,
    pub reviews_deleted: u64,
}

/// 游戏数据仓库
pub struct GamesRepository;

impl GamesRepository {
    // ==================== 游戏 CRUD 操作 ====================

    /// 插入游戏，返回带自增 ID 的模型
    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        game: NewGame,
    ) -> Result<games::Model, DbErr> {
        let game_active = games::ActiveModel {
            id: NotSet,
            title: Set(game.title),
            genre: Set(game.genre),
            platform: Set(game.platform),
            price: Set(game.price),
        };

        game_active.insert(db).await
    }

    /// 更新游戏数据
    ///
    /// 支持部分更新，未提供的字段保持不变
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
        updates: UpdateGame,
    ) -> Result<games::Model, DbErr> {
        let game_active = games::ActiveModel {
            id: Unchanged(game_id),
            title: updates.title.map_or(NotSet, Set),
            genre: updates.genre.map_or(NotSet, Set),
            platform: updates.platform.map_or(NotSet, Set),
            price: updates.price.map_or(NotSet, Set),
        };

        game_active.update(db).await
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 查询游戏
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<games::Model>, DbErr> {
        Games::find_by_id(id).one(db).await
    }

    /// 根据标题查询游戏
    pub async fn find_by_title<C: ConnectionTrait>(
        db: &C,
        title: &str,
    ) -> Result<Vec<games::Model>, DbErr> {
        Games::find()
            .filter(games::Column::Title.eq(title))
            .order_by_asc(games::Column::Id)
            .all(db)
            .await
    }

    /// 获取所有游戏（按 ID 升序）
    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<games::Model>, DbErr> {
        Games::find().order_by_asc(games::Column::Id).all(db).await
    }

    /// 获取游戏总数
    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
        Games::find().count(db).await
    }

    /// 游戏的评论集合（按评论 ID 升序，即创建顺序）
    pub async fn find_reviews<C: ConnectionTrait>(
        db: &C,
        game: &games::Model,
    ) -> Result<Vec<reviews::Model>, DbErr> {
        game.find_related(Reviews)
            .order_by_asc(reviews::Column::Id)
            .all(db)
            .await
    }

    /// 所有游戏连同各自的评论集合
    ///
    /// 没有评论的游戏也会出现，集合为空
    pub async fn find_with_reviews<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<(games::Model, Vec<reviews::Model>)>, DbErr> {
        Games::find()
            .find_with_related(Reviews)
            .order_by_asc(games::Column::Id)
            .order_by_asc(reviews::Column::Id)
            .all(db)
            .await
    }

    // ==================== 删除操作 ====================

    /// 删除游戏及其所有评论
    ///
    /// 外键本身带 ON DELETE CASCADE，这里仍在事务内显式删除评论，
    /// 以便返回被级联删除的评论数量。
    pub async fn delete<C: ConnectionTrait + TransactionTrait>(
        db: &C,
        id: i32,
    ) -> Result<CascadeDeleteResult, DbErr> {
        let txn = db.begin().await?;

        let reviews_deleted = Reviews::delete_many()
            .filter(reviews::Column::GameId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        let games_deleted = Games::delete_by_id(id).exec(&txn).await?.rows_affected;

        txn.commit().await?;

        log::debug!(
            "删除游戏 {}: {} 个游戏, {} 条评论",
            id,
            games_deleted,
            reviews_deleted
        );
        Ok(CascadeDeleteResult {
            games_deleted,
            reviews_deleted,
        })
    }

    /// 按标题删除游戏（可能有多个同名游戏），同样级联删除评论
    pub async fn delete_by_title<C: ConnectionTrait + TransactionTrait>(
        db: &C,
        title: &str,
    ) -> Result<CascadeDeleteResult, DbErr> {
        let mut total = CascadeDeleteResult::default();
        for game in Self::find_by_title(db, title).await? {
            let result = Self::delete(db, game.id).await?;
            total.games_deleted += result.games_deleted;
            total.reviews_deleted += result.reviews_deleted;
        }
        Ok(total)
    }

    /// 清空游戏表（评论随外键级联删除）
    pub async fn delete_all<C: ConnectionTrait + TransactionTrait>(
        db: &C,
    ) -> Result<CascadeDeleteResult, DbErr> {
        let txn = db.begin().await?;
        let reviews_deleted = Reviews::delete_many().exec(&txn).await?.rows_affected;
        let games_deleted = Games::delete_many().exec(&txn).await?.rows_affected;
        txn.commit().await?;

        Ok(CascadeDeleteResult {
            games_deleted,
            reviews_deleted,
        })
    }
}
