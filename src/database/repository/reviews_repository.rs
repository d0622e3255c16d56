//! 评论数据仓库
//!
//! 评论是关系中的"多"端：创建时必须指向已存在的游戏，
//! 从游戏的评论集合中移除即删除该评论（孤儿删除）。

use crate::database::dto::{NewReview, UpdateReview};
use crate::entity::prelude::*;
use crate::entity::{games, reviews};
use sea_orm::*;

/// 单条 INSERT 语句最多写入的评论数
///
/// 每行绑定 3 个参数，需低于旧版 SQLite 的 999 个变量上限
pub const INSERT_CHUNK_SIZE: usize = 300;

/// 评论数据仓库
pub struct ReviewsRepository;

impl ReviewsRepository {
    // ==================== 评论 CRUD 操作 ====================

    /// 插入评论
    ///
    /// 游戏不存在时返回 `DbErr::RecordNotFound`，不会写入任何数据
    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        review: NewReview,
    ) -> Result<reviews::Model, DbErr> {
        Self::ensure_game_exists(db, review.game_id).await?;

        let review_active = reviews::ActiveModel {
            id: NotSet,
            score: Set(review.score),
            comment: Set(review.comment),
            game_id: Set(review.game_id),
        };

        review_active.insert(db).await
    }

    /// 批量插入评论
    ///
    /// 按 [`INSERT_CHUNK_SIZE`] 分批写入，全部批次在同一事务中执行，
    /// 任意一条的外键不成立则全部回滚。传入事务时以保存点嵌套。
    pub async fn insert_many<C: ConnectionTrait + TransactionTrait>(
        db: &C,
        new_reviews: Vec<NewReview>,
    ) -> Result<u64, DbErr> {
        if new_reviews.is_empty() {
            return Ok(0);
        }

        let txn = db.begin().await?;
        for chunk in new_reviews.chunks(INSERT_CHUNK_SIZE) {
            let models = chunk.iter().map(|r| reviews::ActiveModel {
                id: NotSet,
                score: Set(r.score),
                comment: Set(r.comment.clone()),
                game_id: Set(r.game_id),
            });
            Reviews::insert_many(models).exec(&txn).await?;
        }
        txn.commit().await?;

        log::debug!("批量插入 {} 条评论", new_reviews.len());
        Ok(new_reviews.len() as u64)
    }

    /// 更新评论
    ///
    /// 提供 `game_id` 时把评论移到另一个游戏下，目标游戏必须存在
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        review_id: i32,
        updates: UpdateReview,
    ) -> Result<reviews::Model, DbErr> {
        if let Some(game_id) = updates.game_id {
            Self::ensure_game_exists(db, game_id).await?;
        }

        let review_active = reviews::ActiveModel {
            id: Unchanged(review_id),
            score: updates.score.map_or(NotSet, Set),
            comment: updates.comment.map_or(NotSet, Set),
            game_id: updates.game_id.map_or(NotSet, Set),
        };

        review_active.update(db).await
    }

    /// 删除评论
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<DeleteResult, DbErr> {
        Reviews::delete_by_id(id).exec(db).await
    }

    /// 从游戏的评论集合中移除评论
    ///
    /// 评论不能脱离游戏存在，移除即删除。评论不属于该游戏时不做任何事，返回 0。
    pub async fn remove_from_game<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
        review_id: i32,
    ) -> Result<u64, DbErr> {
        let result = Reviews::delete_many()
            .filter(reviews::Column::Id.eq(review_id))
            .filter(reviews::Column::GameId.eq(game_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 查询评论
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<reviews::Model>, DbErr> {
        Reviews::find_by_id(id).one(db).await
    }

    /// 查询评论及其所属游戏
    pub async fn find_with_game<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<(reviews::Model, Option<games::Model>)>, DbErr> {
        Reviews::find_by_id(id).find_also_related(Games).one(db).await
    }

    /// 评论所属的游戏
    pub async fn find_game<C: ConnectionTrait>(
        db: &C,
        review: &reviews::Model,
    ) -> Result<Option<games::Model>, DbErr> {
        review.find_related(Games).one(db).await
    }

    /// 指定游戏的所有评论（按 ID 升序）
    pub async fn find_by_game<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
    ) -> Result<Vec<reviews::Model>, DbErr> {
        Reviews::find()
            .filter(reviews::Column::GameId.eq(game_id))
            .order_by_asc(reviews::Column::Id)
            .all(db)
            .await
    }

    /// 评论总数
    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
        Reviews::find().count(db).await
    }

    /// 指定游戏的评论数
    pub async fn count_by_game<C: ConnectionTrait>(db: &C, game_id: i32) -> Result<u64, DbErr> {
        Reviews::find()
            .filter(reviews::Column::GameId.eq(game_id))
            .count(db)
            .await
    }

    /// 指定游戏的平均分，没有打分的评论不计入；没有评分时返回 None
    pub async fn average_score<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
    ) -> Result<Option<f64>, DbErr> {
        let scores: Vec<i32> = Reviews::find()
            .select_only()
            .column(reviews::Column::Score)
            .filter(reviews::Column::GameId.eq(game_id))
            .filter(reviews::Column::Score.is_not_null())
            .into_tuple()
            .all(db)
            .await?;

        if scores.is_empty() {
            return Ok(None);
        }
        let sum: i64 = scores.iter().map(|&s| i64::from(s)).sum();
        Ok(Some(sum as f64 / scores.len() as f64))
    }

    // ==================== 私有方法 ====================

    async fn ensure_game_exists<C: ConnectionTrait>(db: &C, game_id: i32) -> Result<(), DbErr> {
        let exists = Games::find_by_id(game_id).count(db).await? > 0;
        if exists {
            Ok(())
        } else {
            Err(DbErr::RecordNotFound(format!("Game {} not found", game_id)))
        }
    }
}
