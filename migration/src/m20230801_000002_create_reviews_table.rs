//! 创建 reviews 表
//!
//! 每条评论通过 game_id 外键指向一个已存在的游戏：
//! 1. 外键按 `fk_reviews_game_id_games` 约定命名
//! 2. 删除游戏时级联删除其评论（ON DELETE CASCADE）
//! 3. 为 game_id 建索引，加速按游戏查询评论

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use crate::{fk_name, idx_name};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // SQLite 建表时会丢弃构建器里的外键名，这里直接写出带名约束
        conn.execute_unprepared(&format!(
            r#"CREATE TABLE IF NOT EXISTS "reviews" (
                "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
                "score" INTEGER NULL,
                "comment" TEXT NULL,
                "game_id" INTEGER NOT NULL,
                CONSTRAINT "{fk}" FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE ON UPDATE NO ACTION
            )"#,
            fk = fk_name("reviews", "game_id", "games"),
        ))
        .await?;

        manager
            .create_index(
                Index::create()
                    .name(idx_name("reviews", "game_id"))
                    .table(Reviews::Table)
                    .col(Reviews::GameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 索引随表一起删除
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    GameId,
}
