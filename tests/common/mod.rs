#![allow(dead_code)]

use game_reviews_lib::database::db::connect_in_memory;
use game_reviews_lib::database::dto::{NewGame, NewReview};
use game_reviews_lib::database::repository::{
    games_repository::GamesRepository, reviews_repository::ReviewsRepository,
};
use game_reviews_lib::entity::games;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

/// 已应用全部迁移的内存数据库
pub async fn setup_test_db() -> DatabaseConnection {
    let db = connect_in_memory()
        .await
        .expect("Failed to create test database");
    Migrator::up(&db, None)
        .await
        .expect("Migration should succeed");
    db
}

/// Mario Kart 以及两条评论（10 分、8 分）
pub async fn seed_mario_kart(db: &DatabaseConnection) -> games::Model {
    let mario_kart = GamesRepository::insert(db, NewGame::new("Mario Kart", "Racing", "Switch", 60))
        .await
        .unwrap();

    ReviewsRepository::insert_many(
        db,
        vec![
            NewReview::new(mario_kart.id, 10, "Wow, what a game"),
            NewReview::new(mario_kart.id, 8, "A classic"),
        ],
    )
    .await
    .unwrap();

    mario_kart
}
