mod common;

use common::setup_test_db;
use game_reviews_lib::database::dto::{NewGame, NewReview, UpdateReview};
use game_reviews_lib::database::repository::{
    games_repository::GamesRepository, reviews_repository::ReviewsRepository,
};
use game_reviews_lib::entity::{games, reviews};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, NotSet, Set};

async fn seed_skyrim(db: &DatabaseConnection) -> (games::Model, reviews::Model) {
    let skyrim = GamesRepository::insert(
        db,
        NewGame::new("The Elder Scrolls V: Skyrim", "Adventure", "PC", 20),
    )
    .await
    .unwrap();
    let review = ReviewsRepository::insert(db, NewReview::new(skyrim.id, 10, "Wow, what a game"))
        .await
        .unwrap();
    (skyrim, review)
}

#[tokio::test]
async fn review_has_correct_attributes() {
    let db = setup_test_db().await;
    let (skyrim, review) = seed_skyrim(&db).await;

    assert!(review.id > 0);
    assert_eq!(review.score, Some(10));
    assert_eq!(review.comment.as_deref(), Some("Wow, what a game"));
    assert_eq!(review.game_id, skyrim.id);
}

#[tokio::test]
async fn knows_about_associated_game() {
    let db = setup_test_db().await;
    let (skyrim, review) = seed_skyrim(&db).await;

    let game = ReviewsRepository::find_game(&db, &review).await.unwrap();
    assert_eq!(game, Some(skyrim.clone()));

    let (found, game) = ReviewsRepository::find_with_game(&db, review.id)
        .await
        .unwrap()
        .expect("review exists");
    assert_eq!(found, review);
    assert_eq!(game, Some(skyrim));
}

#[tokio::test]
async fn review_for_missing_game_is_rejected() {
    let db = setup_test_db().await;

    let err = ReviewsRepository::insert(&db, NewReview::new(999, 5, "ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbErr::RecordNotFound(_)), "{err:?}");
    assert_eq!(ReviewsRepository::count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn foreign_key_rejects_orphan_rows() {
    let db = setup_test_db().await;

    // 绕过仓库的存在性检查，由外键约束拒绝
    let orphan = reviews::ActiveModel {
        id: NotSet,
        score: Set(Some(1)),
        comment: Set(Some("orphan".to_string())),
        game_id: Set(12345),
    };
    assert!(orphan.insert(&db).await.is_err());
}

#[tokio::test]
async fn bulk_insert_is_all_or_nothing() {
    let db = setup_test_db().await;
    let (skyrim, _) = seed_skyrim(&db).await;

    let result = ReviewsRepository::insert_many(
        &db,
        vec![
            NewReview::new(skyrim.id, 7, "Dragons"),
            NewReview::new(skyrim.id + 100, 3, "Nowhere"),
        ],
    )
    .await;
    assert!(result.is_err());
    assert_eq!(ReviewsRepository::count(&db).await.unwrap(), 1);

    assert_eq!(ReviewsRepository::insert_many(&db, Vec::new()).await.unwrap(), 0);
}

#[tokio::test]
async fn removing_from_collection_deletes_the_review() {
    let db = setup_test_db().await;
    let (skyrim, review) = seed_skyrim(&db).await;
    let other = GamesRepository::insert(&db, NewGame::new("Portal", "Puzzle", "PC", 10))
        .await
        .unwrap();

    // 不属于该游戏的评论不会被删除
    assert_eq!(
        ReviewsRepository::remove_from_game(&db, other.id, review.id).await.unwrap(),
        0
    );
    assert!(ReviewsRepository::find_by_id(&db, review.id).await.unwrap().is_some());

    assert_eq!(
        ReviewsRepository::remove_from_game(&db, skyrim.id, review.id).await.unwrap(),
        1
    );
    assert!(ReviewsRepository::find_by_id(&db, review.id).await.unwrap().is_none());
    // 游戏本身保留
    assert!(GamesRepository::find_by_id(&db, skyrim.id).await.unwrap().is_some());
}

#[tokio::test]
async fn review_can_move_to_another_game() {
    let db = setup_test_db().await;
    let (skyrim, review) = seed_skyrim(&db).await;
    let oblivion = GamesRepository::insert(
        &db,
        NewGame::new("The Elder Scrolls IV: Oblivion", "Adventure", "PC", 15),
    )
    .await
    .unwrap();

    let moved = ReviewsRepository::update(
        &db,
        review.id,
        UpdateReview {
            game_id: Some(oblivion.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(moved.game_id, oblivion.id);
    assert_eq!(moved.score, Some(10));

    assert!(GamesRepository::find_reviews(&db, &skyrim).await.unwrap().is_empty());
    assert_eq!(GamesRepository::find_reviews(&db, &oblivion).await.unwrap().len(), 1);

    let err = ReviewsRepository::update(
        &db,
        review.id,
        UpdateReview {
            game_id: Some(4242),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DbErr::RecordNotFound(_)));
}

#[tokio::test]
async fn average_score_ignores_unscored_reviews() {
    let db = setup_test_db().await;
    let (skyrim, _) = seed_skyrim(&db).await;

    ReviewsRepository::insert(&db, NewReview::new(skyrim.id, 7, "Buggy but great"))
        .await
        .unwrap();
    ReviewsRepository::insert(
        &db,
        NewReview {
            score: None,
            comment: Some("No score".to_string()),
            game_id: skyrim.id,
        },
    )
    .await
    .unwrap();

    let avg = ReviewsRepository::average_score(&db, skyrim.id).await.unwrap();
    assert_eq!(avg, Some(8.5));

    let portal = GamesRepository::insert(&db, NewGame::new("Portal", "Puzzle", "PC", 10))
        .await
        .unwrap();
    assert_eq!(ReviewsRepository::average_score(&db, portal.id).await.unwrap(), None);
}

#[tokio::test]
async fn deleting_a_review_keeps_its_game() {
    let db = setup_test_db().await;
    let (skyrim, review) = seed_skyrim(&db).await;

    let result = ReviewsRepository::delete(&db, review.id).await.unwrap();
    assert_eq!(result.rows_affected, 1);
    assert!(GamesRepository::find_reviews(&db, &skyrim).await.unwrap().is_empty());
    assert_eq!(GamesRepository::count(&db).await.unwrap(), 1);
}
