mod common;

use common::{seed_mario_kart, setup_test_db};
use game_reviews_lib::console::{execute, run_console, Command};
use game_reviews_lib::database::repository::{
    games_repository::GamesRepository, reviews_repository::ReviewsRepository,
};

async fn run_script(db: &sea_orm::DatabaseConnection, script: &str) -> String {
    let mut output = Vec::new();
    run_console(db, script.as_bytes(), &mut output).await.unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn game_command_shows_collection() {
    let db = setup_test_db().await;
    let mario_kart = seed_mario_kart(&db).await;

    let out = execute(&db, Command::Game(mario_kart.id)).await.unwrap();
    assert!(out.starts_with(&format!(
        "Game(id={}, title=Mario Kart, platform=Switch)",
        mario_kart.id
    )));
    assert!(out.contains("2 reviews, average score 9.0"), "{out}");
    assert!(out.contains("score=10"));
    assert!(out.contains("score=8"));
}

#[tokio::test]
async fn review_command_resolves_its_game() {
    let db = setup_test_db().await;
    let mario_kart = seed_mario_kart(&db).await;
    let review = &GamesRepository::find_reviews(&db, &mario_kart).await.unwrap()[0];

    let out = execute(&db, Command::Review(review.id)).await.unwrap();
    assert!(out.contains("comment=Wow, what a game"), "{out}");
    assert!(out.contains(&format!("game -> {}", mario_kart)), "{out}");
}

#[tokio::test]
async fn missing_records_are_reported_as_errors() {
    let db = setup_test_db().await;

    assert!(execute(&db, Command::Game(77)).await.is_err());
    assert!(execute(&db, Command::Review(77)).await.is_err());
    assert!(execute(&db, Command::DeleteGame(77)).await.is_err());
    assert!(
        execute(
            &db,
            Command::AddReview {
                game_id: 77,
                score: 3,
                comment: "nope".into()
            }
        )
        .await
        .is_err()
    );
}

#[tokio::test]
async fn scripted_session_edits_the_database() {
    let db = setup_test_db().await;

    let out = run_script(
        &db,
        "add-game Zelda|Adventure|Switch|70\n\
         add-review 1|9|Huge world\n\
         add-review 1|4|Weapons break\n\
         bogus\n\
         detach 1 2\n\
         count\n\
         quit\n\
         games\n",
    )
    .await;

    assert!(out.contains("已添加 Game(id=1, title=Zelda, platform=Switch)"), "{out}");
    assert!(out.contains("错误: 未知命令: bogus"), "{out}");
    assert!(out.contains("games=1, reviews=1"), "{out}");
    // quit 之后的命令不再执行
    assert_eq!(out.matches("Game(id=1").count(), 1, "{out}");

    assert_eq!(ReviewsRepository::count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn delete_game_reports_cascaded_reviews() {
    let db = setup_test_db().await;
    let mario_kart = seed_mario_kart(&db).await;

    let out = execute(&db, Command::DeleteGame(mario_kart.id)).await.unwrap();
    assert!(out.contains("级联删除 2 条评论"), "{out}");
    assert_eq!(GamesRepository::count(&db).await.unwrap(), 0);
    assert_eq!(ReviewsRepository::count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn log_level_command_adjusts_the_facade() {
    let db = setup_test_db().await;

    let out = execute(&db, Command::LogLevel(Some("Info".into()))).await.unwrap();
    assert_eq!(out, "log level: info");
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    let out = run_script(&db, "log-level trace\nlog-level loud\nlog-level\n").await;
    assert!(out.contains("log level: trace"), "{out}");
    assert!(out.contains("错误: 无效的日志级别: loud"), "{out}");
    assert_eq!(log::max_level(), log::LevelFilter::Trace);
}
