//! 种子数据
//!
//! 清空两张表后写入随机生成的游戏与评论，整体在一个事务内完成。
//! 给定随机种子时结果可复现。

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::database::dto::{NewGame, NewReview};
use crate::database::repository::{
    games_repository::GamesRepository, reviews_repository::ReviewsRepository,
};

const GENRES: &[&str] = &[
    "action",
    "adventure",
    "strategy",
    "puzzle",
    "first-person shooter",
    "racing",
];

const PLATFORMS: &[&str] = &[
    "nintendo 64",
    "gamecube",
    "wii",
    "wii u",
    "switch",
    "playstation",
    "playstation 2",
    "playstation 3",
    "playstation 4",
    "playstation 5",
    "xbox",
    "xbox 360",
    "xbox one",
    "xbox series x",
    "pc",
];

const TITLE_ADJECTIVES: &[&str] = &[
    "Crimson", "Silent", "Endless", "Broken", "Golden", "Hidden", "Last", "Iron", "Frozen",
    "Wild", "Forgotten", "Neon",
];

const TITLE_NOUNS: &[&str] = &[
    "Kingdom", "Horizon", "Legacy", "Voyage", "Circuit", "Frontier", "Garden", "Empire",
    "Signal", "Harbor", "Dungeon", "Orbit",
];

const COMMENTS: &[&str] = &[
    "Wow, what a game",
    "A classic",
    "Could not put it down",
    "Fun with friends, dull alone",
    "Too short for the price",
    "The controls take some getting used to",
    "Gorgeous soundtrack",
    "Would not play again",
];

/// 种子选项
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeedOptions {
    pub games: u32,
    pub reviews_per_game: u32,
    /// 固定随机种子；None 时使用系统熵
    pub rng_seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            games: 50,
            reviews_per_game: 3,
            rng_seed: None,
        }
    }
}

/// 写入的数据量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub games: u64,
    pub reviews: u64,
}

fn random_game(rng: &mut StdRng) -> NewGame {
    let adjective = TITLE_ADJECTIVES.choose(rng).copied().unwrap_or("Untitled");
    let noun = TITLE_NOUNS.choose(rng).copied().unwrap_or("Game");
    let genre = GENRES.choose(rng).copied().unwrap_or("action");
    let platform = PLATFORMS.choose(rng).copied().unwrap_or("pc");
    let price = rng.gen_range(5..=70);

    NewGame::new(&format!("{} {}", adjective, noun), genre, platform, price)
}

fn random_review(rng: &mut StdRng, game_id: i32) -> NewReview {
    let score = rng.gen_range(0..=10);
    let comment = COMMENTS.choose(rng).copied().unwrap_or("");
    NewReview::new(game_id, score, comment)
}

/// 清空 games / reviews 并写入种子数据
///
/// 清空与写入在同一事务中完成，任一步失败时原有数据保持不变
pub async fn seed<C: ConnectionTrait + TransactionTrait>(
    db: &C,
    options: SeedOptions,
) -> Result<SeedReport, DbErr> {
    let mut rng = match options.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let txn = db.begin().await?;

    let cleared = GamesRepository::delete_all(&txn).await?;
    log::info!(
        "已清空旧数据: {} 个游戏, {} 条评论",
        cleared.games_deleted,
        cleared.reviews_deleted
    );

    let mut report = SeedReport::default();
    let mut pending_reviews = Vec::new();

    for _ in 0..options.games {
        let game = GamesRepository::insert(&txn, random_game(&mut rng)).await?;
        report.games += 1;

        for _ in 0..options.reviews_per_game {
            pending_reviews.push(random_review(&mut rng, game.id));
        }
    }

    report.reviews = ReviewsRepository::insert_many(&txn, pending_reviews).await?;
    txn.commit().await?;

    log::info!(
        "种子数据写入完成: {} 个游戏, {} 条评论",
        report.games,
        report.reviews
    );
    Ok(report)
}
