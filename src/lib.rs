pub mod cli;
pub mod console;
pub mod database;
pub mod entity;
pub mod seed;
pub mod utils;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use sea_orm::DatabaseConnection;

use cli::{Cli, Commands, MigrateCommand, OutputFormat};
use database::db;
use database::repository::games_repository::GamesRepository;
use database::*;
use seed::SeedOptions;
use utils::logs::{init_logging, parse_log_level};

/// 命令行入口：解析参数、初始化日志、连接数据库并执行子命令
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = parse_log_level(&cli.log_level).map_err(anyhow::Error::msg)?;
    init_logging(level);

    let runtime = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    runtime.block_on(run_command(cli))
}

fn resolve_db_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.database {
        Some(path) => Ok(path.clone()),
        None => reviews_path::get_db_path().map_err(anyhow::Error::msg),
    }
}

async fn run_command(cli: Cli) -> Result<()> {
    let db_path = resolve_db_path(&cli)?;
    let conn = db::establish_connection(&db_path)
        .await
        .with_context(|| format!("无法建立数据库连接: {}", db_path.display()))?;
    log::info!("数据库连接建立成功");

    let result = dispatch(&conn, &db_path, cli.format, cli.command).await;

    match db::close_connection(conn).await {
        Ok(_) => log::info!("数据库连接已成功关闭"),
        Err(e) => log::error!("关闭数据库连接时出错: {}", e),
    }
    result
}

async fn dispatch(
    conn: &DatabaseConnection,
    db_path: &Path,
    format: OutputFormat,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::Migrate(migrate) => run_migrate(conn, db_path, format, migrate).await,
        Commands::Seed {
            games,
            reviews_per_game,
            rng_seed,
        } => {
            ensure_migrated(conn).await?;
            let report = seed::seed(
                conn,
                SeedOptions {
                    games,
                    reviews_per_game,
                    rng_seed,
                },
            )
            .await
            .context("写入种子数据失败")?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => println!(
                    "Seeded {} games and {} reviews.",
                    report.games, report.reviews
                ),
            }
            Ok(())
        }
        Commands::List => {
            ensure_migrated(conn).await?;
            let games = GamesRepository::find_with_reviews(conn)
                .await
                .context("获取游戏列表失败")?;
            match format {
                OutputFormat::Json => {
                    let listing: Vec<GameWithReviews> = games
                        .into_iter()
                        .map(|(game, reviews)| GameWithReviews::from_loaded(game, reviews))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&listing)?);
                }
                OutputFormat::Text => {
                    for (game, reviews) in games {
                        println!("{}", game);
                        for review in reviews {
                            println!("  {}", review);
                        }
                    }
                }
            }
            Ok(())
        }
        Commands::Console => {
            ensure_migrated(conn).await?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            console::run_console(conn, stdin, tokio::io::stdout())
                .await
                .context("控制台读写失败")
        }
        Commands::Backup { dir } => {
            let dir = dir.unwrap_or_else(|| reviews_path::backup_dir_for(db_path));
            let result = db::backup_database(conn, &dir)
                .await
                .map_err(anyhow::Error::msg)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => {
                    println!("{}: {}", result.message, result.path.unwrap_or_default())
                }
            }
            Ok(())
        }
    }
}

async fn run_migrate(
    conn: &DatabaseConnection,
    db_path: &Path,
    format: OutputFormat,
    command: MigrateCommand,
) -> Result<()> {
    match command {
        MigrateCommand::Up { steps } => {
            log::info!("开始执行数据库迁移...");
            apply_migrations(conn, steps)
                .await
                .map_err(anyhow::Error::msg)?;
            log::info!("数据库迁移完成");
        }
        MigrateCommand::Down { steps } => {
            backup_before_migration(conn, db_path, "down").await;
            rollback_migrations(conn, Some(steps))
                .await
                .map_err(anyhow::Error::msg)?;
        }
        MigrateCommand::Fresh => {
            backup_before_migration(conn, db_path, "fresh").await;
            fresh_migrations(conn).await.map_err(anyhow::Error::msg)?;
        }
        MigrateCommand::Status => {}
    }

    let states = migration_status(conn).await.map_err(anyhow::Error::msg)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&states)?),
        OutputFormat::Text => {
            for state in states {
                let mark = if state.applied { "applied" } else { "pending" };
                println!("{:<8} {}", mark, state.name);
            }
        }
    }
    Ok(())
}

/// 读写数据前确保所有迁移已应用
async fn ensure_migrated(conn: &DatabaseConnection) -> Result<()> {
    apply_migrations(conn, None)
        .await
        .map_err(anyhow::Error::msg)
}
