//! 交互式调试控制台
//!
//! 逐行读取命令，直接在当前数据库上查看、增删游戏与评论。
//! 命令执行失败只打印错误，不会退出循环。

use std::fmt::Write as _;

use sea_orm::DatabaseConnection;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::database::dto::{NewGame, NewReview};
use crate::database::service;
use crate::utils::logs::{get_log_level, set_log_level};

const PROMPT: &str = "reviews> ";

const HELP: &str = "\
可用命令:
  games                                       列出所有游戏
  game <id>                                   查看游戏及其评论
  reviews <game_id>                           列出游戏的评论
  review <id>                                 查看评论及其所属游戏
  add-game <title>|<genre>|<platform>|<price> 添加游戏
  add-review <game_id>|<score>|<comment>      为游戏添加评论
  detach <game_id> <review_id>                从游戏中移除评论（评论被删除）
  delete-game <id>                            删除游戏及其评论
  count                                       统计游戏与评论数量
  log-level [level]                           查看或设置日志级别（error/warn/info/debug/trace/off）
  help                                        显示本帮助
  quit | exit                                 退出";

/// 控制台命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Games,
    Game(i32),
    Reviews(i32),
    Review(i32),
    AddGame {
        title: String,
        genre: String,
        platform: String,
        price: i32,
    },
    AddReview {
        game_id: i32,
        score: i32,
        comment: String,
    },
    Detach {
        game_id: i32,
        review_id: i32,
    },
    DeleteGame(i32),
    Count,
    /// 无参数时查看当前级别
    LogLevel(Option<String>),
    Quit,
}

fn parse_id(arg: &str, what: &str) -> Result<i32, String> {
    arg.trim()
        .parse::<i32>()
        .map_err(|_| format!("无效的{}: {:?}", what, arg.trim()))
}

/// 拆分 `a|b|c` 形式的参数，要求恰好 `n` 段
fn split_fields(rest: &str, n: usize, usage: &str) -> Result<Vec<String>, String> {
    let fields: Vec<String> = rest.split('|').map(|f| f.trim().to_string()).collect();
    if fields.len() != n {
        return Err(format!("用法: {}", usage));
    }
    Ok(fields)
}

impl Command {
    /// 解析一行输入，空行返回 `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map(|(n, r)| (n, r.trim()))
            .unwrap_or((line, ""));

        let command = match name {
            "help" | "?" => Command::Help,
            "games" => Command::Games,
            "game" => Command::Game(parse_id(rest, "游戏 ID")?),
            "reviews" => Command::Reviews(parse_id(rest, "游戏 ID")?),
            "review" => Command::Review(parse_id(rest, "评论 ID")?),
            "add-game" => {
                let f = split_fields(rest, 4, "add-game <title>|<genre>|<platform>|<price>")?;
                Command::AddGame {
                    title: f[0].clone(),
                    genre: f[1].clone(),
                    platform: f[2].clone(),
                    price: parse_id(&f[3], "价格")?,
                }
            }
            "add-review" => {
                let f = split_fields(rest, 3, "add-review <game_id>|<score>|<comment>")?;
                Command::AddReview {
                    game_id: parse_id(&f[0], "游戏 ID")?,
                    score: parse_id(&f[1], "评分")?,
                    comment: f[2].clone(),
                }
            }
            "detach" => {
                let mut args = rest.split_whitespace();
                match (args.next(), args.next(), args.next()) {
                    (Some(g), Some(r), None) => Command::Detach {
                        game_id: parse_id(g, "游戏 ID")?,
                        review_id: parse_id(r, "评论 ID")?,
                    },
                    _ => return Err("用法: detach <game_id> <review_id>".to_string()),
                }
            }
            "delete-game" => Command::DeleteGame(parse_id(rest, "游戏 ID")?),
            "count" => Command::Count,
            "log-level" => match rest {
                "" => Command::LogLevel(None),
                level if !level.contains(char::is_whitespace) => {
                    Command::LogLevel(Some(level.to_string()))
                }
                _ => return Err("用法: log-level [level]".to_string()),
            },
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("未知命令: {}，输入 help 查看帮助", other)),
        };
        Ok(Some(command))
    }
}

/// 执行命令并返回要输出的文本
pub async fn execute(db: &DatabaseConnection, command: Command) -> Result<String, String> {
    let mut out = String::new();
    match command {
        Command::Help => out.push_str(HELP),
        Command::Games => {
            let games = service::find_all_games(db).await?;
            if games.is_empty() {
                out.push_str("(没有游戏)");
            }
            for game in games {
                let _ = writeln!(out, "{}", game);
            }
        }
        Command::Game(id) => match service::find_game_with_reviews(db, id).await? {
            Some(detail) => {
                let _ = writeln!(out, "{}", detail.game);
                let _ = writeln!(
                    out,
                    "  genre={}, price={}",
                    detail.game.genre.as_deref().unwrap_or("None"),
                    detail
                        .game
                        .price
                        .map_or_else(|| "None".to_string(), |p| p.to_string())
                );
                match detail.average_score {
                    Some(avg) => {
                        let _ = writeln!(out, "  {} reviews, average score {:.1}", detail.reviews.len(), avg);
                    }
                    None => {
                        let _ = writeln!(out, "  {} reviews", detail.reviews.len());
                    }
                }
                for review in detail.reviews {
                    let _ = writeln!(out, "  {}", review);
                }
            }
            None => return Err(format!("游戏 {} 不存在", id)),
        },
        Command::Reviews(game_id) => match service::find_game_with_reviews(db, game_id).await? {
            Some(detail) => {
                if detail.reviews.is_empty() {
                    out.push_str("(没有评论)");
                }
                for review in detail.reviews {
                    let _ = writeln!(
                        out,
                        "{} {}",
                        review,
                        review.comment.as_deref().unwrap_or("")
                    );
                }
            }
            None => return Err(format!("游戏 {} 不存在", game_id)),
        },
        Command::Review(id) => match service::find_review_with_game(db, id).await? {
            Some(found) => {
                let _ = writeln!(out, "{}", found.review);
                if let Some(comment) = &found.review.comment {
                    let _ = writeln!(out, "  comment={}", comment);
                }
                match found.game {
                    Some(game) => {
                        let _ = writeln!(out, "  game -> {}", game);
                    }
                    None => {
                        let _ = writeln!(out, "  game -> None");
                    }
                }
            }
            None => return Err(format!("评论 {} 不存在", id)),
        },
        Command::AddGame {
            title,
            genre,
            platform,
            price,
        } => {
            let game =
                service::insert_game(db, NewGame::new(&title, &genre, &platform, price)).await?;
            let _ = writeln!(out, "已添加 {}", game);
        }
        Command::AddReview {
            game_id,
            score,
            comment,
        } => {
            let review =
                service::insert_review(db, NewReview::new(game_id, score, &comment)).await?;
            let _ = writeln!(out, "已添加 {}", review);
        }
        Command::Detach { game_id, review_id } => {
            let removed = service::remove_review_from_game(db, game_id, review_id).await?;
            if removed == 0 {
                return Err(format!("评论 {} 不属于游戏 {}", review_id, game_id));
            }
            let _ = writeln!(out, "已从游戏 {} 移除并删除评论 {}", game_id, review_id);
        }
        Command::DeleteGame(id) => {
            let result = service::delete_game(db, id).await?;
            if result.games_deleted == 0 {
                return Err(format!("游戏 {} 不存在", id));
            }
            let _ = writeln!(
                out,
                "已删除游戏 {}，级联删除 {} 条评论",
                id, result.reviews_deleted
            );
        }
        Command::Count => {
            let games = service::count_games(db).await?;
            let reviews = service::count_reviews(db).await?;
            let _ = writeln!(out, "games={}, reviews={}", games, reviews);
        }
        Command::LogLevel(level) => {
            if let Some(level) = level {
                set_log_level(&level)?;
            }
            let current = serde_json::to_value(get_log_level()).map_err(|e| e.to_string())?;
            let _ = write!(out, "log level: {}", current.as_str().unwrap_or_default());
        }
        Command::Quit => {}
    }
    Ok(out.trim_end().to_string())
}

/// 运行读取-执行-输出循环，直到输入结束或收到 quit
pub async fn run_console<R, W>(db: &DatabaseConnection, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output.write_all(PROMPT.as_bytes()).await?;
    output.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let reply = match Command::parse(&line) {
            Ok(None) => None,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => Some(execute(db, command).await.unwrap_or_else(|e| {
                log::debug!("控制台命令失败: {}", e);
                format!("错误: {}", e)
            })),
            Err(e) => Some(format!("错误: {}", e)),
        };

        if let Some(text) = reply.filter(|t| !t.is_empty()) {
            output.write_all(text.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;
    }

    output.write_all(b"\n").await?;
    output.flush().await
}
