//! 数据传输对象 (DTO)
//!
//! 仓库层的输入结构。插入使用 `New*`，部分更新使用 `Update*`。

use serde::{Deserialize, Deserializer, Serialize};

/// 辅助函数：支持 Option<Option<T>> 的反序列化
/// 用于区分"未提供字段"和"显式设为 null"
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// 用于插入游戏的数据结构
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewGame {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub price: Option<i32>,
}

impl NewGame {
    pub fn new(title: &str, genre: &str, platform: &str, price: i32) -> Self {
        Self {
            title: Some(title.to_string()),
            genre: Some(genre.to_string()),
            platform: Some(platform.to_string()),
            price: Some(price),
        }
    }
}

/// 用于更新游戏的数据结构
///
/// 所有字段均为 Option，允许部分更新。
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateGame {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub genre: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub platform: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<i32>>,
}

/// 用于插入评论的数据结构
///
/// 评论创建时必须提供一个已存在的游戏 ID。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewReview {
    pub score: Option<i32>,
    pub comment: Option<String>,
    pub game_id: i32,
}

impl NewReview {
    pub fn new(game_id: i32, score: i32, comment: &str) -> Self {
        Self {
            score: Some(score),
            comment: Some(comment.to_string()),
            game_id,
        }
    }
}

/// 用于更新评论的数据结构
///
/// `game_id` 可改为另一个游戏，即把评论移到另一个游戏的集合中。
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateReview {
    #[serde(default, deserialize_with = "double_option")]
    pub score: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub comment: Option<Option<String>>,
    pub game_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_missing_from_null() {
        let update: UpdateGame = serde_json::from_str(r#"{"price": null, "title": "Zelda"}"#).unwrap();
        assert_eq!(update.price, Some(None));
        assert_eq!(update.title, Some(Some("Zelda".to_string())));
        assert_eq!(update.genre, None);
        assert_eq!(update.platform, None);
    }

    #[test]
    fn review_update_can_move_between_games() {
        let update: UpdateReview = serde_json::from_str(r#"{"game_id": 4}"#).unwrap();
        assert_eq!(update.game_id, Some(4));
        assert_eq!(update.score, None);
        assert_eq!(update.comment, None);
    }
}
