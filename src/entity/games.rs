//! 游戏实体
//!
//! games 表是父表，评论通过外键 `reviews.game_id` 挂在游戏下。

use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Opt;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub genre: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub platform: Option<String>,
    pub price: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Game(id={}, title={}, platform={})",
            self.id,
            Opt(&self.title),
            Opt(&self.platform)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_console_format() {
        let game = Model {
            id: 1,
            title: Some("Mario Kart".into()),
            genre: Some("Racing".into()),
            platform: Some("Switch".into()),
            price: Some(60),
        };
        assert_eq!(game.to_string(), "Game(id=1, title=Mario Kart, platform=Switch)");

        let bare = Model {
            id: 2,
            title: None,
            genre: None,
            platform: None,
            price: None,
        };
        assert_eq!(bare.to_string(), "Game(id=2, title=None, platform=None)");
    }
}
