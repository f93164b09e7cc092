//! 投稿实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nama: String,
    pub nim: String,
    pub judul: String,
    #[sea_orm(column_type = "Text")]
    pub abstrak: String,
    pub email: String,
    pub file_url: String,
    #[sea_orm(nullable)]
    pub file_key: Option<String>,
    #[sea_orm(nullable)]
    pub file_name: Option<String>,
    pub status: String,
    #[sea_orm(nullable)]
    pub download_link: Option<String>,
    #[sea_orm(nullable)]
    pub drive_file_id: Option<String>,
    pub original_file_deleted: bool,
    pub submitted_at: i64,
    #[sea_orm(nullable)]
    pub published_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
