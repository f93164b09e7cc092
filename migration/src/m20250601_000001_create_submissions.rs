use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建投稿表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::Nama).string().not_null())
                    .col(ColumnDef::new(Submissions::Nim).string().not_null())
                    .col(ColumnDef::new(Submissions::Judul).string().not_null())
                    .col(ColumnDef::new(Submissions::Abstrak).text().not_null())
                    .col(ColumnDef::new(Submissions::Email).string().not_null())
                    .col(ColumnDef::new(Submissions::FileUrl).string().not_null())
                    .col(ColumnDef::new(Submissions::FileKey).string().null())
                    .col(ColumnDef::new(Submissions::FileName).string().null())
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(ColumnDef::new(Submissions::DownloadLink).string().null())
                    .col(ColumnDef::new(Submissions::DriveFileId).string().null())
                    .col(
                        ColumnDef::new(Submissions::OriginalFileDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::PublishedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 按状态 + 提交时间的查询是仪表盘的主路径
        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_status_submitted_at")
                    .table(Submissions::Table)
                    .col(Submissions::Status)
                    .col(Submissions::SubmittedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    Nama,
    Nim,
    Judul,
    Abstrak,
    Email,
    FileUrl,
    FileKey,
    FileName,
    Status,
    DownloadLink,
    DriveFileId,
    OriginalFileDeleted,
    SubmittedAt,
    PublishedAt,
}
