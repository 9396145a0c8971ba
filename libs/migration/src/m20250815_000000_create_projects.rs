use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create project_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(ProjectStatus::Enum)
                    .values([ProjectStatus::Featured, ProjectStatus::Archived])
                    .to_owned(),
            )
            .await?;

        // Create projects table
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_uuid(Projects::Id))
                    .col(string_len(Projects::Title, 55))
                    .col(string_len(Projects::Description, 255))
                    .col(text(Projects::Link))
                    .col(json(Projects::Technologies).default("[]"))
                    .col(
                        ColumnDef::new(Projects::Status)
                            .enumeration(
                                ProjectStatus::Enum,
                                [ProjectStatus::Featured, ProjectStatus::Archived],
                            )
                            .not_null()
                            .default("featured"),
                    )
                    .col(text_null(Projects::Preview))
                    .col(
                        timestamp_with_time_zone(Projects::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Projects::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing sorts by created_at, status filters the landing page
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_created_at")
                    .table(Projects::Table)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_status")
                    .table(Projects::Table)
                    .col(Projects::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProjectStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Title,
    Description,
    Link,
    Technologies,
    Status,
    Preview,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProjectStatus {
    #[sea_orm(iden = "project_status")]
    Enum,
    #[sea_orm(iden = "featured")]
    Featured,
    #[sea_orm(iden = "archived")]
    Archived,
}
