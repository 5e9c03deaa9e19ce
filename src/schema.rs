use sea_orm::{ConnectionTrait, DbConn, DbErr, ExecResult, sea_query};
use sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, TableCreateStatement};

use crate::entity::{post, tag, tags_on_posts};

async fn create_table(db: &DbConn, stmt: &TableCreateStatement) -> Result<ExecResult, DbErr> {
    let builder = db.get_database_backend();
    db.execute(builder.build(stmt)).await
}

/// Creates the three tables in foreign-key dependency order.
pub async fn create_all_tables(db: &DbConn) -> Result<(), DbErr> {
    create_tag_table(db).await?;
    create_post_table(db).await?;
    create_tags_on_posts_table(db).await?;
    Ok(())
}

pub async fn create_tag_table(db: &DbConn) -> Result<ExecResult, DbErr> {
    let stmt = sea_query::Table::create()
        .table(tag::Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(tag::Column::Id)
                .integer()
                .not_null()
                .primary_key(),
        )
        .to_owned();

    create_table(db, &stmt).await
}

pub async fn create_post_table(db: &DbConn) -> Result<ExecResult, DbErr> {
    let stmt = sea_query::Table::create()
        .table(post::Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(post::Column::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(post::Column::Title).string().not_null())
        .to_owned();

    create_table(db, &stmt).await
}

pub async fn create_tags_on_posts_table(db: &DbConn) -> Result<ExecResult, DbErr> {
    let stmt = sea_query::Table::create()
        .table(tags_on_posts::Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(tags_on_posts::Column::TagId)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(tags_on_posts::Column::PostId)
                .integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(tags_on_posts::Column::TagId)
                .col(tags_on_posts::Column::PostId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("FK_tags_on_posts_tag")
                .from(tags_on_posts::Entity, tags_on_posts::Column::TagId)
                .to(tag::Entity, tag::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("FK_tags_on_posts_post")
                .from(tags_on_posts::Entity, tags_on_posts::Column::PostId)
                .to(post::Entity, post::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned();

    create_table(db, &stmt).await
}
