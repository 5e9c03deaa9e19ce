use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set, TransactionTrait};

use crate::entity::{post, tag, tags_on_posts};

/// Env override for the number of rows per INSERT during seeding, mirroring
/// the batch-size knob of the client under test. It only affects seeding;
/// the query paths ignore it, which is the behavior being documented.
pub const QUERY_BATCH_SIZE: &str = "QUERY_BATCH_SIZE";

/// Default seeding chunk, comfortably below the bind-parameter limit.
pub const DEFAULT_INSERT_CHUNK: usize = 10_000;

/// Contiguous ids `1..=n`, recreated fresh per run.
pub fn id_sequence(n: u32) -> Vec<i32> {
    (1..=n).map(|id| id as i32).collect()
}

pub(crate) fn chunk_size_from(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&size| size > 0)
        .unwrap_or(DEFAULT_INSERT_CHUNK)
}

pub fn insert_chunk_size() -> usize {
    chunk_size_from(std::env::var(QUERY_BATCH_SIZE).ok().as_deref())
}

/// Deletes all rows from the association table, then posts, then tags, as a
/// single transaction. The ordering satisfies the foreign-key constraints.
pub async fn clean(db: &DatabaseConnection) -> Result<(), DbErr> {
    tracing::info!("pruning the database records");

    let txn = db.begin().await?;
    tags_on_posts::Entity::delete_many().exec(&txn).await?;
    post::Entity::delete_many().exec(&txn).await?;
    tag::Entity::delete_many().exec(&txn).await?;
    txn.commit().await
}

/// Bulk-inserts one tag per id. Inserts are chunked so that seeding itself
/// stays below the bind-parameter limit regardless of `ids.len()`.
pub async fn create_tags(db: &DatabaseConnection, ids: &[i32]) -> Result<usize, DbErr> {
    let chunk_size = insert_chunk_size();
    tracing::info!(chunk_size, "creating {} records", ids.len());

    for chunk in ids.chunks(chunk_size) {
        tag::Entity::insert_many(chunk.iter().map(|&id| tag::ActiveModel { id: Set(id) }))
            .exec_without_returning(db)
            .await?;
    }
    Ok(ids.len())
}
