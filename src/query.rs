use sea_orm::sqlx::{self, PgPool};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Select, Statement, Value,
};

use crate::entity::{post, tag};

/// Largest number of bind parameters that round-trips correctly over the
/// PostgreSQL extended protocol: the `Bind` message carries the parameter
/// count in a 16-bit field.
pub const PG_MAX_BIND_PARAMS: usize = 65_535;

/// First count at which the parameter count field overflows. The server then
/// sees a different number of parameters than the statement requires and
/// rejects the query at the protocol level, far away from any "too many
/// parameters" wording.
pub const PG_FIRST_FAILING_PARAMS: usize = PG_MAX_BIND_PARAMS + 1;

fn select_ids_where_in(id_list: &str) -> String {
    format!(r#"SELECT "id" FROM "tag" WHERE "id" IN ({id_list}) ORDER BY "id" ASC"#)
}

fn joined_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Structured query-builder select; every id becomes one bound parameter.
pub fn in_filter_query(ids: &[i32]) -> Select<tag::Entity> {
    tag::Entity::find()
        .filter(tag::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(tag::Column::Id)
}

pub async fn find_in_filter(
    db: &DatabaseConnection,
    ids: &[i32],
) -> Result<Vec<tag::Model>, DbErr> {
    in_filter_query(ids).all(db).await
}

/// Raw SQL with one positional placeholder per id, values bound separately.
pub fn in_params_statement(ids: &[i32]) -> Statement {
    if ids.is_empty() {
        return Statement::from_string(DbBackend::Postgres, select_ids_where_in("NULL"));
    }
    let placeholders = (1..=ids.len())
        .map(|position| format!("${position}"))
        .collect::<Vec<_>>()
        .join(", ");
    Statement::from_sql_and_values(
        DbBackend::Postgres,
        select_ids_where_in(&placeholders),
        ids.iter().map(|&id| Value::from(id)),
    )
}

pub async fn find_in_params(
    db: &DatabaseConnection,
    ids: &[i32],
) -> Result<Vec<tag::Model>, DbErr> {
    tag::Entity::find()
        .from_raw_sql(in_params_statement(ids))
        .all(db)
        .await
}

/// Raw SQL with the id list textually interpolated; binds nothing, so the
/// parameter limit never applies. This is the workaround path.
pub fn in_raw_statement(ids: &[i32]) -> Statement {
    let id_list = if ids.is_empty() {
        "NULL".to_owned()
    } else {
        joined_ids(ids)
    };
    Statement::from_string(DbBackend::Postgres, select_ids_where_in(&id_list))
}

pub async fn find_in_raw(db: &DatabaseConnection, ids: &[i32]) -> Result<Vec<tag::Model>, DbErr> {
    tag::Entity::find()
        .from_raw_sql(in_raw_statement(ids))
        .all(db)
        .await
}

/// Raw SQL where the whole id list collapses into ONE bound text value,
/// the shape behind the `42883 operator does not exist: integer = text`
/// diagnostic.
pub fn in_single_text_statement(ids: &[i32]) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::Postgres,
        select_ids_where_in("$1"),
        [Value::from(joined_ids(ids))],
    )
}

pub async fn find_in_single_text(
    db: &DatabaseConnection,
    ids: &[i32],
) -> Result<Vec<tag::Model>, DbErr> {
    tag::Entity::find()
        .from_raw_sql(in_single_text_statement(ids))
        .all(db)
        .await
}

/// Join through the association table; binds no per-id parameters and is
/// therefore immune to the limit no matter how many tags exist.
pub async fn find_with_posts(
    db: &DatabaseConnection,
) -> Result<Vec<(tag::Model, Vec<post::Model>)>, DbErr> {
    tag::Entity::find()
        .find_with_related(post::Entity)
        .all(db)
        .await
}

/// Same parameterized query over a plain sqlx pool, bypassing the ORM layer
/// entirely for comparison.
pub async fn sqlx_find_in_params(pool: &PgPool, ids: &[i32]) -> Result<Vec<i32>, sqlx::Error> {
    let stmt = in_params_statement(ids);
    let mut query = sqlx::query_scalar(&stmt.sql);
    for &id in ids {
        query = query.bind(id);
    }
    query.fetch_all(pool).await
}

/// Interpolated query over a plain sqlx pool.
pub async fn sqlx_find_in_raw(pool: &PgPool, ids: &[i32]) -> Result<Vec<i32>, sqlx::Error> {
    let stmt = in_raw_statement(ids);
    sqlx::query_scalar(&stmt.sql).fetch_all(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sea_orm::QueryTrait;

    #[test]
    fn filter_query_binds_one_parameter_per_id() {
        let stmt = in_filter_query(&[1, 2, 3]).build(DbBackend::Postgres);

        insta::assert_snapshot!(
            stmt.sql,
            @r#"SELECT "tag"."id" FROM "tag" WHERE "tag"."id" IN ($1, $2, $3) ORDER BY "tag"."id" ASC"#
        );
        assert_eq!(stmt.values.unwrap().0.len(), 3);
    }

    #[test]
    fn params_statement_numbers_placeholders_sequentially() {
        let stmt = in_params_statement(&[7, 8, 9]);

        insta::assert_snapshot!(
            stmt.sql,
            @r#"SELECT "id" FROM "tag" WHERE "id" IN ($1, $2, $3) ORDER BY "id" ASC"#
        );
        assert_eq!(stmt.values.unwrap().0.len(), 3);
    }

    #[test]
    fn params_statement_scales_past_the_limit() {
        let ids: Vec<i32> = (1..=PG_FIRST_FAILING_PARAMS as i32).collect();
        let stmt = in_params_statement(&ids);

        assert!(stmt.sql.contains("$65536"));
        assert!(!stmt.sql.contains("$65537"));
        assert_eq!(stmt.values.unwrap().0.len(), PG_FIRST_FAILING_PARAMS);
    }

    #[test]
    fn raw_statement_interpolates_and_binds_nothing() {
        let stmt = in_raw_statement(&[1, 2, 3]);

        insta::assert_snapshot!(
            stmt.sql,
            @r#"SELECT "id" FROM "tag" WHERE "id" IN (1, 2, 3) ORDER BY "id" ASC"#
        );
        assert!(stmt.values.is_none());
    }

    #[test]
    fn single_text_statement_collapses_the_list_into_one_value() {
        let stmt = in_single_text_statement(&[1, 2, 3]);

        insta::assert_snapshot!(
            stmt.sql,
            @r#"SELECT "id" FROM "tag" WHERE "id" IN ($1) ORDER BY "id" ASC"#
        );
        let values = stmt.values.unwrap().0;
        assert_eq!(values, vec![Value::from("1, 2, 3")]);
    }

    #[test]
    fn empty_id_lists_render_a_query_that_matches_nothing() {
        let params = in_params_statement(&[]);
        let raw = in_raw_statement(&[]);

        insta::assert_snapshot!(
            raw.sql,
            @r#"SELECT "id" FROM "tag" WHERE "id" IN (NULL) ORDER BY "id" ASC"#
        );
        assert_eq!(params.sql, raw.sql);
        assert!(params.values.is_none());
    }
}
