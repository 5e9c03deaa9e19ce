use std::collections::HashMap;
use std::env;
use std::io;

use anyhow::{Context, Result, bail};
use sea_orm::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use param_limit_repro::{params, query, schema, seed};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let variant = env::args().nth(1).unwrap_or_else(|| "filter".to_owned());

    let url = env::var("DATABASE_URL")
        .context("DATABASE_URL must point at a PostgreSQL database")?;
    let db = Database::connect(url).await?;
    schema::create_all_tables(&db).await?;

    let env_vars: HashMap<String, String> = env::vars().collect();
    let stdin = io::stdin();
    let params = params::read_input_params(&env_vars, stdin.lock(), io::stdout())?;

    if params.clean_records {
        seed::clean(&db).await?;
    }

    let ids = seed::id_sequence(params.n_records);

    if params.create_records {
        seed::create_tags(&db, &ids).await?;
    }

    info!("querying {} records via `{variant}`", params.n_records);
    let fetched = match variant.as_str() {
        "filter" => query::find_in_filter(&db, &ids).await?.len(),
        "params" => query::find_in_params(&db, &ids).await?.len(),
        "raw" => query::find_in_raw(&db, &ids).await?.len(),
        other => bail!("unknown query variant `{other}`, expected filter | params | raw"),
    };
    info!("OK! Retrieved {fetched} records.");

    Ok(())
}
