use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use log::info;

use blogly::util::db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let db_url = env::var("DATABASE_URL")
        .context("DATABASE_URL must be set, e.g. DATABASE_URL=blogly.db")?;
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned());

    let pool = db::establish_pool(&db_url)?;
    db::run_migrations(&pool)?;

    let app = blogly::app(pool)?;

    let addr: SocketAddr = bind_addr.parse().context("BIND_ADDR must be <host>:<port>")?;
    info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
