use connection::PgPool;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

#[macro_use]
extern crate diesel;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub fn run_migrations(pool: &PgPool) {
    let mut conn = pool.get().expect("Can't get DB connection");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

pub mod connection;
pub mod models;
pub mod retry;
pub mod schema;
