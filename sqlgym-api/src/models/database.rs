use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use sqlgym_db::models::sample_database::SampleDatabase as DatabaseData;

#[derive(Debug, Serialize)]
pub struct Database {
    pub id: i32,
    pub name: String,
    pub schema_sql: String,
    pub seed_sql: String,
    pub author_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&DatabaseData> for Database {
    fn from(data: &DatabaseData) -> Self {
        Database {
            id: data.id,
            name: data.name.clone(),
            schema_sql: data.schema_sql.clone(),
            seed_sql: data.seed_sql.clone(),
            author_id: data.author_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseInput {
    pub name: String,
    pub schema_sql: String,
    #[serde(default)]
    pub seed_sql: String,
}
