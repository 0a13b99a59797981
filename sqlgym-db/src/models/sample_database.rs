use super::user::User;
use crate::schema::sample_databases;
use crate::schema::sample_databases::dsl::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Identifiable, Associations, Queryable, AsChangeset)]
#[diesel(belongs_to(User, foreign_key = author_id))]
pub struct SampleDatabase {
    pub id: i32,
    pub name: String,
    pub schema_sql: String,
    pub seed_sql: String,
    pub author_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SampleDatabase {
    pub fn find(did: i32, conn: &mut PgConnection) -> QueryResult<Self> {
        sample_databases.find(did).first(conn)
    }

    pub fn find_by_name(db_name: &str, conn: &mut PgConnection) -> QueryResult<Self> {
        sample_databases.filter(name.eq(db_name)).first(conn)
    }

    pub fn find_by_author_id(aid: i32, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        sample_databases.filter(author_id.eq(aid)).load(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        sample_databases.order(name.asc()).load(conn)
    }

    pub fn delete(&self, conn: &mut PgConnection) -> QueryResult<usize> {
        diesel::delete(self).execute(conn)
    }
}

#[derive(Debug, Serialize, Deserialize, Insertable, AsChangeset)]
#[diesel(table_name = sample_databases)]
pub struct NewSampleDatabase {
    pub name: String,
    pub schema_sql: String,
    pub seed_sql: String,
    pub author_id: Option<i32>,
}

impl NewSampleDatabase {
    // Names are unique; posting a known name updates the stored schema in
    // place instead of creating a duplicate.
    pub fn create_or_update(&self, conn: &mut PgConnection) -> QueryResult<SampleDatabase> {
        diesel::insert_into(sample_databases::table)
            .values(self)
            .on_conflict(name)
            .do_update()
            .set((self, updated_at.eq(diesel::dsl::now)))
            .get_result(conn)
    }
}
