use super::sample_database::SampleDatabase;
use super::user::User;
use crate::schema::exercises;
use crate::schema::exercises::dsl::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Identifiable, Associations, Queryable, AsChangeset)]
#[diesel(belongs_to(SampleDatabase, foreign_key = database_id))]
#[diesel(belongs_to(User, foreign_key = author_id))]
pub struct Exercise {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub initial_query: String,
    pub solution_query: String,
    pub database_id: i32,
    pub author_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Exercise {
    pub fn find(eid: i32, conn: &mut PgConnection) -> QueryResult<Self> {
        exercises.find(eid).first(conn)
    }

    pub fn find_by_database(db: &SampleDatabase, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        Exercise::belonging_to(db).load(conn)
    }

    pub fn find_by_author_id(aid: i32, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        exercises.filter(author_id.eq(aid)).load(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        exercises.order(id.asc()).load(conn)
    }

    pub fn get_database(&self, conn: &mut PgConnection) -> QueryResult<SampleDatabase> {
        SampleDatabase::find(self.database_id, conn)
    }

    pub fn update(
        &self,
        changes: &UpdateExercise,
        conn: &mut PgConnection,
    ) -> QueryResult<Exercise> {
        diesel::update(self)
            .set((changes, updated_at.eq(diesel::dsl::now)))
            .get_result(conn)
    }

    pub fn delete(&self, conn: &mut PgConnection) -> QueryResult<usize> {
        diesel::delete(self).execute(conn)
    }
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[diesel(table_name = exercises)]
pub struct NewExercise {
    pub title: String,
    pub description: String,
    pub initial_query: String,
    pub solution_query: String,
    pub database_id: i32,
    pub author_id: Option<i32>,
}

impl NewExercise {
    pub fn create(&self, conn: &mut PgConnection) -> QueryResult<Exercise> {
        diesel::insert_into(exercises::table)
            .values(self)
            .get_result(conn)
    }
}

#[derive(Debug, Serialize, Deserialize, AsChangeset, Default)]
#[diesel(table_name = exercises)]
pub struct UpdateExercise {
    pub title: Option<String>,
    pub description: Option<String>,
    pub initial_query: Option<String>,
    pub solution_query: Option<String>,
    pub database_id: Option<i32>,
}
