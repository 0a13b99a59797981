use super::exercise::Exercise;
use super::user::User;
use crate::schema::submissions;
use crate::schema::submissions::dsl::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Identifiable, Associations, Queryable, Clone)]
#[diesel(belongs_to(User, foreign_key = student_id))]
#[diesel(belongs_to(Exercise, foreign_key = exercise_id))]
pub struct Submission {
    pub id: i32,
    pub query: String,
    pub is_correct: bool,
    pub feedback: String,
    pub student_id: i32,
    pub exercise_id: i32,
    pub created_at: NaiveDateTime,
}

impl Submission {
    pub fn find(sid: i32, conn: &mut PgConnection) -> QueryResult<Self> {
        submissions.find(sid).first(conn)
    }

    pub fn find_by_student(uid: i32, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        submissions
            .filter(student_id.eq(uid))
            .order(created_at.desc())
            .load(conn)
    }

    pub fn find_by_exercise(eid: i32, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        submissions
            .filter(exercise_id.eq(eid))
            .order(created_at.desc())
            .load(conn)
    }
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[diesel(table_name = submissions)]
pub struct NewSubmission {
    pub query: String,
    pub is_correct: bool,
    pub feedback: String,
    pub student_id: i32,
    pub exercise_id: i32,
}

impl NewSubmission {
    pub fn create(&self, conn: &mut PgConnection) -> QueryResult<Submission> {
        diesel::insert_into(submissions::table)
            .values(self)
            .get_result(conn)
    }
}
