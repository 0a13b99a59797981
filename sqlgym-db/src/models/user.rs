use crate::schema::users;
use crate::schema::users::dsl::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Debug, Serialize, Deserialize, AsChangeset, Clone, Identifiable)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub hash_pwd: String,
    pub name: String,
    pub user_role: String,
    pub is_blocked: bool,
    pub joined_at: NaiveDateTime,
    pub last_login_at: Option<NaiveDateTime>,
}

impl User {
    pub fn list_all(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        users.load(conn)
    }

    pub fn get(uid: i32, conn: &mut PgConnection) -> QueryResult<Self> {
        users.find(uid).first(conn)
    }

    pub fn get_by_email(addr: &str, conn: &mut PgConnection) -> QueryResult<Self> {
        users.filter(email.eq(addr)).first(conn)
    }

    pub fn update_password_hash(
        &self,
        new_hash: String,
        conn: &mut PgConnection,
    ) -> QueryResult<()> {
        diesel::update(self)
            .set(hash_pwd.eq(new_hash))
            .execute(conn)?;
        Ok(())
    }

    pub fn update_blocked(&self, blocked: bool, conn: &mut PgConnection) -> QueryResult<()> {
        diesel::update(self)
            .set(is_blocked.eq(blocked))
            .execute(conn)?;
        Ok(())
    }

    pub fn update_last_login(
        &self,
        time: NaiveDateTime,
        conn: &mut PgConnection,
    ) -> QueryResult<()> {
        diesel::update(self)
            .set(last_login_at.eq(time))
            .execute(conn)?;
        Ok(())
    }
}

#[derive(Insertable, Serialize, Deserialize, Debug)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub email: String,
    pub hash_pwd: String,
    pub name: String,
    pub user_role: String,
}

impl NewUser {
    pub fn create(&self, conn: &mut PgConnection) -> QueryResult<User> {
        diesel::insert_into(users::table)
            .values(self)
            .get_result(conn)
    }
}
