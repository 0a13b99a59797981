pub mod auth;
pub mod databases;
pub mod exercises;
pub mod submissions;
pub mod users;
