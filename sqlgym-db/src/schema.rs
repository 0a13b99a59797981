table! {
    exercises (id) {
        id -> Int4,
        title -> Varchar,
        description -> Text,
        initial_query -> Text,
        solution_query -> Text,
        database_id -> Int4,
        author_id -> Nullable<Int4>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    sample_databases (id) {
        id -> Int4,
        name -> Varchar,
        schema_sql -> Text,
        seed_sql -> Text,
        author_id -> Nullable<Int4>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    submissions (id) {
        id -> Int4,
        query -> Text,
        is_correct -> Bool,
        feedback -> Text,
        student_id -> Int4,
        exercise_id -> Int4,
        created_at -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Int4,
        email -> Varchar,
        hash_pwd -> Varchar,
        name -> Varchar,
        user_role -> Varchar,
        is_blocked -> Bool,
        joined_at -> Timestamp,
        last_login_at -> Nullable<Timestamp>,
    }
}

joinable!(exercises -> sample_databases (database_id));
joinable!(exercises -> users (author_id));
joinable!(sample_databases -> users (author_id));
joinable!(submissions -> exercises (exercise_id));
joinable!(submissions -> users (student_id));

allow_tables_to_appear_in_same_query!(exercises, sample_databases, submissions, users,);
