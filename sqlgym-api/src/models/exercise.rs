use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use sqlgym_db::models::exercise::{Exercise as ExerciseData, UpdateExercise};

#[derive(Debug, Serialize)]
pub struct Exercise {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub initial_query: String,
    // Withheld from students.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_query: Option<String>,
    pub database_id: i32,
    pub author_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Exercise {
    pub fn from_data(data: &ExerciseData, include_solution: bool) -> Self {
        Exercise {
            id: data.id,
            title: data.title.clone(),
            description: data.description.clone(),
            initial_query: data.initial_query.clone(),
            solution_query: include_solution.then(|| data.solution_query.clone()),
            database_id: data.database_id,
            author_id: data.author_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExerciseInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub initial_query: String,
    pub solution_query: String,
    pub database_id: i32,
}

#[derive(Debug, Deserialize, Default)]
pub struct ExerciseUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub initial_query: Option<String>,
    pub solution_query: Option<String>,
    pub database_id: Option<i32>,
}

impl From<ExerciseUpdateInput> for UpdateExercise {
    fn from(input: ExerciseUpdateInput) -> Self {
        UpdateExercise {
            title: input.title,
            description: input.description,
            initial_query: input.initial_query,
            solution_query: input.solution_query,
            database_id: input.database_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn exercise_data() -> ExerciseData {
        let at = NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        ExerciseData {
            id: 1,
            title: "All toys".to_string(),
            description: "Select every toy.".to_string(),
            initial_query: String::new(),
            solution_query: "SELECT * FROM Toys".to_string(),
            database_id: 1,
            author_id: Some(2),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn solution_is_withheld_from_students() {
        let dto = Exercise::from_data(&exercise_data(), false);
        assert!(dto.solution_query.is_none());
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("solution_query").is_none());
    }

    #[test]
    fn solution_is_included_for_authors() {
        let dto = Exercise::from_data(&exercise_data(), true);
        assert_eq!(dto.solution_query.as_deref(), Some("SELECT * FROM Toys"));
    }
}
