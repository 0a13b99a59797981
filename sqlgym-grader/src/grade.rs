use crate::compare::results_match;
use crate::errors::{GraderError, Result};
use crate::sandbox::{ResultSet, Sandbox};

/// Everything the grading run produced, ready for feedback and persistence.
#[derive(Debug)]
pub struct GradeOutcome {
    pub is_correct: bool,
    pub error_message: Option<String>,
    pub student_result: Option<ResultSet>,
    pub expected_result: Option<ResultSet>,
}

/// Grades one submission against an exercise's reference solution.
///
/// Runs each query in its own freshly seeded sandbox, so the verdict is a
/// pure function of (schema, seed, solution, submission). A failing student
/// query is an incorrect verdict, not an error; a failing reference solution
/// means the exercise itself is broken and surfaces as `Solution`.
pub fn grade(
    schema_sql: &str,
    seed_sql: &str,
    solution_query: &str,
    submitted_query: &str,
) -> Result<GradeOutcome> {
    let solution_sandbox = Sandbox::create(schema_sql, seed_sql)?;
    let expected = match solution_sandbox.run_query(solution_query) {
        Ok(result) => result,
        Err(GraderError::Query(msg)) => return Err(GraderError::Solution(msg)),
        Err(other) => return Err(other),
    };

    let student_sandbox = Sandbox::create(schema_sql, seed_sql)?;
    match student_sandbox.run_query(submitted_query) {
        Ok(actual) => {
            let is_correct = results_match(&actual, &expected);
            Ok(GradeOutcome {
                is_correct,
                error_message: None,
                student_result: Some(actual),
                expected_result: Some(expected),
            })
        }
        Err(GraderError::Query(msg)) => Ok(GradeOutcome {
            is_correct: false,
            error_message: Some(msg),
            student_result: None,
            expected_result: Some(expected),
        }),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::tests::{TOYS_SCHEMA, TOYS_SEED};

    #[test]
    fn matching_query_is_correct() {
        let outcome = grade(
            TOYS_SCHEMA,
            TOYS_SEED,
            "SELECT * FROM Toys",
            "SELECT * FROM Toys",
        )
        .unwrap();
        assert!(outcome.is_correct);
        assert!(outcome.error_message.is_none());
        assert_eq!(outcome.student_result.unwrap().row_count(), 8);
    }

    #[test]
    fn reordered_rows_are_still_correct() {
        let outcome = grade(
            TOYS_SCHEMA,
            TOYS_SEED,
            "SELECT * FROM Toys",
            "SELECT * FROM Toys ORDER BY price DESC",
        )
        .unwrap();
        assert!(outcome.is_correct);
    }

    #[test]
    fn column_subset_is_incorrect() {
        let outcome = grade(
            TOYS_SCHEMA,
            TOYS_SEED,
            "SELECT * FROM Toys",
            "SELECT toyId FROM Toys",
        )
        .unwrap();
        assert!(!outcome.is_correct);
        assert!(outcome.error_message.is_none());
    }

    #[test]
    fn failing_student_query_is_incorrect_with_message() {
        let outcome = grade(
            TOYS_SCHEMA,
            TOYS_SEED,
            "SELECT * FROM Toys",
            "SELECT * FORM Toys",
        )
        .unwrap();
        assert!(!outcome.is_correct);
        let msg = outcome.error_message.unwrap();
        assert!(msg.contains("syntax error"));
        assert!(outcome.student_result.is_none());
        assert!(outcome.expected_result.is_some());
    }

    #[test]
    fn mutating_student_query_cannot_affect_the_reference_run() {
        // The student deletes everything; the solution still sees 8 rows
        // because it runs in its own sandbox.
        let outcome = grade(
            TOYS_SCHEMA,
            TOYS_SEED,
            "SELECT * FROM Toys",
            "DELETE FROM Toys",
        )
        .unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.expected_result.unwrap().row_count(), 8);
    }

    #[test]
    fn broken_solution_surfaces_as_solution_error() {
        let err = grade(
            TOYS_SCHEMA,
            TOYS_SEED,
            "SELECT * FROM Gamez",
            "SELECT * FROM Toys",
        )
        .unwrap_err();
        assert!(matches!(err, GraderError::Solution(_)));
    }

    #[test]
    fn equivalent_rewrite_is_correct() {
        let outcome = grade(
            TOYS_SCHEMA,
            TOYS_SEED,
            "SELECT name FROM Toys WHERE price > 10",
            "SELECT name FROM Toys WHERE NOT price <= 10",
        )
        .unwrap();
        assert!(outcome.is_correct);
    }
}
