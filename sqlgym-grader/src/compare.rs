use itertools::Itertools;

use crate::sandbox::{ResultSet, SqlValue};

/// Dataset equality for grading: same column count, same rows as an
/// unordered multiset. Column names stay out of it, so aliases are legal.
pub fn results_match(student: &ResultSet, solution: &ResultSet) -> bool {
    if student.column_count() != solution.column_count() {
        return false;
    }
    if student.row_count() != solution.row_count() {
        return false;
    }
    canonical_rows(student) == canonical_rows(solution)
}

fn canonical_rows(result: &ResultSet) -> Vec<String> {
    result.rows.iter().map(|row| row_key(row)).sorted().collect()
}

fn row_key(row: &[SqlValue]) -> String {
    // Cells are joined on a separator that never appears in cell_key output's
    // type prefix, so shifting text between adjacent cells changes the key.
    row.iter().map(cell_key).join("\u{1f}")
}

fn cell_key(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "n:".to_string(),
        SqlValue::Integer(i) => format!("i:{}", i),
        SqlValue::Real(f) => format!("r:{}", f),
        SqlValue::Text(s) => format!("t:{}", s),
        SqlValue::Blob(b) => format!(
            "b:{}",
            b.iter().map(|x| format!("{:02x}", x)).collect::<String>()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rs(columns: &[&str], rows: Vec<Vec<SqlValue>>) -> ResultSet {
        ResultSet {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    fn int_row(values: &[i64]) -> Vec<SqlValue> {
        values.iter().map(|v| SqlValue::Integer(*v)).collect()
    }

    #[test]
    fn row_order_does_not_matter() {
        let a = rs(&["id"], vec![int_row(&[1]), int_row(&[2]), int_row(&[3])]);
        let b = rs(&["id"], vec![int_row(&[3]), int_row(&[1]), int_row(&[2])]);
        assert!(results_match(&a, &b));
    }

    #[test]
    fn column_aliases_do_not_matter() {
        let a = rs(&["id"], vec![int_row(&[1])]);
        let b = rs(&["identifier"], vec![int_row(&[1])]);
        assert!(results_match(&a, &b));
    }

    #[test]
    fn column_count_matters() {
        let a = rs(&["id"], vec![int_row(&[1])]);
        let b = rs(&["id", "name"], vec![int_row(&[1, 1])]);
        assert!(!results_match(&a, &b));
    }

    #[test]
    fn duplicates_are_counted() {
        let a = rs(&["id"], vec![int_row(&[1]), int_row(&[1]), int_row(&[2])]);
        let b = rs(&["id"], vec![int_row(&[1]), int_row(&[2]), int_row(&[2])]);
        assert!(!results_match(&a, &b));
    }

    #[test]
    fn both_empty_match() {
        let a = rs(&["id"], vec![]);
        let b = rs(&["n"], vec![]);
        assert!(results_match(&a, &b));
    }

    #[test]
    fn null_and_zero_are_distinct() {
        let a = rs(&["v"], vec![vec![SqlValue::Null]]);
        let b = rs(&["v"], vec![vec![SqlValue::Integer(0)]]);
        assert!(!results_match(&a, &b));
    }

    #[test]
    fn integer_and_real_are_distinct() {
        let a = rs(&["v"], vec![vec![SqlValue::Integer(1)]]);
        let b = rs(&["v"], vec![vec![SqlValue::Real(1.0)]]);
        assert!(!results_match(&a, &b));
    }

    #[test]
    fn cell_boundaries_stay_distinct() {
        let a = rs(
            &["a", "b"],
            vec![vec![
                SqlValue::Text("x|y".to_string()),
                SqlValue::Text("z".to_string()),
            ]],
        );
        let b = rs(
            &["a", "b"],
            vec![vec![
                SqlValue::Text("x".to_string()),
                SqlValue::Text("y|z".to_string()),
            ]],
        );
        assert!(!results_match(&a, &b));
    }
}
