//! Helper functions for statistical operations
//!
//! Argument extraction for the plugin wrappers plus the small numeric
//! building blocks shared by the pure functions.

use sizhu_core::{SizhuError, Value};

/// Extract numbers from arguments, handling both varargs and List
pub fn extract_numbers(args: &[Value]) -> Result<Vec<f64>, SizhuError> {
    let mut numbers = Vec::new();

    for arg in args {
        match arg {
            Value::Number(n) => numbers.push(*n),
            Value::List(list) => {
                for item in list {
                    match item {
                        Value::Number(n) => numbers.push(*n),
                        Value::Error(e) => return Err(e.clone()),
                        other => return Err(SizhuError::type_error("Number", other.type_name())),
                    }
                }
            }
            Value::Error(e) => return Err(e.clone()),
            other => return Err(SizhuError::type_error("Number or List", other.type_name())),
        }
    }

    Ok(numbers)
}

/// Extract text items from arguments, handling both varargs and List
pub fn extract_texts(args: &[Value]) -> Result<Vec<String>, SizhuError> {
    let mut texts = Vec::new();

    for arg in args {
        match arg {
            Value::Text(s) => texts.push(s.clone()),
            Value::List(list) => {
                for item in list {
                    match item {
                        Value::Text(s) => texts.push(s.clone()),
                        Value::Error(e) => return Err(e.clone()),
                        other => return Err(SizhuError::type_error("Text", other.type_name())),
                    }
                }
            }
            Value::Error(e) => return Err(e.clone()),
            other => return Err(SizhuError::type_error("Text or List", other.type_name())),
        }
    }

    Ok(texts)
}

/// Extract exactly two lists for bivariate functions.
/// Lengths are not checked; the statistics handle mismatches themselves.
pub fn extract_two_lists(func: &str, args: &[Value]) -> Result<(Vec<f64>, Vec<f64>), SizhuError> {
    if args.len() != 2 {
        return Err(SizhuError::arg_count(func, 2, args.len()));
    }

    let x = extract_numbers(&args[0..1])?;
    let y = extract_numbers(&args[1..2])?;
    Ok((x, y))
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by n), 0 for an empty slice
pub fn variance_p(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Sort ascending (returns new sorted vector); NaN sorts as equal
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Median of an already sorted slice
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_numbers_list() {
        let args = vec![Value::from(vec![1.0, 2.0, 3.0])];
        assert_eq!(extract_numbers(&args).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_extract_numbers_varargs() {
        let args = vec![Value::Number(1.0), Value::Number(2.0)];
        assert_eq!(extract_numbers(&args).unwrap().len(), 2);
        assert!(extract_numbers(&[Value::from("x")]).is_err());
    }

    #[test]
    fn test_extract_texts() {
        let args = vec![Value::List(vec![Value::from("a"), Value::from("b")]), Value::from("c")];
        assert_eq!(extract_texts(&args).unwrap(), vec!["a", "b", "c"]);
        assert!(extract_texts(&[Value::Number(1.0)]).is_err());
    }

    #[test]
    fn test_mean_and_variance() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);
        assert_eq!(mean(&[]), 0.0);
        assert!((variance_p(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_median_sorted() {
        assert_eq!(median_sorted(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median_sorted(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median_sorted(&sorted(&[3.0, 1.0, 2.0])), 2.0);
    }
}
