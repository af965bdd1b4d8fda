use quarry_core::{Error, Result, Value};

/// `LIMIT` / `OFFSET` of a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    /// Validates caller-supplied `limit` and `offset`.
    ///
    /// Each must be absent, `null`, or a non-negative integral number.
    pub fn parse(limit: Option<&Value>, offset: Option<&Value>) -> Result<Pagination> {
        Ok(Pagination {
            limit: count("limit", limit)?,
            offset: count("offset", offset)?,
        })
    }

    pub fn limit(limit: u64) -> Pagination {
        Pagination {
            limit: Some(limit),
            offset: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }
}

fn count(name: &str, value: Option<&Value>) -> Result<Option<u64>> {
    let number = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number,
        Some(other) => {
            return Err(Error::invalid_pagination(format!(
                "`{name}` must be a non-negative integer; got `{other}`"
            )))
        }
    };

    if let Some(n) = number.as_u64() {
        return Ok(Some(n));
    }

    if number.as_i64().is_some() {
        return Err(Error::invalid_pagination(format!(
            "`{name}` must not be negative; got `{number}`"
        )));
    }

    match number.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Ok(Some(f as u64))
        }
        _ => Err(Error::invalid_pagination(format!(
            "`{name}` must be a non-negative integer; got `{number}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(limit: Value, offset: Value) -> Result<Pagination> {
        Pagination::parse(Some(&limit), Some(&offset))
    }

    #[test]
    fn absent_and_valid() {
        assert!(Pagination::parse(None, None).unwrap().is_empty());
        assert_eq!(
            parse(json!(10), json!(20)).unwrap(),
            Pagination {
                limit: Some(10),
                offset: Some(20)
            }
        );
        assert_eq!(parse(json!(5.0), Value::Null).unwrap().limit, Some(5));
    }

    #[test]
    fn negative() {
        assert!(parse(json!(-1), Value::Null)
            .unwrap_err()
            .is_invalid_pagination());
        assert!(parse(Value::Null, json!(-3))
            .unwrap_err()
            .is_invalid_pagination());
        assert!(parse(json!(-2.0), Value::Null)
            .unwrap_err()
            .is_invalid_pagination());
    }

    #[test]
    fn non_integral() {
        assert!(parse(json!(1.5), Value::Null)
            .unwrap_err()
            .is_invalid_pagination());
        assert!(parse(json!("10"), Value::Null)
            .unwrap_err()
            .is_invalid_pagination());
    }
}
