use serde::{Deserialize, Serialize};

/// An owned query parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// One opaque filter fragment with its bound parameters.
///
/// Fragments are raw SQL using `?` placeholders (e.g. `"email = ?"`) and are
/// handed to the store as written; the store only renders placeholders into
/// the active driver's style and joins fragments with `AND`. Whether a
/// fragment is valid for the store is the caller's contract.
///
/// # Example
///
/// ```ignore
/// let conds = [
///     Condition::eq("status", "active"),
///     Condition::raw_with("age > ? OR age IS NULL", [Value::Int(21)]),
/// ];
/// repo.find(&mut users, &conds).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    expr: String,
    params: Vec<Value>,
}

impl Condition {
    /// A fragment with no bound parameters, e.g. `"deleted_at IS NULL"`.
    pub fn raw(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            params: Vec::new(),
        }
    }

    /// A fragment with bound parameters, one per `?` placeholder.
    pub fn raw_with(expr: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Self {
        Self {
            expr: expr.into(),
            params: params.into_iter().collect(),
        }
    }

    /// Convenience for the common `column = ?` fragment.
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self {
            expr: format!("{column} = ?"),
            params: vec![value.into()],
        }
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_fragment() {
        let cond = Condition::eq("email", "a@b.com");
        assert_eq!(cond.expr(), "email = ?");
        assert_eq!(cond.params(), &[Value::Text("a@b.com".into())]);
    }

    #[test]
    fn test_raw_with_params() {
        let cond = Condition::raw_with("age > ? AND age < ?", [Value::Int(18), Value::Int(65)]);
        assert_eq!(cond.expr(), "age > ? AND age < ?");
        assert_eq!(cond.params().len(), 2);
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from("x"), Value::Text("x".into()));
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some(7i32)), Value::Int(7));
    }
}
