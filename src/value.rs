//! Generic typed tree produced by the SNBT parser.

use indexmap::IndexMap;
use serde::Serialize;

/// Insertion-ordered map of a compound tag.
pub type Compound = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Compound(Compound),
    List(Vec<Value>),
    Str(String),
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Any integer width, widened. Floating values are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(n) => Some(n as i64),
            Value::Short(n) => Some(n as i64),
            Value::Int(n) => Some(n as i64),
            Value::Long(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(n) => Some(n as f64),
            Value::Double(n) => Some(n),
            _ => self.as_i64().map(|n| n as f64),
        }
    }

    /// Booleans, plus numeric byte flags (`0b`/`1b`) as written by the canonical writer.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            other => other.as_i64().map(|n| n != 0),
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Compound(_) | Value::List(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Compound(_) => "compound",
            Value::List(_) => "list",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Compound> for Value {
    fn from(m: Compound) -> Self {
        Value::Compound(m)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_widening() {
        assert_eq!(Value::Byte(-3).as_i64(), Some(-3));
        assert_eq!(Value::Short(300).as_f64(), Some(300.0));
        assert_eq!(Value::Double(1.5).as_i64(), None);
        assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
    }

    #[test]
    fn byte_flags_read_as_bool() {
        assert_eq!(Value::Byte(1).as_bool(), Some(true));
        assert_eq!(Value::Byte(0).as_bool(), Some(false));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::from("1").as_bool(), None);
    }

    #[test]
    fn serializes_untagged() {
        let mut m = Compound::new();
        m.insert("b".into(), Value::Long(2));
        m.insert("a".into(), Value::List(vec![Value::from("x"), Value::Bool(false)]));
        let json = serde_json::to_string(&Value::Compound(m)).unwrap();
        assert_eq!(json, r#"{"b":2,"a":["x",false]}"#);
    }
}
