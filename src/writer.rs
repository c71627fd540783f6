//! Canonical SNBT text output for value trees.

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions { indent: 2 }
    }
}

/// Render `value` as SNBT, one compound entry per line, ending in a newline.
pub fn write_value(value: &Value, options: &WriterOptions) -> String {
    let mut out = String::new();
    write_into(&mut out, value, 0, options.indent);
    out.push('\n');
    out
}

fn write_into(out: &mut String, value: &Value, depth: usize, indent: usize) {
    match value {
        Value::Compound(map) if map.is_empty() => out.push_str("{}"),
        Value::Compound(map) => {
            out.push_str("{\n");
            for (i, (key, v)) in map.iter().enumerate() {
                pad(out, (depth + 1) * indent);
                write_key(out, key);
                out.push_str(": ");
                write_into(out, v, depth + 1, indent);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            pad(out, depth * indent);
            out.push('}');
        }
        Value::List(items) if items.is_empty() => out.push_str("[]"),
        Value::List(items) if items.iter().all(Value::is_scalar) => {
            out.push('[');
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_into(out, v, depth, indent);
            }
            out.push(']');
        }
        Value::List(items) => {
            out.push_str("[\n");
            for (i, v) in items.iter().enumerate() {
                pad(out, (depth + 1) * indent);
                write_into(out, v, depth + 1, indent);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            pad(out, depth * indent);
            out.push(']');
        }
        Value::Str(s) => write_string(out, s),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Byte(n) => {
            out.push_str(&n.to_string());
            out.push('b');
        }
        Value::Short(n) => {
            out.push_str(&n.to_string());
            out.push('s');
        }
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Long(n) => {
            out.push_str(&n.to_string());
            out.push('L');
        }
        Value::Float(n) => {
            out.push_str(&decimal(*n as f64, n.to_string()));
            out.push('f');
        }
        Value::Double(n) => out.push_str(&format_double(*n)),
    }
}

/// Shortest round-trip decimal with a `d` suffix, always carrying a fraction.
///
/// Non-finite values cannot be read back, so NaN becomes zero and infinities clamp
/// to the largest finite double.
pub fn format_double(n: f64) -> String {
    let n = if n.is_nan() {
        0.0
    } else {
        n.clamp(f64::MIN, f64::MAX)
    };
    let mut s = decimal(n, n.to_string());
    s.push('d');
    s
}

fn decimal(n: f64, rendered: String) -> String {
    if !n.is_finite() {
        return "0.0".to_string();
    }
    let mut s = rendered;
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

/// Quote and escape `"` and `\`; nothing else is transformed.
pub fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

fn write_key(out: &mut String, key: &str) {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-'))
        && !key.contains("//")
        && !key.contains("/*");
    if bare {
        out.push_str(key);
    } else {
        write_string(out, key);
    }
}

fn pad(out: &mut String, width: usize) {
    out.extend(std::iter::repeat_n(' ', width));
}
