use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status value of a flagged entry
pub const FLAG_MARKER: &str = "F";

/// Entries keyed by store id, in the order the store returned them
pub type Entries = IndexMap<String, Entry>;

/// Dictionary record as stored remotely
///
/// Only the fields the client reads are typed. Everything else the record
/// carries is kept in `extra` and written back untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq: Option<Freq>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    /// Status with absent treated as empty
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }

    pub fn is_flagged(&self) -> bool {
        self.status() == FLAG_MARKER
    }

    /// Same record with only `status` replaced
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }
}

/// Frequency value, which the source data stores either as a number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Freq {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Freq {
    /// Numbers print the way the store's web console shows them: integral
    /// values without a fractional part, exponent form below `1e-6` and
    /// from `1e21` up, and negative zero as `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Freq::Text(text) => f.write_str(text),
            Freq::Number(number) => {
                if let Some(n) = number.as_i64() {
                    write!(f, "{n}")
                } else if let Some(n) = number.as_u64() {
                    write!(f, "{n}")
                } else if let Some(n) = number.as_f64() {
                    f.write_str(&float_string(n))
                } else {
                    write!(f, "{number}")
                }
            }
        }
    }
}

fn float_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value < 0.0 {
        return format!("-{}", float_string(-value));
    }

    // Shortest round-tripping digits, e.g. "1.5e-7"
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let sign = if n > 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() {
            String::new()
        } else {
            format!(".{rest}")
        };
        format!("{lead}{rest}e{sign}{}", (n - 1).abs())
    }
}

/// Status an entry moves to when its flag is toggled
pub fn toggled_status(current: &str) -> &'static str {
    if current == FLAG_MARKER { "" } else { FLAG_MARKER }
}
