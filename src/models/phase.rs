//! Phase values and phase-spec expansion.
//!
//! Phases are discrete integer time slots. Uploaded data carries them either
//! as real numbers or as loosely formatted text, so a phase list element is
//! kept as a [`PhaseValue`] until validation decides whether it is numeric.
//!
//! # Accepted spec formats
//!
//! | Input | Expansion |
//! |-------|-----------|
//! | `"2-4"` | `[2, 3, 4]` |
//! | `"1,3,5"` | `[1, 3, 5]` |
//! | `"[1, 2]"` | `[1, 2]` |

use serde::{Deserialize, Serialize};

use crate::error::PhaseSpecError;

/// Largest number of phases a single `start-end` range may expand to.
pub const MAX_PHASE_SPAN: i64 = 1000;

/// A single element of a phase list, as delivered by the upstream parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhaseValue {
    /// Integer phase index.
    Integer(i64),
    /// Non-integral number (kept so the value round-trips unchanged).
    Decimal(f64),
    /// Unparsed text cell.
    Text(String),
}

impl PhaseValue {
    /// Coerces the value to a number.
    ///
    /// Blank text coerces to `0.0`, matching spreadsheet-cell coercion.
    /// Other text must be plain decimal notation (`"3"`, `"2.5"`, `"1e2"`);
    /// hex literals such as `"0x10"` and infinities are not numeric.
    /// Returns `None` for text that is not a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PhaseValue::Integer(n) => Some(*n as f64),
            PhaseValue::Decimal(x) => x.is_finite().then_some(*x),
            PhaseValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Some(0.0);
                }
                trimmed.parse::<f64>().ok().filter(|x| x.is_finite())
            }
        }
    }

    /// Whether the value coerces to a number.
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }
}

impl From<i64> for PhaseValue {
    fn from(n: i64) -> Self {
        PhaseValue::Integer(n)
    }
}

impl From<&str> for PhaseValue {
    fn from(s: &str) -> Self {
        PhaseValue::Text(s.to_string())
    }
}

/// Converts a slice of integer phases into phase values.
pub fn phase_values(phases: &[i64]) -> Vec<PhaseValue> {
    phases.iter().copied().map(PhaseValue::Integer).collect()
}

/// Expands a textual phase spec into an ascending, de-duplicated list.
///
/// A spec containing `-` between two integers is an inclusive range; otherwise
/// it is a comma list, optionally wrapped in brackets.
pub fn expand_phase_spec(spec: &str) -> Result<Vec<i64>, PhaseSpecError> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(PhaseSpecError::Empty);
    }

    if let Some((start, end)) = split_range(trimmed) {
        return phase_range(parse_phase(start)?, parse_phase(end)?);
    }

    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    let mut phases = inner
        .split(',')
        .map(parse_phase)
        .collect::<Result<Vec<_>, _>>()?;
    phases.sort_unstable();
    phases.dedup();
    Ok(phases)
}

/// Expands an inclusive range of at most [`MAX_PHASE_SPAN`] phases.
pub fn phase_range(start: i64, end: i64) -> Result<Vec<i64>, PhaseSpecError> {
    if start > end {
        return Err(PhaseSpecError::ReversedRange { start, end });
    }
    match end.checked_sub(start) {
        Some(span) if span < MAX_PHASE_SPAN => Ok((start..=end).collect()),
        _ => Err(PhaseSpecError::RangeTooLarge { start, end }),
    }
}

/// Splits `"a-b"` at the first dash that follows a digit, so a leading
/// minus sign is not mistaken for a range separator.
fn split_range(spec: &str) -> Option<(&str, &str)> {
    let pos = spec.char_indices().find_map(|(i, c)| {
        let preceded_by_digit = spec[..i]
            .trim_end()
            .ends_with(|p: char| p.is_ascii_digit());
        (c == '-' && preceded_by_digit).then_some(i)
    })?;
    Some((&spec[..pos], &spec[pos + 1..]))
}

fn parse_phase(token: &str) -> Result<i64, PhaseSpecError> {
    let token = token.trim();
    token
        .parse::<i64>()
        .map_err(|_| PhaseSpecError::InvalidToken(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_expansion() {
        assert_eq!(expand_phase_spec("2-4").unwrap(), vec![2, 3, 4]);
        assert_eq!(expand_phase_spec(" 1 - 3 ").unwrap(), vec![1, 2, 3]);
        assert_eq!(expand_phase_spec("5-5").unwrap(), vec![5]);
    }

    #[test]
    fn test_comma_list() {
        assert_eq!(expand_phase_spec("1,3,5").unwrap(), vec![1, 3, 5]);
        assert_eq!(expand_phase_spec("5, 1, 3, 3").unwrap(), vec![1, 3, 5]);
        assert_eq!(expand_phase_spec("[1,2,3]").unwrap(), vec![1, 2, 3]);
        assert_eq!(expand_phase_spec("7").unwrap(), vec![7]);
    }

    #[test]
    fn test_invalid_specs() {
        assert_eq!(expand_phase_spec("  "), Err(PhaseSpecError::Empty));
        assert_eq!(
            expand_phase_spec("4-2"),
            Err(PhaseSpecError::ReversedRange { start: 4, end: 2 })
        );
        assert_eq!(
            expand_phase_spec("1,x,3"),
            Err(PhaseSpecError::InvalidToken("x".into()))
        );
        assert!(expand_phase_spec("a-b").is_err());
    }

    #[test]
    fn test_range_span_is_bounded() {
        assert_eq!(expand_phase_spec("1-1000").unwrap().len(), 1000);
        assert_eq!(
            expand_phase_spec("1-1001"),
            Err(PhaseSpecError::RangeTooLarge { start: 1, end: 1001 })
        );
        assert_eq!(
            expand_phase_spec("1-9223372036854775807"),
            Err(PhaseSpecError::RangeTooLarge {
                start: 1,
                end: i64::MAX
            })
        );
        assert_eq!(
            expand_phase_spec("-9223372036854775808-9223372036854775807"),
            Err(PhaseSpecError::RangeTooLarge {
                start: i64::MIN,
                end: i64::MAX
            })
        );
        assert_eq!(phase_range(-5, -3).unwrap(), vec![-5, -4, -3]);
    }

    #[test]
    fn test_phase_value_coercion() {
        assert_eq!(PhaseValue::Integer(3).as_number(), Some(3.0));
        assert_eq!(PhaseValue::Text(" 4 ".into()).as_number(), Some(4.0));
        assert_eq!(PhaseValue::Text("".into()).as_number(), Some(0.0));
        assert!(!PhaseValue::Text("abc".into()).is_numeric());
        assert!(!PhaseValue::Decimal(f64::NAN).is_numeric());
    }

    #[test]
    fn test_phase_value_rejects_hex_and_infinity() {
        // Only plain decimal notation counts; hex and infinities do not.
        assert!(!PhaseValue::Text("0x10".into()).is_numeric());
        assert!(!PhaseValue::Text("Infinity".into()).is_numeric());
        assert!(!PhaseValue::Text("inf".into()).is_numeric());
        assert!(PhaseValue::Text("1e2".into()).is_numeric());
    }

    #[test]
    fn test_phase_value_serde_shape() {
        let values: Vec<PhaseValue> = serde_json::from_str(r#"[1, 2.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                PhaseValue::Integer(1),
                PhaseValue::Decimal(2.5),
                PhaseValue::Text("x".into())
            ]
        );
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[1,2.5,"x"]"#);
    }
}
