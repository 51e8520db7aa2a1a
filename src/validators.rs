//! Validation rules and their predicate logic.
//!
//! Every predicate is a pure function of the value and the rule parameter:
//! no side effects, and `false` simply means invalid. Non-required rules
//! treat blank values as valid; requiredness is orthogonal and checked
//! separately, so an optional empty field never produces format errors.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::form::FormResult;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
		.expect("EMAIL_REGEX: invalid regex pattern")
});

// Scheme, then a first character that is not /$.?# or whitespace, then any
// non-whitespace run.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("URL_REGEX: invalid regex pattern")
});

/// A validation rule, carrying its typed parameter.
///
/// Dispatch runs through [`Rule::evaluate`], so new rules slot in without
/// touching call sites.
#[derive(Clone)]
pub enum Rule {
	Required,
	Email,
	Url,
	MinLength(usize),
	MaxLength(usize),
	MinValue(f64),
	MaxValue(f64),
	Pattern(Regex),
	Custom(Arc<dyn Fn(&Value) -> bool + Send + Sync>),
}

impl Rule {
	/// Compile a pattern rule, failing fast on a malformed expression.
	///
	/// The pattern matches from the start of the value (it need not consume
	/// the whole string).
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Rule;
	///
	/// let rule = Rule::pattern(r"[A-Z]{3}").unwrap();
	/// assert!(rule.evaluate(&serde_json::json!("ABC-123")));
	/// assert!(!rule.evaluate(&serde_json::json!("ab")));
	///
	/// assert!(Rule::pattern(r"[unclosed").is_err());
	/// ```
	pub fn pattern(pattern: &str) -> FormResult<Self> {
		Ok(Self::Pattern(Regex::new(pattern)?))
	}

	/// Wrap a caller-supplied predicate as a rule.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Rule;
	///
	/// let even = Rule::custom(|value| value.as_i64().is_some_and(|n| n % 2 == 0));
	/// assert!(even.evaluate(&serde_json::json!(4)));
	/// assert!(!even.evaluate(&serde_json::json!(3)));
	/// ```
	pub fn custom<F>(predicate: F) -> Self
	where
		F: Fn(&Value) -> bool + Send + Sync + 'static,
	{
		Self::Custom(Arc::new(predicate))
	}

	/// Stable rule identifier used in error reports.
	pub fn id(&self) -> &'static str {
		match self {
			Rule::Required => "required",
			Rule::Email => "email",
			Rule::Url => "url",
			Rule::MinLength(_) => "min_length",
			Rule::MaxLength(_) => "max_length",
			Rule::MinValue(_) => "min_value",
			Rule::MaxValue(_) => "max_value",
			Rule::Pattern(_) => "pattern",
			Rule::Custom(_) => "custom",
		}
	}

	/// Evaluate this rule against a resolved value.
	pub fn evaluate(&self, value: &Value) -> bool {
		match self {
			Rule::Required => required(value),
			Rule::Email => email(value),
			Rule::Url => url(value),
			Rule::MinLength(min) => min_length(value, *min),
			Rule::MaxLength(max) => max_length(value, *max),
			Rule::MinValue(min) => min_value(value, *min),
			Rule::MaxValue(max) => max_value(value, *max),
			Rule::Pattern(regex) => pattern(value, regex),
			Rule::Custom(predicate) => predicate(value),
		}
	}

	/// Default message for a failed evaluation of this rule.
	///
	/// `label` is the owning field's label (or name); `value` lets numeric
	/// bound rules distinguish an out-of-range number from a value that is
	/// not a number at all.
	pub(crate) fn failure_message(&self, label: &str, value: &Value) -> String {
		match self {
			Rule::Required => format!("{label} is required"),
			Rule::Email => "Invalid email address".to_string(),
			Rule::Url => "Invalid URL".to_string(),
			Rule::MinLength(min) => format!("Minimum length is {min}"),
			Rule::MaxLength(max) => format!("Maximum length is {max}"),
			Rule::MinValue(_) | Rule::MaxValue(_) if coerce_number(value).is_none() => {
				format!("{label} must be a number")
			}
			Rule::MinValue(min) => format!("Minimum value is {min}"),
			Rule::MaxValue(max) => format!("Maximum value is {max}"),
			Rule::Pattern(_) => "Invalid format".to_string(),
			Rule::Custom(_) => format!("{label} validation failed"),
		}
	}
}

impl fmt::Debug for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Rule::Required => f.write_str("Required"),
			Rule::Email => f.write_str("Email"),
			Rule::Url => f.write_str("Url"),
			Rule::MinLength(min) => write!(f, "MinLength({min})"),
			Rule::MaxLength(max) => write!(f, "MaxLength({max})"),
			Rule::MinValue(min) => write!(f, "MinValue({min})"),
			Rule::MaxValue(max) => write!(f, "MaxValue({max})"),
			Rule::Pattern(regex) => write!(f, "Pattern({})", regex.as_str()),
			Rule::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

/// A rule plus an optional custom error message, attached to a field.
///
/// # Examples
///
/// ```
/// use formwork::{Rule, Validator};
///
/// let validator = Validator::new(Rule::MinLength(8)).with_message("Too short");
/// assert_eq!(validator.rule.id(), "min_length");
/// assert_eq!(validator.message.as_deref(), Some("Too short"));
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
	pub rule: Rule,
	pub message: Option<String>,
}

impl Validator {
	pub fn new(rule: Rule) -> Self {
		Self {
			rule,
			message: None,
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

/// True unless the value is absent/null or a string that trims to empty.
///
/// Present falsy values (`0`, `false`) count as provided.
///
/// # Examples
///
/// ```
/// use formwork::validators::required;
/// use serde_json::json;
///
/// assert!(!required(&json!(null)));
/// assert!(!required(&json!("   ")));
/// assert!(required(&json!(0)));
/// assert!(required(&json!(false)));
/// ```
pub fn required(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::String(s) => !s.trim().is_empty(),
		_ => true,
	}
}

/// Email format check. Blank values are valid.
pub fn email(value: &Value) -> bool {
	if is_blank(value) {
		return true;
	}
	EMAIL_REGEX.is_match(&value_to_string(value))
}

/// HTTP/HTTPS URL check. Blank values are valid.
pub fn url(value: &Value) -> bool {
	if is_blank(value) {
		return true;
	}
	URL_REGEX.is_match(&value_to_string(value))
}

/// Character count of the string rendering is at least `min`. Blank valid.
pub fn min_length(value: &Value, min: usize) -> bool {
	if is_blank(value) {
		return true;
	}
	value_to_string(value).chars().count() >= min
}

/// Character count of the string rendering is at most `max`. Blank valid.
pub fn max_length(value: &Value, max: usize) -> bool {
	if is_blank(value) {
		return true;
	}
	value_to_string(value).chars().count() <= max
}

/// Numeric coercion of the value is at least `min`. Null is valid; a value
/// that does not coerce fails.
pub fn min_value(value: &Value, min: f64) -> bool {
	match value {
		Value::Null => true,
		_ => coerce_number(value).is_some_and(|n| n >= min),
	}
}

/// Numeric coercion of the value is at most `max`. Null is valid; a value
/// that does not coerce fails.
pub fn max_value(value: &Value, max: f64) -> bool {
	match value {
		Value::Null => true,
		_ => coerce_number(value).is_some_and(|n| n <= max),
	}
}

/// The pattern matches starting at the beginning of the string rendering
/// (it need not reach the end). Blank values are valid.
pub fn pattern(value: &Value, regex: &Regex) -> bool {
	if is_blank(value) {
		return true;
	}
	let rendered = value_to_string(value);
	regex.find(&rendered).is_some_and(|m| m.start() == 0)
}

/// Null or the empty string.
fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.is_empty(),
		_ => false,
	}
}

/// String rendering used for length checks, pattern matching, and display.
pub fn value_to_string(value: &Value) -> Cow<'_, str> {
	match value {
		Value::Null => Cow::Borrowed(""),
		Value::String(s) => Cow::Borrowed(s),
		Value::Bool(b) => Cow::Owned(b.to_string()),
		Value::Number(n) => Cow::Owned(n.to_string()),
		other => Cow::Owned(other.to_string()),
	}
}

pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse().ok(),
		Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
		_ => None,
	}
}
