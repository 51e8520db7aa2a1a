//! Form model: an ordered collection of fields, orchestrating validation
//! and rendering.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::field::{FieldOption, FormField};
use crate::render;
use crate::validators::{self, Rule};

/// Errors raised while building a form or its validators.
///
/// Validation failures are never errors; they are reported in
/// [`FormData::errors`].
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("invalid validation pattern: {0}")]
	InvalidPattern(#[from] regex::Error),
}

pub type FormResult<T> = Result<T, FormError>;

/// One validation failure: the field it belongs to, the stable rule
/// identifier, and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
	pub field: String,
	pub rule: String,
	pub message: String,
}

/// The result of validating submitted data against a form.
///
/// `fields` maps every field name to the resolved value actually used during
/// validation (the submitted value, or the field default when absent).
/// `valid` is true iff `errors` is empty. Errors are ordered by field
/// declaration order, then validator attachment order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormData {
	pub fields: HashMap<String, Value>,
	pub valid: bool,
	pub errors: Vec<ValidationError>,
}

impl FormData {
	/// Serialize the result to a JSON value
	/// (`{fields, valid, errors: [{field, rule, message}]}`).
	pub fn to_json(&self) -> serde_json::Result<Value> {
		serde_json::to_value(self)
	}
}

/// An ordered collection of fields with form-level metadata.
///
/// Declaration order drives both validation and rendering order. The form
/// owns its fields exclusively. Build the form first, then share it freely:
/// [`Form::validate`] and [`Form::render`] take `&self` and never mutate.
///
/// # Examples
///
/// ```
/// use formwork::{Form, FormField, Rule, Validator};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let form = Form::new("signup")
/// 	.email("email")
/// 	.field(
/// 		FormField::password("password")
/// 			.required()
/// 			.validate_with(Validator::new(Rule::MinLength(8))),
/// 	);
///
/// let mut data = HashMap::new();
/// data.insert("email".to_string(), json!("user@example.com"));
/// data.insert("password".to_string(), json!("correct horse"));
///
/// let result = form.validate(&data);
/// assert!(result.valid);
/// ```
#[derive(Debug, Clone)]
pub struct Form {
	pub name: String,
	fields: Vec<FormField>,
	pub method: String,
	pub action: String,
	pub enctype: String,
	/// Free-form attribute pairs emitted verbatim into the `<form>` tag.
	pub attributes: Vec<(String, String)>,
}

impl Form {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: Vec::new(),
			method: "POST".to_string(),
			action: String::new(),
			enctype: "application/x-www-form-urlencoded".to_string(),
			attributes: Vec::new(),
		}
	}

	/// Add a field, keeping declaration order.
	///
	/// A field whose name matches an existing field replaces it in place
	/// (position preserved), so names stay unique within the form.
	pub fn add_field(&mut self, field: FormField) -> &mut Self {
		match self.fields.iter_mut().find(|f| f.name == field.name) {
			Some(existing) => *existing = field,
			None => self.fields.push(field),
		}
		self
	}

	/// Consuming counterpart of [`Form::add_field`], for build chains.
	pub fn field(mut self, field: FormField) -> Self {
		self.add_field(field);
		self
	}

	/// Add a text field with a label derived from the name.
	pub fn text(self, name: impl Into<String>) -> Self {
		self.field(FormField::text(name))
	}

	/// Add an email field; a format validator is attached automatically.
	pub fn email(self, name: impl Into<String>) -> Self {
		self.field(FormField::email(name))
	}

	pub fn password(self, name: impl Into<String>) -> Self {
		self.field(FormField::password(name))
	}

	pub fn number(self, name: impl Into<String>) -> Self {
		self.field(FormField::number(name))
	}

	pub fn date(self, name: impl Into<String>) -> Self {
		self.field(FormField::date(name))
	}

	/// Add a select field from `(value, label)` pairs.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Form;
	///
	/// let form = Form::new("profile").select(
	/// 	"country",
	/// 	&[("us", "United States"), ("uk", "United Kingdom")],
	/// );
	/// assert_eq!(form.get_field("country").unwrap().options.len(), 2);
	/// ```
	pub fn select(self, name: impl Into<String>, options: &[(&str, &str)]) -> Self {
		let options = options
			.iter()
			.map(|(value, label)| FieldOption::new(*value, *label))
			.collect();
		self.field(FormField::select(name).with_options(options))
	}

	pub fn checkbox(self, name: impl Into<String>) -> Self {
		self.field(FormField::checkbox(name))
	}

	pub fn textarea(self, name: impl Into<String>) -> Self {
		self.field(FormField::textarea(name))
	}

	/// Add a hidden field carrying a fixed value.
	pub fn hidden(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.field(FormField::hidden(name).with_default(value))
	}

	pub fn with_method(mut self, method: impl Into<String>) -> Self {
		self.method = method.into();
		self
	}

	pub fn with_action(mut self, action: impl Into<String>) -> Self {
		self.action = action.into();
		self
	}

	pub fn with_enctype(mut self, enctype: impl Into<String>) -> Self {
		self.enctype = enctype.into();
		self
	}

	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push((key.into(), value.into()));
		self
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[FormField] {
		&self.fields
	}

	pub fn get_field(&self, name: &str) -> Option<&FormField> {
		self.fields.iter().find(|f| f.name == name)
	}

	/// Mutable access for post-add configuration, e.g. attaching validators.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{Form, Rule, Validator};
	///
	/// let mut form = Form::new("register").text("name");
	/// if let Some(field) = form.field_mut("name") {
	/// 	field.add_validator(Validator::new(Rule::MinLength(2)));
	/// }
	/// assert_eq!(form.get_field("name").unwrap().validators.len(), 1);
	/// ```
	pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
		self.fields.iter_mut().find(|f| f.name == name)
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	/// Validate submitted data against every field, in declaration order.
	///
	/// For each field the resolved value is the submitted value when present,
	/// else the field default, else null. A required field whose resolved
	/// value fails the required check records exactly one `required` error
	/// and skips its remaining validators. Every resolved value lands in the
	/// result map regardless of validity.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{Form, FormField, Rule, Validator};
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let form = Form::new("profile").field(
	/// 	FormField::number("age")
	/// 		.validate_with(Validator::new(Rule::MaxValue(120.0))),
	/// );
	///
	/// let mut data = HashMap::new();
	/// data.insert("age".to_string(), json!(150));
	///
	/// let result = form.validate(&data);
	/// assert!(!result.valid);
	/// assert_eq!(result.errors[0].rule, "max_value");
	/// assert_eq!(result.errors[0].message, "Maximum value is 120");
	/// ```
	pub fn validate(&self, data: &HashMap<String, Value>) -> FormData {
		let mut errors = Vec::new();
		let mut fields = HashMap::with_capacity(self.fields.len());

		for field in &self.fields {
			let value = data
				.get(&field.name)
				.cloned()
				.or_else(|| field.default.clone())
				.unwrap_or(Value::Null);

			if field.required && !validators::required(&value) {
				errors.push(ValidationError {
					field: field.name.clone(),
					rule: Rule::Required.id().to_string(),
					message: Rule::Required.failure_message(field.label_or_name(), &value),
				});
				fields.insert(field.name.clone(), value);
				continue;
			}

			for validator in &field.validators {
				if !validator.rule.evaluate(&value) {
					let message = validator.message.clone().unwrap_or_else(|| {
						validator
							.rule
							.failure_message(field.label_or_name(), &value)
					});
					errors.push(ValidationError {
						field: field.name.clone(),
						rule: validator.rule.id().to_string(),
						message,
					});
				}
			}

			fields.insert(field.name.clone(), value);
		}

		let valid = errors.is_empty();
		tracing::debug!(form = %self.name, errors = errors.len(), valid, "form validated");

		FormData {
			fields,
			valid,
			errors,
		}
	}

	/// Render the form to HTML, prefilling field values from `data`.
	///
	/// Each field resolves its display value the same way validation does:
	/// submitted value, else default, else null. The output is a complete
	/// `<form>` element with a trailing submit button; the caller is
	/// responsible for embedding it in a page.
	pub fn render(&self, data: Option<&HashMap<String, Value>>) -> String {
		let attrs: String = self
			.attributes
			.iter()
			.map(|(key, value)| format!(" {key}=\"{value}\""))
			.collect();

		let mut parts = vec![format!(
			"<form name=\"{}\" method=\"{}\" action=\"{}\" enctype=\"{}\"{}>",
			self.name, self.method, self.action, self.enctype, attrs
		)];

		for field in &self.fields {
			let value = data
				.and_then(|d| d.get(&field.name))
				.cloned()
				.or_else(|| field.default.clone())
				.unwrap_or(Value::Null);
			parts.push(render::render_field(field, &value));
		}

		parts.push("<button type=\"submit\">Submit</button>".to_string());
		parts.push("</form>".to_string());
		parts.join("\n")
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new("form")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::validators::Validator;
	use serde_json::json;

	fn data(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect()
	}

	#[test]
	fn test_valid_iff_no_errors() {
		let form = Form::new("login").email("email");

		let ok = form.validate(&data(&[("email", json!("user@example.com"))]));
		assert!(ok.valid);
		assert!(ok.errors.is_empty());

		let bad = form.validate(&data(&[("email", json!("not-an-email"))]));
		assert!(!bad.valid);
		assert_eq!(bad.errors.len(), 1);
		assert_eq!(bad.errors[0].rule, "email");
	}

	#[test]
	fn test_required_short_circuits_remaining_validators() {
		let form = Form::new("login").field(
			FormField::password("password")
				.required()
				.validate_with(Validator::new(Rule::MinLength(8))),
		);

		let result = form.validate(&data(&[("password", json!(""))]));
		assert!(!result.valid);
		assert_eq!(result.errors.len(), 1);
		assert_eq!(result.errors[0].rule, "required");
		assert_eq!(result.errors[0].field, "password");
	}

	#[test]
	fn test_optional_blank_field_raises_no_format_errors() {
		let form = Form::new("profile").field(
			FormField::text("website")
				.validate_with(Validator::new(Rule::Url))
				.validate_with(Validator::new(Rule::MinLength(10))),
		);

		let result = form.validate(&HashMap::new());
		assert!(result.valid);
	}

	#[test]
	fn test_absent_value_falls_back_to_default() {
		let form = Form::new("profile").field(FormField::text("country").with_default("us"));

		let result = form.validate(&HashMap::new());
		assert_eq!(result.fields.get("country"), Some(&json!("us")));
	}

	#[test]
	fn test_resolved_values_recorded_even_when_invalid() {
		let form = Form::new("login").field(FormField::text("username").required());

		let result = form.validate(&data(&[("username", json!(""))]));
		assert!(!result.valid);
		assert_eq!(result.fields.get("username"), Some(&json!("")));
	}

	#[test]
	fn test_error_order_follows_declaration_then_attachment() {
		let form = Form::new("register")
			.field(
				FormField::text("username")
					.required()
					.validate_with(Validator::new(Rule::MinLength(3)))
					.validate_with(Validator::new(Rule::MaxLength(5))),
			)
			.field(FormField::number("age").validate_with(Validator::new(Rule::MaxValue(120.0))));

		let result = form.validate(&data(&[
			("username", json!("this name is far too long")),
			("age", json!(500)),
		]));

		let rules: Vec<_> = result.errors.iter().map(|e| e.rule.as_str()).collect();
		assert_eq!(rules, vec!["max_length", "max_value"]);
		let fields: Vec<_> = result.errors.iter().map(|e| e.field.as_str()).collect();
		assert_eq!(fields, vec!["username", "age"]);
	}

	#[test]
	fn test_custom_message_overrides_default() {
		let form = Form::new("login").field(
			FormField::password("password")
				.validate_with(Validator::new(Rule::MinLength(8)).with_message("Too short")),
		);

		let result = form.validate(&data(&[("password", json!("abc"))]));
		assert_eq!(result.errors[0].message, "Too short");
	}

	#[test]
	fn test_coercion_failure_reported_as_validation_error() {
		let form = Form::new("profile").field(
			FormField::number("age")
				.with_label("Age")
				.validate_with(Validator::new(Rule::MinValue(0.0))),
		);

		let result = form.validate(&data(&[("age", json!("abc"))]));
		assert!(!result.valid);
		assert_eq!(result.errors[0].rule, "min_value");
		assert_eq!(result.errors[0].message, "Age must be a number");
	}

	#[test]
	fn test_validate_is_idempotent() {
		let form = Form::new("login")
			.email("email")
			.field(FormField::password("password").required());
		let payload = data(&[("email", json!("bad")), ("password", json!(""))]);

		assert_eq!(form.validate(&payload), form.validate(&payload));
	}

	#[test]
	fn test_duplicate_name_replaces_in_place() {
		let form = Form::new("profile")
			.text("name")
			.email("contact")
			.field(FormField::textarea("name").required());

		assert_eq!(form.field_count(), 2);
		let names: Vec<_> = form.fields().iter().map(|f| f.name.as_str()).collect();
		assert_eq!(names, vec!["name", "contact"]);
		assert_eq!(
			form.get_field("name").unwrap().field_type,
			crate::FieldType::Textarea
		);
	}

	#[test]
	fn test_extra_data_is_ignored() {
		let form = Form::new("login").text("username");

		let result = form.validate(&data(&[
			("username", json!("john")),
			("unexpected", json!("ignored")),
		]));
		assert!(result.valid);
		assert!(!result.fields.contains_key("unexpected"));
	}

	#[test]
	fn test_form_data_serialization_shape() {
		let form = Form::new("login").field(FormField::text("username").required());
		let result = form.validate(&HashMap::new());

		let json = result.to_json().unwrap();
		assert_eq!(json["valid"], json!(false));
		assert_eq!(json["fields"]["username"], json!(null));
		assert_eq!(json["errors"][0]["field"], json!("username"));
		assert_eq!(json["errors"][0]["rule"], json!("required"));
		assert!(json["errors"][0]["message"].as_str().unwrap().contains("required"));
	}

	#[test]
	fn test_form_defaults() {
		let form = Form::default();
		assert_eq!(form.name, "form");
		assert_eq!(form.method, "POST");
		assert_eq!(form.enctype, "application/x-www-form-urlencoded");
		assert_eq!(form.field_count(), 0);
	}
}
