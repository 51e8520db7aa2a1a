//! HTML rendering for fields, plus the escaping helpers it relies on.
//!
//! Submitted and display values are always escaped (attribute context in
//! attributes, content context in element bodies). Labels, placeholders,
//! help text, and the free-form attribute map are caller-controlled and pass
//! through verbatim; that trust boundary belongs to the caller.

use serde_json::Value;

use crate::field::{FieldType, FormField};
use crate::validators::value_to_string;

/// Escape HTML special characters for text content.
///
/// # Examples
///
/// ```
/// use formwork::escape_html;
///
/// let escaped = escape_html("<script>alert('xss')</script>");
/// assert_eq!(escaped, "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
	let mut output = String::with_capacity(input.len());
	for ch in input.chars() {
		match ch {
			'&' => output.push_str("&amp;"),
			'<' => output.push_str("&lt;"),
			'>' => output.push_str("&gt;"),
			'"' => output.push_str("&quot;"),
			'\'' => output.push_str("&#x27;"),
			_ => output.push(ch),
		}
	}
	output
}

/// Escape a string for use inside a quoted HTML attribute.
///
/// Same as [`escape_html`] plus newline escapes, so multi-line values cannot
/// break out of the attribute.
pub fn escape_attribute(input: &str) -> String {
	let mut output = String::with_capacity(input.len());
	for ch in input.chars() {
		match ch {
			'&' => output.push_str("&amp;"),
			'<' => output.push_str("&lt;"),
			'>' => output.push_str("&gt;"),
			'"' => output.push_str("&quot;"),
			'\'' => output.push_str("&#x27;"),
			'\n' => output.push_str("&#10;"),
			'\r' => output.push_str("&#13;"),
			_ => output.push(ch),
		}
	}
	output
}

/// Render one field with its resolved display value.
///
/// Pure function of the field definition and the value: hidden fields render
/// as a bare input, everything else wraps in a `<div class="form-group">`
/// with label, control, and trailing help text.
///
/// # Examples
///
/// ```
/// use formwork::{render_field, FormField};
/// use serde_json::json;
///
/// let html = render_field(&FormField::hidden("token"), &json!("abc"));
/// assert_eq!(html, "<input type=\"hidden\" name=\"token\" value=\"abc\">");
/// ```
pub fn render_field(field: &FormField, value: &Value) -> String {
	let rendered = value_to_string(value);
	let escaped_value = escape_attribute(&rendered);

	if field.field_type == FieldType::Hidden {
		return format!(
			"<input type=\"hidden\" name=\"{}\" value=\"{}\">",
			field.name, escaped_value
		);
	}

	let extra = render_attributes(&field.attributes);
	let required = if field.required { " required" } else { "" };
	let disabled = if field.disabled { " disabled" } else { "" };
	let readonly = if field.readonly { " readonly" } else { "" };
	let placeholder = field.placeholder.as_deref().unwrap_or("");

	let mut parts = vec!["<div class=\"form-group\">".to_string()];

	if let Some(label) = &field.label
		&& field.field_type != FieldType::Checkbox
	{
		parts.push(format!("<label for=\"{}\">{}</label>", field.name, label));
	}

	match field.field_type {
		FieldType::Textarea => {
			// Value goes in as element content, not an attribute, so it is
			// escaped for the content context exactly once.
			parts.push(format!(
				"<textarea name=\"{0}\" id=\"{0}\" placeholder=\"{1}\"{2}{3}{4}{5}>{6}</textarea>",
				field.name,
				placeholder,
				required,
				disabled,
				readonly,
				extra,
				escape_html(&rendered)
			));
		}
		FieldType::Select => {
			parts.push(format!(
				"<select name=\"{0}\" id=\"{0}\"{1}{2}{3}>",
				field.name, required, disabled, extra
			));
			for option in &field.options {
				// The current value wins over the option's own flag.
				let selected = if option.value == rendered { " selected" } else { "" };
				let option_disabled = if option.disabled { " disabled" } else { "" };
				parts.push(format!(
					"<option value=\"{}\"{}{}>{}</option>",
					escape_attribute(&option.value),
					selected,
					option_disabled,
					escape_html(&option.label)
				));
			}
			parts.push("</select>".to_string());
		}
		FieldType::Radio => {
			for option in &field.options {
				let checked = if option.value == rendered { " checked" } else { "" };
				let option_disabled = if option.disabled || field.disabled {
					" disabled"
				} else {
					""
				};
				parts.push(format!(
					"<label><input type=\"radio\" name=\"{}\" value=\"{}\"{}{}{}> {}</label>",
					field.name,
					escape_attribute(&option.value),
					checked,
					option_disabled,
					extra,
					escape_html(&option.label)
				));
			}
		}
		FieldType::Checkbox => {
			let checked = if is_truthy(value) { " checked" } else { "" };
			parts.push(format!(
				"<label><input type=\"checkbox\" name=\"{0}\" id=\"{0}\" value=\"1\"{1}{2}{3}> {4}</label>",
				field.name,
				checked,
				disabled,
				extra,
				field.label.as_deref().unwrap_or("")
			));
		}
		_ => {
			parts.push(format!(
				"<input type=\"{}\" name=\"{1}\" id=\"{1}\" value=\"{2}\" placeholder=\"{3}\"{4}{5}{6}{7}>",
				field.field_type.as_str(),
				field.name,
				escaped_value,
				placeholder,
				required,
				disabled,
				readonly,
				extra
			));
		}
	}

	if let Some(help_text) = &field.help_text {
		parts.push(format!("<small>{help_text}</small>"));
	}

	parts.push("</div>".to_string());
	parts.join("\n")
}

fn render_attributes(attributes: &[(String, String)]) -> String {
	attributes
		.iter()
		.map(|(key, value)| format!(" {key}=\"{value}\""))
		.collect()
}

/// Checkbox semantics: null, false, zero, and the empty string are unchecked.
fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(items) => !items.is_empty(),
		Value::Object(entries) => !entries.is_empty(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::FieldOption;
	use rstest::rstest;
	use serde_json::json;

	#[test]
	fn test_hidden_renders_bare_input() {
		let html = render_field(&FormField::hidden("token"), &json!("abc123"));
		assert_eq!(
			html,
			"<input type=\"hidden\" name=\"token\" value=\"abc123\">"
		);
	}

	#[test]
	fn test_text_input_carries_value_and_flags() {
		let field = FormField::text("username").required().readonly();
		let html = render_field(&field, &json!("john"));

		assert!(html.starts_with("<div class=\"form-group\">"));
		assert!(html.contains("<label for=\"username\">Username</label>"));
		assert!(html.contains(
			"<input type=\"text\" name=\"username\" id=\"username\" value=\"john\" placeholder=\"\" required readonly>"
		));
		assert!(html.ends_with("</div>"));
	}

	#[test]
	fn test_boolean_attributes_absent_when_unset() {
		let html = render_field(&FormField::text("username"), &json!(""));
		assert!(!html.contains(" required"));
		assert!(!html.contains(" disabled"));
		assert!(!html.contains(" readonly"));
	}

	#[rstest]
	#[case(json!("<script>alert('x')</script>"))]
	#[case(json!("\"><script>"))]
	fn test_value_is_escaped(#[case] value: Value) {
		let html = render_field(&FormField::text("comment"), &value);
		assert!(!html.contains("<script>"));
		assert!(html.contains("&lt;script&gt;"));
	}

	#[test]
	fn test_textarea_escapes_content_not_attribute() {
		let field = FormField::textarea("bio");
		let html = render_field(&field, &json!("a < b & c"));
		assert!(html.contains(">a &lt; b &amp; c</textarea>"));
	}

	#[test]
	fn test_select_marks_only_matching_option() {
		let field = FormField::select("country").with_options(vec![
			FieldOption::new("us", "United States"),
			// A stale flag loses to the current value.
			FieldOption::new("uk", "United Kingdom").selected(),
			FieldOption::new("ca", "Canada"),
		]);
		let html = render_field(&field, &json!("us"));

		assert!(html.contains("<option value=\"us\" selected>United States</option>"));
		assert!(html.contains("<option value=\"uk\">United Kingdom</option>"));
		assert!(html.contains("<option value=\"ca\">Canada</option>"));
	}

	#[test]
	fn test_select_compares_as_strings() {
		let field = FormField::select("rating")
			.with_options(vec![FieldOption::new("3", "Three"), FieldOption::new("4", "Four")]);
		let html = render_field(&field, &json!(3));
		assert!(html.contains("<option value=\"3\" selected>Three</option>"));
	}

	#[test]
	fn test_select_renders_disabled_option() {
		let field = FormField::select("plan")
			.with_options(vec![FieldOption::new("pro", "Pro").disabled()]);
		let html = render_field(&field, &json!(null));
		assert!(html.contains("<option value=\"pro\" disabled>Pro</option>"));
	}

	#[rstest]
	#[case(json!(true), true)]
	#[case(json!(1), true)]
	#[case(json!("yes"), true)]
	#[case(json!(false), false)]
	#[case(json!(0), false)]
	#[case(json!(""), false)]
	#[case(json!(null), false)]
	fn test_checkbox_checked_iff_truthy(#[case] value: Value, #[case] checked: bool) {
		let field = FormField::checkbox("remember_me").with_label("Remember me");
		let html = render_field(&field, &value);
		assert_eq!(html.contains(" checked"), checked, "value: {value}");
	}

	#[test]
	fn test_checkbox_label_is_inline() {
		let field = FormField::checkbox("remember_me").with_label("Remember me");
		let html = render_field(&field, &json!(true));

		assert!(!html.contains("<label for="));
		assert!(html.contains("> Remember me</label>"));
	}

	#[test]
	fn test_radio_renders_one_input_per_option() {
		let field = FormField::radio("size").with_options(vec![
			FieldOption::new("s", "Small"),
			FieldOption::new("m", "Medium"),
		]);
		let html = render_field(&field, &json!("m"));

		assert!(html.contains("<input type=\"radio\" name=\"size\" value=\"s\"> Small"));
		assert!(html.contains("<input type=\"radio\" name=\"size\" value=\"m\" checked> Medium"));
	}

	#[test]
	fn test_help_text_trails_the_control() {
		let field = FormField::text("username").with_help_text("Letters only");
		let html = render_field(&field, &json!(null));

		let control = html.find("<input").unwrap();
		let help = html.find("<small>Letters only</small>").unwrap();
		assert!(help > control);
	}

	#[test]
	fn test_free_form_attributes_pass_through() {
		let field = FormField::text("username").with_attribute("data-role", "login");
		let html = render_field(&field, &json!(null));
		assert!(html.contains(" data-role=\"login\""));
	}

	#[test]
	fn test_null_value_renders_empty() {
		let html = render_field(&FormField::text("username"), &json!(null));
		assert!(html.contains("value=\"\""));
	}

	#[test]
	fn test_escape_attribute_neutralizes_newlines() {
		assert_eq!(escape_attribute("a\nb"), "a&#10;b");
		assert_eq!(escape_attribute("a\"b"), "a&quot;b");
	}
}
