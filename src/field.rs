//! Field model: typed input slots and their configuration.

use serde::{Deserialize, Serialize};

use crate::validators::{Rule, Validator};

/// The input type of a field.
///
/// Determines the rendering strategy only; validation is driven entirely by
/// the validators attached to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	Text,
	Email,
	Password,
	Number,
	Date,
	DateTime,
	Select,
	Checkbox,
	Radio,
	Textarea,
	File,
	Hidden,
}

impl FieldType {
	/// The wire-level name, used as the HTML `type` attribute.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FieldType;
	///
	/// assert_eq!(FieldType::Text.as_str(), "text");
	/// assert_eq!(FieldType::DateTime.as_str(), "datetime");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::Text => "text",
			FieldType::Email => "email",
			FieldType::Password => "password",
			FieldType::Number => "number",
			FieldType::Date => "date",
			FieldType::DateTime => "datetime",
			FieldType::Select => "select",
			FieldType::Checkbox => "checkbox",
			FieldType::Radio => "radio",
			FieldType::Textarea => "textarea",
			FieldType::File => "file",
			FieldType::Hidden => "hidden",
		}
	}
}

/// One choice in a select or radio field.
///
/// `value` is the wire-level string submitted with the form; `label` is the
/// human-readable text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
	pub value: String,
	pub label: String,
	pub selected: bool,
	pub disabled: bool,
}

impl FieldOption {
	/// Create an option from a value and a label.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FieldOption;
	///
	/// let option = FieldOption::new("us", "United States");
	/// assert_eq!(option.value, "us");
	/// assert!(!option.selected);
	/// ```
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
			selected: false,
			disabled: false,
		}
	}

	pub fn selected(mut self) -> Self {
		self.selected = true;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}
}

/// One named, typed input slot within a form.
///
/// A field is pure data plus attached validator metadata: it carries no
/// validation logic of its own. Fields are created through the type-specific
/// constructors ([`FormField::text`], [`FormField::email`], ...) and
/// configured with consuming builder methods.
///
/// # Examples
///
/// ```
/// use formwork::{FormField, Rule, Validator};
///
/// let field = FormField::password("password")
/// 	.required()
/// 	.validate_with(Validator::new(Rule::MinLength(8)))
/// 	.with_help_text("At least 8 characters");
///
/// assert_eq!(field.name, "password");
/// assert!(field.required);
/// assert_eq!(field.validators.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FormField {
	/// Unique key within the owning form; identifies the field in submitted
	/// data and in error reports.
	pub name: String,
	pub field_type: FieldType,
	pub label: Option<String>,
	pub placeholder: Option<String>,
	pub default: Option<serde_json::Value>,
	pub required: bool,
	pub disabled: bool,
	pub readonly: bool,
	pub options: Vec<FieldOption>,
	pub validators: Vec<Validator>,
	/// Free-form attribute pairs emitted verbatim into the rendered markup.
	/// Not escaped: the caller controls this map.
	pub attributes: Vec<(String, String)>,
	pub help_text: Option<String>,
}

impl FormField {
	/// Create a field with an explicit type and a label derived from the name.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		let name = name.into();
		debug_assert!(!name.is_empty(), "field name must be non-empty");
		let label = Some(title_case(&name));
		Self {
			name,
			field_type,
			label,
			placeholder: None,
			default: None,
			required: false,
			disabled: false,
			readonly: false,
			options: Vec::new(),
			validators: Vec::new(),
			attributes: Vec::new(),
			help_text: None,
		}
	}

	/// A plain text field.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldType, FormField};
	///
	/// let field = FormField::text("full_name");
	/// assert_eq!(field.field_type, FieldType::Text);
	/// assert_eq!(field.label.as_deref(), Some("Full Name"));
	/// ```
	pub fn text(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Text)
	}

	/// An email field with a format validator already attached.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FormField;
	///
	/// let field = FormField::email("email");
	/// assert_eq!(field.label.as_deref(), Some("Email"));
	/// assert_eq!(field.validators.len(), 1);
	/// ```
	pub fn email(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Email)
			.with_label("Email")
			.validate_with(Validator::new(Rule::Email).with_message("Invalid email address"))
	}

	pub fn password(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Password).with_label("Password")
	}

	pub fn number(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Number)
	}

	pub fn date(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Date)
	}

	pub fn datetime(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::DateTime)
	}

	pub fn select(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Select)
	}

	pub fn checkbox(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Checkbox)
	}

	pub fn radio(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Radio)
	}

	pub fn textarea(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Textarea)
	}

	pub fn file(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::File)
	}

	/// A hidden field. Carries no label and renders without a wrapper.
	pub fn hidden(name: impl Into<String>) -> Self {
		let mut field = Self::new(name, FieldType::Hidden);
		field.label = None;
		field
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	/// Set the default value, used when submitted data omits this field.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FormField;
	///
	/// let field = FormField::text("country").with_default("us");
	/// assert_eq!(field.default, Some(serde_json::json!("us")));
	/// ```
	pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
		self.default = Some(default.into());
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}

	pub fn readonly(mut self) -> Self {
		self.readonly = true;
		self
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
		self.options = options;
		self
	}

	pub fn with_option(mut self, option: FieldOption) -> Self {
		self.options.push(option);
		self
	}

	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push((key.into(), value.into()));
		self
	}

	/// Append a validator, consuming the field (build-time chaining).
	pub fn validate_with(mut self, validator: Validator) -> Self {
		self.validators.push(validator);
		self
	}

	/// Append a validator in place (post-add chaining via `Form::field_mut`).
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FormField, Rule, Validator};
	///
	/// let mut field = FormField::text("username");
	/// field
	/// 	.add_validator(Validator::new(Rule::MinLength(3)))
	/// 	.add_validator(Validator::new(Rule::MaxLength(20)));
	/// assert_eq!(field.validators.len(), 2);
	/// ```
	pub fn add_validator(&mut self, validator: Validator) -> &mut Self {
		self.validators.push(validator);
		self
	}

	/// The label when set, otherwise the field name. Used in error messages.
	pub fn label_or_name(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.name)
	}
}

/// Humanize a field name: underscores and hyphens become spaces, each word
/// is capitalized.
fn title_case(name: &str) -> String {
	name.split(['_', '-', ' '])
		.filter(|word| !word.is_empty())
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}
