//! Stock form compositions, expressed entirely through the public API.

use crate::field::FormField;
use crate::form::Form;
use crate::validators::{Rule, Validator};

/// Factory for commonly needed forms.
///
/// # Examples
///
/// ```
/// use formwork::FormBuilder;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let form = FormBuilder::login_form();
///
/// let mut data = HashMap::new();
/// data.insert("email".to_string(), json!("user@example.com"));
/// data.insert("password".to_string(), json!("secret123"));
///
/// assert!(form.validate(&data).valid);
/// ```
pub struct FormBuilder;

impl FormBuilder {
	/// A blank form with the given name.
	pub fn create(name: impl Into<String>) -> Form {
		Form::new(name)
	}

	/// Email + password + "remember me" checkbox.
	pub fn login_form() -> Form {
		Form::new("login")
			.field(FormField::email("email").required())
			.field(FormField::password("password").required())
			.field(FormField::checkbox("remember_me").with_label("Remember me"))
	}

	/// Name, email, password with confirmation.
	pub fn registration_form() -> Form {
		Form::new("register")
			.field(
				FormField::text("name")
					.with_label("Full Name")
					.required()
					.validate_with(Validator::new(Rule::MinLength(2))),
			)
			.field(FormField::email("email").required())
			.field(
				FormField::password("password")
					.required()
					.validate_with(Validator::new(Rule::MinLength(8))),
			)
			.field(
				FormField::password("confirm_password")
					.with_label("Confirm Password")
					.required(),
			)
	}

	/// Name, email, subject, and a free-text message.
	pub fn contact_form() -> Form {
		Form::new("contact")
			.field(FormField::text("name").with_label("Your Name").required())
			.field(FormField::email("email").with_label("Your Email").required())
			.field(FormField::text("subject").required())
			.field(
				FormField::textarea("message")
					.with_label("Your Message")
					.required(),
			)
	}
}
