//! Declarative form modeling, validation, and HTML rendering.
//!
//! A [`Form`] is an ordered collection of typed [`FormField`]s, each
//! optionally carrying validation rules. Submitted data validates against
//! those rules in declaration order, producing a structured, serializable
//! [`FormData`] result; the same form renders itself to HTML with submitted
//! values escaped.
//!
//! - Field model with type-specific constructors and builder-style
//!   configuration
//! - Validation rules as tagged variants with typed parameters, evaluated in
//!   attachment order, with a short-circuit on failed required checks
//! - Pure HTML rendering with content- and attribute-context escaping
//! - Stock login / registration / contact compositions
//!
//! Build the form first, then share it: validation and rendering take
//! `&self` and never mutate, so a built form is safe to use concurrently.
//!
//! # Examples
//!
//! ```
//! use formwork::{Form, FormField, Rule, Validator};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let form = Form::new("signup")
//! 	.email("email")
//! 	.field(
//! 		FormField::password("password")
//! 			.required()
//! 			.validate_with(Validator::new(Rule::MinLength(8))),
//! 	);
//!
//! let mut data = HashMap::new();
//! data.insert("email".to_string(), json!("not-an-email"));
//! data.insert("password".to_string(), json!("secret123"));
//!
//! let result = form.validate(&data);
//! assert!(!result.valid);
//! assert_eq!(result.errors[0].rule, "email");
//!
//! let html = form.render(Some(&data));
//! assert!(html.contains("value=\"not-an-email\""));
//! ```

pub mod field;
pub mod form;
pub mod presets;
pub mod render;
pub mod validators;

pub use field::{FieldOption, FieldType, FormField};
pub use form::{Form, FormData, FormError, FormResult, ValidationError};
pub use presets::FormBuilder;
pub use render::{escape_attribute, escape_html, render_field};
pub use validators::{Rule, Validator};
