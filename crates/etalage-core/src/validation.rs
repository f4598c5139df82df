//! # Validation Module
//!
//! Declarative form validation for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Form Validation                                    │
//! │                                                                         │
//! │  Submitted form (FormInput: field → raw text)                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Schema: table of FieldSpec { field, rules[ (constraint, message) ] }  │
//! │           │                                                             │
//! │           ├── every field checked, first failing rule per field        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Ok(ValidatedForm)          or        Err(FieldErrors)                  │
//! │  trimmed values, typed getters        [{ field, message }, ...]         │
//! │                                       in schema order                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A field without a `Required` rule may be left empty; its other rules are
//! then skipped.
//!
//! ## Usage
//! ```rust
//! use etalage_core::validation::{form_input, LoginForm};
//!
//! let input = form_input(&[("email", "klant@voorbeeld.nl"), ("password", "")]);
//! let errors = LoginForm::parse(&input).unwrap_err();
//!
//! assert_eq!(errors.get("password"), Some("Vul je wachtwoord in"));
//! ```

use std::collections::HashMap;

use crate::error::{FieldErrors, ValidationError};
use crate::MAX_INPUT_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Raw form submission: field name → submitted text.
pub type FormInput = HashMap<String, String>;

/// Builds a [`FormInput`] from literal pairs.
pub fn form_input(pairs: &[(&str, &str)]) -> FormInput {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Rule Table
// =============================================================================

/// What a rule checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Value must be non-empty (after trimming).
    Required,
    /// At least this many characters.
    MinLength(usize),
    /// At most this many characters.
    MaxLength(usize),
    /// Must look like an email address.
    Email,
    /// Must parse as a whole number.
    Integer,
    /// Whole number no greater than this.
    AtMost(i64),
    /// Must equal the value of another field.
    Matches(&'static str),
}

/// A constraint and the message shown when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub constraint: Constraint,
    pub message: String,
}

/// One row of a schema: a field and its rules, checked in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: &'static str,
    pub rules: Vec<Rule>,
    /// Whether surrounding whitespace is stripped before checking.
    pub trim: bool,
}

impl FieldSpec {
    pub fn new(field: &'static str) -> Self {
        FieldSpec {
            field,
            rules: Vec::new(),
            trim: true,
        }
    }

    /// Keeps the value exactly as submitted (passwords).
    pub fn raw(mut self) -> Self {
        self.trim = false;
        self
    }

    pub fn rule(mut self, constraint: Constraint, message: impl Into<String>) -> Self {
        self.rules.push(Rule {
            constraint,
            message: message.into(),
        });
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(Constraint::Required, message)
    }

    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(Constraint::MinLength(min), message)
    }

    pub fn max_length(self, max: usize, message: impl Into<String>) -> Self {
        self.rule(Constraint::MaxLength(max), message)
    }

    pub fn email(self, message: impl Into<String>) -> Self {
        self.rule(Constraint::Email, message)
    }

    pub fn integer(self, message: impl Into<String>) -> Self {
        self.rule(Constraint::Integer, message)
    }

    pub fn at_most(self, max: i64, message: impl Into<String>) -> Self {
        self.rule(Constraint::AtMost(max), message)
    }

    pub fn matches(self, other: &'static str, message: impl Into<String>) -> Self {
        self.rule(Constraint::Matches(other), message)
    }

    fn is_required(&self) -> bool {
        self.rules.iter().any(|r| r.constraint == Constraint::Required)
    }

    fn value<'a>(&self, input: &'a FormInput) -> &'a str {
        let raw = input.get(self.field).map(String::as_str).unwrap_or("");
        if self.trim {
            raw.trim()
        } else {
            raw
        }
    }
}

/// A named validation contract for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Schema {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Evaluates every field of the schema against the input.
    ///
    /// Fields not named by the schema are ignored and not carried into the
    /// validated form.
    pub fn validate(&self, input: &FormInput) -> Result<ValidatedForm, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut values = HashMap::with_capacity(self.fields.len());

        for spec in &self.fields {
            let value = spec.value(input);

            if value.is_empty() && !spec.is_required() {
                values.insert(spec.field, String::new());
                continue;
            }

            let failed = spec
                .rules
                .iter()
                .find(|rule| !check(&rule.constraint, value, spec, input));

            match failed {
                Some(rule) => errors.push(spec.field, rule.message.clone()),
                None => {
                    values.insert(spec.field, value.to_string());
                }
            }
        }

        errors.into_result()?;
        Ok(ValidatedForm { values })
    }
}

fn check(constraint: &Constraint, value: &str, spec: &FieldSpec, input: &FormInput) -> bool {
    match constraint {
        Constraint::Required => !value.is_empty(),
        Constraint::MinLength(min) => value.chars().count() >= *min,
        Constraint::MaxLength(max) => value.chars().count() <= *max,
        Constraint::Email => is_valid_email(value),
        Constraint::Integer => value.parse::<i64>().is_ok(),
        Constraint::AtMost(max) => value.parse::<i64>().map_or(false, |n| n <= *max),
        Constraint::Matches(other) => {
            let other_value = input.get(*other).map(String::as_str).unwrap_or("");
            let other_value = if spec.trim {
                other_value.trim()
            } else {
                other_value
            };
            value == other_value
        }
    }
}

/// The values of a form that passed its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    values: HashMap<&'static str, String>,
}

impl ValidatedForm {
    /// Validated text of a field; empty for optional fields left blank.
    pub fn text(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Optional field: `None` when left blank.
    pub fn optional_text(&self, field: &str) -> Option<&str> {
        Some(self.text(field)).filter(|v| !v.is_empty())
    }

    /// Value of a field checked by an `Integer` rule.
    pub fn integer(&self, field: &str) -> Option<i64> {
        self.values.get(field).and_then(|v| v.parse().ok())
    }
}

// =============================================================================
// Storefront Schemas
// =============================================================================

const MSG_EMAIL_REQUIRED: &str = "Vul je e-mailadres in";
const MSG_EMAIL_INVALID: &str = "Vul een geldig e-mailadres in";
const MSG_PASSWORD_REQUIRED: &str = "Vul je wachtwoord in";
const MSG_PASSWORD_SHORT: &str = "Wachtwoord moet minimaal 8 tekens bevatten";
const MSG_PASSWORD_LONG: &str = "Wachtwoord mag maximaal 128 tekens bevatten";
const MSG_PASSWORD_MISMATCH: &str = "Wachtwoorden komen niet overeen";

/// Minimum password length for registration and reset.
pub const MIN_PASSWORD_LENGTH: usize = 8;

fn email_field() -> FieldSpec {
    FieldSpec::new("email")
        .required(MSG_EMAIL_REQUIRED)
        .max_length(254, MSG_EMAIL_INVALID)
        .email(MSG_EMAIL_INVALID)
}

fn new_password_fields() -> [FieldSpec; 2] {
    [
        FieldSpec::new("password")
            .raw()
            .required(MSG_PASSWORD_REQUIRED)
            .min_length(MIN_PASSWORD_LENGTH, MSG_PASSWORD_SHORT)
            .max_length(128, MSG_PASSWORD_LONG),
        FieldSpec::new("confirmPassword")
            .raw()
            .required("Herhaal je wachtwoord")
            .matches("password", MSG_PASSWORD_MISMATCH),
    ]
}

fn product_id_field() -> FieldSpec {
    FieldSpec::new("productId")
        .required("Kies een product")
        .max_length(64, "Onbekend product")
}

/// Only the upper bound is checked here. A quantity of zero or less reaches
/// the cart, which ignores it on add and drops the line on update.
fn quantity_field() -> FieldSpec {
    FieldSpec::new("quantity")
        .required("Vul een aantal in")
        .integer("Vul een geldig aantal in")
        .at_most(
            MAX_INPUT_QUANTITY,
            format!("Aantal mag maximaal {} zijn", MAX_INPUT_QUANTITY),
        )
}

/// Inloggen.
pub fn login_schema() -> Schema {
    Schema::new("login").field(email_field()).field(
        FieldSpec::new("password")
            .raw()
            .required(MSG_PASSWORD_REQUIRED),
    )
}

/// Account aanmaken.
pub fn register_schema() -> Schema {
    let [password, confirm] = new_password_fields();
    Schema::new("register")
        .field(
            FieldSpec::new("name")
                .required("Vul je naam in")
                .max_length(100, "Naam mag maximaal 100 tekens bevatten"),
        )
        .field(email_field())
        .field(password)
        .field(confirm)
}

/// Wachtwoord vergeten.
pub fn forgot_password_schema() -> Schema {
    Schema::new("forgot_password").field(email_field())
}

/// Nieuw wachtwoord instellen.
pub fn reset_password_schema() -> Schema {
    let [password, confirm] = new_password_fields();
    Schema::new("reset_password").field(password).field(confirm)
}

/// Contactformulier.
pub fn contact_schema() -> Schema {
    Schema::new("contact")
        .field(
            FieldSpec::new("name")
                .required("Vul je naam in")
                .max_length(100, "Naam mag maximaal 100 tekens bevatten"),
        )
        .field(email_field())
        .field(FieldSpec::new("phone").max_length(20, "Vul een geldig telefoonnummer in"))
        .field(
            FieldSpec::new("message")
                .required("Vul een bericht in")
                .min_length(10, "Bericht moet minimaal 10 tekens bevatten")
                .max_length(2000, "Bericht mag maximaal 2000 tekens bevatten"),
        )
}

/// "In winkelwagen" on a product page.
pub fn add_to_cart_schema() -> Schema {
    Schema::new("add_to_cart")
        .field(product_id_field())
        .field(quantity_field())
}

/// Quantity field on a cart line. Zero or less removes the line.
pub fn update_quantity_schema() -> Schema {
    Schema::new("update_quantity")
        .field(product_id_field())
        .field(quantity_field())
}

// =============================================================================
// Typed Forms
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn parse(input: &FormInput) -> Result<Self, FieldErrors> {
        let form = login_schema().validate(input)?;
        Ok(LoginForm {
            email: form.text("email").to_lowercase(),
            password: form.text("password").to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn parse(input: &FormInput) -> Result<Self, FieldErrors> {
        let form = register_schema().validate(input)?;
        Ok(RegisterForm {
            name: form.text("name").to_string(),
            email: form.text("email").to_lowercase(),
            password: form.text("password").to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn parse(input: &FormInput) -> Result<Self, FieldErrors> {
        let form = forgot_password_schema().validate(input)?;
        Ok(ForgotPasswordForm {
            email: form.text("email").to_lowercase(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub password: String,
}

impl ResetPasswordForm {
    pub fn parse(input: &FormInput) -> Result<Self, FieldErrors> {
        let form = reset_password_schema().validate(input)?;
        Ok(ResetPasswordForm {
            password: form.text("password").to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl ContactForm {
    pub fn parse(input: &FormInput) -> Result<Self, FieldErrors> {
        let form = contact_schema().validate(input)?;
        Ok(ContactForm {
            name: form.text("name").to_string(),
            email: form.text("email").to_lowercase(),
            phone: form.optional_text("phone").map(str::to_string),
            message: form.text("message").to_string(),
        })
    }
}

/// A validated add-to-cart or quantity-change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityForm {
    pub product_id: String,
    pub quantity: i64,
}

impl QuantityForm {
    /// Parses an add-to-cart submission (quantity at most 999).
    pub fn parse_add(input: &FormInput) -> Result<Self, FieldErrors> {
        Self::from_validated(add_to_cart_schema().validate(input)?)
    }

    /// Parses a cart-line quantity change (quantity at most 999).
    pub fn parse_update(input: &FormInput) -> Result<Self, FieldErrors> {
        Self::from_validated(update_quantity_schema().validate(input)?)
    }

    fn from_validated(form: ValidatedForm) -> Result<Self, FieldErrors> {
        let quantity = form.integer("quantity").ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.push("quantity", "Vul een aantal in");
            errors
        })?;

        Ok(QuantityForm {
            product_id: form.text("productId").to_string(),
            quantity,
        })
    }
}

// =============================================================================
// Format Checks
// =============================================================================

/// Structural email check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

// =============================================================================
// Scalar Validators
// =============================================================================

/// Validates a catalog price in cents.
///
/// Zero is allowed (free items); negative prices are not.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a CMS product id.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "productId".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "productId".to_string(),
            max: 64,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "productId".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns the whole assortment)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
