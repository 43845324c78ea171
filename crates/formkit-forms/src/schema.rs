//! Form schemas.
//!
//! A [`FormSchema`] is passive data: a title and an ordered list of
//! [`FieldDescriptor`]s. Schemas deserialize from JSON or TOML using the same
//! keys as the browser-side format (`type`, `minLength`, ...).
//!
//! Before a schema can drive a form it is compiled into a [`CompiledSchema`].
//! Compilation checks that field names are unique and compiles every
//! validation pattern once, so submissions never re-parse a regex.
//!
//! Patterns follow ECMAScript `RegExp` syntax and semantics, the same as the
//! browser-side `pattern` attribute: `\d` is ASCII-only and look-arounds
//! are supported.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use formkit_core::{FormError, FormResult};

/// The kind of input a field renders as.
///
/// Deserializes from the lowercase type name. Names that are not recognized
/// become [`FieldType::Unsupported`] instead of failing, so one unknown field
/// never prevents the rest of a form from loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Email address; validated against a fixed pattern.
    Email,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// Single choice out of `options`.
    Dropdown,
    /// Any number of choices out of `options`.
    Multiselect,
    /// Boolean toggle.
    Checkbox,
    /// Multi-line text.
    Textarea,
    /// A type name with no widget; rendered as a placeholder.
    Unsupported(String),
}

impl FieldType {
    /// Returns the schema name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Date => "date",
            Self::Dropdown => "dropdown",
            Self::Multiselect => "multiselect",
            Self::Checkbox => "checkbox",
            Self::Textarea => "textarea",
            Self::Unsupported(name) => name,
        }
    }

    /// Returns `true` for types that pick from `options`.
    pub const fn has_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Multiselect)
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "text" => Self::Text,
            "email" => Self::Email,
            "date" => Self::Date,
            "dropdown" => Self::Dropdown,
            "multiselect" => Self::Multiselect,
            "checkbox" => Self::Checkbox,
            "textarea" => Self::Textarea,
            _ => Self::Unsupported(name),
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Unsupported(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional constraints attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    /// Regular expression the value must match (searched, not anchored).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Replaces the default text of format errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Minimum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl ValidationRule {
    /// Sets the pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the custom error message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the minimum length.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// Describes a single form field.
///
/// `options` is only read for dropdown and multiselect fields. A dropdown
/// without options is accepted and renders just its placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Human-readable label.
    pub label: String,
    /// Key of the field's value; unique within a schema.
    pub name: String,
    /// The input kind.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether a value must be provided.
    #[serde(default)]
    pub required: bool,
    /// Choices for dropdown and multiselect fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Extra constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

impl FieldDescriptor {
    /// Creates an optional field with no options and no rule.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        field_type: impl Into<FieldType>,
    ) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            field_type: field_type.into(),
            required: false,
            options: Vec::new(),
            validation: None,
        }
    }

    /// Sets whether this field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the choices.
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches a validation rule.
    #[must_use]
    pub fn validation(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }
}

/// A declarative form description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Heading shown above the form.
    pub title: String,
    /// Fields in render order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    /// Creates an empty schema.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Parses a schema from JSON.
    pub fn from_json_str(json: &str) -> FormResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a schema from TOML (`title = ...` plus `[[fields]]` tables).
    pub fn from_toml_str(toml_str: &str) -> FormResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads a schema from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> FormResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Reads a schema from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> FormResult<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Reads a schema from a `.json` or `.toml` file, chosen by extension.
    pub fn from_file(path: impl AsRef<Path>) -> FormResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            Some("toml") => Self::from_toml_file(path),
            _ => Err(FormError::SchemaParse(format!(
                "'{}' is not a .json or .toml schema file",
                path.display()
            ))),
        }
    }

    /// Checks the schema and compiles its validation patterns.
    ///
    /// Fails on a repeated field name or a pattern that is not a valid regex.
    pub fn compile(&self) -> FormResult<CompiledSchema> {
        let mut index = HashMap::with_capacity(self.fields.len());
        let mut fields = Vec::with_capacity(self.fields.len());

        for (position, descriptor) in self.fields.iter().enumerate() {
            if index.insert(descriptor.name.clone(), position).is_some() {
                return Err(FormError::DuplicateField {
                    schema: self.title.clone(),
                    name: descriptor.name.clone(),
                });
            }

            let pattern = descriptor
                .validation
                .as_ref()
                .and_then(|rule| rule.pattern.as_deref())
                .map(|p| {
                    FieldPattern::new(p).map_err(|e| FormError::InvalidPattern {
                        field: descriptor.name.clone(),
                        reason: e.to_string(),
                    })
                })
                .transpose()?;

            fields.push(CompiledField {
                descriptor: descriptor.clone(),
                pattern,
            });
        }

        tracing::debug!(title = %self.title, fields = fields.len(), "compiled form schema");

        Ok(CompiledSchema {
            title: self.title.clone(),
            fields,
            index,
        })
    }
}

/// A compiled ECMAScript validation pattern.
#[derive(Debug, Clone)]
pub struct FieldPattern(regress::Regex);

impl FieldPattern {
    /// Compiles `pattern` with no flags.
    pub fn new(pattern: &str) -> Result<Self, regress::Error> {
        regress::Regex::new(pattern).map(Self)
    }

    /// Returns `true` if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.find(text).is_some()
    }
}

/// A field descriptor together with its compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledField {
    /// The schema's description of the field.
    pub descriptor: FieldDescriptor,
    pattern: Option<FieldPattern>,
}

impl CompiledField {
    /// The field name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// The field label.
    pub fn label(&self) -> &str {
        &self.descriptor.label
    }

    /// The field type.
    pub const fn field_type(&self) -> &FieldType {
        &self.descriptor.field_type
    }

    /// Whether the field is required.
    pub const fn is_required(&self) -> bool {
        self.descriptor.required
    }

    /// The attached rule, if any.
    pub const fn rule(&self) -> Option<&ValidationRule> {
        self.descriptor.validation.as_ref()
    }

    /// The compiled validation pattern, if the rule has one.
    pub const fn pattern(&self) -> Option<&FieldPattern> {
        self.pattern.as_ref()
    }
}

/// A checked schema, ready to drive a [`FormEngine`](crate::engine::FormEngine).
///
/// Engines hold compiled schemas behind an `Arc`; two schemas are "the same"
/// when they are the same allocation.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    title: String,
    fields: Vec<CompiledField>,
    index: HashMap<String, usize>,
}

impl CompiledSchema {
    /// The form title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All fields in render order.
    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Returns `true` if the schema has a field called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Rebuilds the plain schema this was compiled from.
    pub fn to_schema(&self) -> FormSchema {
        FormSchema {
            title: self.title.clone(),
            fields: self.fields.iter().map(|f| f.descriptor.clone()).collect(),
        }
    }
}

impl TryFrom<FormSchema> for CompiledSchema {
    type Error = FormError;

    fn try_from(schema: FormSchema) -> FormResult<Self> {
        schema.compile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_from_name() {
        assert_eq!(FieldType::from("text"), FieldType::Text);
        assert_eq!(FieldType::from("multiselect"), FieldType::Multiselect);
        assert_eq!(
            FieldType::from("slider"),
            FieldType::Unsupported("slider".into())
        );
        // Type names are case-sensitive.
        assert_eq!(
            FieldType::from("Text"),
            FieldType::Unsupported("Text".into())
        );
    }

    #[test]
    fn test_field_type_name_roundtrip() {
        for name in ["text", "email", "date", "dropdown", "multiselect", "checkbox", "textarea", "slider"] {
            assert_eq!(String::from(FieldType::from(name)), name);
            assert_eq!(FieldType::from(name).to_string(), name);
        }
    }

    #[test]
    fn test_deserialize_json_schema() {
        let json = r#"{
            "title": "Signup",
            "fields": [
                {"label": "Name", "name": "name", "type": "text", "required": true},
                {"label": "Code", "name": "code", "type": "text",
                 "validation": {"pattern": "^[0-9]+$", "message": "Digits only", "minLength": 2, "maxLength": 6}},
                {"label": "Color", "name": "color", "type": "dropdown", "options": ["Red", "Blue"]},
                {"label": "Volume", "name": "volume", "type": "slider"}
            ]
        }"#;

        let schema = FormSchema::from_json_str(json).unwrap();
        assert_eq!(schema.title, "Signup");
        assert_eq!(schema.fields.len(), 4);
        assert!(schema.fields[0].required);
        assert!(!schema.fields[1].required);

        let rule = schema.fields[1].validation.as_ref().unwrap();
        assert_eq!(rule.pattern.as_deref(), Some("^[0-9]+$"));
        assert_eq!(rule.message.as_deref(), Some("Digits only"));
        assert_eq!(rule.min_length, Some(2));
        assert_eq!(rule.max_length, Some(6));

        assert_eq!(schema.fields[2].options, vec!["Red", "Blue"]);
        assert_eq!(
            schema.fields[3].field_type,
            FieldType::Unsupported("slider".into())
        );
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let schema = FormSchema::new("T").field(
            FieldDescriptor::new("code", "Code", FieldType::Text)
                .validation(ValidationRule::default().min_length(3)),
        );
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["fields"][0]["type"], "text");
        assert_eq!(json["fields"][0]["validation"]["minLength"], 3);
        assert!(json["fields"][0].get("options").is_none());
    }

    #[test]
    fn test_deserialize_toml_schema() {
        let toml_str = r#"
            title = "Feedback"

            [[fields]]
            label = "Comment"
            name = "comment"
            type = "textarea"
            required = true

            [[fields]]
            label = "Rating"
            name = "rating"
            type = "dropdown"
            options = ["1", "2", "3"]

            [fields.validation]
            message = "Pick one"
        "#;

        let schema = FormSchema::from_toml_str(toml_str).unwrap();
        assert_eq!(schema.title, "Feedback");
        assert_eq!(schema.fields[0].field_type, FieldType::Textarea);
        assert_eq!(schema.fields[1].options.len(), 3);
        assert_eq!(
            schema.fields[1].validation.as_ref().unwrap().message.as_deref(),
            Some("Pick one")
        );
    }

    #[test]
    fn test_parse_error() {
        let err = FormSchema::from_json_str(r#"{"fields": []}"#).unwrap_err();
        assert!(matches!(err, FormError::SchemaParse(_)));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("a.json");
        std::fs::write(&json_path, r#"{"title": "A", "fields": []}"#).unwrap();
        let toml_path = dir.path().join("b.toml");
        std::fs::write(&toml_path, "title = \"B\"\n").unwrap();
        let txt_path = dir.path().join("c.txt");
        std::fs::write(&txt_path, "").unwrap();

        assert_eq!(FormSchema::from_file(&json_path).unwrap().title, "A");
        assert_eq!(FormSchema::from_file(&toml_path).unwrap().title, "B");
        assert!(matches!(
            FormSchema::from_file(&txt_path),
            Err(FormError::SchemaParse(_))
        ));
    }

    #[test]
    fn test_compile_indexes_fields() {
        let compiled = FormSchema::new("T")
            .field(FieldDescriptor::new("a", "A", FieldType::Text))
            .field(FieldDescriptor::new("b", "B", FieldType::Checkbox))
            .compile()
            .unwrap();

        assert_eq!(compiled.title(), "T");
        assert_eq!(compiled.fields().len(), 2);
        assert_eq!(compiled.field("b").unwrap().label(), "B");
        assert!(compiled.contains("a"));
        assert!(!compiled.contains("c"));
        assert!(compiled.field("a").unwrap().pattern().is_none());
    }

    #[test]
    fn test_compile_rejects_duplicate_names() {
        let err = FormSchema::new("Dupes")
            .field(FieldDescriptor::new("email", "Email", FieldType::Email))
            .field(FieldDescriptor::new("email", "Work Email", FieldType::Email))
            .compile()
            .unwrap_err();

        match err {
            FormError::DuplicateField { schema, name } => {
                assert_eq!(schema, "Dupes");
                assert_eq!(name, "email");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_compile_rejects_bad_pattern() {
        let err = FormSchema::new("T")
            .field(
                FieldDescriptor::new("zip", "Zip", FieldType::Text)
                    .validation(ValidationRule::default().pattern("([0-9]")),
            )
            .compile()
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidPattern { ref field, .. } if field == "zip"));
    }

    #[test]
    fn test_compile_caches_pattern() {
        let compiled = FormSchema::new("T")
            .field(
                FieldDescriptor::new("zip", "Zip", FieldType::Text)
                    .validation(ValidationRule::default().pattern("^[0-9]{5}$")),
            )
            .compile()
            .unwrap();
        let pattern = compiled.field("zip").unwrap().pattern().unwrap();
        assert!(pattern.is_match("12345"));
        assert!(!pattern.is_match("1234"));
    }

    #[test]
    fn test_pattern_uses_ecmascript_semantics() {
        let digits = FieldPattern::new(r"^\d+$").unwrap();
        assert!(digits.is_match("123"));
        assert!(!digits.is_match("\u{661}\u{662}\u{663}"));

        let compiled = FormSchema::new("T")
            .field(
                FieldDescriptor::new("password", "Password", FieldType::Text)
                    .validation(ValidationRule::default().pattern("^(?=.*[0-9]).{8,}$")),
            )
            .compile()
            .unwrap();
        let pattern = compiled.field("password").unwrap().pattern().unwrap();
        assert!(pattern.is_match("secret99"));
        assert!(!pattern.is_match("secretpw"));
    }

    #[test]
    fn test_to_schema_roundtrip() {
        let schema = FormSchema::new("T")
            .field(FieldDescriptor::new("a", "A", FieldType::Dropdown).options(["x", "y"]));
        let compiled = CompiledSchema::try_from(schema.clone()).unwrap();
        assert_eq!(compiled.to_schema(), schema);
    }
}
