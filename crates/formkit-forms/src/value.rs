//! Field values.
//!
//! A form holds one [`FieldValue`] per edited field. The variant follows the
//! field type: text-like fields and dropdowns hold text, multiselects hold
//! the ordered set of selected options, checkboxes hold a flag. A field that
//! was never edited has no value at all.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::schema::FieldType;

/// The current value of one form field.
///
/// Serializes untagged, so submitted data reads as plain JSON:
/// a string, an array of strings, or a boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text of a text, email, date, textarea or dropdown field.
    Text(String),
    /// Selected options of a multiselect, in selection order, without repeats.
    Selected(Vec<String>),
    /// State of a checkbox.
    Checked(bool),
}

impl FieldValue {
    /// Builds a selection, dropping repeated options while keeping first-seen order.
    pub fn selected<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for option in options {
            let option = option.into();
            if !out.contains(&option) {
                out.push(option);
            }
        }
        Self::Selected(out)
    }

    /// Drops repeated options from a selection. Other values pass through.
    ///
    /// Deserialization keeps arrays as sent; call this on untrusted input.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Selected(items) => Self::selected(items),
            other => other,
        }
    }

    /// Returns `true` if the value counts as filled in.
    ///
    /// Empty text, an empty selection and an unchecked box are all blank.
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Selected(items) => !items.is_empty(),
            Self::Checked(b) => *b,
        }
    }

    /// Returns the length used by `minLength`/`maxLength`, if the value has one.
    ///
    /// Text is measured in UTF-16 code units, the way browsers count
    /// `minlength`, so an emoji outside the BMP counts as two. A selection is
    /// measured in selected options. Checkbox values have no length.
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.encode_utf16().count()),
            Self::Selected(items) => Some(items.len()),
            Self::Checked(_) => None,
        }
    }

    /// Returns `true` if this variant is the one `field_type` holds.
    ///
    /// Unsupported fields accept anything, since they are never validated.
    pub fn fits(&self, field_type: &FieldType) -> bool {
        match field_type {
            FieldType::Multiselect => matches!(self, Self::Selected(_)),
            FieldType::Checkbox => matches!(self, Self::Checked(_)),
            FieldType::Unsupported(_) => true,
            _ => matches!(self, Self::Text(_)),
        }
    }

    /// Returns the string a validation pattern is matched against.
    pub fn pattern_subject(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Selected(items) => Cow::Owned(items.join(",")),
            Self::Checked(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }

    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` if `option` is part of this value.
    ///
    /// A text value contains exactly its own text; a selection contains each
    /// of its options.
    pub fn contains(&self, option: &str) -> bool {
        match self {
            Self::Text(s) => s == option,
            Self::Selected(items) => items.iter().any(|i| i == option),
            Self::Checked(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Checked(b)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::selected(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        Self::selected(items)
    }
}
