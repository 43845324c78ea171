//! Built-in example schemas.

use crate::schema::{FieldDescriptor, FieldType, FormSchema, ValidationRule};
use crate::validation::EMAIL_PATTERN;

/// Registry key of [`user_registration`].
pub const REGISTRATION_KEY: &str = "registration";

/// Registry key of [`job_application`].
pub const JOB_KEY: &str = "job";

fn email_field() -> FieldDescriptor {
    FieldDescriptor::new("email", "Email", FieldType::Email)
        .required(true)
        .validation(
            ValidationRule::default()
                .pattern(EMAIL_PATTERN)
                .message("Invalid email address"),
        )
}

/// A user registration form.
pub fn user_registration() -> FormSchema {
    FormSchema::new("User Registration")
        .field(FieldDescriptor::new("fullName", "Full Name", FieldType::Text).required(true))
        .field(email_field())
        .field(FieldDescriptor::new("dob", "Date of Birth", FieldType::Date))
        .field(
            FieldDescriptor::new("gender", "Gender", FieldType::Dropdown)
                .options(["Male", "Female", "Other"])
                .required(true),
        )
        .field(
            FieldDescriptor::new("hobbies", "Hobbies", FieldType::Multiselect)
                .options(["Reading", "Sports", "Music", "Travel"]),
        )
        .field(FieldDescriptor::new(
            "subscribe",
            "Subscribe to newsletter",
            FieldType::Checkbox,
        ))
        .field(FieldDescriptor::new("about", "About Yourself", FieldType::Textarea))
}

/// A job application form.
pub fn job_application() -> FormSchema {
    FormSchema::new("Job Application")
        .field(FieldDescriptor::new("fullName", "Full Name", FieldType::Text).required(true))
        .field(email_field())
        .field(
            FieldDescriptor::new("position", "Position Applied For", FieldType::Dropdown)
                .options(["Frontend Developer", "Backend Developer", "Designer"])
                .required(true),
        )
        .field(
            FieldDescriptor::new("skills", "Skills", FieldType::Multiselect)
                .options(["JavaScript", "React", "Node.js", "Angular", "CSS"]),
        )
        .field(
            FieldDescriptor::new("experience", "Experience (Years)", FieldType::Text)
                .required(true)
                .validation(
                    ValidationRule::default()
                        .pattern("^[0-9]+$")
                        .message("Enter a valid number"),
                ),
        )
        .field(FieldDescriptor::new("portfolio", "Portfolio URL", FieldType::Text))
        .field(FieldDescriptor::new("coverLetter", "Cover Letter", FieldType::Textarea))
}

/// All built-in schemas with their registry keys, in picker order.
pub fn builtin() -> Vec<(&'static str, FormSchema)> {
    vec![
        (REGISTRATION_KEY, user_registration()),
        (JOB_KEY, job_application()),
    ]
}
