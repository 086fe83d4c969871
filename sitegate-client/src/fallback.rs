//! Manual-compose fallback so a failed submission is never lost.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::ContactFields;

/// Builds a pre-filled `mailto:` link from the entered fields.
pub fn compose_link(to: &str, fields: &ContactFields) -> String {
    let subject = if fields.company.trim().is_empty() {
        format!("Enquiry from {}", fields.name.trim())
    } else {
        format!(
            "Enquiry from {} @ {}",
            fields.name.trim(),
            fields.company.trim()
        )
    };
    let body = format!(
        "Name: {}\nEmail: {}\nCompany: {}\n\n{}",
        fields.name.trim(),
        fields.email.trim(),
        if fields.company.trim().is_empty() {
            "-"
        } else {
            fields.company.trim()
        },
        fields.message.trim(),
    );

    format!(
        "mailto:{}?subject={}&body={}",
        to,
        utf8_percent_encode(&subject, NON_ALPHANUMERIC),
        utf8_percent_encode(&body, NON_ALPHANUMERIC),
    )
}
