//! Lead capture: contact extraction and the captured record

use regex::Regex;
use serde::{Serialize, Serializer};
use std::sync::LazyLock;

/// Number of user messages after which the assistant asks for contact details
pub const LEAD_PROMPT_THRESHOLD: usize = 4;

pub const LEAD_PROMPT: &str = "Happy to keep helping! If you'd like one of our networking specialists to follow up with tailored recommendations, just share your **work email** (and optionally a phone number) here.";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("email pattern is valid")
});

/// Seven or more digits, optionally separated by single spaces or dashes
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d(?:[ \t-]?\d){6,}").expect("phone pattern is valid"));

/// Contact details found in a user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub email: String,
    pub phone: Option<String>,
}

/// Pull an email, and a phone number if there is one, out of free text.
///
/// Returns `None` when there is no email; a phone alone is not a lead.
/// Digits inside the email address never count toward the phone.
pub fn extract_contact(input: &str) -> Option<Contact> {
    let found = EMAIL.find(input)?;
    let rest = format!("{} {}", &input[..found.start()], &input[found.end()..]);
    let phone = PHONE.find(&rest).map(|m| m.as_str().to_string());
    Some(Contact {
        email: found.as_str().to_string(),
        phone,
    })
}

/// A captured lead. Built once at capture time and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
    email: String,
    #[serde(serialize_with = "phone_or_empty")]
    phone: Option<String>,
    source: String,
}

impl LeadRecord {
    pub fn new(contact: Contact, source: impl Into<String>) -> Self {
        Self {
            email: contact.email,
            phone: contact.phone,
            source: source.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Acknowledgement shown once the lead is captured
    pub fn acknowledgement(&self) -> String {
        match &self.phone {
            Some(phone) => format!(
                "Thanks! We've noted **{}** and **{phone}**. A PalC specialist will reach out shortly. Feel free to keep asking questions in the meantime.",
                self.email
            ),
            None => format!(
                "Thanks! We've noted **{}**. A PalC specialist will reach out shortly. Feel free to keep asking questions in the meantime.",
                self.email
            ),
        }
    }
}

/// The collector expects a string, so a missing phone is sent as ""
#[allow(clippy::ref_option)] // signature fixed by serde's serialize_with
fn phone_or_empty<S: Serializer>(phone: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(phone.as_deref().unwrap_or_default())
}
