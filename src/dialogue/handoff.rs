//! Handoff payloads and deep links to human channels.

use super::model::{ProfileField, UserProfile};

const PERSONAL_FIELDS: [ProfileField; 3] =
    [ProfileField::Name, ProfileField::Email, ProfileField::Phone];

const ACADEMIC_FIELDS: [ProfileField; 5] = [
    ProfileField::EducationLevel,
    ProfileField::DestinationCountry,
    ProfileField::FieldOfStudy,
    ProfileField::BudgetBand,
    ProfileField::StartTimeline,
];

/// Why the user is being handed to a human. Picks the payload's opening line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffReason {
    /// The user asked for a human or said they were confused.
    Escalation,
    ExpertRequest,
    Meeting,
    Callback,
}

impl HandoffReason {
    fn intro(&self) -> &'static str {
        match self {
            Self::Escalation => "Hi! I was chatting with your assistant and need help from a counsellor.",
            Self::ExpertRequest => "Hi! I'd like to talk to a study abroad expert.",
            Self::Meeting => "Hi! I'd like to book a consultation meeting.",
            Self::Callback => "Hi! Please call me back to discuss my study abroad plans.",
        }
    }
}

fn section(heading: &str, fields: &[ProfileField], profile: &UserProfile) -> Option<String> {
    let lines: Vec<String> = fields
        .iter()
        .filter_map(|f| profile.get(*f).map(|v| format!("{}: {}", f.label(), v)))
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(format!("*{heading}*\n{}", lines.join("\n")))
}

/// Build the message pre-filled into the messaging handoff.
///
/// Only collected, non-empty fields appear. A heading with no fields under
/// it is left out entirely.
pub fn handoff_summary(profile: &UserProfile, reason: HandoffReason) -> String {
    let mut parts = vec![reason.intro().to_string()];
    parts.extend(section("Personal Information", &PERSONAL_FIELDS, profile));
    parts.extend(section("Academic Profile", &ACADEMIC_FIELDS, profile));
    parts.join("\n\n")
}

/// `https://wa.me/<digits>?text=<percent-encoded text>`.
pub fn whatsapp_link(number: &str, text: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{digits}?text={}", urlencoding::encode(text))
}

/// `tel:` link keeping a leading `+` and the digits.
pub fn phone_link(number: &str) -> String {
    let dialable: String = number
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{dialable}")
}
