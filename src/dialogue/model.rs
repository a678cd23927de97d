//! Transcript and user profile data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

/// How the widget should style a bot message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PresentationKind {
    #[default]
    Text,
    Info,
    Suggestion,
    Warning,
    Success,
}

/// A single transcript entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub kind: PresentationKind,
    /// Quick-reply options offered alongside this message, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<String>,
}

impl ConversationMessage {
    /// Create a plain bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            kind: PresentationKind::Text,
            quick_replies: Vec::new(),
        }
    }

    /// Create a user message echoing what was typed or selected.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            ..Self::bot(text)
        }
    }

    pub fn with_kind(mut self, kind: PresentationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_quick_replies<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quick_replies = options.into_iter().map(Into::into).collect();
        self
    }
}

/// A profile slot the questionnaire (or a call-back request) can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    EducationLevel,
    DestinationCountry,
    FieldOfStudy,
    BudgetBand,
    StartTimeline,
}

impl ProfileField {
    /// Label used in the summary and handoff payload.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::EducationLevel => "Education Level",
            Self::DestinationCountry => "Preferred Destination",
            Self::FieldOfStudy => "Course",
            Self::BudgetBand => "Budget",
            Self::StartTimeline => "Timeline",
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::EducationLevel => "education_level",
            Self::DestinationCountry => "destination_country",
            Self::FieldOfStudy => "field_of_study",
            Self::BudgetBand => "budget_band",
            Self::StartTimeline => "start_timeline",
        };
        write!(f, "{s}")
    }
}

/// Fields collected during the conversation. Lives only as long as the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_band: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timeline: Option<String>,
}

impl UserProfile {
    /// Store a value exactly as given. No validation.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Value of a field if it was collected and is not blank.
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        let slot = match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::EducationLevel => &self.education_level,
            ProfileField::DestinationCountry => &self.destination_country,
            ProfileField::FieldOfStudy => &self.field_of_study,
            ProfileField::BudgetBand => &self.budget_band,
            ProfileField::StartTimeline => &self.start_timeline,
        };
        slot.as_deref().filter(|v| !v.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// First name for greetings, falling back to a neutral address.
    pub fn display_name(&self) -> &str {
        self.get(ProfileField::Name).unwrap_or("there")
    }

    fn slot_mut(&mut self, field: ProfileField) -> &mut Option<String> {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::EducationLevel => &mut self.education_level,
            ProfileField::DestinationCountry => &mut self.destination_country,
            ProfileField::FieldOfStudy => &mut self.field_of_study,
            ProfileField::BudgetBand => &mut self.budget_band,
            ProfileField::StartTimeline => &mut self.start_timeline,
        }
    }
}
