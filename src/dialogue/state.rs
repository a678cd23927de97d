//! Conversation state machine — tracks questionnaire progress and menu position.

use serde::{Deserialize, Serialize};

use super::menu::FaqCategory;
use super::model::{ConversationMessage, ProfileField, Sender, UserProfile};

/// Questionnaire slots in asking order. Index `k` is stored at step `k`.
pub const QUESTIONNAIRE: [ProfileField; 7] = [
    ProfileField::Name,
    ProfileField::Email,
    ProfileField::EducationLevel,
    ProfileField::DestinationCountry,
    ProfileField::FieldOfStudy,
    ProfileField::BudgetBand,
    ProfileField::StartTimeline,
];

/// Step index reached once every questionnaire slot has an answer.
pub const SUMMARY_STEP: usize = QUESTIONNAIRE.len();

/// The observable phases of a conversation.
///
/// Greeting (step 0) → Collecting (steps 1..=6) → Summarized (step 7).
/// The FAQ phases run in parallel and never move the step index; Closed is
/// terminal until a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialoguePhase {
    Greeting,
    Collecting,
    Summarized,
    FaqMenuRoot,
    FaqMenuCategory,
    Closed,
}

impl DialoguePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for DialoguePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::Collecting => "collecting",
            Self::Summarized => "summarized",
            Self::FaqMenuRoot => "faq_menu_root",
            Self::FaqMenuCategory => "faq_menu_category",
            Self::Closed => "closed",
        };
        write!(f, "{s}")
    }
}

/// Where the user is in the FAQ browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "position", content = "category", rename_all = "snake_case")]
pub enum MenuPosition {
    /// Not browsing; the questionnaire drives the conversation.
    #[default]
    Main,
    FaqRoot,
    FaqCategory(FaqCategory),
}

/// Everything one widget instance knows about its conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConversationState {
    /// Index into [`QUESTIONNAIRE`]; [`SUMMARY_STEP`] once all answers are in.
    pub step: usize,
    pub transcript: Vec<ConversationMessage>,
    pub profile: UserProfile,
    #[serde(default)]
    pub menu: MenuPosition,
    #[serde(default)]
    pub closed: bool,
    /// Set after "Schedule a Call" when no phone number is on file yet.
    #[serde(default)]
    pub awaiting_phone: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything and return to the greeting.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn phase(&self) -> DialoguePhase {
        if self.closed {
            return DialoguePhase::Closed;
        }
        match self.menu {
            MenuPosition::FaqRoot => DialoguePhase::FaqMenuRoot,
            MenuPosition::FaqCategory(_) => DialoguePhase::FaqMenuCategory,
            MenuPosition::Main => match self.step {
                0 => DialoguePhase::Greeting,
                s if s < SUMMARY_STEP => DialoguePhase::Collecting,
                _ => DialoguePhase::Summarized,
            },
        }
    }

    /// The slot the next questionnaire answer will fill, if any remain.
    pub fn pending_field(&self) -> Option<ProfileField> {
        QUESTIONNAIRE.get(self.step).copied()
    }

    /// Store an answer for the pending slot and move to the next step.
    ///
    /// Returns the new step index, or `None` when the questionnaire is
    /// already complete (nothing is stored).
    pub fn record_answer(&mut self, answer: &str) -> Option<usize> {
        let field = self.pending_field()?;
        self.profile.set(field, answer);
        self.step += 1;
        Some(self.step)
    }

    /// Quick-reply options attached to the most recent bot message.
    pub fn offered_options(&self) -> &[String] {
        self.transcript
            .iter()
            .rev()
            .find(|m| m.sender == Sender::Bot)
            .map(|m| m.quick_replies.as_slice())
            .unwrap_or(&[])
    }

    pub fn push(&mut self, message: ConversationMessage) {
        self.transcript.push(message);
    }
}
