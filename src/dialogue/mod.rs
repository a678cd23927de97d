//! Dialogue engine — the chat widget's conversational state machine.
//!
//! Each turn runs through fixed priority tiers: the closing-word check, exact
//! menu commands, keyword topics, and finally the linear questionnaire that
//! builds a `UserProfile`. The engine is pure: state goes in and comes back
//! out, and anything that touches the outside world (opening a link, closing
//! the widget) is returned as an `EngineAction` for the host to perform.

pub mod action;
pub mod engine;
pub mod handoff;
pub mod knowledge;
pub mod menu;
pub mod model;
pub mod prompts;
pub mod rules;
pub mod state;

pub use action::{EngineAction, Reply, Turn, TurnReport, UserAction};
pub use engine::DialogueEngine;
pub use menu::{FaqCategory, MenuCommand};
pub use model::{ConversationMessage, PresentationKind, ProfileField, Sender, UserProfile};
pub use rules::{KeywordRule, KeywordTable, TopicKind};
pub use state::{ConversationState, DialoguePhase, MenuPosition};
