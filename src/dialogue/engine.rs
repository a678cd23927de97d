//! DialogueEngine — decides the bot's replies for each user turn.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::action::{EngineAction, Reply, Turn, UserAction};
use super::handoff::{self, HandoffReason};
use super::knowledge;
use super::menu::MenuCommand;
use super::model::{ConversationMessage, PresentationKind, ProfileField};
use super::prompts::{self, GreetingVariant};
use super::rules::{self, KeywordTable, TopicKind};
use super::state::{ConversationState, MenuPosition};
use crate::config::ChatConfig;

/// Stateless turn processor. One engine can serve any number of conversations.
pub struct DialogueEngine {
    config: ChatConfig,
    rules: KeywordTable,
}

impl DialogueEngine {
    /// Create an engine with the default keyword table.
    pub fn new(config: ChatConfig) -> Self {
        Self::with_rules(config, KeywordTable::default_rules())
    }

    pub fn with_rules(config: ChatConfig, rules: KeywordTable) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Pick the greeting from the caller's stored last-visit timestamp.
    pub fn greeting_variant(
        &self,
        last_visit: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> GreetingVariant {
        let cutoff = chrono::Duration::days(self.config.returning_after_days);
        match last_visit {
            Some(seen) if now.signed_duration_since(seen) > cutoff => GreetingVariant::Returning,
            _ => GreetingVariant::FirstVisit,
        }
    }

    /// Greet a freshly opened widget.
    ///
    /// Does nothing if the conversation already has a transcript. The caller
    /// should persist `now` as the new last-visit timestamp.
    pub fn open(
        &self,
        state: &mut ConversationState,
        last_visit: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Turn {
        if !state.transcript.is_empty() {
            return Turn::default();
        }
        let variant = self.greeting_variant(last_visit, now);
        info!(variant = ?variant, "Conversation opened");
        let mut turn = Turn::default();
        self.say(state, &mut turn, prompts::greeting(variant, &self.config.brand_name));
        turn
    }

    /// Process one user action, taking and returning ownership of the state.
    pub fn handle(
        &self,
        mut state: ConversationState,
        action: UserAction,
    ) -> (ConversationState, Turn) {
        let turn = self.apply(&mut state, action);
        (state, turn)
    }

    /// Process one user action in place.
    pub fn apply(&self, state: &mut ConversationState, action: UserAction) -> Turn {
        if state.closed {
            debug!("Ignoring input on a closed conversation");
            return Turn::default();
        }

        let mut turn = Turn::default();
        state.push(ConversationMessage::user(action.text()));

        if rules::is_closing(action.text()) {
            self.close(state, &mut turn);
            return turn;
        }

        match action {
            UserAction::MenuCommand(cmd) => self.run_command(state, &mut turn, cmd),
            UserAction::ProfileAnswer(answer) => {
                if state.awaiting_phone {
                    self.capture_phone(state, &mut turn, &answer);
                } else {
                    self.advance(state, &mut turn, &answer);
                }
            }
            UserAction::FreeText(text) => {
                if state.awaiting_phone {
                    self.capture_phone(state, &mut turn, &text);
                } else if let Some(rule) = self.rules.evaluate(&text) {
                    let key = rule.key;
                    self.answer_topic(state, &mut turn, key);
                } else {
                    self.advance(state, &mut turn, &text);
                }
            }
        }

        turn
    }

    // ── Tiers ───────────────────────────────────────────────────────────

    fn close(&self, state: &mut ConversationState, turn: &mut Turn) {
        state.closed = true;
        state.menu = MenuPosition::Main;
        state.awaiting_phone = false;
        info!(step = state.step, "Conversation closed");
        self.say(state, turn, prompts::farewell());
        turn.actions.push(EngineAction::CloseWidget {
            after: self.config.close_delay,
        });
    }

    fn run_command(&self, state: &mut ConversationState, turn: &mut Turn, cmd: MenuCommand) {
        debug!(command = cmd.label(), "Menu command");
        if cmd != MenuCommand::ScheduleCall {
            state.awaiting_phone = false;
        }
        match cmd {
            MenuCommand::BrowseFaqs => {
                state.menu = MenuPosition::FaqRoot;
                self.say(state, turn, prompts::faq_root());
            }
            MenuCommand::Category(category) => {
                state.menu = MenuPosition::FaqCategory(category);
                self.say(state, turn, prompts::faq_category(category));
            }
            MenuCommand::Topic(key) => self.answer_topic(state, turn, key),
            MenuCommand::Back => match state.menu {
                MenuPosition::FaqCategory(_) => {
                    state.menu = MenuPosition::FaqRoot;
                    self.say(state, turn, prompts::faq_root());
                }
                MenuPosition::FaqRoot | MenuPosition::Main => self.main_menu(state, turn),
            },
            MenuCommand::BackToMainMenu => self.main_menu(state, turn),
            MenuCommand::CloseChat => self.close(state, turn),
            MenuCommand::CallNow => {
                self.say(state, turn, prompts::calling(&self.config.phone_number));
                turn.actions.push(EngineAction::OpenUrl {
                    url: handoff::phone_link(&self.config.phone_number),
                    after: self.config.reply_delay,
                });
            }
            MenuCommand::ScheduleCall => {
                if let Some(phone) = state.profile.get(ProfileField::Phone) {
                    let phone = phone.to_string();
                    self.say(state, turn, prompts::callback_confirmed(&phone));
                    self.schedule_handoff(state, turn, HandoffReason::Callback);
                } else {
                    state.awaiting_phone = true;
                    self.say(state, turn, prompts::ask_phone());
                }
            }
            MenuCommand::BookMeeting => {
                self.say(state, turn, prompts::booking_meeting());
                self.schedule_handoff(state, turn, HandoffReason::Meeting);
            }
            MenuCommand::ConnectExpert => {
                self.say(state, turn, prompts::connecting_expert());
                self.schedule_handoff(state, turn, HandoffReason::ExpertRequest);
            }
            MenuCommand::AskMore => {
                state.menu = MenuPosition::Main;
                self.say(state, turn, prompts::ask_more());
            }
            MenuCommand::GeneralInfo => self.say(state, turn, prompts::general_info()),
            MenuCommand::StartOver => {
                state.reset();
                info!("Conversation restarted");
                self.say(
                    state,
                    turn,
                    prompts::greeting(GreetingVariant::FirstVisit, &self.config.brand_name),
                );
            }
        }
    }

    fn answer_topic(&self, state: &mut ConversationState, turn: &mut Turn, key: &str) {
        let Some(rule) = self.rules.get(key) else {
            debug!(topic = key, "Topic missing from keyword table");
            self.say(state, turn, prompts::default_offer());
            return;
        };

        let mut messages =
            vec![ConversationMessage::bot(&rule.answer).with_kind(PresentationKind::Info)];
        match rule.kind {
            TopicKind::Destination => {
                if let Some(record) = knowledge::destination(key) {
                    messages.push(
                        ConversationMessage::bot(record.render()).with_kind(PresentationKind::Info),
                    );
                }
            }
            TopicKind::Course => {
                if let Some(record) = knowledge::course(key) {
                    messages.push(
                        ConversationMessage::bot(record.render()).with_kind(PresentationKind::Info),
                    );
                }
            }
            TopicKind::Executive | TopicKind::General => {}
        }

        let in_category = matches!(state.menu, MenuPosition::FaqCategory(_));
        if let Some(last) = messages.pop() {
            messages.push(last.with_quick_replies(prompts::topic_follow_ups(in_category)));
        }
        for message in messages {
            self.say(state, turn, message);
        }

        if rule.kind == TopicKind::Executive {
            self.schedule_handoff(state, turn, HandoffReason::Escalation);
        }
    }

    fn capture_phone(&self, state: &mut ConversationState, turn: &mut Turn, phone: &str) {
        state.profile.set(ProfileField::Phone, phone);
        state.awaiting_phone = false;
        debug!("Phone number captured for call-back");
        let shown = state.profile.get(ProfileField::Phone).unwrap_or(phone).to_string();
        self.say(state, turn, prompts::callback_confirmed(&shown));
        self.schedule_handoff(state, turn, HandoffReason::Callback);
    }

    fn advance(&self, state: &mut ConversationState, turn: &mut Turn, answer: &str) {
        let Some(field) = state.pending_field() else {
            self.say(state, turn, prompts::default_offer());
            return;
        };
        state.record_answer(answer);
        state.menu = MenuPosition::Main;
        debug!(field = %field, step = state.step, "Questionnaire advanced");

        match prompts::step_prompt(state.step, &state.profile) {
            Some(prompt) => self.say(state, turn, prompt),
            None => {
                info!("Questionnaire complete");
                let summary = prompts::summary(&state.profile);
                self.say(state, turn, summary);
            }
        }
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn main_menu(&self, state: &mut ConversationState, turn: &mut Turn) {
        state.menu = MenuPosition::Main;
        self.say(state, turn, prompts::main_menu());
        if let Some(prompt) = prompts::step_prompt(state.step, &state.profile) {
            self.say(state, turn, prompt);
        }
    }

    fn schedule_handoff(&self, state: &ConversationState, turn: &mut Turn, reason: HandoffReason) {
        let text = handoff::handoff_summary(&state.profile, reason);
        let url = handoff::whatsapp_link(&self.config.whatsapp_number, &text);
        info!(reason = ?reason, "Handoff scheduled");
        turn.actions.push(EngineAction::OpenUrl {
            url,
            after: self.config.handoff_delay,
        });
    }

    fn say(&self, state: &mut ConversationState, turn: &mut Turn, message: ConversationMessage) {
        state.push(message.clone());
        turn.replies.push(Reply {
            message,
            delay: self.config.reply_delay,
        });
    }
}
