//! Bot copy: greetings, questionnaire prompts, menus and the profile summary.

use super::knowledge;
use super::menu::{self, FaqCategory, MenuCommand};
use super::model::{ConversationMessage, PresentationKind, ProfileField, UserProfile};
use super::state::QUESTIONNAIRE;

/// Which greeting to open the conversation with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingVariant {
    FirstVisit,
    Returning,
}

fn labels(commands: &[MenuCommand]) -> Vec<String> {
    commands.iter().map(|c| c.label().to_string()).collect()
}

/// Options offered with a questionnaire prompt, if any.
pub fn step_options(field: ProfileField) -> &'static [&'static str] {
    match field {
        ProfileField::Name | ProfileField::Email | ProfileField::Phone => &[],
        ProfileField::EducationLevel => &[
            "High School",
            "Bachelor's Degree",
            "Master's Degree",
            "Diploma",
            "Working Professional",
        ],
        ProfileField::DestinationCountry => &[
            "USA",
            "UK",
            "Canada",
            "Australia",
            "Germany",
            "Ireland",
            "New Zealand",
            "Not Sure Yet",
        ],
        ProfileField::FieldOfStudy => &[
            "Computer Science & IT",
            "Business & Management",
            "Engineering & Technology",
            "Medicine & Healthcare",
            "Data Science & AI",
            "Arts & Humanities",
        ],
        ProfileField::BudgetBand => &[
            "Under ₹10 Lakhs",
            "₹10-20 Lakhs",
            "₹20-30 Lakhs",
            "Above ₹30 Lakhs",
        ],
        ProfileField::StartTimeline => &[
            "Within 6 months",
            "Next year",
            "In 2 years",
            "Just exploring",
        ],
    }
}

/// Opening message. Always ends by asking for the user's name.
pub fn greeting(variant: GreetingVariant, brand: &str) -> ConversationMessage {
    let text = match variant {
        GreetingVariant::FirstVisit => format!(
            "👋 Welcome to {brand}! I'm your study abroad assistant. I can help you find the \
             right country, course and university, and answer questions about tests, visas, \
             costs and scholarships.\n\nTo get started, may I know your name?"
        ),
        GreetingVariant::Returning => format!(
            "👋 Welcome back to {brand}! It's great to see you again. Let's pick up your study \
             abroad plans.\n\nMay I know your name?"
        ),
    };
    ConversationMessage::bot(text)
        .with_quick_replies(labels(&[MenuCommand::BrowseFaqs, MenuCommand::ConnectExpert]))
}

/// Prompt for the questionnaire slot at `step`. `None` once all are collected.
pub fn step_prompt(step: usize, profile: &UserProfile) -> Option<ConversationMessage> {
    let field = *QUESTIONNAIRE.get(step)?;
    let name = profile.display_name();
    let text = match field {
        ProfileField::Name => "May I know your name?".to_string(),
        ProfileField::Email => format!(
            "Nice to meet you, {name}! 😊 What's your email address? Our counsellors will use it \
             to share university shortlists and resources."
        ),
        ProfileField::EducationLevel => "What's your current education level?".to_string(),
        ProfileField::DestinationCountry => "Which country would you like to study in?".to_string(),
        ProfileField::FieldOfStudy => "Great choice! Which field would you like to study?".to_string(),
        ProfileField::BudgetBand => {
            "What's your approximate total budget for tuition and living costs?".to_string()
        }
        ProfileField::StartTimeline => "When are you planning to start your studies?".to_string(),
        ProfileField::Phone => return None,
    };
    Some(ConversationMessage::bot(text).with_quick_replies(step_options(field).iter().copied()))
}

/// Profile summary shown once every questionnaire answer is in.
pub fn summary(profile: &UserProfile) -> ConversationMessage {
    let value = |field: ProfileField| profile.get(field).unwrap_or("Not provided");
    let text = format!(
        "🎉 Thanks, {name}! Here's your study abroad profile:\n\n\
         👤 Name: {name_value}\n\
         📧 Email: {email}\n\
         🎓 Education: {education}\n\
         🌍 Destination: {destination}\n\
         📚 Course: {course}\n\
         💰 Budget: {budget}\n\
         📅 Timeline: {timeline}\n\n\
         Based on your profile, our counsellors can build a personalised university shortlist \
         for you. What would you like to do next?",
        name = profile.display_name(),
        name_value = value(ProfileField::Name),
        email = value(ProfileField::Email),
        education = value(ProfileField::EducationLevel),
        destination = value(ProfileField::DestinationCountry),
        course = value(ProfileField::FieldOfStudy),
        budget = value(ProfileField::BudgetBand),
        timeline = value(ProfileField::StartTimeline),
    );
    ConversationMessage::bot(text)
        .with_kind(PresentationKind::Success)
        .with_quick_replies(labels(&[
            MenuCommand::ConnectExpert,
            MenuCommand::AskMore,
            MenuCommand::GeneralInfo,
        ]))
}

/// Quick replies attached after a topic answer.
pub fn topic_follow_ups(in_faq_category: bool) -> Vec<String> {
    if in_faq_category {
        labels(&[
            MenuCommand::Back,
            MenuCommand::BackToMainMenu,
            MenuCommand::ConnectExpert,
        ])
    } else {
        labels(&[MenuCommand::BrowseFaqs, MenuCommand::ConnectExpert])
    }
}

pub fn faq_root() -> ConversationMessage {
    ConversationMessage::bot("📚 Here are our frequently asked questions. Pick a category:")
        .with_kind(PresentationKind::Suggestion)
        .with_quick_replies(menu::root_options())
}

pub fn faq_category(category: FaqCategory) -> ConversationMessage {
    ConversationMessage::bot(format!("{}: what would you like to know?", category.label()))
        .with_kind(PresentationKind::Suggestion)
        .with_quick_replies(category.options())
}

pub fn main_menu() -> ConversationMessage {
    ConversationMessage::bot("How else can I help you today?").with_quick_replies(labels(&[
        MenuCommand::BrowseFaqs,
        MenuCommand::ConnectExpert,
        MenuCommand::ScheduleCall,
        MenuCommand::CallNow,
    ]))
}

/// Fallback once the questionnaire is complete and nothing matched.
pub fn default_offer() -> ConversationMessage {
    ConversationMessage::bot(
        "I'm not sure I have a good answer for that. Would you like me to connect you with one \
         of our expert counsellors?",
    )
    .with_kind(PresentationKind::Suggestion)
    .with_quick_replies(labels(&[
        MenuCommand::ConnectExpert,
        MenuCommand::BookMeeting,
        MenuCommand::BrowseFaqs,
    ]))
}

pub fn farewell() -> ConversationMessage {
    ConversationMessage::bot(
        "Thank you for chatting with us! Best of luck with your study abroad journey. 👋",
    )
    .with_kind(PresentationKind::Success)
}

pub fn ask_more() -> ConversationMessage {
    ConversationMessage::bot(
        "Of course! Ask me anything about destinations, courses, tests, visas, costs, \
         scholarships or student life.",
    )
    .with_quick_replies(labels(&[MenuCommand::BrowseFaqs]))
}

/// Non-personalised overview of every destination.
pub fn general_info() -> ConversationMessage {
    let lines: Vec<String> = knowledge::destinations()
        .iter()
        .map(|d| format!("{} {}: {} universities, {}", d.flag, d.name, d.universities, d.annual_cost))
        .collect();
    let text = format!(
        "🌍 Popular study destinations at a glance:\n\n{}\n\n\
         Costs include tuition and living expenses. Scholarships and part-time work can reduce \
         them significantly.",
        lines.join("\n")
    );
    ConversationMessage::bot(text)
        .with_kind(PresentationKind::Info)
        .with_quick_replies(labels(&[
            MenuCommand::BrowseFaqs,
            MenuCommand::ConnectExpert,
            MenuCommand::BookMeeting,
        ]))
}

pub fn connecting_expert() -> ConversationMessage {
    ConversationMessage::bot(
        "🤝 Connecting you with an expert counsellor on WhatsApp. I've included your details so \
         you won't have to repeat yourself.",
    )
    .with_kind(PresentationKind::Success)
}

pub fn booking_meeting() -> ConversationMessage {
    ConversationMessage::bot(
        "📅 Let's book your free consultation! I'm opening WhatsApp so you can pick a time that \
         suits you.",
    )
    .with_kind(PresentationKind::Success)
}

pub fn calling(phone_number: &str) -> ConversationMessage {
    ConversationMessage::bot(format!(
        "📞 Calling our counsellors at {phone_number}. We're available Monday to Saturday, \
         10 AM to 7 PM."
    ))
    .with_kind(PresentationKind::Info)
}

pub fn ask_phone() -> ConversationMessage {
    ConversationMessage::bot(
        "Sure! Please share your phone number and one of our counsellors will call you back.",
    )
}

pub fn callback_confirmed(phone: &str) -> ConversationMessage {
    ConversationMessage::bot(format!(
        "✅ Thanks! A counsellor will call you on {phone} shortly. I'm also opening WhatsApp so \
         you can confirm a convenient time."
    ))
    .with_kind(PresentationKind::Success)
}
