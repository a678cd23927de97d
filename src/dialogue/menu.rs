//! FAQ menu tree and exact-label navigation commands.
//!
//! Menu commands are recognised by exact label equality, never by substring.
//! FAQ leaves resolve to a topic key in the keyword table so that browsing to
//! a leaf and typing the topic produce the same answer.

use serde::{Deserialize, Serialize};

use super::rules::TopicKey;

/// Top-level FAQ categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaqCategory {
    AdmissionsAndApplications,
    TestsAndExams,
    VisasAndWork,
    CostsAndFunding,
    Destinations,
    PopularCourses,
    StudentLife,
}

impl FaqCategory {
    pub const ALL: [FaqCategory; 7] = [
        Self::AdmissionsAndApplications,
        Self::TestsAndExams,
        Self::VisasAndWork,
        Self::CostsAndFunding,
        Self::Destinations,
        Self::PopularCourses,
        Self::StudentLife,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AdmissionsAndApplications => "Admissions & Applications",
            Self::TestsAndExams => "Tests & Exams",
            Self::VisasAndWork => "Visas & Work",
            Self::CostsAndFunding => "Costs & Funding",
            Self::Destinations => "Destinations",
            Self::PopularCourses => "Popular Courses",
            Self::StudentLife => "Student Life",
        }
    }

    /// Leaf entries as `(label, topic key)` pairs.
    pub fn leaves(&self) -> &'static [(&'static str, TopicKey)] {
        match self {
            Self::AdmissionsAndApplications => &[
                ("Application Process", "application"),
                ("Documents Required", "documents"),
                ("Statement of Purpose", "sop"),
                ("Letters of Recommendation", "lor"),
                ("Eligibility", "eligibility"),
                ("Intakes & Deadlines", "intake"),
                ("Application Timeline", "timeline"),
            ],
            Self::TestsAndExams => &[
                ("IELTS", "ielts"),
                ("TOEFL", "toefl"),
                ("PTE", "pte"),
                ("Duolingo English Test", "duolingo"),
                ("GRE", "gre"),
                ("GMAT", "gmat"),
                ("SAT", "sat"),
            ],
            Self::VisasAndWork => &[
                ("Student Visa", "visa"),
                ("Work While Studying", "work"),
                ("Post-Study Work & PR", "pr"),
            ],
            Self::CostsAndFunding => &[
                ("Cost of Studying", "cost"),
                ("Scholarships", "scholarship"),
                ("Education Loans", "loan"),
            ],
            Self::Destinations => &[
                ("Study in USA", "usa"),
                ("Study in UK", "uk"),
                ("Study in Canada", "canada"),
                ("Study in Australia", "australia"),
                ("Study in Germany", "germany"),
                ("Study in Ireland", "ireland"),
                ("Study in New Zealand", "new_zealand"),
            ],
            Self::PopularCourses => &[
                ("Computer Science", "computer_science"),
                ("MBA & Business", "business"),
                ("Engineering", "engineering"),
                ("Medicine", "medicine"),
                ("Data Science", "data_science"),
            ],
            Self::StudentLife => &[
                ("Accommodation", "accommodation"),
                ("Health Insurance", "insurance"),
                ("Pre-Departure Checklist", "predeparture"),
                ("Our Services", "services"),
            ],
        }
    }

    /// Quick replies shown while this category is open.
    pub fn options(&self) -> Vec<String> {
        self.leaves()
            .iter()
            .map(|(label, _)| label.to_string())
            .chain([
                MenuCommand::Back.label().to_string(),
                MenuCommand::BackToMainMenu.label().to_string(),
            ])
            .collect()
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// Quick replies shown at the FAQ root.
pub fn root_options() -> Vec<String> {
    FaqCategory::ALL
        .iter()
        .map(|c| c.label().to_string())
        .chain([MenuCommand::BackToMainMenu.label().to_string()])
        .collect()
}

/// A navigational command selected from a quick reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    BrowseFaqs,
    Category(FaqCategory),
    /// An FAQ leaf; carries the topic key to answer with.
    Topic(TopicKey),
    Back,
    BackToMainMenu,
    CloseChat,
    CallNow,
    ScheduleCall,
    BookMeeting,
    ConnectExpert,
    AskMore,
    GeneralInfo,
    StartOver,
}

impl MenuCommand {
    /// Commands with a fixed label (everything except categories and leaves).
    const FIXED: [MenuCommand; 11] = [
        Self::BrowseFaqs,
        Self::Back,
        Self::BackToMainMenu,
        Self::CloseChat,
        Self::CallNow,
        Self::ScheduleCall,
        Self::BookMeeting,
        Self::ConnectExpert,
        Self::AskMore,
        Self::GeneralInfo,
        Self::StartOver,
    ];

    /// Resolve a selected label. Exact, case-sensitive match only.
    pub fn from_label(label: &str) -> Option<Self> {
        if let Some(cmd) = Self::FIXED.into_iter().find(|c| c.label() == label) {
            return Some(cmd);
        }
        if let Some(category) = FaqCategory::from_label(label) {
            return Some(Self::Category(category));
        }
        FaqCategory::ALL
            .iter()
            .flat_map(|c| c.leaves().iter())
            .find(|(leaf, _)| *leaf == label)
            .map(|(_, topic)| Self::Topic(*topic))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BrowseFaqs => "Browse FAQs",
            Self::Category(category) => category.label(),
            Self::Topic(topic) => FaqCategory::ALL
                .iter()
                .flat_map(|c| c.leaves().iter())
                .find(|(_, t)| t == topic)
                .map(|(label, _)| *label)
                .unwrap_or(*topic),
            Self::Back => "Back",
            Self::BackToMainMenu => "Back to Main Menu",
            Self::CloseChat => "Close Chat",
            Self::CallNow => "Call Now",
            Self::ScheduleCall => "Schedule a Call",
            Self::BookMeeting => "Book Consultant Meeting",
            Self::ConnectExpert => "Connect with an Expert",
            Self::AskMore => "Ask More Questions",
            Self::GeneralInfo => "View General Info",
            Self::StartOver => "Start Over",
        }
    }
}

/// Every label that resolves to a [`MenuCommand`].
pub fn all_labels() -> Vec<&'static str> {
    MenuCommand::FIXED
        .iter()
        .map(|c| c.label())
        .chain(FaqCategory::ALL.iter().map(|c| c.label()))
        .chain(
            FaqCategory::ALL
                .iter()
                .flat_map(|c| c.leaves().iter().map(|(label, _)| *label)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn fixed_labels_resolve() {
        assert_eq!(MenuCommand::from_label("Browse FAQs"), Some(MenuCommand::BrowseFaqs));
        assert_eq!(MenuCommand::from_label("Back"), Some(MenuCommand::Back));
        assert_eq!(
            MenuCommand::from_label("Back to Main Menu"),
            Some(MenuCommand::BackToMainMenu)
        );
        assert_eq!(MenuCommand::from_label("Call Now"), Some(MenuCommand::CallNow));
        assert_eq!(
            MenuCommand::from_label("Book Consultant Meeting"),
            Some(MenuCommand::BookMeeting)
        );
    }

    #[test]
    fn matching_is_exact() {
        assert!(MenuCommand::from_label("browse faqs").is_none());
        assert!(MenuCommand::from_label("Browse FAQs please").is_none());
        assert!(MenuCommand::from_label(" Back").is_none());
    }

    #[test]
    fn categories_and_leaves_resolve() {
        assert_eq!(
            MenuCommand::from_label("Tests & Exams"),
            Some(MenuCommand::Category(FaqCategory::TestsAndExams))
        );
        assert_eq!(MenuCommand::from_label("IELTS"), Some(MenuCommand::Topic("ielts")));
        assert_eq!(
            MenuCommand::from_label("Study in USA"),
            Some(MenuCommand::Topic("usa"))
        );
    }

    #[test]
    fn labels_roundtrip() {
        for label in all_labels() {
            let cmd = MenuCommand::from_label(label).unwrap();
            assert_eq!(cmd.label(), label);
        }
    }

    #[test]
    fn labels_are_unique() {
        let labels = all_labels();
        let unique: HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len());
    }

    #[test]
    fn category_options_end_with_navigation() {
        let options = FaqCategory::TestsAndExams.options();
        assert_eq!(options.first().map(String::as_str), Some("IELTS"));
        assert_eq!(
            &options[options.len() - 2..],
            ["Back".to_string(), "Back to Main Menu".to_string()]
        );
    }

    #[test]
    fn root_options_list_every_category() {
        let options = root_options();
        assert_eq!(options.len(), FaqCategory::ALL.len() + 1);
        assert_eq!(options[1], "Tests & Exams");
    }
}
