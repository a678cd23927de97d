//! Keyword rules — fast topic matching ahead of the questionnaire.
//!
//! Each topic compiles its triggers into one case-insensitive regex anchored
//! on word boundaries, so "gre" matches "my GRE score" but not "degree" and
//! "sop" does not match "Sophia". Rules are scanned in declaration order and
//! the first match wins.

use regex::Regex;
use tracing::{debug, warn};

/// Canonical name of a topic in the keyword table.
pub type TopicKey = &'static str;

/// Words that end the conversation. Plain case-insensitive substring match.
pub const CLOSING_WORDS: [&str; 5] = ["close", "bye", "goodbye", "exit", "quit"];

/// Whether the raw input expresses an intent to close the chat.
pub fn is_closing(input: &str) -> bool {
    let lowered = input.to_lowercase();
    CLOSING_WORDS.iter().any(|w| lowered.contains(w))
}

/// What else happens when a topic matches, beyond the canned answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicKind {
    /// Canned answer only.
    General,
    /// The user wants a human; a handoff is scheduled.
    Executive,
    /// A destination with a knowledge-base record.
    Destination,
    /// A field of study with a knowledge-base record.
    Course,
}

/// A topic with its compiled triggers and canned answer.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub key: TopicKey,
    /// Trigger patterns as written, before compilation.
    pub triggers: Vec<String>,
    /// `(?i)\b(?:t1|t2|...)\b` over all triggers.
    pub regex: Regex,
    pub answer: String,
    pub kind: TopicKind,
}

impl KeywordRule {
    /// Compile a rule. Triggers are regex fragments matched as whole words.
    pub fn new(
        key: TopicKey,
        kind: TopicKind,
        triggers: &[&str],
        answer: &str,
    ) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"(?i)\b(?:{})\b", triggers.join("|")))?;
        Ok(Self {
            key,
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            regex,
            answer: answer.to_string(),
            kind,
        })
    }

    pub fn matches(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

/// Ordered topic table.
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
}

impl KeywordTable {
    /// Create a table with the default study-abroad topics.
    pub fn default_rules() -> Self {
        use TopicKind::*;

        let compiled = vec![
            // Escalation intent goes first so "confused about visas" reaches a human.
            KeywordRule::new(
                "executive",
                Executive,
                &[
                    "(talk|speak) to (someone|somebody)",
                    "talk to a human",
                    "real person",
                    "human",
                    "counsell?ors?",
                    "(talk|speak) to an expert",
                    "confused",
                    "need help",
                    "help me",
                    "call me",
                    "contact you",
                ],
                "I understand, some questions are best answered by a person. I'm connecting you \
                 with one of our expert counsellors on WhatsApp now, and I'll share what you've \
                 told me so far so you don't have to repeat yourself.",
            ),
            KeywordRule::new(
                "greeting",
                General,
                &["hii*", "hello", "hey", "good (morning|afternoon|evening)", "namaste"],
                "Hello! I'm here to help you plan your studies abroad. Ask me about destinations, \
                 courses, tests, visas, costs or scholarships, or browse the FAQs.",
            ),
            KeywordRule::new(
                "scholarship",
                General,
                &["scholarships?", "financial aid", "funding", "grants?", "bursar(y|ies)", "fee waivers?", "assistantships?"],
                "Scholarships come in three main forms: merit-based awards from universities, \
                 government scholarships (Fulbright, Chevening, DAAD, Australia Awards) and \
                 external awards from foundations. Most universities also offer automatic \
                 merit scholarships of 10-50% of tuition for strong profiles. Applying early, \
                 with a well-written SOP and good test scores, improves your chances.",
            ),
            KeywordRule::new(
                "visa",
                General,
                &["visas?", "f-?1", "study permits?", "cas", "i-?20", "embass(y|ies)", "biometrics?"],
                "Student visa requirements vary by country, but you will usually need an \
                 admission letter (I-20, CAS or Letter of Acceptance), proof of funds, a valid \
                 passport, English test scores and, for some countries, a visa interview. \
                 Processing typically takes 3-8 weeks, so apply as soon as you receive your \
                 admission documents.",
            ),
            KeywordRule::new(
                "pr",
                General,
                &["permanent residen(ce|cy|t)", "post[- ]study work", "psw", "opt", "stay back", "green card", "pr", "settle"],
                "Post-study work options: USA offers OPT for 1 year (up to 3 years for STEM), the \
                 UK Graduate Route gives 2 years, Canada's PGWP up to 3 years, Australia 2-4 years, \
                 Germany 18 months to find a job and Ireland up to 2 years. Canada and Australia \
                 offer the clearest pathways to permanent residency after study.",
            ),
            KeywordRule::new(
                "work",
                General,
                &["work while", "part[- ]time", "jobs?", "internships?", "earn while", "working hours"],
                "Most destinations let international students work part-time: 20 hours per week \
                 during term in the USA (on campus), UK, Australia (48 hours per fortnight) and \
                 Canada, and full-time during scheduled breaks. Germany allows 140 full days a \
                 year. Part-time work helps with living costs but should not be relied on to \
                 pay tuition.",
            ),
            KeywordRule::new(
                "loan",
                General,
                &["loans?", "finance my", "banks?", "collateral", "mpower", "prodigy"],
                "Education loans are available from public sector banks (up to ₹7.5 Lakhs \
                 without collateral), private banks and NBFCs (up to ₹1 Crore), and international \
                 lenders such as MPOWER and Prodigy that require no co-signer. Interest rates \
                 usually range from 8.5-13% and repayment starts after a moratorium period \
                 covering your course plus 6-12 months.",
            ),
            KeywordRule::new(
                "cost",
                General,
                &["costs?", "expens(e|es|ive)", "fees?", "tuition", "afford(able)?", "how much", "budget", "living expenses?"],
                "Annual costs (tuition + living) vary widely: USA $30,000-60,000, UK £20,000-35,000, \
                 Canada CAD 25,000-45,000, Australia AUD 30,000-50,000, and Germany €10,000-15,000 \
                 thanks to free or low tuition at public universities. Scholarships, part-time \
                 work and education loans can help close the gap.",
            ),
            KeywordRule::new(
                "intake",
                General,
                &["intakes?", "deadlines?", "fall", "spring", "autumn", "september", "january", "semesters?"],
                "The main intakes are Fall (September) and Spring (January), with some countries \
                 offering a May intake as well. Fall has the most programs and scholarships. \
                 Application deadlines are typically 6-10 months before the intake, so for \
                 September you should be applying between October and January.",
            ),
            KeywordRule::new(
                "timeline",
                General,
                &["timeline", "how long does", "how early", "when should i", "when to start", "process take"],
                "A typical timeline: start 12-18 months before your intake. Spend the first 3 \
                 months on research and test preparation, the next 3 on tests and shortlisting, \
                 then 3-4 months on applications. Admits arrive 2-4 months later, followed by \
                 visa processing and pre-departure preparation.",
            ),
            KeywordRule::new(
                "application",
                General,
                &["apply", "applying", "applications?", "admission process", "get admission", "how to get in"],
                "The application process: shortlist universities, prepare for and take the \
                 required tests, write your SOP and gather LORs, submit applications with \
                 transcripts and fees, attend interviews if required, accept an offer, then \
                 apply for your visa. Our counsellors help at every step.",
            ),
            KeywordRule::new(
                "documents",
                General,
                &["documents?", "transcripts?", "paperwork", "passports?", "mark ?sheets?", "certificates?"],
                "Common documents: academic transcripts and degree certificates, English test \
                 scores (IELTS/TOEFL/PTE), GRE/GMAT scores where required, Statement of Purpose, \
                 2-3 Letters of Recommendation, an updated resume/CV, a valid passport and \
                 proof of funds.",
            ),
            KeywordRule::new(
                "sop",
                General,
                &["sops?", "statement of purpose", "personal statement", "essays?"],
                "A Statement of Purpose explains who you are, why you chose the course and \
                 university, and what you plan to do after. Keep it to 800-1,000 words, make \
                 it specific and personal, connect your past experience to your goals, and \
                 tailor it to each university.",
            ),
            KeywordRule::new(
                "lor",
                General,
                &["lors?", "recommendations?", "reference letters?", "referees?"],
                "Most universities ask for 2-3 Letters of Recommendation from professors or \
                 employers who know your work well. Give your recommenders at least 3-4 weeks, \
                 share your resume and goals with them, and prefer specific, detailed letters \
                 over ones from senior but distant names.",
            ),
            KeywordRule::new(
                "eligibility",
                General,
                &["eligib(le|ility)", "qualify", "requirements?", "minimum percentage", "backlogs?", "gap year", "c?gpa"],
                "Eligibility depends on the country and program, but most universities look at \
                 your academic record (typically 60%+ for Masters), English proficiency scores, \
                 and for some programs GRE/GMAT and work experience. Backlogs and study gaps are \
                 usually acceptable if explained well in your SOP.",
            ),
            KeywordRule::new(
                "ielts",
                General,
                &["ielts"],
                "IELTS Academic is accepted in all major destinations. It tests Listening, \
                 Reading, Writing and Speaking, scored 0-9 in each band. Most universities ask \
                 for an overall 6.5 (no band below 6.0) for postgraduate study and 6.0 for \
                 undergraduate. Scores are valid for 2 years.",
            ),
            KeywordRule::new(
                "toefl",
                General,
                &["toefl"],
                "TOEFL iBT is an internet-based English test scored out of 120, widely preferred \
                 by US universities. Typical requirements are 80-100, with top schools asking \
                 for 100+. The test takes about 2 hours and scores are valid for 2 years.",
            ),
            KeywordRule::new(
                "pte",
                General,
                &["pte"],
                "PTE Academic is a fully computer-based English test scored 10-90, with results \
                 usually within 48 hours. It is accepted by almost all universities in the UK, \
                 Australia, New Zealand and Canada and many in the USA. Most programs require \
                 58-65.",
            ),
            KeywordRule::new(
                "duolingo",
                General,
                &["duolingo", "det"],
                "The Duolingo English Test is a 1-hour online test you can take from home, \
                 scored 10-160. Over 4,000 institutions accept it, and most ask for 105-120. \
                 Check each university's policy, as some programs still require IELTS or TOEFL.",
            ),
            KeywordRule::new(
                "gre",
                General,
                &["gre"],
                "The GRE General Test covers Verbal Reasoning, Quantitative Reasoning and \
                 Analytical Writing, scored 260-340 overall. It is required or recommended for \
                 many Masters and PhD programs, especially in the USA. A score of 310+ is \
                 competitive, and 320+ for top universities. Scores are valid for 5 years.",
            ),
            KeywordRule::new(
                "gmat",
                General,
                &["gmat"],
                "The GMAT Focus Edition is the standard test for MBA and business Masters \
                 admissions, scored 205-805. Top business schools look for 645+. Many schools \
                 also accept the GRE. Scores are valid for 5 years.",
            ),
            KeywordRule::new(
                "sat",
                General,
                &["sat", "act"],
                "The SAT (or ACT) is used for undergraduate admission in the USA. The SAT is \
                 scored 400-1600 and is now fully digital. Many universities are test-optional, \
                 but a strong score (1400+) still helps with admission and merit scholarships.",
            ),
            KeywordRule::new(
                "usa",
                Destination,
                &["usa", "united states", "american?"],
                "The USA has the world's largest higher-education system, with flexible \
                 programs, cutting-edge research and strong STEM opportunities including up to \
                 3 years of OPT work rights.",
            ),
            KeywordRule::new(
                "uk",
                Destination,
                &["uk", "united kingdom", "britain", "british", "england", "london", "scotland"],
                "The UK offers world-renowned universities and shorter programs: a Masters takes \
                 just one year, and the Graduate Route lets you work for 2 years after study.",
            ),
            KeywordRule::new(
                "canada",
                Destination,
                &["canada", "canadian", "toronto", "vancouver"],
                "Canada combines high-quality education with affordable costs, a welcoming \
                 multicultural society and one of the clearest pathways to permanent residency.",
            ),
            KeywordRule::new(
                "australia",
                Destination,
                &["australian?", "sydney", "melbourne"],
                "Australia is known for excellent universities, a great lifestyle and generous \
                 post-study work rights of 2-4 years.",
            ),
            KeywordRule::new(
                "germany",
                Destination,
                &["germany", "german", "berlin", "munich"],
                "Germany offers free or very low tuition at public universities, strong \
                 engineering programs and a booming job market for skilled graduates.",
            ),
            KeywordRule::new(
                "ireland",
                Destination,
                &["ireland", "dublin", "irish"],
                "Ireland is Europe's tech hub, home to the European headquarters of Google, Meta \
                 and Apple, with one-year Masters programs and 2 years of stay-back.",
            ),
            KeywordRule::new(
                "new_zealand",
                Destination,
                &["new zealand", "nz", "auckland"],
                "New Zealand offers a safe, welcoming environment, globally ranked universities \
                 and up to 3 years of post-study work rights.",
            ),
            KeywordRule::new(
                "accommodation",
                General,
                &["accommodation", "housing", "hostels?", "dorms?", "dormitor(y|ies)", "rent", "place to stay", "where will i stay"],
                "Students usually choose between on-campus halls of residence, university-managed \
                 apartments, private student housing and shared rentals. Expect $600-1,500 per \
                 month depending on city. Book early, especially for the Fall intake.",
            ),
            KeywordRule::new(
                "insurance",
                General,
                &["insurance", "medical cover", "health cover", "oshc"],
                "Health insurance is mandatory for international students in most countries: \
                 OSHC in Australia, university plans in the USA, the Immigration Health \
                 Surcharge in the UK and public or private insurance in Germany. Budget for it \
                 when planning your finances.",
            ),
            KeywordRule::new(
                "predeparture",
                General,
                &["pre-? ?departure", "before leaving", "what to pack", "packing", "travel(l?ing)?"],
                "Before you fly: book accommodation and flights, arrange forex and an \
                 international card, buy insurance, carry copies of all documents, get \
                 required vaccinations and attend a pre-departure briefing. We run free \
                 pre-departure sessions for our students.",
            ),
            KeywordRule::new(
                "services",
                General,
                &["your services", "what services", "what do you do", "how can you help", "consultancy", "your fees", "your charges"],
                "We offer end-to-end support: career counselling, university shortlisting, test \
                 preparation, SOP and LOR guidance, application filing, scholarship assistance, \
                 education loans, visa guidance and pre-departure briefings.",
            ),
            KeywordRule::new(
                "computer_science",
                Course,
                &["computer science", "cs", "software", "programming", "coding"],
                "Computer Science is the most popular choice for international students, with \
                 strong demand for graduates in software, cloud and security roles.",
            ),
            KeywordRule::new(
                "business",
                Course,
                &["mba", "business", "management", "bba"],
                "Business and MBA programs build leadership, strategy and finance skills and \
                 open doors to consulting, banking and product roles worldwide.",
            ),
            KeywordRule::new(
                "engineering",
                Course,
                &["engineering", "mechanical", "electrical", "civil", r"b\.?tech", r"m\.?tech"],
                "Engineering degrees abroad combine rigorous theory with lab and industry \
                 experience, and graduates are in demand across manufacturing, energy and tech.",
            ),
            KeywordRule::new(
                "medicine",
                Course,
                &["medicine", "mbbs", "medical", "nursing", "pharmacy", "healthcare"],
                "Medicine and healthcare programs offer rewarding careers, with growing demand \
                 for nurses, pharmacists and public-health professionals worldwide.",
            ),
            KeywordRule::new(
                "data_science",
                Course,
                &["data science", "data analytics", "machine learning", "ai", "artificial intelligence"],
                "Data Science and AI are among the fastest-growing fields, blending statistics, \
                 programming and domain knowledge.",
            ),
        ];

        let rules = compiled
            .into_iter()
            .filter_map(|rule| match rule {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!(error = %e, "Skipping keyword rule that failed to compile");
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Create an empty table (for testing).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. It is checked after every existing rule.
    pub fn add_rule(&mut self, rule: KeywordRule) {
        self.rules.push(rule);
    }

    /// Look a topic up by key.
    pub fn get(&self, key: &str) -> Option<&KeywordRule> {
        self.rules.iter().find(|r| r.key == key)
    }

    /// Topic keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = TopicKey> + '_ {
        self.rules.iter().map(|r| r.key)
    }

    /// Find the first topic with a trigger word in the input.
    pub fn evaluate(&self, input: &str) -> Option<&KeywordRule> {
        let rule = self.rules.iter().find(|r| r.matches(input))?;
        debug!(topic = rule.key, "Input matched keyword rule");
        Some(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_is_case_insensitive_substring() {
        assert!(is_closing("BYE"));
        assert!(is_closing("ok goodbye then"));
        assert!(is_closing("Close Chat"));
        assert!(is_closing("I want to EXIT"));
        assert!(is_closing("quit"));
        assert!(!is_closing("tell me about canada"));
    }

    #[test]
    fn matches_ielts_case_insensitively() {
        let table = KeywordTable::default_rules();
        assert_eq!(table.evaluate("IELTS").map(|r| r.key), Some("ielts"));
        assert_eq!(table.evaluate("what band for ielts?").map(|r| r.key), Some("ielts"));
    }

    #[test]
    fn whole_word_triggers_do_not_match_inside_words() {
        let table = KeywordTable::default_rules();
        assert_eq!(table.evaluate("my GRE score").map(|r| r.key), Some("gre"));
        assert!(table.evaluate("Bachelor's Degree").is_none());
        assert!(table.evaluate("Asha").is_none());
        assert!(table.evaluate("a@x.com").is_none());
        assert_eq!(table.evaluate("GRE-score?").map(|r| r.key), Some("gre"));
    }

    #[test]
    fn names_and_answers_starting_with_trigger_words_pass_through() {
        let table = KeywordTable::default_rules();
        for input in [
            "Sophia",
            "Lorenzo",
            "Feroz Dormer",
            "Grantham",
            "I feel ready by next year",
            "Btechnica Labs",
            "Rental Kumar",
        ] {
            assert!(
                table.evaluate(input).is_none(),
                "{input} matched {:?}",
                table.evaluate(input).map(|r| r.key)
            );
        }
    }

    #[test]
    fn plural_and_inflected_triggers_match() {
        let table = KeywordTable::default_rules();
        assert_eq!(table.evaluate("any scholarships?").map(|r| r.key), Some("scholarship"));
        assert_eq!(table.evaluate("Which documents").map(|r| r.key), Some("documents"));
        assert_eq!(table.evaluate("my B.Tech marks").map(|r| r.key), Some("engineering"));
        assert_eq!(table.evaluate("I-20 form").map(|r| r.key), Some("visa"));
    }

    #[test]
    fn country_names_match_destination_topics() {
        let table = KeywordTable::default_rules();
        let rule = table.evaluate("USA").unwrap();
        assert_eq!(rule.key, "usa");
        assert_eq!(rule.kind, TopicKind::Destination);
        assert_eq!(table.evaluate("studying in Canada").map(|r| r.key), Some("canada"));
        assert_eq!(table.evaluate("New Zealand").map(|r| r.key), Some("new_zealand"));
    }

    #[test]
    fn executive_triggers_escalate() {
        let table = KeywordTable::default_rules();
        for input in ["I'm confused", "can I talk to someone", "need help with this"] {
            let rule = table.evaluate(input).unwrap();
            assert_eq!(rule.kind, TopicKind::Executive, "{input}");
        }
    }

    #[test]
    fn first_declared_topic_wins() {
        let table = KeywordTable::default_rules();
        // Both "scholarship" and "usa" trigger; scholarship is declared first.
        assert_eq!(
            table.evaluate("scholarship in USA").map(|r| r.key),
            Some("scholarship")
        );
        // Executive outranks everything.
        assert_eq!(
            table.evaluate("confused about visa").map(|r| r.key),
            Some("executive")
        );
    }

    #[test]
    fn custom_rule_is_checked_last() {
        let mut table = KeywordTable::empty();
        table.add_rule(KeywordRule::new("a", TopicKind::General, &["shared"], "A").unwrap());
        table.add_rule(
            KeywordRule::new("b", TopicKind::General, &["shared", "only b"], "B").unwrap(),
        );
        assert_eq!(table.evaluate("shared").map(|r| r.key), Some("a"));
        assert_eq!(table.evaluate("only b").map(|r| r.key), Some("b"));
    }

    #[test]
    fn empty_table_matches_nothing() {
        let table = KeywordTable::empty();
        assert!(table.evaluate("ielts").is_none());
    }

    #[test]
    fn every_default_rule_compiles() {
        let table = KeywordTable::default_rules();
        assert_eq!(table.keys().count(), 38);
        assert_eq!(table.keys().next(), Some("executive"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(KeywordRule::new("broken", TopicKind::General, &["(unclosed"], "x").is_err());
    }

    #[test]
    fn keys_are_unique() {
        let table = KeywordTable::default_rules();
        let mut keys: Vec<_> = table.keys().collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert!(total >= 30);
    }
}
