//! Static destination and course knowledge base.

use std::sync::LazyLock;

use super::rules::TopicKey;

/// What a student needs to know about a country.
#[derive(Debug, Clone)]
pub struct DestinationRecord {
    pub key: TopicKey,
    pub name: &'static str,
    pub flag: &'static str,
    pub universities: &'static str,
    pub annual_cost: &'static str,
    pub duration: &'static str,
    pub requirements: &'static [&'static str],
    pub highlights: &'static [&'static str],
    pub popular_courses: &'static [&'static str],
}

/// What a student needs to know about a field of study.
#[derive(Debug, Clone)]
pub struct CourseRecord {
    pub key: TopicKey,
    pub name: &'static str,
    pub top_destinations: &'static [&'static str],
    pub duration: &'static str,
    pub careers: &'static [&'static str],
    pub average_salary: &'static str,
}

static DESTINATIONS: LazyLock<Vec<DestinationRecord>> = LazyLock::new(|| {
    vec![
        DestinationRecord {
            key: "usa",
            name: "USA",
            flag: "🇺🇸",
            universities: "4,000+",
            annual_cost: "$30,000-60,000 per year",
            duration: "Bachelors 4 years, Masters 1.5-2 years",
            requirements: &["IELTS 6.5+ / TOEFL 80+", "GRE/GMAT for many Masters programs", "SAT/ACT for undergraduate"],
            highlights: &[
                "Home to most of the world's top-ranked universities",
                "Up to 3 years OPT work rights for STEM graduates",
                "Flexible curriculum with major and minor choices",
            ],
            popular_courses: &["Computer Science", "Business Analytics", "Engineering", "MBA"],
        },
        DestinationRecord {
            key: "uk",
            name: "UK",
            flag: "🇬🇧",
            universities: "160+",
            annual_cost: "£20,000-35,000 per year",
            duration: "Bachelors 3 years, Masters 1 year",
            requirements: &["IELTS 6.5+ (UKVI accepted)", "Strong academic transcripts", "Statement of Purpose"],
            highlights: &[
                "One-year Masters saves time and money",
                "2-year Graduate Route work visa",
                "Centuries-old universities like Oxford and Cambridge",
            ],
            popular_courses: &["Business & Management", "Law", "Data Science", "Finance"],
        },
        DestinationRecord {
            key: "canada",
            name: "Canada",
            flag: "🇨🇦",
            universities: "100+",
            annual_cost: "CAD 25,000-45,000 per year",
            duration: "Bachelors 4 years, Masters 1-2 years",
            requirements: &["IELTS 6.5+ / PTE 60+", "Proof of funds (GIC)", "Study permit"],
            highlights: &[
                "Post-Graduation Work Permit up to 3 years",
                "Clear pathway to permanent residency",
                "Safe, multicultural cities",
            ],
            popular_courses: &["Computer Science", "Engineering", "Business", "Healthcare"],
        },
        DestinationRecord {
            key: "australia",
            name: "Australia",
            flag: "🇦🇺",
            universities: "40+",
            annual_cost: "AUD 30,000-50,000 per year",
            duration: "Bachelors 3 years, Masters 1.5-2 years",
            requirements: &["IELTS 6.5+ / PTE 58+", "Genuine Student requirement", "OSHC health cover"],
            highlights: &[
                "2-4 years post-study work rights",
                "Group of Eight research universities",
                "Excellent quality of life",
            ],
            popular_courses: &["Nursing", "Engineering", "IT", "Accounting"],
        },
        DestinationRecord {
            key: "germany",
            name: "Germany",
            flag: "🇩🇪",
            universities: "400+",
            annual_cost: "€10,000-15,000 per year",
            duration: "Bachelors 3 years, Masters 2 years",
            requirements: &["IELTS 6.5+ or German proficiency", "Blocked account for living costs", "APS certificate"],
            highlights: &[
                "No or very low tuition at public universities",
                "18-month job-seeker visa after graduation",
                "Europe's largest economy",
            ],
            popular_courses: &["Mechanical Engineering", "Automotive Engineering", "Computer Science", "MBA"],
        },
        DestinationRecord {
            key: "ireland",
            name: "Ireland",
            flag: "🇮🇪",
            universities: "30+",
            annual_cost: "€15,000-30,000 per year",
            duration: "Bachelors 3-4 years, Masters 1 year",
            requirements: &["IELTS 6.5+", "Academic transcripts", "Proof of funds"],
            highlights: &[
                "European headquarters of leading tech companies",
                "Up to 2 years stay-back for Masters graduates",
                "English-speaking EU country",
            ],
            popular_courses: &["Data Analytics", "Computer Science", "Pharmaceutical Sciences", "Finance"],
        },
        DestinationRecord {
            key: "new_zealand",
            name: "New Zealand",
            flag: "🇳🇿",
            universities: "8",
            annual_cost: "NZD 25,000-45,000 per year",
            duration: "Bachelors 3 years, Masters 1-2 years",
            requirements: &["IELTS 6.5+", "Academic transcripts", "Proof of funds"],
            highlights: &[
                "All 8 universities ranked in the global top 3%",
                "Up to 3 years post-study work visa",
                "Safe and welcoming",
            ],
            popular_courses: &["Agriculture", "Engineering", "IT", "Hospitality"],
        },
    ]
});

static COURSES: LazyLock<Vec<CourseRecord>> = LazyLock::new(|| {
    vec![
        CourseRecord {
            key: "computer_science",
            name: "Computer Science",
            top_destinations: &["USA", "Canada", "Germany", "Ireland"],
            duration: "Masters 1-2 years",
            careers: &["Software Engineer", "Cloud Architect", "Security Analyst"],
            average_salary: "$90,000-130,000 per year",
        },
        CourseRecord {
            key: "business",
            name: "Business & MBA",
            top_destinations: &["USA", "UK", "Canada", "Australia"],
            duration: "MBA 1-2 years, MS 1 year",
            careers: &["Management Consultant", "Product Manager", "Investment Analyst"],
            average_salary: "$80,000-150,000 per year",
        },
        CourseRecord {
            key: "engineering",
            name: "Engineering",
            top_destinations: &["Germany", "USA", "Canada", "Australia"],
            duration: "Masters 1.5-2 years",
            careers: &["Mechanical Engineer", "Electrical Engineer", "Project Engineer"],
            average_salary: "$70,000-110,000 per year",
        },
        CourseRecord {
            key: "medicine",
            name: "Medicine & Healthcare",
            top_destinations: &["UK", "Australia", "Canada", "Ireland"],
            duration: "Nursing 2-4 years, Public Health 1-2 years",
            careers: &["Registered Nurse", "Pharmacist", "Public Health Specialist"],
            average_salary: "$60,000-100,000 per year",
        },
        CourseRecord {
            key: "data_science",
            name: "Data Science & AI",
            top_destinations: &["USA", "UK", "Ireland", "Canada"],
            duration: "Masters 1-2 years",
            careers: &["Data Scientist", "Machine Learning Engineer", "Data Analyst"],
            average_salary: "$95,000-140,000 per year",
        },
    ]
});

pub fn destination(key: &str) -> Option<&'static DestinationRecord> {
    DESTINATIONS.iter().find(|d| d.key == key)
}

pub fn course(key: &str) -> Option<&'static CourseRecord> {
    COURSES.iter().find(|c| c.key == key)
}

pub fn destinations() -> &'static [DestinationRecord] {
    &DESTINATIONS
}

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl DestinationRecord {
    /// Render the detailed info card shown after a destination topic answer.
    pub fn render(&self) -> String {
        format!(
            "{flag} Study in {name}\n\n\
             🏛️ Universities: {universities}\n\
             💰 Cost: {cost}\n\
             ⏱️ Duration: {duration}\n\n\
             📋 Requirements:\n{requirements}\n\n\
             ✨ Highlights:\n{highlights}\n\n\
             🎓 Popular courses: {courses}",
            flag = self.flag,
            name = self.name,
            universities = self.universities,
            cost = self.annual_cost,
            duration = self.duration,
            requirements = bullets(self.requirements),
            highlights = bullets(self.highlights),
            courses = self.popular_courses.join(", "),
        )
    }
}

impl CourseRecord {
    /// Render the detailed info card shown after a course topic answer.
    pub fn render(&self) -> String {
        format!(
            "📚 {name}\n\n\
             🌍 Top destinations: {destinations}\n\
             ⏱️ Duration: {duration}\n\
             💼 Careers:\n{careers}\n\n\
             💵 Average salary: {salary}",
            name = self.name,
            destinations = self.top_destinations.join(", "),
            duration = self.duration,
            careers = bullets(self.careers),
            salary = self.average_salary,
        )
    }
}
