//! LLM prompts for the three extraction kinds.
//!
//! Each kind has a system prompt (role framing) and a user prompt template
//! that embeds the research corpus and the exact JSON field names expected
//! back. Placeholders are `{name}` and are filled by the `format_*` helpers.

/// Framing for company background extraction.
pub const BACKGROUND_SYSTEM: &str = r#"You are an expert researcher specializing in company research for job candidates.
Extract only information relevant to interview preparation that can be clearly inferred from the provided content.
Never assume. If a fact is not in the content, use "Unknown" for text fields and an empty list for list fields."#;

/// Company background request.
pub const BACKGROUND_USER: &str = r#"Company: {company}

===== RESEARCH CONTENT =====
{content}
===== END OF CONTENT =====

Extract the following information from the content above:
- Company size (number of employees)
- Industry and primary business focus
- Company culture description (3-5 key adjectives)
- Core values (3-5 values)
- Recent news or events affecting hiring (last 6 months)

Respond with a single JSON object using these exact field names:
{
    "company_size": "string",
    "industry": "string",
    "company_culture": "string",
    "values": ["string"],
    "recent_news": ["string"]
}

Only respond with the JSON object. Ensure it is valid JSON."#;

/// Framing for interview process extraction.
pub const PROCESS_SYSTEM: &str = r#"You are an expert in analyzing technical interview processes.
Extract and structure the interview process from the provided research content.
Pay special attention to technical assessments and behavioral expectations.
Only include information that can be clearly inferred from the content; use "Unknown" rather than making assumptions."#;

/// Interview process request.
pub const PROCESS_USER: &str = r#"Company: {company}
Role: {role}

===== RESEARCH CONTENT =====
{content}
===== END OF CONTENT =====

Extract the interview process as a JSON object with these exact field names:
{
    "typical_stages": ["ordered list of interview stages, e.g. phone screen, technical round, system design"],
    "duration": "estimated time from first contact to offer, e.g. '2-4 weeks'",
    "common_questions": ["5-7 commonly asked technical or behavioral questions"],
    "technical_assessment": true/false,
    "system_design": true/false,
    "behavioral_focus": true/false,
    "coding_challenges": true/false,
    "take_home_projects": true/false
}

Only respond with the JSON object. If a field cannot be determined, use null."#;

/// Framing for guide generation.
pub const GUIDE_SYSTEM: &str = r#"You are a senior hiring manager with 15+ years of experience at top tech companies.
Create actionable, specific preparation advice for candidates.
Focus on practical strategies grounded in the research provided rather than generic advice."#;

/// Guide request. `{background}` and `{process}` are JSON-serialized records.
pub const GUIDE_USER: &str = r#"Company: {company} | Role: {role}

===== COMPANY BACKGROUND =====
{background}

===== INTERVIEW PROCESS =====
{process}

===== COMPANY RESEARCH =====
{company_research}

===== INTERVIEW RESEARCH =====
{interview_research}
===== END OF CONTENT =====

Create a preparation guide as a JSON object with these exact field names:
{
    "overview": "2-3 sentence preparation strategy for this company's process",
    "timeline": {
        "1_week_before": ["tasks"],
        "3_days_before": ["tasks"],
        "day_before": ["tasks"]
    },
    "technical_preparation": {
        "topics_to_study": ["5-7 specific technical areas"],
        "practice_resources": ["books, courses or practice platforms"]
    },
    "behavioral_preparation": {
        "common_questions": ["behavioral questions to prepare stories for"],
        "company_specific_tips": ["tips tied to this company's values and culture"]
    },
    "additional_tips": ["common pitfalls to avoid and other advice"]
}

Only respond with the JSON object."#;

/// Shown in place of a corpus that came back empty.
const NO_CONTENT: &str = "No research content available.";

fn or_no_content(content: &str) -> &str {
    if content.trim().is_empty() {
        NO_CONTENT
    } else {
        content
    }
}

/// Substitute `{name}` placeholders in one pass over the template.
///
/// Inserted values are never scanned again, so a company name or page text
/// containing `{role}` stays as written. Unknown placeholders are kept.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let value = tail.find('}').and_then(|close| {
            let name = &tail[1..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close + 1))
        });

        match value {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn format_background_prompt(company: &str, content: &str) -> String {
    fill(
        BACKGROUND_USER,
        &[("company", company), ("content", or_no_content(content))],
    )
}

pub fn format_process_prompt(company: &str, role: &str, content: &str) -> String {
    fill(
        PROCESS_USER,
        &[
            ("company", company),
            ("role", role),
            ("content", or_no_content(content)),
        ],
    )
}

pub fn format_guide_prompt(
    company: &str,
    role: &str,
    background: &str,
    process: &str,
    company_research: &str,
    interview_research: &str,
) -> String {
    fill(
        GUIDE_USER,
        &[
            ("company", company),
            ("role", role),
            ("background", background),
            ("process", process),
            ("company_research", or_no_content(company_research)),
            ("interview_research", or_no_content(interview_research)),
        ],
    )
}
