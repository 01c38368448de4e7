// Resume extraction prompt.
// The resume text is inserted as-is, with no escaping.

use crate::extraction::ExtractedText;

pub const RESUME_PARSE_PROMPT: &str = "\
Extract structured resume information in JSON format from the following resume text.
Return JSON with fields: name, contact (email, phone, linkedin), education, skills, \
achievements, experience (company, title, duration, location, description), projects.

Resume Text:
{resume_text}

JSON Output:";

/// The full text sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload(String);

impl PromptPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn build_prompt(text: &ExtractedText) -> PromptPayload {
    PromptPayload(RESUME_PARSE_PROMPT.replace("{resume_text}", text.as_str()))
}
