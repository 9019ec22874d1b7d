// LLM prompt constants for cover letter generation.

/// System prompt — caps the paragraph near 120 words and steers away from
/// generic filler.
pub const COVER_LETTER_SYSTEM: &str = "You are a professional job application assistant. \
    Generate a personalized cover letter paragraph (maximum 120 words) that highlights \
    the applicant's fit for the position. The paragraph should be ready to include in a \
    formal cover letter. Make it specific to the job description and company. Do not use \
    generic language. Focus on value proposition and relevant skills. Don't exceed 120 words.";

/// Cover letter prompt template. Replace `{job_info}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str =
    "Please write a personalized cover letter paragraph for the following job:\n\n{job_info}";
