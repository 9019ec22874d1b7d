// LLM prompt constants for job summarization.

/// System prompt for summary generation — caps output near 280 characters.
pub const SUMMARY_SYSTEM: &str = "You are a helpful assistant that summarizes job postings \
    concisely. Your summary should be no more than 280 characters.";

/// Summary prompt template. Replace `{job_info}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str =
    "Summarize this job posting in under 280 characters:\n{job_info}";
