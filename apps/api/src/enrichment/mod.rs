// Job enrichment core.
// Implements: batched cache-aware summarization, the summary cache, and the
// metrics aggregator. All LLM calls go through llm_client — no direct
// Anthropic calls here.

pub mod cache;
pub mod handlers;
pub mod metrics;
pub mod pipeline;
pub mod prompts;
pub mod summarizer;
