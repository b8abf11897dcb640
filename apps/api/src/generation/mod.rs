// Generation: prompt templates, the retrying pipeline, and the three
// user-facing actions. All LLM calls go through llm_client — no direct
// API calls here.

pub mod actions;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
