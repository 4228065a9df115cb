// AI-assisted cover letters: input validation, prompt, single LLM round trip.
// All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
