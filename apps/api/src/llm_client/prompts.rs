// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs alongside it and composes these.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences around the JSON. \
    Do NOT include explanations or apologies.";
