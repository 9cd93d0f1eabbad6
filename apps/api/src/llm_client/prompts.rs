// Shared prompt fragments.
// Each feature module that talks to the model defines its own prompts.rs alongside it.

/// Instruction that asks the model for a bare JSON object.
/// The quality normalizer still tolerates prose around the object.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Return ONLY valid JSON. No markdown. No text outside JSON.";
