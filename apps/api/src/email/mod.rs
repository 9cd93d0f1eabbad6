// Email drafting: prompt rendering, the generate-email route and the starter catalog.
// All model calls go through llm_client::TextGenerator.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod templates;
