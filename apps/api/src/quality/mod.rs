// Email quality analysis: prompt rendering, defensive normalization of the
// model's JSON, and the always-200 quality-check route.

pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompts;
