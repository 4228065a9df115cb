// Resume content: static document loading, placeholder profile and project
// data, and markdown rendering.

pub mod document;
pub mod handlers;
pub mod markdown;
pub mod profile;
pub mod projects;
pub mod provider;
