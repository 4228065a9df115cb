//! Backend for a personal portfolio site: resume content, an AI-assisted
//! cover-letter generator, the contact form, and the visibility tracking
//! that drives section entrance animations.

pub mod config;
pub mod contact;
pub mod content;
pub mod cover_letter;
pub mod errors;
pub mod llm_client;
pub mod routes;
pub mod state;
pub mod visibility;
