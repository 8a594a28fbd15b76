// Settings loaded from the environment (or a .env file) once, on first use.

use std::env;

lazy_static::lazy_static! {
    pub static ref GROQ_API_URL: String = env::var("GROQ_API_URL")
        .unwrap_or_else(|_| "https://api.groq.com/openai/v1/chat/completions".to_string());
    // A missing key is passed through as an empty bearer token; upstream rejects it.
    pub static ref GROQ_API_KEY: String = env::var("GROQ_API_KEY").unwrap_or_default();
    pub static ref BISTRO_CHAT_MODEL: String = env::var("BISTRO_CHAT_MODEL")
        .unwrap_or_else(|_| "llama-3.1-8b-instant".to_string());
}

pub const RESTAURANT_NAME: &str = "Gourmet Bistro";
pub const CURRENCY: &str = "$";
