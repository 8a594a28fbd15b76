// Chat with the restaurant assistant through an OpenAI-compatible
// chat-completions endpoint (Groq by default), plus price cards for any
// dishes the customer mentions.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::constants::{self, CURRENCY, RESTAURANT_NAME};
use crate::error::ChatError;
use crate::menu::{self, MenuItem};

/// Reply shown when the upstream answers 429.
pub const RATE_LIMIT_NOTICE: &str = concat!(
    "<div style=\"color:#d7263d;font-weight:bold;font-size:1.1rem;\">",
    "🚦 <b>Rate limit reached!</b><br>",
    "The server is busy or you have sent too many requests.<br>",
    "Please wait a few seconds and try again.<br>",
    "<span style=\"font-size:0.95rem;color:#fbb13c;\">",
    "(If you need higher limits, consider upgrading your Groq API plan.)</span>",
    "</div>"
);

/// Canned prompts offered under the chat box.
pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "What do you recommend?",
    "I want to order a Vada Pav and Poha.",
    "Can I see the dessert options?",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: String,
}

/// Where and how to reach the chat-completions service.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl ChatConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: constants::GROQ_API_URL.clone(),
            api_key: constants::GROQ_API_KEY.clone(),
            model: constants::BISTRO_CHAT_MODEL.clone(),
        }
    }
}

/// The persona and menu sent as the first message of every conversation.
pub fn system_prompt() -> String {
    format!(
        concat!(
            "<div style=\"font-family:Quicksand,sans-serif;\">",
            "<h2 style=\"color:#d7263d;font-size:1.6rem;margin-bottom:0.5em;\">🍽️ Welcome to {}!</h2>",
            "<p style=\"font-size:1.1rem;margin-bottom:0.5em;\">",
            "I am your <span style=\"color:#fbb13c;font-weight:bold;\">friendly, helpful, and creative</span> restaurant ordering assistant.<br>",
            "🥗 <b>Greet the customer</b> and make them feel welcome.<br>",
            "📜 <b>Show the menu</b> and help them place an order.<br>",
            "🌟 <b>Suggest popular items</b> if they ask for recommendations.<br>",
            "✅ <b>Confirm the order and total price</b> before checkout.<br>",
            "😃 <b>Be engaging</b> and use emojis where appropriate!",
            "</p>",
            "<div style=\"margin-top:1em;\">",
            "<span style=\"color:#d7263d;font-size:1.2rem;font-weight:bold;\">Menu:</span><br>",
            "{}",
            "</div>",
            "</div>"
        ),
        RESTAURANT_NAME,
        *menu::MENU_TEXT
    )
}

/// System prompt, then each past exchange, then the new message. Empty
/// assistant replies are left out.
pub fn build_messages(message: &str, history: &[(String, String)]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(ChatMessage::new(Role::System, system_prompt()));
    for (user, assistant) in history {
        messages.push(ChatMessage::new(Role::User, user.as_str()));
        if !assistant.is_empty() {
            messages.push(ChatMessage::new(Role::Assistant, assistant.as_str()));
        }
    }
    messages.push(ChatMessage::new(Role::User, message));
    messages
}

/// Dishes whose name occurs anywhere in the message, ignoring case, in menu order.
pub fn find_mentioned_dishes(message: &str) -> Vec<&'static MenuItem> {
    let lowercase = message.to_lowercase();
    menu::list_items()
        .iter()
        .filter(|item| lowercase.contains(&item.name.to_lowercase()))
        .collect()
}

pub fn price_card(item: &MenuItem) -> String {
    format!(
        concat!(
            "<br><div style=\"margin:1em 0;padding:0.5em;border:1px solid #fbb13c;border-radius:8px;max-width:340px;\">",
            "<div style=\"font-size:1.1rem;font-weight:bold;color:#d7263d;margin-top:0.5em;\">{} - {}{}</div></div>"
        ),
        item.name, CURRENCY, item.price
    )
}

/// How a failed turn reads to the customer.
pub fn error_reply(err: &ChatError) -> String {
    match err {
        ChatError::RateLimited => RATE_LIMIT_NOTICE.to_string(),
        other => format!("Error: {}", other),
    }
}

pub struct ChatBridge {
    client: Client,
    config: ChatConfig,
}

impl ChatBridge {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// One conversational turn. Never fails: upstream problems come back as
    /// the reply text.
    pub async fn reply(&self, message: &str, history: &[(String, String)]) -> String {
        let messages = build_messages(message, history);
        let dishes = find_mentioned_dishes(message);

        match self.complete(&messages).await {
            Ok(mut reply) => {
                for dish in dishes {
                    reply.push_str(&price_card(dish));
                }
                reply
            }
            Err(ChatError::RateLimited) => {
                warn!("Chat service rate limit reached");
                RATE_LIMIT_NOTICE.to_string()
            }
            Err(e) => {
                error!("Chat turn failed: {}", e);
                error_reply(&e)
            }
        }
    }

    /// Sends the conversation and returns the assistant's text.
    #[instrument(skip(self, messages), fields(model = %self.config.model, turns = messages.len()))]
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let payload = ChatCompletionRequest {
            model: &self.config.model,
            messages,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatError::RateLimited);
        }
        if status != StatusCode::OK {
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::MalformedResponse("no choices in response".to_string()))?;

        debug!(reply = %content, "Received chat completion");
        info!("Chat turn completed");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_dishes_in_menu_order() {
        let found = find_mentioned_dishes("I'll take a Poha and a Vada Pav");
        let names: Vec<_> = found.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Vada Pav", "Poha"]);
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let found = find_mentioned_dishes("two BOMBIL FRY please, and some modak");
        let names: Vec<_> = found.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Modak", "Bombil Fry"]);
    }

    #[test]
    fn test_scan_matches_substrings() {
        // "Kanda Poha" also contains "Poha"; "Ukadiche Modak" contains "Modak".
        let names: Vec<_> = find_mentioned_dishes("kanda poha and ukadiche modak")
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Poha", "Modak", "Kanda Poha", "Ukadiche Modak"]);
    }

    #[test]
    fn test_scan_no_matches() {
        assert!(find_mentioned_dishes("What do you recommend?").is_empty());
        assert!(find_mentioned_dishes("").is_empty());
    }

    #[test]
    fn test_build_messages_without_history() {
        let messages = build_messages("Hello", &[]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1], ChatMessage::new(Role::User, "Hello"));
    }

    #[test]
    fn test_build_messages_skips_empty_assistant_turns() {
        let history = vec![
            ("Hi".to_string(), "Welcome!".to_string()),
            ("Anything spicy?".to_string(), String::new()),
        ];
        let messages = build_messages("Misal Pav then", &history);
        let roles: Vec<_> = messages.iter().map(|m| m.role.clone()).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User, Role::User]
        );
        assert_eq!(messages[2].content, "Welcome!");
        assert_eq!(messages[4].content, "Misal Pav then");
    }

    #[test]
    fn test_system_prompt_embeds_menu() {
        let prompt = system_prompt();
        assert!(prompt.contains("Welcome to Gourmet Bistro!"));
        assert!(prompt.contains("- Vada Pav ($3)"));
        assert!(prompt.contains("<b>Total number of dishes: 30</b>"));
        assert!(prompt.contains("Confirm the order and total price"));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::new(Role::Assistant, "ok")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "ok"}));
    }

    #[test]
    fn test_price_card() {
        let card = price_card(menu::find_by_name("Rassa").unwrap());
        assert!(card.starts_with("<br><div"));
        assert!(card.contains("Rassa - $8"));
    }

    #[test]
    fn test_error_reply() {
        assert_eq!(error_reply(&ChatError::RateLimited), RATE_LIMIT_NOTICE);
        let reply = error_reply(&ChatError::Status {
            status: 503,
            body: "unavailable".to_string(),
        });
        assert_eq!(reply, "Error: 503 - unavailable");
    }
}
