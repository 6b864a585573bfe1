use serde::{Deserialize, Serialize};

use crate::{config::ClassifierConfig, domain::EmailDraft};

const SYSTEM_PROMPT: &str = r#"You are an intelligent email classifier. Analyze the email and classify it into one of these folders:
- clients: Emails from or about clients, customer inquiries, client meetings
- purchase_orders: Purchase orders, invoices, procurement, vendor orders
- internal_coms: Internal company communications, team updates, internal meetings
- very_important: Urgent matters, executive communications, critical deadlines

Respond with ONLY the folder name (one of: clients, purchase_orders, internal_coms, very_important) and a brief reason in this exact format:
FOLDER: folder_name
REASON: Brief explanation"#;

pub fn build_request(config: &ClassifierConfig, draft: &EmailDraft) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage {
                role: "system".into(),
                content: SYSTEM_PROMPT.into(),
            },
            ChatMessage {
                role: "user".into(),
                content: user_prompt(draft),
            },
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    }
}

fn user_prompt(draft: &EmailDraft) -> String {
    format!(
        "Subject: {}\nBody: {}",
        draft.subject,
        draft.body_or_placeholder()
    )
}

/// Text of the first choice, if the model produced any.
pub fn first_choice_text(completion: ChatCompletionResponse) -> Option<String> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|msg| msg.content)
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::AppConfig;

    fn classifier_config() -> ClassifierConfig {
        AppConfig::from_lookup(|_| None).unwrap().classifier
    }

    #[test]
    fn request_carries_prompt_and_tuning() {
        let request = build_request(
            &classifier_config(),
            &EmailDraft::new("Invoice #123", "Please pay"),
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "llama-3.1-70b-versatile");
        assert_eq!(value["max_tokens"], 150);
        assert!((value["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(value["messages"][0]["role"], "system");
        for id in ["clients", "purchase_orders", "internal_coms", "very_important"] {
            assert!(value["messages"][0]["content"].as_str().unwrap().contains(id));
        }
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(
            value["messages"][1]["content"],
            "Subject: Invoice #123\nBody: Please pay"
        );
    }

    #[test]
    fn blank_body_uses_placeholder() {
        let request = build_request(&classifier_config(), &EmailDraft::new("hello", "   "));
        assert_eq!(
            request.messages[1].content,
            "Subject: hello\nBody: No body provided"
        );
    }

    #[test]
    fn reads_first_choice_content() {
        let completion: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "FOLDER: clients"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }))
        .unwrap();
        assert_eq!(
            first_choice_text(completion).as_deref(),
            Some("FOLDER: clients")
        );

        let empty: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert_eq!(first_choice_text(empty), None);
    }
}
