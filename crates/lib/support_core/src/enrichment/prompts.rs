//! Prompt templates sent to the model.

use std::fmt::Write;

use crate::models::support::Message;

/// System instruction attached to every request.
pub const SYSTEM_INSTRUCTION: &str = "You are an AI assistant for a customer support team.
Your task is to analyze customer messages and provide helpful insights.
Always provide responses in professional and empathetic English.";

/// Classification prompt. The rules are advisory; nothing enforces them locally.
pub fn analyze(content: &str) -> String {
    format!(
        r#"Analyze the following customer support message (which might be in Indonesian or English) and return ONLY a JSON object with these exact fields:

{{
  "sentiment": "Angry" | "Frustrated" | "Neutral" | "Happy" | "Satisfied",
  "category": "Technical" | "Billing" | "Feature Request" | "General Question" | "Complaint",
  "priority": "High" | "Medium" | "Low",
  "urgency_level": "High" | "Medium" | "Low",
  "sentiment_score": <number between 0-1, where 0=very negative, 1=very positive>
}}

Analysis Rules:
- The input text can be in Indonesian or English.
- HOWEVER, the JSON values MUST always be in English (e.g. use "High" not "Tinggi").
- If message contains urgent words (urgent, ASAP, immediately, critical) -> Priority "High"
- If sentiment is "Angry" or "Frustrated" -> Urgency "High"
- If mentions bug, error, cannot login, crash -> Category "Technical"
- If mentions invoice, payment, refund, charged -> Category "Billing"

Customer Message:
"{content}"

Return ONLY valid JSON, no markdown formatting, no explanations."#
    )
}

/// Summary prompt over a numbered conversation.
pub fn summarize(messages: &[String]) -> String {
    let mut conversation = String::new();
    for (i, msg) in messages.iter().enumerate() {
        let _ = writeln!(conversation, "Message {}: {msg}", i + 1);
    }
    format!(
        r#"Summarize this customer support conversation in 2-3 clear, concise sentences.
Focus on:
1. The main issue experienced by the customer
2. The current status or situation
3. Action items taken or needed

Conversation:
{conversation}
Summary:"#
    )
}

/// Reply-draft prompt using the persisted classification as context.
pub fn suggest_reply(content: &str, sentiment: &str, category: &str) -> String {
    format!(
        r#"You are a professional customer support agent.
Draft a helpful response for the following customer message.

Customer Info:
- Sentiment: {sentiment}
- Category: {category}
- Message: "{content}"

Response Guidelines:
1. DETECT the language of the 'Message' above (Indonesian or English).
2. DRAFT the response IN THE SAME LANGUAGE as the customer's message.
3. Start with a polite greeting.
4. Show empathy regarding their issue.
5. Provide a clear solution or next steps.
6. Close with a positive and professional tone.

Special handling for "Angry" or "Frustrated":
- Extra empathy and apologize if applicable.
- Show urgency in resolving the matter.

Draft Response (in customer's language):"#
    )
}

/// Trend prompt over recent messages, listed in the order given (newest first from the store).
pub fn sentiment_trends(messages: &[Message]) -> String {
    let mut listing = String::new();
    for (i, msg) in messages.iter().enumerate() {
        let _ = writeln!(
            listing,
            "{}. [{}] {} - Sentiment: {}",
            i + 1,
            msg.created_at.to_rfc3339(),
            msg.content,
            msg.sentiment
        );
    }
    format!(
        r#"Analyze the sentiment trends from the following customer support messages.
Provide insights in a short paragraph (3-4 sentences) covering:
1. Dominant sentiment
2. Observed patterns or recurring issues
3. Recommended actions for the support team

Messages Data:
{listing}
Trend Analysis:"#
    )
}
