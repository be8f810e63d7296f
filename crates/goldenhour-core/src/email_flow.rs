//! Live quote email — AgentMail when a key is configured, a simulated send
//! otherwise. This backs the dashboard's "live demo" form; the simulated path
//! still reports a delivered quote so the demo never stalls.

use crate::adapter::AdapterError;
use crate::demo;
use crate::envelope::{iso_timestamp, ActionEnvelope};
use crate::keys::ServiceKeys;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;

const AGENTMAIL_URL: &str = "https://api.agentmail.to/v0/messages/send";

#[derive(Serialize)]
struct OutboundMessage<'a> {
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendReceipt {
    #[serde(default)]
    id: Option<String>,
}

async fn agentmail_send(
    api_key: &str,
    to: &str,
    subject: &str,
    text: &str,
) -> Result<SendReceipt, AdapterError> {
    let res = reqwest::Client::new()
        .post(AGENTMAIL_URL)
        .bearer_auth(api_key)
        .json(&OutboundMessage { to, subject, text })
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(AdapterError::Status(status.as_u16(), body));
    }
    serde_json::from_str(&body).map_err(|e| AdapterError::Parse(e.to_string()))
}

fn quote_subject(name: &str) -> String {
    format!("Photography Quote for {}", name)
}

fn quote_body(name: &str) -> String {
    format!(
        "Hi {},\n\n\
         Thank you for reaching out to Golden Hour Studio! Here is a quick quote \
         for the session you asked about:\n\n\
         - Portrait session (90 minutes, two locations): $350\n\
         - Golden hour add-on with edited highlights within 48 hours: $75\n\n\
         Reply to this email and we will hold a date for you.\n\n\
         — Golden Hour Studio",
        name
    )
}

/// Send (or simulate) the personalized pricing quote.
pub async fn send_quote_email(
    keys: &ServiceKeys,
    recipient: &str,
    name: &str,
    started: Instant,
) -> ActionEnvelope {
    let has_key = keys.agentmail.is_some();
    let subject = quote_subject(name);
    let text = quote_body(name);

    if let Some(api_key) = keys.agentmail.as_deref() {
        match agentmail_send(api_key, recipient, &subject, &text).await {
            Ok(receipt) => {
                tracing::info!("[AgentMail] Quote email sent to {}", recipient);
                return ActionEnvelope {
                    success: true,
                    duration: started.elapsed().as_millis() as u64,
                    result: json!({
                        "sent": true,
                        "to": recipient,
                        "subject": subject,
                        "messageId": receipt.id,
                    }),
                    service: "AgentMail".to_string(),
                    real_api: true,
                    timestamp: iso_timestamp(),
                };
            }
            Err(e) => tracing::error!("[AgentMail] Send error: {}", e),
        }
    }

    demo::simulate_latency(demo::EMAIL_FALLBACK_DELAY).await;
    let service = if has_key {
        "Demo Email (API failed)"
    } else {
        "Demo Email (No API key - set AGENTMAIL_API_KEY)"
    };
    tracing::info!("[{}] Quote email simulated for {}", service, recipient);

    ActionEnvelope {
        success: true,
        duration: started.elapsed().as_millis() as u64,
        result: json!({
            "sent": true,
            "to": recipient,
            "subject": subject,
            "simulated": true,
        }),
        service: service.to_string(),
        real_api: false,
        timestamp: iso_timestamp(),
    }
}
