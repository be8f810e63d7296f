//! Service credentials loaded from the environment.
//!
//! Keys are read fresh on every request, so a key added to `.env` (via the
//! gateway's dotenvy load) or the process environment takes effect without a
//! restart. A missing key is never an error: it routes the corresponding flow
//! onto its demo fallback.

use serde::Serialize;

/// API credentials for the studio's outside services.
///
/// | Env | Flow |
/// |-----|------|
/// | AGENTMAIL_API_KEY | Live quote emails |
/// | PERPLEXITY_API_KEY | Weather scouting (Sonar online model) |
/// | HYPERSPELL_API_KEY | Hosted client memory |
/// | RESEND_API_KEY | Transactional mail (config probe only) |
#[derive(Debug, Clone, Default)]
pub struct ServiceKeys {
    pub agentmail: Option<String>,
    pub perplexity: Option<String>,
    pub hyperspell: Option<String>,
    pub resend: Option<String>,
}

impl ServiceKeys {
    /// Read all four keys from the environment. Unset or blank => `None`.
    pub fn from_env() -> Self {
        Self {
            agentmail: env_opt_string("AGENTMAIL_API_KEY"),
            perplexity: env_opt_string("PERPLEXITY_API_KEY"),
            hyperspell: env_opt_string("HYPERSPELL_API_KEY"),
            resend: env_opt_string("RESEND_API_KEY"),
        }
    }

    /// Presence booleans plus 5-character prefixes for the dashboard's
    /// configuration probe. Prefixes are omitted for absent keys.
    pub fn probe(&self) -> KeyProbe {
        KeyProbe {
            has_agent_mail: self.agentmail.is_some(),
            has_perplexity: self.perplexity.is_some(),
            has_hyperspell: self.hyperspell.is_some(),
            has_resend: self.resend.is_some(),
            agent_mail_prefix: self.agentmail.as_deref().map(key_prefix),
            perplexity_prefix: self.perplexity.as_deref().map(key_prefix),
            hyperspell_prefix: self.hyperspell.as_deref().map(key_prefix),
        }
    }
}

fn key_prefix(key: &str) -> String {
    key.chars().take(5).collect()
}

fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Response body of the configuration probe endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyProbe {
    pub has_agent_mail: bool,
    pub has_perplexity: bool,
    pub has_hyperspell: bool,
    pub has_resend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_mail_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perplexity_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperspell_prefix: Option<String>,
}
