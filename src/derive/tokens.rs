//! Conversation identifiers derived from pad bytes.
//!
//! Each token is BLAKE3 in derive-key mode over the full pad with its own
//! context string, hex encoded. Knowing one token reveals nothing about the
//! others or about the pad.

const CONVERSATION_ID_CONTEXT: &str = "ephemeral-core 2024-06 conversation id";
const AUTH_TOKEN_CONTEXT: &str = "ephemeral-core 2024-06 relay auth token";
const BURN_TOKEN_CONTEXT: &str = "ephemeral-core 2024-06 burn token";

/// Length of every token in hex characters.
pub const TOKEN_HEX_LEN: usize = 64;

/// The three relay-facing identifiers of a conversation.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthTokens {
    /// Public mailbox identifier.
    pub conversation_id: String,
    /// Proves pad possession to the relay.
    pub auth_token: String,
    /// Authorizes remote deletion.
    pub burn_token: String,
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("conversation_id", &self.conversation_id)
            .field("auth_token", &"[REDACTED]")
            .field("burn_token", &"[REDACTED]")
            .finish()
    }
}

fn derive(context: &str, pad_bytes: &[u8]) -> String {
    hex::encode(blake3::derive_key(context, pad_bytes))
}

pub fn derive_conversation_id(pad_bytes: &[u8]) -> String {
    derive(CONVERSATION_ID_CONTEXT, pad_bytes)
}

pub fn derive_auth_token(pad_bytes: &[u8]) -> String {
    derive(AUTH_TOKEN_CONTEXT, pad_bytes)
}

pub fn derive_burn_token(pad_bytes: &[u8]) -> String {
    derive(BURN_TOKEN_CONTEXT, pad_bytes)
}

pub fn derive_all_tokens(pad_bytes: &[u8]) -> AuthTokens {
    AuthTokens {
        conversation_id: derive_conversation_id(pad_bytes),
        auth_token: derive_auth_token(pad_bytes),
        burn_token: derive_burn_token(pad_bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_fixed_length_hex() {
        let tokens = derive_all_tokens(&[0x5Au8; 1024]);
        for token in [&tokens.conversation_id, &tokens.auth_token, &tokens.burn_token] {
            assert_eq!(token.len(), TOKEN_HEX_LEN);
            assert!(token.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_tokens_domain_separated() {
        let tokens = derive_all_tokens(b"shared pad");
        assert_ne!(tokens.conversation_id, tokens.auth_token);
        assert_ne!(tokens.conversation_id, tokens.burn_token);
        assert_ne!(tokens.auth_token, tokens.burn_token);
    }

    #[test]
    fn test_tokens_deterministic_and_pad_bound() {
        let pad = vec![1u8; 4096];
        assert_eq!(derive_all_tokens(&pad), derive_all_tokens(&pad.clone()));

        let mut other = pad.clone();
        other[4095] ^= 1;
        assert_ne!(derive_conversation_id(&pad), derive_conversation_id(&other));
        assert_eq!(derive_all_tokens(&pad).auth_token, derive_auth_token(&pad));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let tokens = derive_all_tokens(b"pad");
        let rendered = format!("{tokens:?}");
        assert!(!rendered.contains(&tokens.auth_token));
        assert!(rendered.contains(&tokens.conversation_id));
    }
}
