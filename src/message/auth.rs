use super::{has_min_tokens, Envelope, FsdMessage};

/// Challenge sent by either side of an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthChallenge {
    envelope: Envelope,
    pub challenge_key: String,
}

impl AuthChallenge {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        challenge_key: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            challenge_key: challenge_key.into(),
        }
    }
}

impl FsdMessage for AuthChallenge {
    const PDU: &'static str = "$ZC";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            self.challenge_key.clone(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 3, "AuthChallenge", log::Level::Warn) {
            return Self::default();
        }
        Self::new(tokens[0], tokens[1], tokens[2])
    }
}

/// Answer to an [`AuthChallenge`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthResponse {
    envelope: Envelope,
    pub response: String,
}

impl AuthResponse {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            response: response.into(),
        }
    }
}

impl FsdMessage for AuthResponse {
    const PDU: &'static str = "$ZR";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            self.response.clone(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 3, "AuthResponse", log::Level::Warn) {
            return Self::default();
        }
        Self::new(tokens[0], tokens[1], tokens[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_challenge() {
        let message = AuthChallenge::from_tokens(&["SERVER", "ABCD", "6d4b1a0c"]);
        assert!(message.is_valid());
        assert_eq!(message.challenge_key, "6d4b1a0c");
        assert_eq!(message.to_line(), "$ZCSERVER:ABCD:6d4b1a0c");
        assert!(!AuthChallenge::from_tokens(&["SERVER", "ABCD"]).is_valid());
    }

    #[test]
    fn test_auth_response() {
        let message = AuthResponse::new("ABCD", "SERVER", "b2c7f7a9");
        let tokens = message.to_tokens();
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        assert_eq!(AuthResponse::from_tokens(&tokens), message);
        assert!(!AuthResponse::from_tokens(&["ABCD"]).is_valid());
    }
}
