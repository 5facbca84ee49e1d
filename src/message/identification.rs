use super::{has_min_tokens, Envelope, FsdMessage};
use crate::serializer::parse_int;

/// Server greeting sent right after the TCP connection is accepted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FsdIdentification {
    envelope: Envelope,
    pub server_version: String,
    pub initial_challenge: String,
}

impl FsdIdentification {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        server_version: impl Into<String>,
        initial_challenge: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            server_version: server_version.into(),
            initial_challenge: initial_challenge.into(),
        }
    }
}

impl FsdMessage for FsdIdentification {
    const PDU: &'static str = "$DI";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            self.server_version.clone(),
            self.initial_challenge.clone(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 4, "FsdIdentification", log::Level::Warn) {
            return Self::default();
        }
        Self::new(tokens[0], tokens[1], tokens[2], tokens[3])
    }
}

/// Client answer to the server greeting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientIdentification {
    envelope: Envelope,
    pub client_id: u16,
    pub client_name: String,
    pub client_version_major: i32,
    pub client_version_minor: i32,
    pub user_cid: String,
    pub sys_uid: String,
    pub initial_challenge: String,
}

impl ClientIdentification {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sender: impl Into<String>,
        client_id: u16,
        client_name: impl Into<String>,
        client_version_major: i32,
        client_version_minor: i32,
        user_cid: impl Into<String>,
        sys_uid: impl Into<String>,
        initial_challenge: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, "SERVER"),
            client_id,
            client_name: client_name.into(),
            client_version_major,
            client_version_minor,
            user_cid: user_cid.into(),
            sys_uid: sys_uid.into(),
            initial_challenge: initial_challenge.into(),
        }
    }
}

impl FsdMessage for ClientIdentification {
    const PDU: &'static str = "$ID";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            format!("{:04x}", self.client_id),
            self.client_name.clone(),
            self.client_version_major.to_string(),
            self.client_version_minor.to_string(),
            self.user_cid.clone(),
            self.sys_uid.clone(),
            self.initial_challenge.clone(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 9, "ClientIdentification", log::Level::Warn) {
            return Self::default();
        }
        let client_id = u16::from_str_radix(tokens[2], 16).unwrap_or_default();
        Self {
            envelope: Envelope::with_receiver(tokens[0], tokens[1]),
            client_id,
            client_name: tokens[3].to_string(),
            client_version_major: parse_int(tokens[4]),
            client_version_minor: parse_int(tokens[5]),
            user_cid: tokens[6].to_string(),
            sys_uid: tokens[7].to_string(),
            initial_challenge: tokens[8].to_string(),
        }
    }
}
