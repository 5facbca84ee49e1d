use super::{has_min_tokens, token, Envelope, FsdMessage};
use crate::enums::{AtcRating, PilotRating, SimType};
use crate::serializer::{from_wire, parse_int, to_wire};

/// Pilot login, always addressed to `SERVER`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddPilot {
    envelope: Envelope,
    pub cid: String,
    pub password: String,
    pub rating: PilotRating,
    pub protocol_version: i32,
    pub sim_type: SimType,
    pub real_name: String,
}

impl AddPilot {
    pub fn new(
        sender: impl Into<String>,
        cid: impl Into<String>,
        password: impl Into<String>,
        rating: PilotRating,
        protocol_version: i32,
        sim_type: SimType,
        real_name: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, "SERVER"),
            cid: cid.into(),
            password: password.into(),
            rating,
            protocol_version,
            sim_type,
            real_name: real_name.into(),
        }
    }
}

impl FsdMessage for AddPilot {
    const PDU: &'static str = "#AP";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            self.cid.clone(),
            self.password.clone(),
            to_wire(&self.rating),
            self.protocol_version.to_string(),
            to_wire(&self.sim_type),
            self.real_name.clone(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 6, "AddPilot", log::Level::Warn) {
            return Self::default();
        }
        Self::new(
            tokens[0],
            tokens[2],
            tokens[3],
            from_wire(tokens[4]),
            parse_int(tokens[5]),
            from_wire(token(tokens, 6)),
            token(tokens, 7),
        )
    }
}

/// Pilot logoff
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeletePilot {
    envelope: Envelope,
    pub cid: String,
}

impl DeletePilot {
    pub fn new(sender: impl Into<String>, cid: impl Into<String>) -> Self {
        Self {
            envelope: Envelope::new(sender),
            cid: cid.into(),
        }
    }
}

impl FsdMessage for DeletePilot {
    const PDU: &'static str = "#DP";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![self.sender().to_string(), self.cid.clone()]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 1, "DeletePilot", log::Level::Debug) {
            return Self::default();
        }
        Self::new(tokens[0], token(tokens, 1))
    }
}

/// Controller login, always addressed to `SERVER`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddAtc {
    envelope: Envelope,
    pub real_name: String,
    pub cid: String,
    pub password: String,
    pub rating: AtcRating,
    pub protocol_revision: i32,
}

impl AddAtc {
    pub fn new(
        sender: impl Into<String>,
        real_name: impl Into<String>,
        cid: impl Into<String>,
        password: impl Into<String>,
        rating: AtcRating,
        protocol_revision: i32,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, "SERVER"),
            real_name: real_name.into(),
            cid: cid.into(),
            password: password.into(),
            rating,
            protocol_revision,
        }
    }
}

impl FsdMessage for AddAtc {
    const PDU: &'static str = "#AA";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            self.real_name.clone(),
            self.cid.clone(),
            self.password.clone(),
            to_wire(&self.rating),
            self.protocol_revision.to_string(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 7, "AddAtc", log::Level::Warn) {
            return Self::default();
        }
        Self::new(
            tokens[0],
            tokens[2],
            tokens[3],
            tokens[4],
            from_wire(tokens[5]),
            parse_int(tokens[6]),
        )
    }
}

/// Controller logoff
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteAtc {
    envelope: Envelope,
    pub cid: String,
}

impl DeleteAtc {
    pub fn new(sender: impl Into<String>, cid: impl Into<String>) -> Self {
        Self {
            envelope: Envelope::new(sender),
            cid: cid.into(),
        }
    }
}

impl FsdMessage for DeleteAtc {
    const PDU: &'static str = "#DA";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![self.sender().to_string(), self.cid.clone()]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 1, "DeleteAtc", log::Level::Debug) {
            return Self::default();
        }
        Self::new(tokens[0], token(tokens, 1))
    }
}
