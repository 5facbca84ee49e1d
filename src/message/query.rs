use super::{has_min_tokens, Envelope, FsdMessage};
use crate::enums::{Capabilities, Capability, ClientQueryType};
use crate::serializer::{from_wire, to_wire};

/// `$CQ` information request between clients or towards the server
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientQuery {
    envelope: Envelope,
    pub query_type: ClientQueryType,
    pub payload: Vec<String>,
}

impl ClientQuery {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        query_type: ClientQueryType,
        payload: Vec<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            query_type,
            payload,
        }
    }

    /// Request the full aircraft configuration of `receiver`
    pub fn aircraft_config_request(sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        let request = serde_json::json!({ "request": "full" });
        Self::new(
            sender,
            receiver,
            ClientQueryType::AircraftConfig,
            vec![request.to_string()],
        )
    }

    /// JSON document carried by an `ACC` query
    ///
    /// The document itself may contain `:`, so the payload is rejoined first.
    pub fn aircraft_config(&self) -> Option<serde_json::Value> {
        if self.query_type != ClientQueryType::AircraftConfig {
            return None;
        }
        match serde_json::from_str(&self.payload.join(":")) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("Invalid aircraft config from {}: {}", self.sender(), e);
                None
            }
        }
    }
}

impl FsdMessage for ClientQuery {
    const PDU: &'static str = "$CQ";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        let mut tokens = vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            to_wire(&self.query_type),
        ];
        tokens.extend(self.payload.iter().cloned());
        tokens
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 3, "ClientQuery", log::Level::Debug) {
            return Self::default();
        }
        Self::new(
            tokens[0],
            tokens[1],
            from_wire(tokens[2]),
            tokens[3..].iter().map(|t| t.to_string()).collect(),
        )
    }
}

/// `$CR` answer to a [`ClientQuery`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientResponse {
    envelope: Envelope,
    pub query_type: ClientQueryType,
    pub payload: Vec<String>,
}

impl ClientResponse {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        query_type: ClientQueryType,
        payload: Vec<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            query_type,
            payload,
        }
    }

    /// `CAPS` answer advertising `capabilities` in the given order
    pub fn capabilities_response(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        capabilities: &[Capability],
    ) -> Self {
        let payload = capabilities
            .iter()
            .filter(|c| **c != Capability::None)
            .map(|c| format!("{}=1", to_wire(c)))
            .collect();
        Self::new(sender, receiver, ClientQueryType::Capabilities, payload)
    }

    /// `RN` answer; pilots leave the sector file empty
    pub fn real_name_response(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        real_name: impl Into<String>,
        sector_file: impl Into<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self::new(
            sender,
            receiver,
            ClientQueryType::RealName,
            vec![real_name.into(), sector_file.into(), rating.into()],
        )
    }

    pub fn is_unknown_query(&self) -> bool {
        self.query_type == ClientQueryType::Unknown
    }

    /// Capabilities advertised with `KEY=1` pairs of a `CAPS` answer
    pub fn capabilities(&self) -> Capabilities {
        if self.query_type != ClientQueryType::Capabilities {
            return Capabilities::default();
        }
        self.payload
            .iter()
            .filter_map(|pair| pair.split_once('='))
            .filter(|(_, value)| *value == "1")
            .map(|(key, _)| from_wire::<Capability>(key))
            .collect()
    }
}

impl FsdMessage for ClientResponse {
    const PDU: &'static str = "$CR";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        let mut tokens = vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            to_wire(&self.query_type),
        ];
        tokens.extend(self.payload.iter().cloned());
        tokens
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 3, "ClientResponse", log::Level::Debug) {
            return Self::default();
        }
        Self::new(
            tokens[0],
            tokens[1],
            from_wire(tokens[2]),
            tokens[3..].iter().map(|t| t.to_string()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<&str> {
        line.split(':').collect()
    }

    #[test]
    fn test_client_query() {
        let message = ClientQuery::new(
            "ABCD",
            "SERVER",
            ClientQueryType::IsValidAtc,
            vec!["EDDM_TWR".to_string()],
        );
        assert_eq!(message.to_line(), "$CQABCD:SERVER:ATC:EDDM_TWR");
        assert_eq!(ClientQuery::from_tokens(&split("ABCD:SERVER:ATC:EDDM_TWR")), message);
    }

    #[test]
    fn test_client_query_without_payload() {
        let message = ClientQuery::from_tokens(&split("ABCD:SERVER:CAPS"));
        assert!(message.is_valid());
        assert_eq!(message.query_type, ClientQueryType::Capabilities);
        assert!(message.payload.is_empty());
        assert!(!ClientQuery::from_tokens(&split("ABCD:SERVER")).is_valid());
    }

    #[test]
    fn test_aircraft_config() {
        let request = ClientQuery::aircraft_config_request("ABCD", "DLH123");
        assert_eq!(request.to_line(), r#"$CQABCD:DLH123:ACC:{"request":"full"}"#);

        let line = r#"DLH123:ABCD:ACC:{"config":{"lights":{"strobe_on":true}}}"#;
        let message = ClientQuery::from_tokens(&split(line));
        let config = message.aircraft_config().unwrap();
        assert_eq!(config["config"]["lights"]["strobe_on"], serde_json::json!(true));

        let broken = ClientQuery::from_tokens(&split("DLH123:ABCD:ACC:{broken"));
        assert!(broken.aircraft_config().is_none());
        let other = ClientQuery::from_tokens(&split("DLH123:ABCD:RN"));
        assert!(other.aircraft_config().is_none());
    }

    #[test]
    fn test_client_response_capabilities() {
        let message = ClientResponse::capabilities_response(
            "ABCD",
            "SERVER",
            &[Capability::AircraftInfo, Capability::AtcInfo],
        );
        assert_eq!(message.to_tokens().join(":"), "ABCD:SERVER:CAPS:MODELDESC=1:ATCINFO=1");

        let decoded = ClientResponse::from_tokens(&split("ABCD:SERVER:CAPS:MODELDESC=1:ATCINFO=1:STEALTH=0"));
        assert_eq!(decoded.query_type, ClientQueryType::Capabilities);
        let caps = decoded.capabilities();
        assert!(caps.contains(Capability::AircraftInfo));
        assert!(caps.contains(Capability::AtcInfo));
        assert!(!caps.contains(Capability::Stealth));
    }

    #[test]
    fn test_client_response_real_name() {
        let message = ClientResponse::real_name_response("ABCD", "ZZZZ_TWR", "Test User", "", "1");
        assert_eq!(message.to_line(), "$CRABCD:ZZZZ_TWR:RN:Test User::1");
        assert_eq!(ClientResponse::from_tokens(&split("ABCD:ZZZZ_TWR:RN:Test User::1")), message);
    }

    #[test]
    fn test_client_response_unknown_query() {
        let message = ClientResponse::from_tokens(&split("EDDM_TWR:ABCD:BY:ABCD"));
        assert!(message.is_valid());
        assert!(message.is_unknown_query());
        assert!(message.capabilities().is_empty());
    }
}
