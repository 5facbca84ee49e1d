use super::{has_min_tokens, rejoin, Envelope, FsdMessage};
use crate::enums::ServerErrorCode;
use crate::serializer::{from_wire, to_wire};

/// `$!!` forced disconnect of `receiver`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KillRequest {
    envelope: Envelope,
    pub reason: String,
}

impl KillRequest {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            reason: reason.into(),
        }
    }
}

impl FsdMessage for KillRequest {
    const PDU: &'static str = "$!!";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        let mut tokens = vec![self.sender().to_string(), self.receiver().to_string()];
        if !self.reason.is_empty() {
            tokens.push(self.reason.clone());
        }
        tokens
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 2, "KillRequest", log::Level::Debug) {
            return Self::default();
        }
        Self::new(tokens[0], tokens[1], rejoin(tokens, 2))
    }
}

/// `#MU` mutes or unmutes a client
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mute {
    envelope: Envelope,
    pub mute: bool,
}

impl Mute {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, mute: bool) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            mute,
        }
    }
}

impl FsdMessage for Mute {
    const PDU: &'static str = "#MU";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            to_wire(&self.mute),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 3, "Mute", log::Level::Debug) {
            return Self::default();
        }
        Self::new(tokens[0], tokens[1], from_wire(tokens[2]))
    }
}

/// `-MD` client parts of a revision B login
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevBClientParts {
    envelope: Envelope,
    pub part1: String,
    pub part2: String,
    pub part3: String,
}

impl RevBClientParts {
    pub fn new(
        sender: impl Into<String>,
        part1: impl Into<String>,
        part2: impl Into<String>,
        part3: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::new(sender),
            part1: part1.into(),
            part2: part2.into(),
            part3: part3.into(),
        }
    }
}

impl FsdMessage for RevBClientParts {
    const PDU: &'static str = "-MD";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.part1.clone(),
            self.part2.clone(),
            self.part3.clone(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 4, "RevBClientParts", log::Level::Debug) {
            return Self::default();
        }
        Self::new(tokens[0], tokens[1], tokens[2], tokens[3])
    }
}

/// `$ER` error reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerError {
    envelope: Envelope,
    pub error_number: ServerErrorCode,
    pub causing_parameter: String,
    pub description: String,
}

impl ServerError {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        error_number: ServerErrorCode,
        causing_parameter: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            error_number,
            causing_parameter: causing_parameter.into(),
            description: description.into(),
        }
    }

    /// Whether the server closes the connection after this error
    pub fn is_fatal(&self) -> bool {
        self.error_number.is_fatal()
    }
}

impl FsdMessage for ServerError {
    const PDU: &'static str = "$ER";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            to_wire(&self.error_number),
            self.causing_parameter.clone(),
            self.description.clone(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 5, "ServerError", log::Level::Debug) {
            return Self::default();
        }
        Self::new(
            tokens[0],
            tokens[1],
            from_wire(tokens[2]),
            tokens[3],
            rejoin(tokens, 4),
        )
    }
}

/// `#DL` server heartbeat
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerHeartbeat {
    envelope: Envelope,
    pub data: Vec<String>,
}

impl ServerHeartbeat {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, data: Vec<String>) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            data,
        }
    }
}

impl FsdMessage for ServerHeartbeat {
    const PDU: &'static str = "#DL";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        let mut tokens = vec![self.sender().to_string(), self.receiver().to_string()];
        tokens.extend(self.data.iter().cloned());
        tokens
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 2, "ServerHeartbeat", log::Level::Debug) {
            return Self::default();
        }
        Self::new(
            tokens[0],
            tokens[1],
            tokens[2..].iter().map(|t| t.to_string()).collect(),
        )
    }
}

/// `$XX` asks the client to reconnect to another host
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rehost {
    envelope: Envelope,
    pub hostname: String,
}

impl Rehost {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            hostname: hostname.into(),
        }
    }
}

impl FsdMessage for Rehost {
    const PDU: &'static str = "$XX";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            self.hostname.clone(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 3, "Rehost", log::Level::Debug) {
            return Self::default();
        }
        Self::new(tokens[0], tokens[1], tokens[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<&str> {
        line.split(':').collect()
    }

    #[test]
    fn test_kill_request() {
        let message = KillRequest::new("SUP", "ABCD", "I don't like you!");
        assert_eq!(message.to_line(), "$!!SUP:ABCD:I don't like you!");
        assert_eq!(KillRequest::from_tokens(&split("SUP:ABCD:I don't like you!")), message);

        let reason = KillRequest::from_tokens(&split("SUP:ABCD:Reason: spam"));
        assert_eq!(reason.reason, "Reason: spam");

        let bare = KillRequest::from_tokens(&split("SUP:ABCD"));
        assert!(bare.is_valid());
        assert_eq!(bare.reason, "");
        assert_eq!(bare.to_line(), "$!!SUP:ABCD");
        assert!(!KillRequest::from_tokens(&["SUP"]).is_valid());
    }

    #[test]
    fn test_mute_literals() {
        assert!(Mute::from_tokens(&split("SERVER:ABCD:1")).mute);
        assert!(!Mute::from_tokens(&split("SERVER:ABCD:0")).mute);
        assert!(!Mute::from_tokens(&split("SERVER:ABCD:yes")).mute);
        assert_eq!(Mute::new("SERVER", "ABCD", true).to_line(), "#MUSERVER:ABCD:1");
        assert!(!Mute::from_tokens(&split("SERVER:ABCD")).is_valid());
    }

    #[test]
    fn test_rev_b_client_parts() {
        let message = RevBClientParts::from_tokens(&split("ABCD:1a:2b:3c"));
        assert_eq!(message.receiver(), "");
        assert_eq!(message, RevBClientParts::new("ABCD", "1a", "2b", "3c"));
        assert_eq!(message.to_line(), "-MDABCD:1a:2b:3c");
        assert!(!RevBClientParts::from_tokens(&split("ABCD:1a:2b")).is_valid());
    }

    #[test]
    fn test_server_error() {
        let message = ServerError::from_tokens(&split("SERVER:ABCD:009:EGLL:No such weather profile"));
        assert_eq!(message.error_number, ServerErrorCode::NoWeatherProfile);
        assert_eq!(message.causing_parameter, "EGLL");
        assert_eq!(message.description, "No such weather profile");
        assert!(!message.is_fatal());
        assert_eq!(message.to_tokens().join(":"), "SERVER:ABCD:9:EGLL:No such weather profile");

        let fatal = ServerError::from_tokens(&split("SERVER:ABCD:006::Invalid CID/password"));
        assert!(fatal.is_fatal());
        assert!(!ServerError::from_tokens(&split("SERVER:ABCD:009:EGLL")).is_valid());
    }

    #[test]
    fn test_server_heartbeat_and_rehost() {
        let heartbeat = ServerHeartbeat::from_tokens(&split("SERVER:*:0:0"));
        assert_eq!(heartbeat.data, vec!["0", "0"]);
        assert_eq!(heartbeat.to_line(), "#DLSERVER:*:0:0");
        assert!(ServerHeartbeat::from_tokens(&split("SERVER:*")).is_valid());

        let rehost = Rehost::from_tokens(&split("SERVER:ABCD:fsd2.example.net"));
        assert_eq!(rehost.hostname, "fsd2.example.net");
        assert!(!Rehost::from_tokens(&split("SERVER:ABCD")).is_valid());
    }
}
