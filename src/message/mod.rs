pub mod auth;
pub mod control;
pub mod flight_plan;
pub mod identification;
pub mod login;
pub mod plane_info;
pub mod ping;
pub mod position;
pub mod query;
pub mod text;

pub use auth::{AuthChallenge, AuthResponse};
pub use control::{KillRequest, Mute, Rehost, RevBClientParts, ServerError, ServerHeartbeat};
pub use flight_plan::FlightPlan;
pub use identification::{ClientIdentification, FsdIdentification};
pub use login::{AddAtc, AddPilot, DeleteAtc, DeletePilot};
pub use ping::{Ping, Pong};
pub use plane_info::{
    CustomPilotPacket, PlaneInfoRequest, PlaneInfoRequestFsinn, PlaneInformation,
    PlaneInformationFsinn,
};
pub use position::{AtcDataUpdate, InterimPilotDataUpdate, PilotDataUpdate, VisualPilotDataToggle};
pub use query::{ClientQuery, ClientResponse};
pub use text::{TextMessage, TextMessageType};

use std::fmt;

/// Sender and receiver shared by every FSD message
///
/// A default envelope is the "null" envelope: messages built from too few
/// tokens carry it and report `is_valid() == false`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Envelope {
    sender: String,
    receiver: String,
    valid: bool,
}

impl Envelope {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            receiver: String::new(),
            valid: true,
        }
    }

    pub fn with_receiver(sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            valid: true,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Contract implemented by every message type of the catalog
pub trait FsdMessage: Sized + Default {
    /// Wire prefix identifying the message type
    const PDU: &'static str;

    fn pdu() -> &'static str {
        Self::PDU
    }

    fn envelope(&self) -> &Envelope;

    /// Tokens in wire order, sender first
    fn to_tokens(&self) -> Vec<String>;

    /// Build a message from its tokens
    ///
    /// Too few tokens yield the default (invalid) instance and a log entry.
    fn from_tokens(tokens: &[&str]) -> Self;

    fn sender(&self) -> &str {
        self.envelope().sender()
    }

    fn receiver(&self) -> &str {
        self.envelope().receiver()
    }

    fn is_valid(&self) -> bool {
        self.envelope().is_valid()
    }

    /// PDU directly followed by the `:` joined tokens, without line terminator
    fn to_line(&self) -> String {
        format!("{}{}", Self::PDU, self.to_tokens().join(":"))
    }
}

/// Check the minimum token count, logging at `level` when it is not met
pub(crate) fn has_min_tokens(tokens: &[&str], min: usize, name: &str, level: log::Level) -> bool {
    if tokens.len() < min {
        log::log!(
            level,
            "{}: wrong number of arguments ({} given, {} required)",
            name,
            tokens.len(),
            min
        );
        return false;
    }
    true
}

/// Token at `index`, or an empty string when absent
pub(crate) fn token<'a>(tokens: &[&'a str], index: usize) -> &'a str {
    tokens.get(index).copied().unwrap_or_default()
}

/// Tokens from `index` on, joined back with `:`
pub(crate) fn rejoin(tokens: &[&str], index: usize) -> String {
    tokens.get(index..).map(|rest| rest.join(":")).unwrap_or_default()
}

macro_rules! message_union {
    ($($variant:ident),+ $(,)?) => {
        /// Any FSD message of the catalog
        #[derive(Debug, Clone, PartialEq)]
        pub enum Message {
            $($variant($variant)),+
        }

        impl Message {
            pub fn pdu(&self) -> &'static str {
                match self {
                    $(Message::$variant(_) => $variant::PDU),+
                }
            }

            pub fn envelope(&self) -> &Envelope {
                match self {
                    $(Message::$variant(m) => m.envelope()),+
                }
            }

            pub fn to_tokens(&self) -> Vec<String> {
                match self {
                    $(Message::$variant(m) => m.to_tokens()),+
                }
            }

            pub fn to_line(&self) -> String {
                match self {
                    $(Message::$variant(m) => m.to_line()),+
                }
            }
        }

        $(
            impl From<$variant> for Message {
                fn from(message: $variant) -> Self {
                    Message::$variant(message)
                }
            }
        )+
    };
}

message_union!(
    FsdIdentification,
    ClientIdentification,
    AuthChallenge,
    AuthResponse,
    AddPilot,
    DeletePilot,
    AddAtc,
    DeleteAtc,
    ClientQuery,
    ClientResponse,
    TextMessage,
    Ping,
    Pong,
    PlaneInfoRequest,
    PlaneInformation,
    PlaneInfoRequestFsinn,
    PlaneInformationFsinn,
    InterimPilotDataUpdate,
    CustomPilotPacket,
    KillRequest,
    Mute,
    RevBClientParts,
    ServerError,
    ServerHeartbeat,
    Rehost,
    FlightPlan,
    VisualPilotDataToggle,
    AtcDataUpdate,
    PilotDataUpdate,
);

impl Message {
    pub fn sender(&self) -> &str {
        self.envelope().sender()
    }

    pub fn receiver(&self) -> &str {
        self.envelope().receiver()
    }

    pub fn is_valid(&self) -> bool {
        self.envelope().is_valid()
    }

    /// Format the message as a protocol line, including the `\r\n` terminator
    pub fn format(&self) -> String {
        let mut line = self.to_line();
        line.push_str("\r\n");
        line
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_line())
    }
}
