//! `#SB` pilot-to-pilot packets describing the aircraft model.
//!
//! All of them share the `#SB` prefix and are told apart by token 2.

use super::{has_min_tokens, Envelope, FsdMessage};

/// `#SB ... PIR`, asks a pilot for its aircraft details
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaneInfoRequest {
    envelope: Envelope,
}

impl PlaneInfoRequest {
    pub const SUBTYPE: &'static str = "PIR";

    pub fn new(sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
        }
    }
}

impl FsdMessage for PlaneInfoRequest {
    const PDU: &'static str = "#SB";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            Self::SUBTYPE.to_string(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 3, "PlaneInfoRequest", log::Level::Debug) {
            return Self::default();
        }
        Self::new(tokens[0], tokens[1])
    }
}

/// `#SB ... PI:GEN`, aircraft details as key/value pairs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaneInformation {
    envelope: Envelope,
    pub aircraft: String,
    pub airline: String,
    pub livery: String,
}

impl PlaneInformation {
    pub const SUBTYPE: &'static str = "PI";

    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        aircraft: impl Into<String>,
        airline: impl Into<String>,
        livery: impl Into<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            aircraft: aircraft.into(),
            airline: airline.into(),
            livery: livery.into(),
        }
    }
}

impl FsdMessage for PlaneInformation {
    const PDU: &'static str = "#SB";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        let mut tokens = vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            Self::SUBTYPE.to_string(),
            "GEN".to_string(),
        ];
        for (key, value) in [
            ("EQUIPMENT", &self.aircraft),
            ("AIRLINE", &self.airline),
            ("LIVERY", &self.livery),
        ] {
            if !value.is_empty() {
                tokens.push(format!("{}={}", key, value));
            }
        }
        tokens
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 5, "PlaneInformation", log::Level::Debug) {
            return Self::default();
        }
        let mut message = Self::new(tokens[0], tokens[1], "", "", "");
        for pair in &tokens[4..] {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "EQUIPMENT" => message.aircraft = value.to_string(),
                "AIRLINE" => message.airline = value.to_string(),
                "LIVERY" => message.livery = value.to_string(),
                _ => {}
            }
        }
        message
    }
}

macro_rules! fsinn_message {
    ($(#[$meta:meta])* $name:ident, $subtype:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            envelope: Envelope,
            pub airline_icao: String,
            pub aircraft_icao: String,
            pub aircraft_icao_combined_type: String,
            pub sending_model_string: String,
        }

        impl $name {
            pub const SUBTYPE: &'static str = $subtype;

            pub fn new(
                sender: impl Into<String>,
                receiver: impl Into<String>,
                airline_icao: impl Into<String>,
                aircraft_icao: impl Into<String>,
                aircraft_icao_combined_type: impl Into<String>,
                sending_model_string: impl Into<String>,
            ) -> Self {
                Self {
                    envelope: Envelope::with_receiver(sender, receiver),
                    airline_icao: airline_icao.into(),
                    aircraft_icao: aircraft_icao.into(),
                    aircraft_icao_combined_type: aircraft_icao_combined_type.into(),
                    sending_model_string: sending_model_string.into(),
                }
            }
        }

        impl FsdMessage for $name {
            const PDU: &'static str = "#SB";

            fn envelope(&self) -> &Envelope {
                &self.envelope
            }

            fn to_tokens(&self) -> Vec<String> {
                vec![
                    self.sender().to_string(),
                    self.receiver().to_string(),
                    Self::SUBTYPE.to_string(),
                    "0".to_string(),
                    self.airline_icao.clone(),
                    self.aircraft_icao.clone(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    self.aircraft_icao_combined_type.clone(),
                    self.sending_model_string.clone(),
                ]
            }

            fn from_tokens(tokens: &[&str]) -> Self {
                if !has_min_tokens(tokens, 12, stringify!($name), log::Level::Debug) {
                    return Self::default();
                }
                Self::new(tokens[0], tokens[1], tokens[4], tokens[5], tokens[10], tokens[11])
            }
        }
    };
}

fsinn_message!(
    /// FSInn flavoured plane information request, `#SB ... FSIPIR`
    PlaneInfoRequestFsinn,
    "FSIPIR"
);

fsinn_message!(
    /// FSInn flavoured plane information, `#SB ... FSIPI`
    PlaneInformationFsinn,
    "FSIPI"
);

/// Any other `#SB` sub-type, kept as raw tokens
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomPilotPacket {
    envelope: Envelope,
    pub subtype: String,
    pub data: Vec<String>,
}

impl CustomPilotPacket {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        subtype: impl Into<String>,
        data: Vec<String>,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            subtype: subtype.into(),
            data,
        }
    }
}

impl FsdMessage for CustomPilotPacket {
    const PDU: &'static str = "#SB";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        let mut tokens = vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            self.subtype.clone(),
        ];
        tokens.extend(self.data.iter().cloned());
        tokens
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 3, "CustomPilotPacket", log::Level::Debug) {
            return Self::default();
        }
        Self::new(
            tokens[0],
            tokens[1],
            tokens[2],
            tokens[3..].iter().map(|t| t.to_string()).collect(),
        )
    }
}
