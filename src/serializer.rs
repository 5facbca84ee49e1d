use crate::enums::{
    AtcRating, AtisLineType, Capability, ClientQueryType, FacilityType, FlightType, PilotRating,
    ServerErrorCode, SimType, TransponderMode,
};
use std::str::FromStr;

/// Conversion between a typed field and its FSD wire token
pub trait WireField: Sized {
    fn to_wire(&self) -> String;

    /// Never fails: unknown or malformed tokens map to a sentinel value
    fn from_wire(token: &str) -> Self;
}

/// Encode any wire field
pub fn to_wire<T: WireField>(value: &T) -> String {
    value.to_wire()
}

/// Decode any wire field
pub fn from_wire<T: WireField>(token: &str) -> T {
    T::from_wire(token)
}

/// Parse an integer, yielding 0 for malformed text
pub fn parse_int<T: FromStr + Default>(token: &str) -> T {
    token.trim().parse().unwrap_or_default()
}

/// Parse a float, yielding 0.0 for malformed text
pub fn parse_float(token: &str) -> f64 {
    token.trim().parse().unwrap_or(0.0)
}

fn encode<T: Copy + PartialEq>(table: &[(T, &'static str)], value: T, fallback: &'static str) -> String {
    table
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, s)| *s)
        .unwrap_or(fallback)
        .to_string()
}

fn decode<T: Copy>(table: &[(T, &'static str)], token: &str) -> Option<T> {
    table.iter().find(|(_, s)| *s == token).map(|(v, _)| *v)
}

fn log_unknown(kind: &str, token: &str) {
    log::debug!("FSD unknown {} '{}'", kind, token);
}

const ATC_RATINGS: &[(AtcRating, &str)] = &[
    (AtcRating::Unknown, "0"),
    (AtcRating::Observer, "1"),
    (AtcRating::Student, "2"),
    (AtcRating::Student2, "3"),
    (AtcRating::Student3, "4"),
    (AtcRating::Controller1, "5"),
    (AtcRating::Controller2, "6"),
    (AtcRating::Controller3, "7"),
    (AtcRating::Instructor1, "8"),
    (AtcRating::Instructor2, "9"),
    (AtcRating::Instructor3, "10"),
    (AtcRating::Supervisor, "11"),
    (AtcRating::Administrator, "12"),
];

impl WireField for AtcRating {
    fn to_wire(&self) -> String {
        encode(ATC_RATINGS, *self, "0")
    }

    fn from_wire(token: &str) -> Self {
        if token.is_empty() {
            return AtcRating::Unknown;
        }
        decode(ATC_RATINGS, token).unwrap_or_else(|| {
            log_unknown("ATC rating", token);
            AtcRating::Unknown
        })
    }
}

const PILOT_RATINGS: &[(PilotRating, &str)] = &[
    (PilotRating::Unknown, "0"),
    (PilotRating::Student, "1"),
    (PilotRating::Vfr, "2"),
    (PilotRating::Ifr, "3"),
    (PilotRating::Instructor, "4"),
    (PilotRating::Supervisor, "5"),
];

impl WireField for PilotRating {
    fn to_wire(&self) -> String {
        encode(PILOT_RATINGS, *self, "0")
    }

    fn from_wire(token: &str) -> Self {
        if token.is_empty() {
            return PilotRating::Unknown;
        }
        decode(PILOT_RATINGS, token).unwrap_or_else(|| {
            log_unknown("pilot rating", token);
            PilotRating::Unknown
        })
    }
}

// Several simulators share a code. Decoding takes the first entry, so the
// preferred variant for a shared code is listed first.
const SIM_TYPES: &[(SimType, &str)] = &[
    (SimType::Unknown, "0"),
    (SimType::Msfs95, "1"),
    (SimType::Msfs98, "2"),
    (SimType::Mscfs, "3"),
    (SimType::Msfs2000, "4"),
    (SimType::Mscfs2, "5"),
    (SimType::Msfs2002, "6"),
    (SimType::Mscfs3, "7"),
    (SimType::Msfs2004, "8"),
    (SimType::Msfsx, "9"),
    (SimType::XPlane8, "12"),
    (SimType::XPlane9, "13"),
    (SimType::XPlane10, "14"),
    (SimType::XPlane11, "16"),
    (SimType::FlightGear, "25"),
    (SimType::P3Dv4, "30"),
    (SimType::P3Dv1, "30"),
    (SimType::P3Dv2, "30"),
    (SimType::P3Dv3, "30"),
    (SimType::XPlane12, "0"),
    (SimType::P3Dv5, "0"),
    (SimType::Msfs2020, "0"),
];

impl WireField for SimType {
    fn to_wire(&self) -> String {
        encode(SIM_TYPES, *self, "0")
    }

    fn from_wire(token: &str) -> Self {
        if token.is_empty() {
            return SimType::Unknown;
        }
        decode(SIM_TYPES, token).unwrap_or_else(|| {
            log_unknown("sim type", token);
            SimType::Unknown
        })
    }
}

const FACILITY_TYPES: &[(FacilityType, &str)] = &[
    (FacilityType::Obs, "0"),
    (FacilityType::Fss, "1"),
    (FacilityType::Del, "2"),
    (FacilityType::Gnd, "3"),
    (FacilityType::Twr, "4"),
    (FacilityType::App, "5"),
    (FacilityType::Ctr, "6"),
];

impl WireField for FacilityType {
    fn to_wire(&self) -> String {
        encode(FACILITY_TYPES, *self, "")
    }

    fn from_wire(token: &str) -> Self {
        if token.is_empty() {
            return FacilityType::Unknown;
        }
        decode(FACILITY_TYPES, token).unwrap_or_else(|| {
            log_unknown("facility type", token);
            FacilityType::Unknown
        })
    }
}

const QUERY_TYPES: &[(ClientQueryType, &str)] = &[
    (ClientQueryType::IsValidAtc, "ATC"),
    (ClientQueryType::Capabilities, "CAPS"),
    (ClientQueryType::Com1Freq, "C?"),
    (ClientQueryType::RealName, "RN"),
    (ClientQueryType::Server, "SV"),
    (ClientQueryType::Atis, "ATIS"),
    (ClientQueryType::PublicIp, "IP"),
    (ClientQueryType::Inf, "INF"),
    (ClientQueryType::FlightPlan, "FP"),
    (ClientQueryType::AircraftConfig, "ACC"),
    (ClientQueryType::EuroscopeSimData, "SIMDATA"),
];

/// ATC-to-ATC coordination queries and custom server queries a pilot client
/// receives but never acts on
const IGNORED_QUERY_TYPES: &[&str] = &[
    "BC", "BY", "DI", "DP", "DR", "FA", "HC", "HI", "HT", "ID", "IH", "IT", "PT", "SC", "ST", "TA",
    "VT", "VER", "WH", "HLP", "NOHLP", "NEWATIS", "NEWINFO",
];

impl WireField for ClientQueryType {
    fn to_wire(&self) -> String {
        encode(QUERY_TYPES, *self, "Unknown query type")
    }

    fn from_wire(token: &str) -> Self {
        if token.is_empty() {
            return ClientQueryType::Unknown;
        }
        if let Some(query_type) = decode(QUERY_TYPES, token) {
            return query_type;
        }
        if !IGNORED_QUERY_TYPES.contains(&token) {
            log_unknown("client query type", token);
        }
        ClientQueryType::Unknown
    }
}

const FLIGHT_TYPES: &[(FlightType, &str)] = &[
    (FlightType::Ifr, "I"),
    (FlightType::Vfr, "V"),
    (FlightType::Svfr, "S"),
    (FlightType::Dvfr, "D"),
];

impl WireField for FlightType {
    fn to_wire(&self) -> String {
        encode(FLIGHT_TYPES, *self, "I")
    }

    fn from_wire(token: &str) -> Self {
        decode(FLIGHT_TYPES, token).unwrap_or_default()
    }
}

const TRANSPONDER_MODES: &[(TransponderMode, &str)] = &[
    (TransponderMode::Standby, "S"),
    (TransponderMode::ModeC, "N"),
    (TransponderMode::Ident, "Y"),
];

impl WireField for TransponderMode {
    fn to_wire(&self) -> String {
        encode(TRANSPONDER_MODES, *self, "S")
    }

    fn from_wire(token: &str) -> Self {
        decode(TRANSPONDER_MODES, token).unwrap_or_default()
    }
}

const CAPABILITIES: &[(Capability, &str)] = &[
    (Capability::AtcInfo, "ATCINFO"),
    (Capability::SecondaryPos, "SECPOS"),
    (Capability::AircraftInfo, "MODELDESC"),
    (Capability::OngoingCoord, "ONGOINGCOORD"),
    (Capability::InterimPos, "INTERIMPOS"),
    (Capability::FastPos, "FASTPOS"),
    (Capability::VisPos, "VISUPDATE"),
    (Capability::Stealth, "STEALTH"),
    (Capability::AircraftConfig, "ACCONFIG"),
];

impl WireField for Capability {
    fn to_wire(&self) -> String {
        encode(CAPABILITIES, *self, "")
    }

    fn from_wire(token: &str) -> Self {
        decode(CAPABILITIES, token).unwrap_or_default()
    }
}

const ATIS_LINE_TYPES: &[(AtisLineType, &str)] = &[
    (AtisLineType::VoiceRoom, "V"),
    (AtisLineType::ZuluLogoff, "Z"),
    (AtisLineType::TextMessage, "T"),
    (AtisLineType::LineCount, "E"),
];

impl WireField for AtisLineType {
    fn to_wire(&self) -> String {
        encode(ATIS_LINE_TYPES, *self, "")
    }

    fn from_wire(token: &str) -> Self {
        decode(ATIS_LINE_TYPES, token).unwrap_or_default()
    }
}

const SERVER_ERROR_CODES: &[(ServerErrorCode, u32)] = &[
    (ServerErrorCode::NoError, 0),
    (ServerErrorCode::CallsignInUse, 1),
    (ServerErrorCode::InvalidCallsign, 2),
    (ServerErrorCode::AlreadyRegistered, 3),
    (ServerErrorCode::SyntaxError, 4),
    (ServerErrorCode::InvalidSrcCallsign, 5),
    (ServerErrorCode::InvalidCidPassword, 6),
    (ServerErrorCode::NoSuchCallsign, 7),
    (ServerErrorCode::NoFlightPlan, 8),
    (ServerErrorCode::NoWeatherProfile, 9),
    (ServerErrorCode::InvalidRevision, 10),
    (ServerErrorCode::RequestedLevelTooHigh, 11),
    (ServerErrorCode::ServerFull, 12),
    (ServerErrorCode::CidSuspended, 13),
    (ServerErrorCode::InvalidCtrl, 14),
    (ServerErrorCode::RatingTooLow, 15),
    (ServerErrorCode::InvalidClient, 16),
    (ServerErrorCode::AuthTimeout, 17),
];

// Error codes are numeric and servers zero-pad them ("009"), so they are
// compared as integers rather than strings.
impl WireField for ServerErrorCode {
    fn to_wire(&self) -> String {
        SERVER_ERROR_CODES
            .iter()
            .find(|(code, _)| code == self)
            .map(|(_, n)| n.to_string())
            .unwrap_or_default()
    }

    fn from_wire(token: &str) -> Self {
        let Ok(number) = token.trim().parse::<u32>() else {
            log_unknown("server error code", token);
            return ServerErrorCode::Unknown;
        };
        SERVER_ERROR_CODES
            .iter()
            .find(|(_, n)| *n == number)
            .map(|(code, _)| *code)
            .unwrap_or(ServerErrorCode::Unknown)
    }
}

impl WireField for bool {
    fn to_wire(&self) -> String {
        let token = if *self { "1" } else { "0" };
        token.to_string()
    }

    fn from_wire(token: &str) -> Self {
        token == "1"
    }
}

macro_rules! numeric_wire_field {
    ($($t:ty),+) => {
        $(
            impl WireField for $t {
                fn to_wire(&self) -> String {
                    self.to_string()
                }

                fn from_wire(token: &str) -> Self {
                    parse_int(token)
                }
            }
        )+
    };
}

numeric_wire_field!(i32, u32, i64, u16);
