/// ATC rating as sent in `#AA` and `%` packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AtcRating {
    #[default]
    Unknown,
    Observer,
    Student,
    Student2,
    Student3,
    Controller1,
    Controller2,
    Controller3,
    Instructor1,
    Instructor2,
    Instructor3,
    Supervisor,
    Administrator,
}

/// Pilot rating as sent in `#AP` and `@` packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PilotRating {
    #[default]
    Unknown,
    Student,
    Vfr,
    Ifr,
    Instructor,
    Supervisor,
}

/// Simulator the pilot client is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SimType {
    #[default]
    Unknown,
    Msfs95,
    Msfs98,
    Mscfs,
    Msfs2000,
    Mscfs2,
    Msfs2002,
    Mscfs3,
    Msfs2004,
    Msfsx,
    XPlane8,
    XPlane9,
    XPlane10,
    XPlane11,
    XPlane12,
    FlightGear,
    P3Dv1,
    P3Dv2,
    P3Dv3,
    P3Dv4,
    P3Dv5,
    Msfs2020,
}

/// ATC facility type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FacilityType {
    Obs,
    Fss,
    Del,
    Gnd,
    Twr,
    App,
    Ctr,
    #[default]
    Unknown,
}

/// Sub-type of `$CQ` / `$CR` packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClientQueryType {
    IsValidAtc,
    Capabilities,
    Com1Freq,
    RealName,
    Server,
    Atis,
    PublicIp,
    Inf,
    FlightPlan,
    AircraftConfig,
    EuroscopeSimData,
    #[default]
    Unknown,
}

/// Flight rules in a `$FP` packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlightType {
    #[default]
    Ifr,
    Vfr,
    Svfr,
    Dvfr,
}

/// Transponder mode, first token of a `@` packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransponderMode {
    #[default]
    Standby,
    ModeC,
    Ident,
}

/// A single capability advertised in a `CAPS` client response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Capability {
    #[default]
    None,
    AtcInfo,
    SecondaryPos,
    AircraftInfo,
    OngoingCoord,
    InterimPos,
    FastPos,
    VisPos,
    Stealth,
    AircraftConfig,
}

impl Capability {
    fn bit(self) -> u16 {
        match self {
            Capability::None => 0,
            Capability::AtcInfo => 1 << 0,
            Capability::SecondaryPos => 1 << 1,
            Capability::AircraftInfo => 1 << 2,
            Capability::OngoingCoord => 1 << 3,
            Capability::InterimPos => 1 << 4,
            Capability::FastPos => 1 << 5,
            Capability::VisPos => 1 << 6,
            Capability::Stealth => 1 << 7,
            Capability::AircraftConfig => 1 << 8,
        }
    }
}

/// Set of capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities(u16);

impl Capabilities {
    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    pub fn contains(&self, capability: Capability) -> bool {
        let bit = capability.bit();
        bit != 0 && self.0 & bit == bit
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut caps = Capabilities::default();
        for capability in iter {
            caps.insert(capability);
        }
        caps
    }
}

/// Line type of an ATIS client response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AtisLineType {
    VoiceRoom,
    TextMessage,
    ZuluLogoff,
    LineCount,
    #[default]
    Unknown,
}

/// Error number carried by `$ER`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServerErrorCode {
    #[default]
    NoError,
    CallsignInUse,
    InvalidCallsign,
    AlreadyRegistered,
    SyntaxError,
    InvalidSrcCallsign,
    InvalidCidPassword,
    NoSuchCallsign,
    NoFlightPlan,
    NoWeatherProfile,
    InvalidRevision,
    RequestedLevelTooHigh,
    ServerFull,
    CidSuspended,
    InvalidCtrl,
    RatingTooLow,
    InvalidClient,
    AuthTimeout,
    Unknown,
}

impl ServerErrorCode {
    /// Errors after which the server drops the connection
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            ServerErrorCode::CallsignInUse
                | ServerErrorCode::InvalidCallsign
                | ServerErrorCode::AlreadyRegistered
                | ServerErrorCode::InvalidCidPassword
                | ServerErrorCode::InvalidRevision
                | ServerErrorCode::RequestedLevelTooHigh
                | ServerErrorCode::ServerFull
                | ServerErrorCode::CidSuspended
                | ServerErrorCode::RatingTooLow
                | ServerErrorCode::InvalidClient
                | ServerErrorCode::AuthTimeout
        )
    }
}
