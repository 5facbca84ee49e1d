use super::{has_min_tokens, Envelope, FsdMessage};
use crate::enums::{AtcRating, FacilityType, PilotRating, TransponderMode};
use crate::pbh::{pack_pbh, unpack_pbh};
use crate::serializer::{from_wire, parse_float, parse_int, to_wire};

const FREQUENCY_OFFSET: i32 = 100_000;

/// `%` controller position update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtcDataUpdate {
    envelope: Envelope,
    pub frequency_khz: i32,
    pub facility: FacilityType,
    pub visible_range: i32,
    pub rating: AtcRating,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: i32,
}

impl AtcDataUpdate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sender: impl Into<String>,
        frequency_khz: i32,
        facility: FacilityType,
        visible_range: i32,
        rating: AtcRating,
        latitude: f64,
        longitude: f64,
        elevation: i32,
    ) -> Self {
        Self {
            envelope: Envelope::new(sender),
            frequency_khz,
            facility,
            visible_range,
            rating,
            latitude,
            longitude,
            elevation,
        }
    }
}

impl FsdMessage for AtcDataUpdate {
    const PDU: &'static str = "%";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.frequency_khz.saturating_sub(FREQUENCY_OFFSET).to_string(),
            to_wire(&self.facility),
            self.visible_range.to_string(),
            to_wire(&self.rating),
            format!("{:.5}", self.latitude),
            format!("{:.5}", self.longitude),
            self.elevation.to_string(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 8, "AtcDataUpdate", log::Level::Debug) {
            return Self::default();
        }
        Self::new(
            tokens[0],
            parse_int::<i32>(tokens[1]).saturating_add(FREQUENCY_OFFSET),
            from_wire(tokens[2]),
            parse_int(tokens[3]),
            from_wire(tokens[4]),
            parse_float(tokens[5]),
            parse_float(tokens[6]),
            parse_int(tokens[7]),
        )
    }
}

/// `@` pilot position update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PilotDataUpdate {
    envelope: Envelope,
    pub transponder_mode: TransponderMode,
    pub transponder_code: i32,
    pub rating: PilotRating,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_true: i32,
    pub altitude_pressure: i32,
    pub ground_speed: i32,
    pub pitch: f64,
    pub bank: f64,
    pub heading: f64,
    pub on_ground: bool,
}

impl PilotDataUpdate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sender: impl Into<String>,
        transponder_mode: TransponderMode,
        transponder_code: i32,
        rating: PilotRating,
        latitude: f64,
        longitude: f64,
        altitude_true: i32,
        altitude_pressure: i32,
        ground_speed: i32,
        pitch: f64,
        bank: f64,
        heading: f64,
        on_ground: bool,
    ) -> Self {
        Self {
            envelope: Envelope::new(sender),
            transponder_mode,
            transponder_code,
            rating,
            latitude,
            longitude,
            altitude_true,
            altitude_pressure,
            ground_speed,
            pitch,
            bank,
            heading,
            on_ground,
        }
    }
}

impl FsdMessage for PilotDataUpdate {
    const PDU: &'static str = "@";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    // The sender follows the transponder mode here, unlike every other packet.
    fn to_tokens(&self) -> Vec<String> {
        let pbh = pack_pbh(self.pitch, self.bank, self.heading, self.on_ground);
        vec![
            to_wire(&self.transponder_mode),
            self.sender().to_string(),
            format!("{:04}", self.transponder_code),
            to_wire(&self.rating),
            format!("{:.5}", self.latitude),
            format!("{:.5}", self.longitude),
            self.altitude_true.to_string(),
            self.ground_speed.to_string(),
            pbh.to_string(),
            self.altitude_pressure.saturating_sub(self.altitude_true).to_string(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 10, "PilotDataUpdate", log::Level::Debug) {
            return Self::default();
        }
        let altitude_true: i32 = parse_int(tokens[6]);
        let pbh = unpack_pbh(parse_int(tokens[8]));
        Self::new(
            tokens[1],
            from_wire(tokens[0]),
            parse_int(tokens[2]),
            from_wire(tokens[3]),
            parse_float(tokens[4]),
            parse_float(tokens[5]),
            altitude_true,
            altitude_true.saturating_add(parse_int(tokens[9])),
            parse_int(tokens[7]),
            pbh.pitch,
            pbh.bank,
            pbh.heading,
            pbh.on_ground,
        )
    }
}

/// `#SB ... VI` fast position update sent directly to one client
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterimPilotDataUpdate {
    envelope: Envelope,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_true: i32,
    pub ground_speed: i32,
    pub pitch: f64,
    pub bank: f64,
    pub heading: f64,
    pub on_ground: bool,
}

impl InterimPilotDataUpdate {
    pub const SUBTYPE: &'static str = "VI";

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        latitude: f64,
        longitude: f64,
        altitude_true: i32,
        ground_speed: i32,
        pitch: f64,
        bank: f64,
        heading: f64,
        on_ground: bool,
    ) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            latitude,
            longitude,
            altitude_true,
            ground_speed,
            pitch,
            bank,
            heading,
            on_ground,
        }
    }
}

impl FsdMessage for InterimPilotDataUpdate {
    const PDU: &'static str = "#SB";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        let pbh = pack_pbh(self.pitch, self.bank, self.heading, self.on_ground);
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            Self::SUBTYPE.to_string(),
            format!("{:.5}", self.latitude),
            format!("{:.5}", self.longitude),
            self.altitude_true.to_string(),
            self.ground_speed.to_string(),
            pbh.to_string(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 8, "InterimPilotDataUpdate", log::Level::Debug) {
            return Self::default();
        }
        let pbh = unpack_pbh(parse_int(tokens[7]));
        Self::new(
            tokens[0],
            tokens[1],
            parse_float(tokens[3]),
            parse_float(tokens[4]),
            parse_int(tokens[5]),
            parse_int(tokens[6]),
            pbh.pitch,
            pbh.bank,
            pbh.heading,
            pbh.on_ground,
        )
    }
}

/// `$SF` switches visual position updates for `client` on or off
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisualPilotDataToggle {
    envelope: Envelope,
    pub client: String,
    pub active: bool,
}

impl VisualPilotDataToggle {
    pub fn new(sender: impl Into<String>, client: impl Into<String>, active: bool) -> Self {
        Self {
            envelope: Envelope::new(sender),
            client: client.into(),
            active,
        }
    }
}

impl FsdMessage for VisualPilotDataToggle {
    const PDU: &'static str = "$SF";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.client.clone(),
            to_wire(&self.active),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 3, "VisualPilotDataToggle", log::Level::Debug) {
            return Self::default();
        }
        Self::new(tokens[0], tokens[1], from_wire(tokens[2]))
    }
}
