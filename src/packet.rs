use crate::message::*;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PacketError {
    #[error("Empty packet")]
    Empty,
    #[error("Unknown packet type: {0}")]
    UnknownPdu(String),
    #[error("Missing payload after {0}")]
    MissingPayload(String),
    #[error("Unsupported packet: {0}")]
    Unsupported(String),
    #[error("Malformed {0} packet")]
    Malformed(&'static str),
}

/// Every prefix the codec understands, longest first so that prefix
/// matching never picks a shorter identifier by accident.
const PDUS: &[&str] = &[
    "$DI", "$ID", "$ZC", "$ZR", "#AP", "#DP", "#AA", "#DA", "$CQ", "$CR", "#TM", "$PI", "$PO",
    "#SB", "$!!", "#MU", "-MD", "$ER", "$FP", "$XX", "#DL", "$SF", "%", "@",
];

/// Decode a single protocol line into a typed message
pub fn decode(line: &str) -> Result<Message, PacketError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(PacketError::Empty);
    }

    let Some(pdu) = PDUS.iter().copied().find(|pdu| line.starts_with(pdu)) else {
        log::warn!("FSD unknown packet: '{}'", line);
        return Err(PacketError::UnknownPdu(line.to_string()));
    };

    let payload = &line[pdu.len()..];
    if payload.is_empty() {
        return Err(PacketError::MissingPayload(pdu.to_string()));
    }
    let tokens: Vec<&str> = payload.split(':').collect();

    match pdu {
        "$DI" => build::<FsdIdentification>(&tokens),
        "$ID" => build::<ClientIdentification>(&tokens),
        "$ZC" => build::<AuthChallenge>(&tokens),
        "$ZR" => build::<AuthResponse>(&tokens),
        "#AP" => build::<AddPilot>(&tokens),
        "#DP" => build::<DeletePilot>(&tokens),
        "#AA" => build::<AddAtc>(&tokens),
        "#DA" => build::<DeleteAtc>(&tokens),
        "$CQ" => build::<ClientQuery>(&tokens),
        "$CR" => build::<ClientResponse>(&tokens),
        "#TM" => build::<TextMessage>(&tokens),
        "$PI" => build::<Ping>(&tokens),
        "$PO" => build::<Pong>(&tokens),
        "#SB" => decode_pilot_packet(&tokens),
        "$!!" => build::<KillRequest>(&tokens),
        "#MU" => build::<Mute>(&tokens),
        "-MD" => build::<RevBClientParts>(&tokens),
        "$ER" => build::<ServerError>(&tokens),
        "$FP" => build::<FlightPlan>(&tokens),
        "$XX" => build::<Rehost>(&tokens),
        "#DL" => build::<ServerHeartbeat>(&tokens),
        "$SF" => build::<VisualPilotDataToggle>(&tokens),
        "%" => build::<AtcDataUpdate>(&tokens),
        "@" => build::<PilotDataUpdate>(&tokens),
        _ => Err(PacketError::UnknownPdu(line.to_string())),
    }
}

/// `#SB` carries several message types, told apart by token 2
fn decode_pilot_packet(tokens: &[&str]) -> Result<Message, PacketError> {
    let subtype = tokens.get(2).copied().unwrap_or_default();
    match subtype {
        PlaneInfoRequest::SUBTYPE => build::<PlaneInfoRequest>(tokens),
        PlaneInformation::SUBTYPE => {
            if tokens.len() > 4 && tokens[3] == "GEN" {
                build::<PlaneInformation>(tokens)
            } else {
                log::debug!("Unsupported plane information format: {}", tokens.join(":"));
                Err(PacketError::Unsupported(format!("#SB {}", subtype)))
            }
        }
        PlaneInfoRequestFsinn::SUBTYPE => build::<PlaneInfoRequestFsinn>(tokens),
        PlaneInformationFsinn::SUBTYPE => build::<PlaneInformationFsinn>(tokens),
        InterimPilotDataUpdate::SUBTYPE => build::<InterimPilotDataUpdate>(tokens),
        // Legacy interim position update, superseded by VI
        "I" => Err(PacketError::Unsupported("#SB I".to_string())),
        _ => build::<CustomPilotPacket>(tokens),
    }
}

fn build<T>(tokens: &[&str]) -> Result<Message, PacketError>
where
    T: FsdMessage + Into<Message>,
{
    let message = T::from_tokens(tokens);
    if !message.is_valid() {
        return Err(PacketError::Malformed(T::PDU));
    }
    Ok(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ServerErrorCode;

    #[test]
    fn test_decode_and_reencode_identification() {
        let raw = "$DICLIENTA:SERVER:FSD V3:abc123\r\n";
        let message = decode(raw).unwrap();
        match &message {
            Message::FsdIdentification(di) => {
                assert_eq!(di.sender(), "CLIENTA");
                assert_eq!(di.receiver(), "SERVER");
                assert_eq!(di.server_version, "FSD V3");
                assert_eq!(di.initial_challenge, "abc123");
            }
            other => panic!("Expected FsdIdentification, got {:?}", other),
        }
        assert_eq!(message.format(), raw);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode("  \r\n"), Err(PacketError::Empty));
        assert!(matches!(decode("$QQABCD:SERVER"), Err(PacketError::UnknownPdu(_))));
        assert_eq!(decode("$PI\r\n"), Err(PacketError::MissingPayload("$PI".to_string())));
        assert_eq!(decode("$PIABCD:SERVER"), Err(PacketError::Malformed("$PI")));
    }

    #[test]
    fn test_decode_pilot_packets() {
        assert!(matches!(decode("#SBABCD:XYZ:PIR"), Ok(Message::PlaneInfoRequest(_))));
        assert!(matches!(
            decode("#SBABCD:XYZ:PI:GEN:EQUIPMENT=B744"),
            Ok(Message::PlaneInformation(_))
        ));
        assert!(matches!(
            decode("#SBABCD:XYZ:PI:X:0:1:2:3"),
            Err(PacketError::Unsupported(_))
        ));
        assert!(matches!(decode("#SBABCD:XYZ:PI:GEN"), Err(PacketError::Unsupported(_))));
        assert!(matches!(
            decode("#SBABCD:XYZ:FSIPIR:0:DLH:A320:::::L2J:FLIGHTFACTOR A320"),
            Ok(Message::PlaneInfoRequestFsinn(_))
        ));
        assert!(matches!(
            decode("#SBABCD:XYZ:FSIPI:0:DLH:A320:::::L2J:FLIGHTFACTOR A320"),
            Ok(Message::PlaneInformationFsinn(_))
        ));
        assert!(matches!(
            decode("#SBABCD:XYZ:VI:43.12578:-72.15841:12008:400:25132146"),
            Ok(Message::InterimPilotDataUpdate(_))
        ));
        assert!(matches!(
            decode("#SBABCD:XYZ:I:43.12578:-72.15841:12008"),
            Err(PacketError::Unsupported(_))
        ));
        assert!(matches!(
            decode("#SBABCD:XYZ:MODEL:whatever"),
            Ok(Message::CustomPilotPacket(_))
        ));
        assert_eq!(decode("#SBABCD:XYZ"), Err(PacketError::Malformed("#SB")));
    }

    #[test]
    fn test_decode_position_packets() {
        let line = "@N:ABCD:7000:1:43.12578:-72.15841:12000:125:25132146:8";
        let message = decode(line).unwrap();
        assert_eq!(message.pdu(), "@");
        assert_eq!(message.sender(), "ABCD");
        assert_eq!(message.to_line(), line);

        let line = "%ABCD:28200:5:145:5:48.11028:8.56972:100";
        let message = decode(line).unwrap();
        assert!(matches!(message, Message::AtcDataUpdate(ref atc) if atc.frequency_khz == 128200));
        assert_eq!(message.to_line(), line);
    }

    #[test]
    fn test_decode_reencodes_catalog_lines() {
        let lines = [
            "$IDABCD:SERVER:e410:Client:1:5:1234567:1108540872:29bbc8b1398eb38e0139",
            "$ZCSERVER:ABCD:6d4b1a0c",
            "$ZRABCD:SERVER:b2c7f7a9",
            "#APABCD:SERVER:1234567:1234567:1:100:1:Jon Doe",
            "#AAABCD:SERVER:Jon Doe:1234567:1234567:4:100",
            "#DPABCD:1234567",
            "#DAABCD:1234567",
            "$CQABCD:SERVER:ATC:EDDM_TWR",
            "$CRABCD:ZZZZ_TWR:RN:Test User::1",
            "#TMABCD:@24050&@35725:hey dude!",
            "$POABCD:SERVER:85275222",
            "$!!SUP:ABCD:I don't like you!",
            "#MUSERVER:ABCD:1",
            "-MDABCD:1a:2b:3c",
            "$FPABCD:SERVER:V:B744:420:EGLL:1530:1535:FL350:KORD:8:15:9:30:NONE:Unit Test:EGLL.KORD",
            "$XXSERVER:ABCD:fsd2.example.net",
            "#DLSERVER:*:0:0",
            "$SFSERVER:ABCD:1",
        ];
        for line in lines {
            let message = decode(line).unwrap();
            assert_eq!(message.to_line(), line);
        }
    }

    #[test]
    fn test_decode_server_error() {
        let message = decode("$ERSERVER:ABCD:009:EGLL:No such weather profile").unwrap();
        match message {
            Message::ServerError(error) => {
                assert_eq!(error.error_number, ServerErrorCode::NoWeatherProfile);
                assert!(!error.is_fatal());
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_text_message_with_colons() {
        let message = decode("#TMEDMM_CTR:@24050:Contact: Munich Radar").unwrap();
        match message {
            Message::TextMessage(text) => {
                assert_eq!(text.frequencies, vec![124050]);
                assert_eq!(text.message, "Contact: Munich Radar");
            }
            other => panic!("Expected TextMessage, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_keeps_trailing_spaces() {
        let raw = "#TMABCD:BAW1:see you \r\n";
        let message = decode(raw).unwrap();
        match &message {
            Message::TextMessage(text) => assert_eq!(text.message, "see you "),
            other => panic!("Expected TextMessage, got {:?}", other),
        }
        assert_eq!(message.format(), raw);
    }

    #[test]
    fn test_decode_saturates_large_numbers() {
        match decode("#TMA:@2147483647:hi").unwrap() {
            Message::TextMessage(text) => assert_eq!(text.frequencies, vec![i32::MAX]),
            other => panic!("Expected TextMessage, got {:?}", other),
        }
        match decode("%ABCD:2147483647:5:145:5:48.1:8.5:100").unwrap() {
            Message::AtcDataUpdate(atc) => assert_eq!(atc.frequency_khz, i32::MAX),
            other => panic!("Expected AtcDataUpdate, got {:?}", other),
        }
        match decode("@N:ABCD:7000:1:43.1:-72.1:2147483647:125:25132146:8").unwrap() {
            Message::PilotDataUpdate(pilot) => {
                assert_eq!(pilot.altitude_true, i32::MAX);
                assert_eq!(pilot.altitude_pressure, i32::MAX);
            }
            other => panic!("Expected PilotDataUpdate, got {:?}", other),
        }
    }
}
