use super::{has_min_tokens, rejoin, Envelope, FsdMessage};
use crate::serializer::parse_int;

/// Offset between wire frequency notation and kHz
const FREQUENCY_OFFSET: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMessageType {
    #[default]
    PrivateMessage,
    RadioMessage,
}

/// `#TM` text message, either private or sent on one or more frequencies
///
/// Radio receivers look like `@24050&@35725`. Each part loses its `@` marker
/// and is offset by 100000, giving frequencies in kHz.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextMessage {
    envelope: Envelope,
    pub message: String,
    pub message_type: TextMessageType,
    pub frequencies: Vec<i32>,
}

impl TextMessage {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let envelope = Envelope::with_receiver(sender, receiver);
        let (message_type, frequencies) = if envelope.receiver().starts_with('@') {
            (TextMessageType::RadioMessage, parse_frequencies(envelope.receiver()))
        } else {
            (TextMessageType::PrivateMessage, Vec::new())
        };
        Self {
            envelope,
            message: message.into(),
            message_type,
            frequencies,
        }
    }

    /// Radio message on the given frequencies (kHz)
    pub fn radio(sender: impl Into<String>, frequencies_khz: &[i32], message: impl Into<String>) -> Self {
        let receiver = frequencies_khz
            .iter()
            .map(|f| format!("@{}", f.saturating_sub(FREQUENCY_OFFSET)))
            .collect::<Vec<_>>()
            .join("&");
        Self::new(sender, receiver, message)
    }

    pub fn is_radio(&self) -> bool {
        self.message_type == TextMessageType::RadioMessage
    }
}

fn parse_frequencies(receiver: &str) -> Vec<i32> {
    receiver
        .split('&')
        .map(|part| {
            let value = parse_int::<i32>(part.strip_prefix('@').unwrap_or(part));
            value.saturating_add(FREQUENCY_OFFSET)
        })
        .collect()
}

impl FsdMessage for TextMessage {
    const PDU: &'static str = "#TM";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            self.message.clone(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 3, "TextMessage", log::Level::Warn) {
            return Self::default();
        }
        Self::new(tokens[0], tokens[1], rejoin(tokens, 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<&str> {
        line.split(':').collect()
    }

    #[test]
    fn test_radio_message_frequencies() {
        let message = TextMessage::new("A", "@12345&67890", "hi");
        assert_eq!(message.message_type, TextMessageType::RadioMessage);
        assert_eq!(message.frequencies, vec![112345, 167890]);
    }

    #[test]
    fn test_radio_constructor() {
        let message = TextMessage::radio("ABCD", &[124050, 135725], "hey dude!");
        assert_eq!(message.receiver(), "@24050&@35725");
        assert_eq!(message.to_line(), "#TMABCD:@24050&@35725:hey dude!");
        assert!(message.is_radio());
    }

    #[test]
    fn test_inbound_radio_message() {
        let message = TextMessage::from_tokens(&split("EDMM_CTR:@24050:Servus, radar contact"));
        assert_eq!(message.frequencies, vec![124050]);
        assert_eq!(message.message, "Servus, radar contact");
    }

    #[test]
    fn test_private_message_keeps_colons() {
        let message = TextMessage::from_tokens(&split("ABCD:*S:Please help: now!!!"));
        assert_eq!(message.message_type, TextMessageType::PrivateMessage);
        assert!(message.frequencies.is_empty());
        assert_eq!(message.message, "Please help: now!!!");
        assert_eq!(message.to_line(), "#TMABCD:*S:Please help: now!!!");
    }

    #[test]
    fn test_malformed_frequency_is_offset_zero() {
        let message = TextMessage::new("A", "@abc", "hi");
        assert_eq!(message.frequencies, vec![100000]);
    }

    #[test]
    fn test_out_of_range_frequency_saturates() {
        let message = TextMessage::from_tokens(&split("A:@2147483647:hi"));
        assert_eq!(message.frequencies, vec![i32::MAX]);
        let message = TextMessage::radio("A", &[i32::MIN], "hi");
        assert_eq!(message.receiver(), format!("@{}", i32::MIN));
    }

    #[test]
    fn test_text_message_too_short() {
        assert!(!TextMessage::from_tokens(&split("ABCD:*S")).is_valid());
    }
}
