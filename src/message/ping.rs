use super::{has_min_tokens, Envelope, FsdMessage};

macro_rules! timestamp_message {
    ($(#[$meta:meta])* $name:ident, $pdu:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            envelope: Envelope,
            pub timestamp: String,
        }

        impl $name {
            pub fn new(
                sender: impl Into<String>,
                receiver: impl Into<String>,
                timestamp: impl Into<String>,
            ) -> Self {
                Self {
                    envelope: Envelope::with_receiver(sender, receiver),
                    timestamp: timestamp.into(),
                }
            }
        }

        impl FsdMessage for $name {
            const PDU: &'static str = $pdu;

            fn envelope(&self) -> &Envelope {
                &self.envelope
            }

            fn to_tokens(&self) -> Vec<String> {
                vec![
                    self.sender().to_string(),
                    self.receiver().to_string(),
                    self.timestamp.clone(),
                ]
            }

            fn from_tokens(tokens: &[&str]) -> Self {
                if !has_min_tokens(tokens, 3, stringify!($name), log::Level::Debug) {
                    return Self::default();
                }
                Self::new(tokens[0], tokens[1], tokens[2])
            }
        }
    };
}

timestamp_message!(
    /// Keep-alive ping; the peer echoes the timestamp in a [`Pong`]
    Ping,
    "$PI"
);

timestamp_message!(
    /// Answer to a [`Ping`]
    Pong,
    "$PO"
);

impl Pong {
    /// Pong answering `ping`, addressed back to its sender
    pub fn reply_to(ping: &Ping, sender: impl Into<String>) -> Self {
        Self::new(sender, ping.sender(), ping.timestamp.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_pong() {
        let ping = Ping::new("ABCD", "SERVER", "85275222");
        assert_eq!(ping.to_tokens().join(":"), "ABCD:SERVER:85275222");
        assert_eq!(Ping::from_tokens(&["ABCD", "SERVER", "85275222"]), ping);

        let pong = Pong::from_tokens(&["ABCD", "SERVER", "85275222"]);
        assert_eq!(pong, Pong::new("ABCD", "SERVER", "85275222"));
        assert_eq!(pong.to_line(), "$POABCD:SERVER:85275222");

        assert!(!Ping::from_tokens(&["ABCD", "SERVER"]).is_valid());
        assert!(!Pong::from_tokens(&["ABCD"]).is_valid());
    }

    #[test]
    fn test_pong_reply_to() {
        let ping = Ping::new("SERVER", "ABCD", "42");
        let pong = Pong::reply_to(&ping, "ABCD");
        assert_eq!(pong.to_line(), "$POABCD:SERVER:42");
    }
}
