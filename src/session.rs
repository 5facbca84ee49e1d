use crate::message::Message;
use thiserror::Error;

/// Connection lifecycle as seen by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientState {
    #[default]
    Disconnected,
    /// TCP connected, waiting for the server greeting
    Identifying,
    /// Greeting received, identifying and logging in
    Authenticating,
    /// Login sent, waiting for the first regular traffic
    Registered,
    /// Logged in and active
    Connected,
    /// Kicked, fatal error or logoff sent
    Disconnecting,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unexpected {direction} {pdu} packet while {state:?}")]
    UnexpectedMessage {
        direction: &'static str,
        pdu: &'static str,
        state: ClientState,
    },
    #[error("Session is already open ({0:?})")]
    AlreadyConnected(ClientState),
}

/// Tracks which messages are legal in the current state and advances it
#[derive(Debug, Default)]
pub struct Session {
    state: ClientState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ClientState::Connected
    }

    /// The transport is up, the server greeting is expected next
    pub fn connect(&mut self) -> Result<(), SessionError> {
        if self.state != ClientState::Disconnected {
            return Err(SessionError::AlreadyConnected(self.state));
        }
        self.transition(ClientState::Identifying);
        Ok(())
    }

    /// The transport is gone
    pub fn close(&mut self) {
        self.transition(ClientState::Disconnected);
    }

    /// Validate an inbound message and advance the state
    pub fn on_received(&mut self, message: &Message) -> Result<(), SessionError> {
        match message {
            Message::KillRequest(_) => {
                self.transition(ClientState::Disconnecting);
                return Ok(());
            }
            Message::ServerError(error) => {
                if error.is_fatal() {
                    self.transition(ClientState::Disconnecting);
                }
                return Ok(());
            }
            _ => {}
        }

        match self.state {
            ClientState::Identifying => match message {
                Message::FsdIdentification(_) => {
                    self.transition(ClientState::Authenticating);
                    Ok(())
                }
                _ => Err(self.unexpected("inbound", message)),
            },
            ClientState::Authenticating => {
                if is_auth(message) || is_keepalive(message) {
                    Ok(())
                } else {
                    Err(self.unexpected("inbound", message))
                }
            }
            ClientState::Registered => {
                if !is_auth(message) && !is_keepalive(message) {
                    self.transition(ClientState::Connected);
                }
                Ok(())
            }
            ClientState::Connected | ClientState::Disconnecting => Ok(()),
            ClientState::Disconnected => Err(self.unexpected("inbound", message)),
        }
    }

    /// Validate an outbound message and advance the state
    pub fn on_sent(&mut self, message: &Message) -> Result<(), SessionError> {
        match self.state {
            ClientState::Authenticating => match message {
                Message::AddPilot(_) | Message::AddAtc(_) => {
                    self.transition(ClientState::Registered);
                    Ok(())
                }
                Message::ClientIdentification(_) => Ok(()),
                _ if is_auth(message) || is_keepalive(message) => Ok(()),
                _ => Err(self.unexpected("outbound", message)),
            },
            ClientState::Registered | ClientState::Connected => match message {
                Message::DeletePilot(_) | Message::DeleteAtc(_) => {
                    self.transition(ClientState::Disconnecting);
                    Ok(())
                }
                Message::ClientIdentification(_) | Message::AddPilot(_) | Message::AddAtc(_) => {
                    Err(self.unexpected("outbound", message))
                }
                _ => Ok(()),
            },
            ClientState::Disconnected | ClientState::Identifying | ClientState::Disconnecting => {
                Err(self.unexpected("outbound", message))
            }
        }
    }

    fn transition(&mut self, state: ClientState) {
        if self.state != state {
            log::debug!("Session state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn unexpected(&self, direction: &'static str, message: &Message) -> SessionError {
        SessionError::UnexpectedMessage {
            direction,
            pdu: message.pdu(),
            state: self.state,
        }
    }
}

fn is_auth(message: &Message) -> bool {
    matches!(message, Message::AuthChallenge(_) | Message::AuthResponse(_))
}

fn is_keepalive(message: &Message) -> bool {
    matches!(message, Message::Ping(_) | Message::Pong(_))
}
