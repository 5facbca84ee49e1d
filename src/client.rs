use crate::config::{Config, LoginMode};
use crate::connection::{Connection, ConnectionError};
use crate::enums::{Capability, ClientQueryType, ServerErrorCode};
use crate::message::*;
use crate::serializer::to_wire;
use crate::session::{ClientState, Session, SessionError};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::{Instant, Interval};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Why [`Client::run`] returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The server closed the stream
    Closed,
    /// The client logged off on request
    LoggedOff,
    Killed(String),
    ServerError(ServerErrorCode, String),
}

/// Generate a random 20-character hexadecimal challenge for client identification
pub fn generate_challenge() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..20)
        .map(|_| format!("{:x}", rng.gen_range(0..16)))
        .collect()
}

fn generate_sys_uid() -> String {
    use rand::Rng;
    rand::thread_rng().gen::<u32>().to_string()
}

/// Timer firing every `secs` seconds, starting one period from now; 0 disables it
fn timer(secs: u64) -> Option<Interval> {
    (secs > 0).then(|| {
        let period = Duration::from_secs(secs);
        tokio::time::interval_at(Instant::now() + period, period)
    })
}

async fn tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Pilot or observer client driving one FSD session
pub struct Client<S> {
    connection: Connection<S>,
    session: Session,
    config: Config,
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Config) -> Result<Self, ClientError> {
        Ok(Self {
            connection: Connection::new(stream)?,
            session: Session::new(),
            config,
        })
    }

    pub fn callsign(&self) -> &str {
        &self.config.login.callsign
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process server traffic until the session ends
    pub async fn run(&mut self) -> Result<DisconnectReason, ClientError> {
        self.run_until(std::future::pending()).await
    }

    /// Process server traffic until the session ends or `shutdown` resolves
    ///
    /// While active, pilots report their position and every client pings the
    /// server on the configured intervals. On shutdown the client logs off.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<DisconnectReason, ClientError>
    where
        F: Future<Output = ()>,
    {
        self.session.connect()?;
        tokio::pin!(shutdown);

        let mut position_timer = match self.config.login.mode {
            LoginMode::Pilot => timer(self.config.position.interval_secs),
            LoginMode::Observer => None,
        };
        let mut ping_timer = timer(self.config.client.ping_interval_secs);

        loop {
            tokio::select! {
                received = self.connection.recv() => {
                    let Some(message) = received? else {
                        log::info!("Server closed the connection");
                        self.session.close();
                        return Ok(DisconnectReason::Closed);
                    };
                    if let Some(reason) = self.on_message(message).await? {
                        self.session.close();
                        return Ok(reason);
                    }
                }
                _ = tick(&mut position_timer) => {
                    if self.session.is_active() {
                        self.send_position().await?;
                    }
                }
                _ = tick(&mut ping_timer) => {
                    if self.session.is_active() {
                        self.ping("SERVER").await?;
                    }
                }
                _ = &mut shutdown => {
                    self.disconnect().await?;
                    return Ok(DisconnectReason::LoggedOff);
                }
            }
        }
    }

    /// Log off from the network and close the session
    ///
    /// `#DP` or `#DA` is only sent once the login went out.
    pub async fn disconnect(&mut self) -> Result<(), ClientError> {
        if matches!(
            self.session.state(),
            ClientState::Registered | ClientState::Connected
        ) {
            let login = &self.config.login;
            let logoff: Message = match login.mode {
                LoginMode::Pilot => DeletePilot::new(login.callsign.clone(), login.cid.clone()).into(),
                LoginMode::Observer => DeleteAtc::new(login.callsign.clone(), login.cid.clone()).into(),
            };
            self.send(logoff).await?;
            log::info!("Logged off as {}", self.callsign());
        }
        self.session.close();
        Ok(())
    }

    /// Report the configured aircraft state with a `@` update
    pub async fn send_position(&mut self) -> Result<(), ClientError> {
        let position = &self.config.position;
        let update = PilotDataUpdate::new(
            self.callsign(),
            position.transponder_mode(),
            position.transponder_code,
            self.config.login.pilot_rating(),
            position.latitude,
            position.longitude,
            position.altitude,
            position.pressure_altitude,
            position.ground_speed,
            position.pitch,
            position.bank,
            position.heading,
            position.on_ground,
        );
        self.send(update.into()).await
    }

    async fn on_message(&mut self, message: Message) -> Result<Option<DisconnectReason>, ClientError> {
        let was_active = self.session.is_active();
        if let Err(e) = self.session.on_received(&message) {
            log::warn!("{}", e);
            return Ok(None);
        }

        if let Some(reason) = self.handle(message).await? {
            return Ok(Some(reason));
        }

        if !was_active && self.session.is_active() {
            log::info!("Connected to network as {}", self.callsign());
            self.ping("SERVER").await?;
        }
        Ok(None)
    }

    /// Send a ping stamped with the current time, answered by a pong
    pub async fn ping(&mut self, receiver: &str) -> Result<(), ClientError> {
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        let ping = Ping::new(self.callsign(), receiver, timestamp);
        self.send(ping.into()).await
    }

    async fn send(&mut self, message: Message) -> Result<(), ClientError> {
        self.session.on_sent(&message)?;
        self.connection.send(&message).await?;
        Ok(())
    }

    async fn handle(&mut self, message: Message) -> Result<Option<DisconnectReason>, ClientError> {
        match message {
            Message::FsdIdentification(di) => {
                log::info!("Server identified as {}", di.server_version);
                self.identify(&di).await?;
                self.login().await?;
            }
            Message::AuthChallenge(challenge) => {
                log::debug!("Ignoring auth challenge from {}", challenge.sender());
            }
            Message::Ping(ping) => {
                let pong = Pong::reply_to(&ping, self.callsign());
                self.send(pong.into()).await?;
            }
            Message::Pong(pong) => {
                if let Ok(sent) = pong.timestamp.parse::<i64>() {
                    let elapsed = chrono::Utc::now().timestamp_millis() - sent;
                    log::info!("Pong from {} after {} ms", pong.sender(), elapsed);
                }
            }
            Message::PlaneInfoRequest(request) => {
                let aircraft = &self.config.aircraft;
                let info = PlaneInformation::new(
                    self.callsign(),
                    request.sender(),
                    aircraft.icao.clone(),
                    aircraft.airline.clone(),
                    aircraft.livery.clone(),
                );
                self.send(info.into()).await?;
            }
            Message::ClientQuery(query) => self.answer_query(query).await?,
            Message::TextMessage(text) => {
                if text.is_radio() {
                    log::info!("[{:?}] {}: {}", text.frequencies, text.sender(), text.message);
                } else {
                    log::info!("{} -> {}: {}", text.sender(), text.receiver(), text.message);
                }
            }
            Message::KillRequest(kill) => {
                log::warn!("Disconnected by {}: {}", kill.sender(), kill.reason);
                return Ok(Some(DisconnectReason::Killed(kill.reason)));
            }
            Message::ServerError(error) => {
                log::warn!(
                    "Server error {:?} ({}): {}",
                    error.error_number,
                    error.causing_parameter,
                    error.description
                );
                if error.is_fatal() {
                    return Ok(Some(DisconnectReason::ServerError(
                        error.error_number,
                        error.description,
                    )));
                }
            }
            Message::Mute(mute) => log::info!("Mute set to {} by {}", mute.mute, mute.sender()),
            Message::Rehost(rehost) => log::info!("Server asked to reconnect to {}", rehost.hostname),
            other => log::debug!("Unhandled {} from {}", other.pdu(), other.sender()),
        }
        Ok(None)
    }

    async fn identify(&mut self, di: &FsdIdentification) -> Result<(), ClientError> {
        log::debug!("Server challenge {}", di.initial_challenge);
        let client = &self.config.client;
        let identification = ClientIdentification::new(
            self.callsign(),
            client.id,
            client.name.clone(),
            client.version_major,
            client.version_minor,
            self.config.login.cid.clone(),
            generate_sys_uid(),
            generate_challenge(),
        );
        self.send(identification.into()).await
    }

    async fn login(&mut self) -> Result<(), ClientError> {
        let login = &self.config.login;
        let message: Message = match login.mode {
            LoginMode::Pilot => AddPilot::new(
                login.callsign.clone(),
                login.cid.clone(),
                login.password.clone(),
                login.pilot_rating(),
                login.protocol_revision,
                login.sim_type(),
                login.real_name.clone(),
            )
            .into(),
            LoginMode::Observer => AddAtc::new(
                login.callsign.clone(),
                login.real_name.clone(),
                login.cid.clone(),
                login.password.clone(),
                login.atc_rating(),
                login.protocol_revision,
            )
            .into(),
        };
        self.send(message).await
    }

    async fn answer_query(&mut self, query: ClientQuery) -> Result<(), ClientError> {
        let callsign = self.callsign().to_string();
        let response = match query.query_type {
            ClientQueryType::Capabilities => ClientResponse::capabilities_response(
                callsign,
                query.sender(),
                &[Capability::AircraftInfo, Capability::AircraftConfig],
            ),
            ClientQueryType::RealName => {
                let login = &self.config.login;
                let rating = match login.mode {
                    LoginMode::Pilot => to_wire(&login.pilot_rating()),
                    LoginMode::Observer => to_wire(&login.atc_rating()),
                };
                ClientResponse::real_name_response(
                    callsign,
                    query.sender(),
                    login.real_name.clone(),
                    "",
                    rating,
                )
            }
            ClientQueryType::Server => ClientResponse::new(
                callsign,
                query.sender(),
                ClientQueryType::Server,
                vec![self.config.server.address.clone()],
            ),
            ClientQueryType::AircraftConfig => {
                if let Some(config) = query.aircraft_config() {
                    log::debug!("Aircraft config from {}: {}", query.sender(), config);
                }
                return Ok(());
            }
            other => {
                log::debug!("Not answering {:?} query from {}", other, query.sender());
                return Ok(());
            }
        };
        self.send(response.into()).await
    }
}
