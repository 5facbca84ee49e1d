//! FSD protocol support: typed message catalog, line codec and a minimal
//! pilot/observer client.

pub mod client;
pub mod config;
pub mod connection;
pub mod enums;
pub mod message;
pub mod packet;
pub mod pbh;
pub mod serializer;
pub mod session;

pub use message::{FsdMessage, Message};
pub use packet::{decode, PacketError};
