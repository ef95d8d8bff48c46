//! Bluetooth HCI packet framing.
//!
//! Encodes host-to-controller command frames and decodes or encodes the
//! data frames a controller exchanges with the host. Every frame starts
//! with a one-byte packet indicator ([`PacketType`]); [`parse`] routes a
//! raw buffer on that byte and [`encode`] produces the bytes for a
//! transport to send.
//!
//! ```
//! use hci_codec::{parse, Packet};
//! use hci_codec::hci::{commands::Reset, HciCommand};
//!
//! let packet = parse(&[0x01, 0x03, 0x0C, 0x00]).unwrap();
//! assert_eq!(packet, Packet::Command(HciCommand::Reset(Reset)));
//! assert_eq!(hci_codec::encode(&packet), vec![0x01, 0x03, 0x0C, 0x00]);
//! ```
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod address;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod hci;
pub mod packet;

use alloc::vec::Vec;

pub use address::{AddressType, BdAddr};
pub use config::DecoderConfig;
pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
pub use packet::{HciPacket, Packet, PacketType};

/// Decode a raw frame using the standard command and event registries.
pub fn parse(frame: &[u8]) -> Result<Packet> {
    Dispatcher::default().parse(frame)
}

/// Encode a packet into a frame, indicator included.
pub fn encode(packet: &Packet) -> Vec<u8> {
    packet.encode()
}
