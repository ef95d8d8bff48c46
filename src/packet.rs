use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, Result};
use crate::hci::acl::AclDataPacket;
use crate::hci::command::CommandPacket;
use crate::hci::commands::HciCommand;
use crate::hci::event::EventPacket;
use crate::hci::events::HciEvent;
use crate::hci::sync::SynchronousDataPacket;

/// Packet indicator carried in byte 0 of every frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    Command = 0x01,
    AclData = 0x02,
    SynchronousData = 0x03,
    Event = 0x04,
    IsoData = 0x05,
}

impl TryFrom<u8> for PacketType {
    type Error = Error;

    fn try_from(indicator: u8) -> Result<Self> {
        match indicator {
            0x01 => Ok(PacketType::Command),
            0x02 => Ok(PacketType::AclData),
            0x03 => Ok(PacketType::SynchronousData),
            0x04 => Ok(PacketType::Event),
            0x05 => Ok(PacketType::IsoData),
            other => Err(Error::UnknownPacketType(other)),
        }
    }
}

impl From<PacketType> for u8 {
    fn from(packet_type: PacketType) -> Self {
        packet_type as u8
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PacketType::Command => "Command",
            PacketType::AclData => "ACL Data",
            PacketType::SynchronousData => "Synchronous Data",
            PacketType::Event => "Event",
            PacketType::IsoData => "ISO Data",
        };
        f.write_str(name)
    }
}

/// Framing shared by every packet variant.
///
/// Values are validated when they are constructed, so encoding cannot fail.
/// Decoding checks the indicator byte and hands the rest of the frame to
/// [`HciPacket::decode_body`].
pub trait HciPacket: Sized {
    const PACKET_TYPE: PacketType;

    /// Smallest possible frame body, excluding the indicator byte.
    const MIN_BODY_LEN: usize;

    /// Append the frame body (everything after the indicator) to `out`.
    fn encode_body(&self, out: &mut Vec<u8>);

    /// Parse a frame body that has already had its indicator stripped.
    fn decode_body(body: &[u8]) -> Result<Self>;

    fn body_len(&self) -> usize;

    /// Encode the full frame, indicator included.
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.body_len());
        out.push(Self::PACKET_TYPE.into());
        self.encode_body(&mut out);
        out
    }

    /// Decode a full frame, indicator included.
    fn decode(frame: &[u8]) -> Result<Self> {
        let min = 1 + Self::MIN_BODY_LEN;
        if frame.len() < min {
            return Err(Error::TooShort {
                expected: min,
                actual: frame.len(),
            });
        }
        if frame[0] != u8::from(Self::PACKET_TYPE) {
            return Err(Error::WrongDiscriminator {
                expected: Self::PACKET_TYPE,
                actual: frame[0],
            });
        }
        Self::decode_body(&frame[1..])
    }
}

/// Any HCI packet this crate can encode.
///
/// Commands and events compare by their encoded frames, so a value built
/// from a generic packet equals the typed value decoded from its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Command(HciCommand),
    Event(HciEvent),
    AclData(AclDataPacket),
    SynchronousData(SynchronousDataPacket),
}

impl Packet {
    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::Command(_) => PacketType::Command,
            Packet::Event(_) => PacketType::Event,
            Packet::AclData(_) => PacketType::AclData,
            Packet::SynchronousData(_) => PacketType::SynchronousData,
        }
    }

    /// Encode the full frame, indicator included.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Packet::Command(command) => command.to_packet().encode(),
            Packet::Event(event) => event.to_packet().encode(),
            Packet::AclData(acl) => acl.encode(),
            Packet::SynchronousData(sync) => sync.encode(),
        }
    }
}

impl From<HciCommand> for Packet {
    fn from(command: HciCommand) -> Self {
        Packet::Command(command)
    }
}

impl From<CommandPacket> for Packet {
    fn from(command: CommandPacket) -> Self {
        Packet::Command(HciCommand::Generic(command))
    }
}

impl From<HciEvent> for Packet {
    fn from(event: HciEvent) -> Self {
        Packet::Event(event)
    }
}

impl From<EventPacket> for Packet {
    fn from(event: EventPacket) -> Self {
        Packet::Event(HciEvent::Generic(event))
    }
}

impl From<AclDataPacket> for Packet {
    fn from(acl: AclDataPacket) -> Self {
        Packet::AclData(acl)
    }
}

impl From<SynchronousDataPacket> for Packet {
    fn from(sync: SynchronousDataPacket) -> Self {
        Packet::SynchronousData(sync)
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Packet::Command(command) => write!(f, "{}", command.to_packet()),
            Packet::Event(event) => write!(f, "{}", event.to_packet()),
            Packet::AclData(acl) => write!(f, "{}", acl),
            Packet::SynchronousData(sync) => write!(f, "{}", sync),
        }
    }
}
