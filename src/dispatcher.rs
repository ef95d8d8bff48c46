//! Routes raw frames to the codec their indicator byte names.

use alloc::vec::Vec;

use crate::config::DecoderConfig;
use crate::error::{Error, Result};
use crate::hci::acl::AclDataPacket;
use crate::hci::command::CommandPacket;
use crate::hci::event::EventPacket;
use crate::hci::registry::{CommandRegistry, EventRegistry};
use crate::hci::sync::SynchronousDataPacket;
use crate::packet::{HciPacket, Packet, PacketType};

/// Decodes inbound frames into typed packets.
///
/// Holds no state between calls; the registries and config are fixed at
/// construction. Errors describe the whole frame, indicator included.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    commands: CommandRegistry,
    events: EventRegistry,
    config: DecoderConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(CommandRegistry::standard())
    }
}

impl Dispatcher {
    pub fn new(commands: CommandRegistry) -> Self {
        Self::with_config(commands, EventRegistry::standard(), DecoderConfig::default())
    }

    pub fn with_config(commands: CommandRegistry, events: EventRegistry, config: DecoderConfig) -> Self {
        Self {
            commands,
            events,
            config,
        }
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a frame whose first byte is the packet indicator.
    pub fn parse(&self, frame: &[u8]) -> Result<Packet> {
        let (&indicator, body) = frame.split_first().ok_or(Error::Empty)?;
        let packet_type = PacketType::try_from(indicator).map_err(|err| {
            log::warn!("dropping frame with unknown indicator {:#04x}", indicator);
            err
        })?;
        log::debug!("dispatching {} frame, {} body bytes", packet_type, body.len());

        let decoded = match packet_type {
            PacketType::Command => self.parse_command(body),
            PacketType::AclData => self.parse_acl(body),
            PacketType::SynchronousData => self.parse_sync(body),
            PacketType::Event if self.config.decode_events => self.parse_event(body),
            PacketType::Event | PacketType::IsoData => {
                log::warn!("{} frames are not supported", packet_type);
                return Err(Error::NotImplemented(packet_type));
            }
        };
        decoded.map_err(count_indicator)
    }

    /// Encode a packet into a frame, indicator included.
    pub fn encode(&self, packet: &Packet) -> Vec<u8> {
        packet.encode()
    }

    fn parse_command(&self, body: &[u8]) -> Result<Packet> {
        let packet = CommandPacket::decode_body(body)?;
        Ok(Packet::Command(self.commands.decode(packet)))
    }

    fn parse_event(&self, body: &[u8]) -> Result<Packet> {
        let packet = EventPacket::decode_body(body)?;
        Ok(Packet::Event(self.events.decode(packet)))
    }

    fn parse_acl(&self, body: &[u8]) -> Result<Packet> {
        let acl = AclDataPacket::decode_body_with(body, self.config.strict_length)?;
        check_limit(acl.data().len(), self.config.max_acl_data_len.into())?;
        Ok(Packet::AclData(acl))
    }

    fn parse_sync(&self, body: &[u8]) -> Result<Packet> {
        let sync = SynchronousDataPacket::decode_body_with(body, self.config.strict_length)?;
        check_limit(sync.data().len(), self.config.max_sync_data_len.into())?;
        Ok(Packet::SynchronousData(sync))
    }
}

// Body decoders size their errors without the indicator byte.
fn count_indicator(err: Error) -> Error {
    match err {
        Error::TooShort { expected, actual } => Error::TooShort {
            expected: expected + 1,
            actual: actual + 1,
        },
        other => other,
    }
}

fn check_limit(len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(Error::PayloadTooLong { len, max });
    }
    Ok(())
}
