use alloc::vec::Vec;
use core::fmt;

use crate::error::Result;
use crate::hci::command::{parameters_from_slice, Parameters};
use crate::hci::parser;
use crate::packet::{HciPacket, PacketType};

pub const COMMAND_COMPLETE: u8 = 0x0E;
pub const COMMAND_STATUS: u8 = 0x0F;
pub const LE_META: u8 = 0x3E;
pub const VENDOR_SPECIFIC: u8 = 0xFF;

/// An event with typed parameters.
pub trait Event: Sized {
    const EVENT_CODE: u8;

    fn parameters(&self) -> Parameters;

    fn from_parameters(parameters: &[u8]) -> Result<Self>;
}

/// An event frame: event code, parameter length and parameters.
///
/// Only the framing is interpreted; [`Event`] types give the parameters
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPacket {
    event_code: u8,
    parameters: Parameters,
}

impl EventPacket {
    pub fn new(event_code: u8, parameters: &[u8]) -> Result<Self> {
        Ok(Self {
            event_code,
            parameters: parameters_from_slice(parameters)?,
        })
    }

    pub fn event_code(&self) -> u8 {
        self.event_code
    }

    pub fn parameters(&self) -> &[u8] {
        &self.parameters
    }

    pub fn parameter_total_length(&self) -> u8 {
        self.parameters.len() as u8
    }

    pub fn le_subevent_code(&self) -> Option<u8> {
        if self.event_code != LE_META {
            return None;
        }
        self.parameters.first().copied()
    }
}

impl HciPacket for EventPacket {
    const PACKET_TYPE: PacketType = PacketType::Event;
    const MIN_BODY_LEN: usize = 2;

    fn encode_body(&self, out: &mut Vec<u8>) {
        out.push(self.event_code);
        out.push(self.parameter_total_length());
        out.extend_from_slice(&self.parameters);
    }

    fn decode_body(body: &[u8]) -> Result<Self> {
        let (rest, (code, len)) = parser::header(parser::event_header, body, Self::MIN_BODY_LEN)?;
        log::trace!("event code {:#04x} len {}", code, len);
        let parameters = parser::payload(rest, len as usize, true)?;
        Self::new(code, parameters)
    }

    fn body_len(&self) -> usize {
        Self::MIN_BODY_LEN + self.parameters.len()
    }
}

impl<E: Event> From<&E> for EventPacket {
    fn from(event: &E) -> Self {
        Self {
            event_code: E::EVENT_CODE,
            parameters: event.parameters(),
        }
    }
}

impl fmt::Display for EventPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HCI Event {:#04X} len {} params {:02X?}",
            self.event_code,
            self.parameter_total_length(),
            self.parameters.as_slice()
        )
    }
}
