//! Typed events.
//!
//! [`HciEvent`] collects the events this crate interprets, with
//! [`HciEvent::Generic`] carrying any other event frame as raw parameters.

use core::fmt;

use heapless::Vec as BoundedVec;

use crate::error::{Error, Result};
use crate::hci::command::{Parameters, MAX_PARAMETERS_LEN};
use crate::hci::event::{Event, EventPacket, COMMAND_COMPLETE, COMMAND_STATUS};
use crate::hci::opcode::Opcode;
use crate::hci::parser;

/// Room left for return parameters after the Command Complete header.
pub const MAX_RETURN_PARAMETERS_LEN: usize = MAX_PARAMETERS_LEN - 3;

pub type ReturnParameters = BoundedVec<u8, MAX_RETURN_PARAMETERS_LEN>;

/// Controller error codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StatusCode {
    Success,
    UnknownHciCommand,
    UnknownConnectionIdentifier,
    HardwareFailure,
    PageTimeout,
    AuthenticationFailure,
    InvalidHciCommandParameters,
    CommandDisallowed,
    Other(u8),
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        *self == StatusCode::Success
    }
}

impl From<u8> for StatusCode {
    fn from(code: u8) -> Self {
        match code {
            0x00 => StatusCode::Success,
            0x01 => StatusCode::UnknownHciCommand,
            0x02 => StatusCode::UnknownConnectionIdentifier,
            0x03 => StatusCode::HardwareFailure,
            0x04 => StatusCode::PageTimeout,
            0x05 => StatusCode::AuthenticationFailure,
            0x12 => StatusCode::InvalidHciCommandParameters,
            0x0C => StatusCode::CommandDisallowed,
            other => StatusCode::Other(other),
        }
    }
}

impl From<StatusCode> for u8 {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::Success => 0x00,
            StatusCode::UnknownHciCommand => 0x01,
            StatusCode::UnknownConnectionIdentifier => 0x02,
            StatusCode::HardwareFailure => 0x03,
            StatusCode::PageTimeout => 0x04,
            StatusCode::AuthenticationFailure => 0x05,
            StatusCode::InvalidHciCommandParameters => 0x12,
            StatusCode::CommandDisallowed => 0x0C,
            StatusCode::Other(code) => code,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:#04X})", self, u8::from(*self))
    }
}

/// Command Complete: the controller finished a command and returns its
/// results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandComplete {
    num_packets: u8,
    opcode: Opcode,
    return_parameters: ReturnParameters,
}

impl CommandComplete {
    pub fn new(num_packets: u8, opcode: Opcode, return_parameters: &[u8]) -> Result<Self> {
        let return_parameters = ReturnParameters::from_slice(return_parameters)
            .map_err(|_| Error::ParameterTooLong(return_parameters.len() + 3))?;
        Ok(Self {
            num_packets,
            opcode,
            return_parameters,
        })
    }

    pub fn num_packets(&self) -> u8 {
        self.num_packets
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn return_parameters(&self) -> &[u8] {
        &self.return_parameters
    }

    /// Leading status byte, which most commands return first.
    pub fn status(&self) -> Option<StatusCode> {
        self.return_parameters.first().map(|&code| StatusCode::from(code))
    }
}

impl Event for CommandComplete {
    const EVENT_CODE: u8 = COMMAND_COMPLETE;

    fn parameters(&self) -> Parameters {
        let [lo, hi] = self.opcode.0.to_le_bytes();
        [self.num_packets, lo, hi]
            .into_iter()
            .chain(self.return_parameters.iter().copied())
            .collect()
    }

    fn from_parameters(parameters: &[u8]) -> Result<Self> {
        let (rest, (num_packets, opcode)) =
            parser::header(parser::command_complete_params, parameters, 3)?;
        log::trace!("command complete opcode {:#06x} packets {}", opcode, num_packets);
        Self::new(num_packets, Opcode(opcode), rest)
    }
}

/// Command Status: the controller accepted or rejected a command that
/// completes later.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CommandStatus {
    pub status: StatusCode,
    pub num_packets: u8,
    pub opcode: Opcode,
}

impl Event for CommandStatus {
    const EVENT_CODE: u8 = COMMAND_STATUS;

    fn parameters(&self) -> Parameters {
        let [lo, hi] = self.opcode.0.to_le_bytes();
        [self.status.into(), self.num_packets, lo, hi].into_iter().collect()
    }

    fn from_parameters(parameters: &[u8]) -> Result<Self> {
        let (rest, (status, num_packets, opcode)) =
            parser::header(parser::command_status_params, parameters, 4)?;
        if !rest.is_empty() {
            return Err(Error::LengthMismatch {
                declared: 4,
                available: parameters.len(),
            });
        }
        log::trace!("command status {:#04x} opcode {:#06x}", status, opcode);
        Ok(CommandStatus {
            status: status.into(),
            num_packets,
            opcode: Opcode(opcode),
        })
    }
}

/// A decoded event.
///
/// Equality compares the encoded frames, like [`HciCommand`](crate::hci::HciCommand).
#[derive(Debug, Clone)]
pub enum HciEvent {
    CommandComplete(CommandComplete),
    CommandStatus(CommandStatus),
    Generic(EventPacket),
}

impl HciEvent {
    pub fn event_code(&self) -> u8 {
        match self {
            HciEvent::CommandComplete(_) => CommandComplete::EVENT_CODE,
            HciEvent::CommandStatus(_) => CommandStatus::EVENT_CODE,
            HciEvent::Generic(packet) => packet.event_code(),
        }
    }

    pub fn to_packet(&self) -> EventPacket {
        match self {
            HciEvent::CommandComplete(e) => e.into(),
            HciEvent::CommandStatus(e) => e.into(),
            HciEvent::Generic(packet) => packet.clone(),
        }
    }
}

impl PartialEq for HciEvent {
    fn eq(&self, other: &Self) -> bool {
        self.to_packet() == other.to_packet()
    }
}

impl Eq for HciEvent {}

impl From<CommandComplete> for HciEvent {
    fn from(event: CommandComplete) -> Self {
        HciEvent::CommandComplete(event)
    }
}

impl From<CommandStatus> for HciEvent {
    fn from(event: CommandStatus) -> Self {
        HciEvent::CommandStatus(event)
    }
}
