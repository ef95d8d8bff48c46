use alloc::vec::Vec;
use core::fmt;

use heapless::Vec as BoundedVec;

use crate::error::{Error, Result};
use crate::hci::opcode::Opcode;
use crate::hci::parser;
use crate::packet::{HciPacket, PacketType};

/// Largest parameter block a command frame can carry.
pub const MAX_PARAMETERS_LEN: usize = 255;

/// Command parameters, bounded by the one-byte length field.
pub type Parameters = BoundedVec<u8, MAX_PARAMETERS_LEN>;

pub fn parameters_from_slice(data: &[u8]) -> Result<Parameters> {
    Parameters::from_slice(data).map_err(|_| Error::ParameterTooLong(data.len()))
}

/// A command with typed parameters.
pub trait Command: Sized {
    const OPCODE: Opcode;

    fn parameters(&self) -> Parameters;

    fn from_parameters(parameters: &[u8]) -> Result<Self>;
}

/// A command frame: opcode, parameter length and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPacket {
    opcode: Opcode,
    parameters: Parameters,
}

impl CommandPacket {
    pub fn new(opcode: Opcode, parameters: &[u8]) -> Result<Self> {
        Ok(Self {
            opcode,
            parameters: parameters_from_slice(parameters)?,
        })
    }

    pub fn from_fields(ogf: u8, ocf: u16, parameters: &[u8]) -> Result<Self> {
        Self::new(Opcode::from_fields(ogf, ocf), parameters)
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn ogf(&self) -> u8 {
        self.opcode.ogf()
    }

    pub fn ocf(&self) -> u16 {
        self.opcode.ocf()
    }

    pub fn parameters(&self) -> &[u8] {
        &self.parameters
    }

    /// The value of the length byte on the wire.
    pub fn parameter_total_length(&self) -> u8 {
        self.parameters.len() as u8
    }

    /// Decode into a typed command, if the opcode matches.
    pub fn to_command<C: Command>(&self) -> Option<Result<C>> {
        if self.opcode != C::OPCODE {
            return None;
        }
        Some(C::from_parameters(&self.parameters))
    }
}

impl HciPacket for CommandPacket {
    const PACKET_TYPE: PacketType = PacketType::Command;
    const MIN_BODY_LEN: usize = 3;

    fn encode_body(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.opcode.0.to_le_bytes());
        out.push(self.parameter_total_length());
        out.extend_from_slice(&self.parameters);
    }

    fn decode_body(body: &[u8]) -> Result<Self> {
        let (rest, (opcode, len)) = parser::header(parser::command_header, body, Self::MIN_BODY_LEN)?;
        let parameters = parser::payload(rest, len as usize, true)?;
        log::trace!("command opcode {:#06x} len {}", opcode, len);
        Self::new(Opcode(opcode), parameters)
    }

    fn body_len(&self) -> usize {
        Self::MIN_BODY_LEN + self.parameters.len()
    }
}

impl<C: Command> From<&C> for CommandPacket {
    fn from(command: &C) -> Self {
        Self {
            opcode: C::OPCODE,
            parameters: command.parameters(),
        }
    }
}

impl fmt::Display for CommandPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HCI Command {} len {} params {:02X?}",
            self.opcode,
            self.parameter_total_length(),
            self.parameters.as_slice()
        )
    }
}
