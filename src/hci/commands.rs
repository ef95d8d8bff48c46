//! Typed commands.
//!
//! Each command knows its opcode and how to lay out its parameter block.
//! [`HciCommand`] collects them, with [`HciCommand::Generic`] covering any
//! opcode that has no typed representation.

use crate::address::BdAddr;
use crate::error::{Error, Result};
use crate::hci::command::{Command, CommandPacket, Parameters, MAX_PARAMETERS_LEN};
use crate::hci::handle::Handle;
use crate::hci::opcode::Opcode;

fn expect_len(parameters: &[u8], expected: usize) -> Result<()> {
    if parameters.len() != expected {
        return Err(Error::LengthMismatch {
            declared: expected,
            available: parameters.len(),
        });
    }
    Ok(())
}

fn handle_at(parameters: &[u8], offset: usize) -> Result<Handle> {
    Handle::new(u16::from_le_bytes([parameters[offset], parameters[offset + 1]]))
}

fn fixed<const N: usize>(data: [u8; N]) -> Parameters {
    const { assert!(N <= MAX_PARAMETERS_LEN) };
    data.into_iter().collect()
}

/// Reset the controller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Reset;

impl Command for Reset {
    const OPCODE: Opcode = Opcode::RESET;

    fn parameters(&self) -> Parameters {
        Parameters::new()
    }

    fn from_parameters(parameters: &[u8]) -> Result<Self> {
        expect_len(parameters, 0)?;
        Ok(Reset)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReadBdAddr;

impl Command for ReadBdAddr {
    const OPCODE: Opcode = Opcode::READ_BD_ADDR;

    fn parameters(&self) -> Parameters {
        Parameters::new()
    }

    fn from_parameters(parameters: &[u8]) -> Result<Self> {
        expect_len(parameters, 0)?;
        Ok(ReadBdAddr)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InquiryCancel;

impl Command for InquiryCancel {
    const OPCODE: Opcode = Opcode::INQUIRY_CANCEL;

    fn parameters(&self) -> Parameters {
        Parameters::new()
    }

    fn from_parameters(parameters: &[u8]) -> Result<Self> {
        expect_len(parameters, 0)?;
        Ok(InquiryCancel)
    }
}

/// Start a BR/EDR inquiry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Inquiry {
    lap: [u8; 3],
    inquiry_length: u8,
    num_responses: u8,
}

impl Inquiry {
    /// General inquiry access code.
    pub const GIAC: [u8; 3] = [0x33, 0x8B, 0x9E];
    /// Limited inquiry access code.
    pub const LIAC: [u8; 3] = [0x00, 0x8B, 0x9E];

    /// `inquiry_length` is in units of 1.28 s and must be 0x01..=0x30.
    /// A `num_responses` of zero means unlimited.
    pub fn new(lap: [u8; 3], inquiry_length: u8, num_responses: u8) -> Result<Self> {
        if !(0x01..=0x30).contains(&inquiry_length) {
            return Err(Error::InvalidParameter {
                field: "inquiry_length",
                value: inquiry_length.into(),
            });
        }
        Ok(Self {
            lap,
            inquiry_length,
            num_responses,
        })
    }

    pub fn lap(&self) -> [u8; 3] {
        self.lap
    }

    pub fn inquiry_length(&self) -> u8 {
        self.inquiry_length
    }

    pub fn num_responses(&self) -> u8 {
        self.num_responses
    }
}

impl Default for Inquiry {
    fn default() -> Self {
        Self {
            lap: Self::GIAC,
            inquiry_length: 0x30,
            num_responses: 0,
        }
    }
}

impl Command for Inquiry {
    const OPCODE: Opcode = Opcode::INQUIRY;

    fn parameters(&self) -> Parameters {
        fixed([
            self.lap[0],
            self.lap[1],
            self.lap[2],
            self.inquiry_length,
            self.num_responses,
        ])
    }

    fn from_parameters(parameters: &[u8]) -> Result<Self> {
        expect_len(parameters, 5)?;
        Inquiry::new(
            [parameters[0], parameters[1], parameters[2]],
            parameters[3],
            parameters[4],
        )
    }
}

/// Terminate a connection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Disconnect {
    pub handle: Handle,
    pub reason: u8,
}

impl Disconnect {
    /// Remote User Terminated Connection.
    pub const REMOTE_USER_TERMINATED: u8 = 0x13;

    pub fn new(handle: Handle, reason: u8) -> Self {
        Self { handle, reason }
    }
}

impl Command for Disconnect {
    const OPCODE: Opcode = Opcode::DISCONNECT;

    fn parameters(&self) -> Parameters {
        let [lo, hi] = self.handle.raw().to_le_bytes();
        fixed([lo, hi, self.reason])
    }

    fn from_parameters(parameters: &[u8]) -> Result<Self> {
        expect_len(parameters, 3)?;
        Ok(Disconnect {
            handle: handle_at(parameters, 0)?,
            reason: parameters[2],
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReadRssi {
    pub handle: Handle,
}

impl ReadRssi {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }
}

impl Command for ReadRssi {
    const OPCODE: Opcode = Opcode::READ_RSSI;

    fn parameters(&self) -> Parameters {
        fixed(self.handle.raw().to_le_bytes())
    }

    fn from_parameters(parameters: &[u8]) -> Result<Self> {
        expect_len(parameters, 2)?;
        Ok(ReadRssi {
            handle: handle_at(parameters, 0)?,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LeSetRandomAddress {
    pub address: BdAddr,
}

impl Command for LeSetRandomAddress {
    const OPCODE: Opcode = Opcode::LE_SET_RANDOM_ADDRESS;

    fn parameters(&self) -> Parameters {
        fixed(*self.address.as_bytes())
    }

    fn from_parameters(parameters: &[u8]) -> Result<Self> {
        expect_len(parameters, 6)?;
        Ok(LeSetRandomAddress {
            address: BdAddr::from_slice(parameters)?,
        })
    }
}

/// A decoded command.
///
/// Two commands are equal when they encode to the same frame, so a typed
/// command matches the generic form of its own bytes.
#[derive(Debug, Clone)]
pub enum HciCommand {
    Reset(Reset),
    ReadBdAddr(ReadBdAddr),
    Inquiry(Inquiry),
    InquiryCancel(InquiryCancel),
    Disconnect(Disconnect),
    ReadRssi(ReadRssi),
    LeSetRandomAddress(LeSetRandomAddress),
    Generic(CommandPacket),
}

impl HciCommand {
    pub fn opcode(&self) -> Opcode {
        match self {
            HciCommand::Reset(_) => Reset::OPCODE,
            HciCommand::ReadBdAddr(_) => ReadBdAddr::OPCODE,
            HciCommand::Inquiry(_) => Inquiry::OPCODE,
            HciCommand::InquiryCancel(_) => InquiryCancel::OPCODE,
            HciCommand::Disconnect(_) => Disconnect::OPCODE,
            HciCommand::ReadRssi(_) => ReadRssi::OPCODE,
            HciCommand::LeSetRandomAddress(_) => LeSetRandomAddress::OPCODE,
            HciCommand::Generic(packet) => packet.opcode(),
        }
    }

    /// The frame this command encodes to.
    pub fn to_packet(&self) -> CommandPacket {
        match self {
            HciCommand::Reset(c) => c.into(),
            HciCommand::ReadBdAddr(c) => c.into(),
            HciCommand::Inquiry(c) => c.into(),
            HciCommand::InquiryCancel(c) => c.into(),
            HciCommand::Disconnect(c) => c.into(),
            HciCommand::ReadRssi(c) => c.into(),
            HciCommand::LeSetRandomAddress(c) => c.into(),
            HciCommand::Generic(packet) => packet.clone(),
        }
    }
}

impl PartialEq for HciCommand {
    fn eq(&self, other: &Self) -> bool {
        self.to_packet() == other.to_packet()
    }
}

impl Eq for HciCommand {}

macro_rules! impl_from_command {
    ($($command:ident),* $(,)?) => {
        $(
            impl From<$command> for HciCommand {
                fn from(command: $command) -> Self {
                    HciCommand::$command(command)
                }
            }
        )*
    };
}

impl_from_command!(
    Reset,
    ReadBdAddr,
    Inquiry,
    InquiryCancel,
    Disconnect,
    ReadRssi,
    LeSetRandomAddress,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::HciPacket;

    #[test]
    fn test_reset_frame() {
        let packet = HciCommand::from(Reset).to_packet();
        assert_eq!(packet.encode(), vec![0x01, 0x03, 0x0C, 0x00]);
    }

    #[test]
    fn test_inquiry_parameters() {
        let inquiry = Inquiry::new(Inquiry::GIAC, 0x08, 0x05).unwrap();
        let packet = CommandPacket::from(&inquiry);
        assert_eq!(packet.opcode(), Opcode::INQUIRY);
        assert_eq!(packet.parameters(), &[0x33, 0x8B, 0x9E, 0x08, 0x05]);
        assert_eq!(packet.to_command::<Inquiry>(), Some(Ok(inquiry)));
        assert_eq!(packet.to_command::<Reset>(), None);
    }

    #[test]
    fn test_inquiry_length_range() {
        assert_eq!(
            Inquiry::new(Inquiry::LIAC, 0x00, 0),
            Err(Error::InvalidParameter {
                field: "inquiry_length",
                value: 0
            })
        );
        assert!(Inquiry::new(Inquiry::LIAC, 0x31, 0).is_err());
        assert!(Inquiry::from_parameters(&[0x33, 0x8B, 0x9E, 0x31, 0x00]).is_err());
    }

    #[test]
    fn test_disconnect_roundtrip() {
        let disconnect = Disconnect::new(Handle::new(0x0040).unwrap(), Disconnect::REMOTE_USER_TERMINATED);
        let packet = CommandPacket::from(&disconnect);
        assert_eq!(packet.encode(), vec![0x01, 0x06, 0x04, 0x03, 0x40, 0x00, 0x13]);
        assert_eq!(Disconnect::from_parameters(packet.parameters()), Ok(disconnect));
    }

    #[test]
    fn test_read_rssi_rejects_bad_handle() {
        assert_eq!(
            ReadRssi::from_parameters(&[0x00, 0x0F]),
            Err(Error::InvalidHandle(0x0F00))
        );
        assert_eq!(
            ReadRssi::from_parameters(&[0x01]),
            Err(Error::LengthMismatch { declared: 2, available: 1 })
        );
    }

    #[test]
    fn test_le_set_random_address_wire_order() {
        let address: BdAddr = "C0:11:22:33:44:55".parse().unwrap();
        let command = LeSetRandomAddress { address };
        assert_eq!(
            command.parameters().as_slice(),
            &[0x55, 0x44, 0x33, 0x22, 0x11, 0xC0]
        );
    }

    #[test]
    fn test_fixed_parameters_at_limit() {
        let parameters = fixed([0xAB; MAX_PARAMETERS_LEN]);
        assert_eq!(parameters.len(), MAX_PARAMETERS_LEN);
        assert!(parameters.iter().all(|&b| b == 0xAB));
        assert_eq!(fixed([]).len(), 0);
    }

    #[test]
    fn test_typed_equals_generic_frame() {
        let generic = HciCommand::Generic(CommandPacket::new(Opcode::RESET, &[]).unwrap());
        assert_eq!(generic, HciCommand::Reset(Reset));

        let extra = HciCommand::Generic(CommandPacket::new(Opcode::RESET, &[0xAA]).unwrap());
        assert_ne!(extra, HciCommand::Reset(Reset));
    }

    #[test]
    fn test_generic_opcode() {
        let packet = CommandPacket::from_fields(0x3F, 0x0001, &[0xAA]).unwrap();
        let command = HciCommand::Generic(packet.clone());
        assert_eq!(command.opcode(), Opcode(0xFC01));
        assert_eq!(command.to_packet(), packet);
    }
}
