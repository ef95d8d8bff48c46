//! Vendor-specific commands (OGF 0x3F).

use crate::address::{AddressType, BdAddr};
use crate::error::Result;
use crate::hci::command::CommandPacket;
use crate::hci::opcode::{Ogf, Opcode};

pub fn opcode(ocf: u16) -> Opcode {
    Opcode::new(Ogf::VendorSpecific, ocf)
}

/// A vendor command with an arbitrary parameter block.
pub fn command(ocf: u16, parameters: &[u8]) -> Result<CommandPacket> {
    CommandPacket::new(opcode(ocf), parameters)
}

/// A vendor command whose parameters are an address type tag followed by
/// the address. Without an explicit type the tag is guessed from the
/// address text.
pub fn address_command(ocf: u16, address: &BdAddr, address_type: Option<AddressType>) -> Result<CommandPacket> {
    let tagged = match address_type {
        Some(address_type) => address.tagged(address_type),
        None => address.tagged_guess(),
    };
    command(ocf, &tagged)
}
