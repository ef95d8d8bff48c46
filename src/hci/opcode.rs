use core::fmt;

/// Split a 16-bit opcode into its 6-bit OGF and 10-bit OCF.
pub const fn split(opcode: u16) -> (u8, u16) {
    (((opcode >> 10) & 0x3F) as u8, opcode & 0x03FF)
}

/// Pack an OGF and OCF into an opcode.
///
/// Out-of-range inputs are masked to their field widths, matching what
/// the wire can carry.
pub const fn combine(ogf: u8, ocf: u16) -> u16 {
    (((ogf as u16) & 0x3F) << 10) | (ocf & 0x03FF)
}

/// Opcode group field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ogf {
    LinkControl = 0x01,
    LinkPolicy = 0x02,
    HciControlAndBaseband = 0x03,
    InformationalParameters = 0x04,
    StatusParameters = 0x05,
    Testing = 0x06,
    LeController = 0x08,
    VendorSpecific = 0x3F,
}

impl TryFrom<u8> for Ogf {
    type Error = u8;

    fn try_from(ogf: u8) -> Result<Self, Self::Error> {
        match ogf {
            0x01 => Ok(Ogf::LinkControl),
            0x02 => Ok(Ogf::LinkPolicy),
            0x03 => Ok(Ogf::HciControlAndBaseband),
            0x04 => Ok(Ogf::InformationalParameters),
            0x05 => Ok(Ogf::StatusParameters),
            0x06 => Ok(Ogf::Testing),
            0x08 => Ok(Ogf::LeController),
            0x3F => Ok(Ogf::VendorSpecific),
            other => Err(other),
        }
    }
}

/// A command opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Opcode(pub u16);

impl Opcode {
    pub const RESET: Opcode = Opcode::new(Ogf::HciControlAndBaseband, 0x0003);
    pub const INQUIRY: Opcode = Opcode::new(Ogf::LinkControl, 0x0001);
    pub const INQUIRY_CANCEL: Opcode = Opcode::new(Ogf::LinkControl, 0x0002);
    pub const DISCONNECT: Opcode = Opcode::new(Ogf::LinkControl, 0x0006);
    pub const READ_BD_ADDR: Opcode = Opcode::new(Ogf::InformationalParameters, 0x0009);
    pub const READ_RSSI: Opcode = Opcode::new(Ogf::StatusParameters, 0x0005);
    pub const LE_SET_RANDOM_ADDRESS: Opcode = Opcode::new(Ogf::LeController, 0x0005);

    pub const fn new(ogf: Ogf, ocf: u16) -> Self {
        Opcode(combine(ogf as u8, ocf))
    }

    pub const fn from_fields(ogf: u8, ocf: u16) -> Self {
        Opcode(combine(ogf, ocf))
    }

    pub const fn ogf(&self) -> u8 {
        split(self.0).0
    }

    pub const fn ocf(&self) -> u16 {
        split(self.0).1
    }

    /// The command group, if it is one the core specification defines.
    pub fn group(&self) -> Option<Ogf> {
        Ogf::try_from(self.ogf()).ok()
    }

    pub fn is_vendor_specific(&self) -> bool {
        self.ogf() == Ogf::VendorSpecific as u8
    }

    /// Specification name for the opcodes this crate knows about.
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Opcode::RESET => "Reset",
            Opcode::INQUIRY => "Inquiry",
            Opcode::INQUIRY_CANCEL => "Inquiry_Cancel",
            Opcode::DISCONNECT => "Disconnect",
            Opcode::READ_BD_ADDR => "Read_BD_ADDR",
            Opcode::READ_RSSI => "Read_RSSI",
            Opcode::LE_SET_RANDOM_ADDRESS => "LE_Set_Random_Address",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u16> for Opcode {
    fn from(opcode: u16) -> Self {
        Opcode(opcode)
    }
}

impl From<Opcode> for u16 {
    fn from(opcode: Opcode) -> Self {
        opcode.0
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X} (OGF {:#04X}, OCF {:#05X})", self.0, self.ogf(), self.ocf())?;
        if let Some(name) = self.name() {
            write!(f, " {}", name)?;
        }
        Ok(())
    }
}
