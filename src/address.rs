//! Bluetooth device addresses.
//!
//! A BD_ADDR travels over HCI least-significant byte first, but is written
//! most-significant byte first: the bytes `01 02 03 04 05 06` display as
//! `06:05:04:03:02:01`. [`BdAddr`] stores the wire order.

use core::fmt;
use core::str::FromStr;

use rand::Rng;

use crate::error::{Error, Result};

/// Largest value that fits in 48 bits.
pub const MAX_ADDRESS: u64 = 0xFFFF_FFFF_FFFF;

/// Address type tag used in LE own/peer address parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum AddressType {
    Public = 0x00,
    Random = 0x01,
    PublicIdentity = 0x02,
    RandomIdentity = 0x03,
}

impl AddressType {
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AddressType {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0x00 => Ok(AddressType::Public),
            0x01 => Ok(AddressType::Random),
            0x02 => Ok(AddressType::PublicIdentity),
            0x03 => Ok(AddressType::RandomIdentity),
            other => Err(Error::InvalidParameter {
                field: "address_type",
                value: other.into(),
            }),
        }
    }
}

/// Sub-type of a random device address, carried in its two most
/// significant bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RandomAddressKind {
    NonResolvable,
    Resolvable,
    Reserved,
    Static,
}

/// A 48-bit Bluetooth device address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct BdAddr([u8; 6]);

impl BdAddr {
    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        BdAddr(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes = <[u8; 6]>::try_from(bytes)
            .map_err(|_| Error::InvalidAddress("expected 6 bytes"))?;
        Ok(BdAddr(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    pub fn to_u64(&self) -> u64 {
        let [b0, b1, b2, b3, b4, b5] = self.0;
        u64::from_le_bytes([b0, b1, b2, b3, b4, b5, 0, 0])
    }

    pub fn try_from_u64(value: u64) -> Result<Self> {
        if value > MAX_ADDRESS {
            return Err(Error::InvalidAddress("value does not fit in 48 bits"));
        }
        let bytes = value.to_le_bytes();
        Ok(BdAddr([bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]]))
    }

    pub fn msb(&self) -> u8 {
        self.0[5]
    }

    /// Random address sub-type, read from the top two bits.
    ///
    /// Only meaningful when the address is known to be random; whether an
    /// address is public or random travels separately as [`AddressType`].
    pub fn random_kind(&self) -> RandomAddressKind {
        match self.msb() >> 6 {
            0b00 => RandomAddressKind::NonResolvable,
            0b01 => RandomAddressKind::Resolvable,
            0b10 => RandomAddressKind::Reserved,
            _ => RandomAddressKind::Static,
        }
    }

    pub fn is_static(&self) -> bool {
        self.random_kind() == RandomAddressKind::Static
    }

    /// Guess the address type from the textual form.
    ///
    /// An address whose first two hex digits contain a `0` is taken to be
    /// random, anything else public. This does not follow the address
    /// bits; use [`BdAddr::random_kind`] when the type is already known.
    pub fn guess_address_type(&self) -> AddressType {
        let msb = self.msb();
        if msb >> 4 == 0 || msb & 0x0F == 0 {
            AddressType::Random
        } else {
            AddressType::Public
        }
    }

    /// Address type tag followed by the wire-order address bytes.
    pub fn tagged(&self, address_type: AddressType) -> [u8; 7] {
        let mut out = [0u8; 7];
        out[0] = address_type.tag();
        out[1..].copy_from_slice(&self.0);
        out
    }

    /// Tag with the type chosen by [`BdAddr::guess_address_type`].
    pub fn tagged_guess(&self) -> [u8; 7] {
        self.tagged(self.guess_address_type())
    }

    /// Generate a static random address.
    pub fn random_static<R: Rng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 6];
        rng.fill(&mut bytes[..]);
        bytes[5] |= 0b1100_0000;
        BdAddr(bytes)
    }
}

impl From<[u8; 6]> for BdAddr {
    fn from(bytes: [u8; 6]) -> Self {
        BdAddr(bytes)
    }
}

impl From<BdAddr> for [u8; 6] {
    fn from(addr: BdAddr) -> Self {
        addr.0
    }
}

impl TryFrom<u64> for BdAddr {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        BdAddr::try_from_u64(value)
    }
}

impl From<BdAddr> for u64 {
    fn from(addr: BdAddr) -> Self {
        addr.to_u64()
    }
}

impl AsRef<[u8]> for BdAddr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[5], b[4], b[3], b[2], b[1], b[0]
        )
    }
}

/// Parses `XX:XX:XX:XX:XX:XX`, most significant octet first. Hex digits
/// may be either case.
impl FromStr for BdAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAddress("expected XX:XX:XX:XX:XX:XX");
        if s.len() != 17 {
            return Err(invalid());
        }
        let mut bytes = [0u8; 6];
        let mut octets = s.split(':');
        for slot in bytes.iter_mut().rev() {
            let octet = octets.next().ok_or_else(invalid)?;
            if octet.len() != 2 || !octet.bytes().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *slot = u8::from_str_radix(octet, 16).map_err(|_| invalid())?;
        }
        if octets.next().is_some() {
            return Err(invalid());
        }
        Ok(BdAddr(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_display_reverses_wire_order() {
        let addr = BdAddr::from_bytes([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(addr.to_string(), "06:05:04:03:02:01");
        assert_eq!("06:05:04:03:02:01".parse::<BdAddr>(), Ok(addr));
    }

    #[test]
    fn test_parse_lowercase() {
        let addr: BdAddr = "aa:bb:cc:dd:ee:ff".parse().unwrap();
        assert_eq!(addr.as_bytes(), &[0xFF, 0xEE, 0xDD, 0xCC, 0xBB, 0xAA]);
        assert_eq!(addr.to_string(), "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "06:05:04:03:02",
            "06:05:04:03:02:0G",
            "06-05-04-03-02-01",
            "0605:04:03:02:01:",
            "+6:05:04:03:02:01",
            "06:05:04:03:02:01:00",
        ] {
            assert!(bad.parse::<BdAddr>().is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_integer_form() {
        let addr: BdAddr = "06:05:04:03:02:01".parse().unwrap();
        assert_eq!(addr.to_u64(), 0x0605_0403_0201);
        assert_eq!(BdAddr::try_from_u64(0x0605_0403_0201), Ok(addr));
        assert_eq!(BdAddr::try_from(MAX_ADDRESS).map(|a| a.to_string()), Ok("FF:FF:FF:FF:FF:FF".to_string()));
        assert!(BdAddr::try_from_u64(MAX_ADDRESS + 1).is_err());
    }

    #[test]
    fn test_from_slice() {
        assert!(BdAddr::from_slice(&[1, 2, 3, 4, 5, 6]).is_ok());
        assert_eq!(
            BdAddr::from_slice(&[1, 2, 3]),
            Err(Error::InvalidAddress("expected 6 bytes"))
        );
    }

    #[test]
    fn test_random_kind() {
        let kind = |s: &str| s.parse::<BdAddr>().unwrap().random_kind();
        assert_eq!(kind("C0:00:00:00:00:01"), RandomAddressKind::Static);
        assert_eq!(kind("4A:00:00:00:00:01"), RandomAddressKind::Resolvable);
        assert_eq!(kind("3F:00:00:00:00:01"), RandomAddressKind::NonResolvable);
        assert_eq!(kind("80:00:00:00:00:01"), RandomAddressKind::Reserved);
    }

    #[test]
    fn test_guess_address_type() {
        let guess = |s: &str| s.parse::<BdAddr>().unwrap().guess_address_type();
        assert_eq!(guess("11:22:33:44:55:66"), AddressType::Public);
        assert_eq!(guess("01:22:33:44:55:66"), AddressType::Random);
        assert_eq!(guess("10:22:33:44:55:66"), AddressType::Random);
        assert_eq!(guess("C3:22:33:44:55:66"), AddressType::Public);
    }

    #[test]
    fn test_tagged() {
        let addr = BdAddr::from_bytes([0x01, 0x02, 0x03, 0x04, 0x05, 0x16]);
        assert_eq!(addr.tagged(AddressType::Random), [0x01, 0x01, 0x02, 0x03, 0x04, 0x05, 0x16]);
        assert_eq!(addr.tagged_guess()[0], AddressType::Public.tag());
    }

    #[test]
    fn test_random_static() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let addr = BdAddr::random_static(&mut rng);
            assert!(addr.is_static());
        }
    }

    #[test]
    fn test_address_type_tags() {
        assert_eq!(AddressType::try_from(0x03u8), Ok(AddressType::RandomIdentity));
        assert!(AddressType::try_from(0x04u8).is_err());
    }
}
