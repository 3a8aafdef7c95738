// SPDX-License-Identifier: Apache-2.0

use crate::{ErrorKind, PauseError};

pub const ETH_ALEN: usize = libc::ETH_ALEN as usize;

const MAC_HEX_DIGITS: usize = ETH_ALEN * 2;
const MAC_SEPARATORS: [char; 2] = ['-', ':'];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct MacAddress([u8; ETH_ALEN]);

impl MacAddress {
    pub const fn new(octets: [u8; ETH_ALEN]) -> Self {
        Self(octets)
    }

    pub const fn octets(&self) -> [u8; ETH_ALEN] {
        self.0
    }

    /// Parse a MAC address given as 12 hex digits, optionally separated by
    /// `-` or `:` anywhere in the string. Case is ignored.
    pub fn parse(mac: &str) -> Result<Self, PauseError> {
        let digits: String =
            mac.chars().filter(|c| !MAC_SEPARATORS.contains(c)).collect();
        if digits.len() != MAC_HEX_DIGITS
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(PauseError::new(
                ErrorKind::InvalidMac,
                format!(
                    "Incorrect Mac Address pattern: {mac}\n\
                     e.g. -> XX-XX-XX-XX-XX-XX or XX:XX:XX:XX:XX:XX"
                ),
            ));
        }
        let mut octets = [0u8; ETH_ALEN];
        for (octet, pair) in
            octets.iter_mut().zip(digits.as_bytes().chunks_exact(2))
        {
            *octet = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
        }
        Ok(Self(octets))
    }
}

// Caller guarantees `c` is an ASCII hex digit.
fn hex_value(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => c - b'A' + 10,
    }
}

impl std::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const AABB: [u8; ETH_ALEN] = [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];

    #[test]
    fn parse_mac_any_separator_style() -> Result<(), PauseError> {
        for input in [
            "AA-BB-CC-DD-EE-FF",
            "aa:bb:cc:dd:ee:ff",
            "AABBCCDDEEFF",
            "aAbB-cC:dDeE-fF",
        ] {
            assert_eq!(MacAddress::parse(input)?.octets(), AABB, "{input}");
        }
        Ok(())
    }

    #[test]
    fn parse_mac_rejects_bad_input() {
        for input in [
            "",
            "AA-BB-CC-DD-EE",
            "AA-BB-CC-DD-EE-FF-00",
            "GG-BB-CC-DD-EE-FF",
            "AA BB CC DD EE FF",
            "+A-BB-CC-DD-EE-FF",
            "AA.BB.CC.DD.EE.FF",
            "ÄA-BB-CC-DD-EE-F",
        ] {
            let e = MacAddress::parse(input).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::InvalidMac, "{input}");
            assert!(e.msg().contains(input), "{}", e.msg());
        }
    }

    #[test]
    fn display_mac() {
        assert_eq!(
            MacAddress::new([1, 2, 3, 4, 5, 6]).to_string(),
            "01:02:03:04:05:06"
        );
    }
}
