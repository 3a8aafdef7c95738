// SPDX-License-Identifier: Apache-2.0

use etherparse::{EtherType, Ethernet2Header};

use crate::{MacAddress, PauseFrameRequest};

/// Reserved multicast address of the MAC control sublayer (IEEE 802.3
/// Annex 31B), never forwarded by bridges.
pub const PAUSE_DST_MAC: MacAddress =
    MacAddress::new([0x01, 0x80, 0xc2, 0x00, 0x00, 0x01]);
pub const ETHER_TYPE_MAC_CONTROL: u16 = 0x8808;
pub const OPCODE_PAUSE: u16 = 0x0001;
/// Minimum Ethernet frame size without the FCS, which the NIC appends.
pub const PAUSE_FRAME_LEN: usize = 60;

const OPCODE_OFFSET: usize = Ethernet2Header::LEN;
const PAUSE_TIME_OFFSET: usize = OPCODE_OFFSET + 2;
const PADDING_OFFSET: usize = PAUSE_TIME_OFFSET + 2;

/// An 802.3x PAUSE frame. The destination, EtherType and opcode are fixed
/// by the protocol; only the source address and the pause quanta vary.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PauseFrame {
    src_mac: MacAddress,
    /// Pause duration in quanta of 512 bit times.
    pause_time: u16,
}

impl PauseFrame {
    pub fn new(src_mac: MacAddress, pause_time: u16) -> Self {
        Self {
            src_mac,
            pause_time,
        }
    }

    pub fn emit(&self) -> [u8; PAUSE_FRAME_LEN] {
        let mut buffer = [0u8; PAUSE_FRAME_LEN];
        let eth_header = Ethernet2Header {
            source: self.src_mac.octets(),
            destination: PAUSE_DST_MAC.octets(),
            ether_type: EtherType(ETHER_TYPE_MAC_CONTROL),
        };
        buffer[..OPCODE_OFFSET].copy_from_slice(&eth_header.to_bytes());
        buffer[OPCODE_OFFSET..PAUSE_TIME_OFFSET]
            .copy_from_slice(&OPCODE_PAUSE.to_be_bytes());
        buffer[PAUSE_TIME_OFFSET..PADDING_OFFSET]
            .copy_from_slice(&self.pause_time.to_be_bytes());
        log::debug!(
            "Built PAUSE frame from {} with pause time {}",
            self.src_mac,
            self.pause_time
        );
        buffer
    }
}

impl From<&PauseFrameRequest> for PauseFrame {
    fn from(request: &PauseFrameRequest) -> Self {
        Self::new(request.src_mac(), request.pause_time())
    }
}
