// SPDX-License-Identifier: Apache-2.0

mod cli;
mod error;
mod frame;
mod mac;
mod request;
mod socket;
mod transmit;

pub use crate::cli::{
    build_command, PauseOptions, APP_NAME, ARG_INTERFACE, ARG_PAUSETIME,
    ARG_REPEATNUM, ARG_SOURCEMAC, ARG_VERBOSE,
};
pub use crate::error::{ErrorKind, PauseError};
pub use crate::frame::{
    PauseFrame, ETHER_TYPE_MAC_CONTROL, OPCODE_PAUSE, PAUSE_DST_MAC,
    PAUSE_FRAME_LEN,
};
pub use crate::mac::{MacAddress, ETH_ALEN};
pub use crate::request::{
    PauseFrameRequest, DEFAULT_PAUSE_TIME, DEFAULT_REPEAT_NUM, DEFAULT_SRC_MAC,
};
pub use crate::socket::{PauseSocket, RawPacketSocket};
pub use crate::transmit::{send_pause_frames, transmit};
