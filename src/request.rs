// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use crate::{ErrorKind, MacAddress, PauseError, PauseOptions};

pub const DEFAULT_SRC_MAC: MacAddress =
    MacAddress::new([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
pub const DEFAULT_PAUSE_TIME: u16 = u16::MAX;
pub const DEFAULT_REPEAT_NUM: u64 = 1;

/// Validated input of one run: where to send, what to put into the frame
/// and how many times.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PauseFrameRequest {
    iface_name: String,
    src_mac: MacAddress,
    pause_time: u16,
    repeat_num: u64,
}

impl PauseFrameRequest {
    pub fn iface_name(&self) -> &str {
        self.iface_name.as_str()
    }

    pub fn src_mac(&self) -> MacAddress {
        self.src_mac
    }

    pub fn pause_time(&self) -> u16 {
        self.pause_time
    }

    pub fn repeat_num(&self) -> u64 {
        self.repeat_num
    }

    /// Check the options in order (interface, source MAC, pause time,
    /// repeat number) and stop at the first violation. Accepted pause time
    /// and repeat number are confirmed on `out`.
    pub fn from_options<W: Write>(
        options: &PauseOptions,
        out: &mut W,
    ) -> Result<Self, PauseError> {
        let iface_name = match options.interface.as_deref() {
            Some(i) if !i.is_empty() => i.to_string(),
            _ => {
                return Err(PauseError::new(
                    ErrorKind::MissingInterface,
                    "Egress Interface must be specified.".to_string(),
                ));
            }
        };

        let src_mac = match options.src_mac.as_deref() {
            Some(mac) if !mac.is_empty() => MacAddress::parse(mac)?,
            _ => DEFAULT_SRC_MAC,
        };
        log::debug!("Source MAC set to {src_mac}");

        let pause_time = validate_pause_time(options.pause_time, out)?;
        let repeat_num = validate_repeat_num(options.repeat_num, out)?;

        Ok(Self {
            iface_name,
            src_mac,
            pause_time,
            repeat_num,
        })
    }
}

fn validate_pause_time<W: Write>(
    pause_time: i64,
    out: &mut W,
) -> Result<u16, PauseError> {
    if !(0..=i64::from(u16::MAX)).contains(&pause_time) {
        return Err(PauseError::new(
            ErrorKind::InvalidPauseTime,
            format!("Pause Time must be between 0 and {}.", u16::MAX),
        ));
    }
    // A zero request falls back to the maximum instead of cancelling a
    // pause on the link partner.
    Ok(match u16::try_from(pause_time) {
        Ok(0) => {
            writeln!(out, "Pause Time is set to 0, which means no pause.\n")?;
            DEFAULT_PAUSE_TIME
        }
        Ok(t) => {
            writeln!(out, "Pause Time set to {t}.")?;
            t
        }
        Err(_) => {
            writeln!(
                out,
                "Pause Time exceeds maximum value of {}. Setting to {}.\n",
                u16::MAX,
                DEFAULT_PAUSE_TIME
            )?;
            DEFAULT_PAUSE_TIME
        }
    })
}

fn validate_repeat_num<W: Write>(
    repeat_num: i64,
    out: &mut W,
) -> Result<u64, PauseError> {
    match u64::try_from(repeat_num) {
        Ok(r) if r >= 1 => {
            writeln!(out, "Repeat Number set to {r}.")?;
            Ok(r)
        }
        _ => Err(PauseError::new(
            ErrorKind::InvalidRepeatCount,
            "Repeat Number must be at least 1.".to_string(),
        )),
    }
}
