// SPDX-License-Identifier: Apache-2.0

use crate::request::{DEFAULT_PAUSE_TIME, DEFAULT_REPEAT_NUM};

pub const APP_NAME: &str = "xpause";

pub const ARG_INTERFACE: &str = "interface";
pub const ARG_SOURCEMAC: &str = "sourcemac";
pub const ARG_PAUSETIME: &str = "pausetime";
pub const ARG_REPEATNUM: &str = "repeatnum";
pub const ARG_VERBOSE: &str = "verbose";

const DEFAULT_PAUSE_TIME_STR: &str = "65535";
const DEFAULT_REPEAT_NUM_STR: &str = "1";

const AFTER_HELP: &str = "\
MAC-specific control protocols 802.3x PAUSE
Destination MAC | 01-80-C2-00-00-01
Source MAC      | Machine MAC
Ethertype       | 0x8808
OpCode          | 0x0001";

/// Raw command line options before validation.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PauseOptions {
    pub interface: Option<String>,
    pub src_mac: Option<String>,
    pub pause_time: i64,
    pub repeat_num: i64,
}

/// Parse an integer option the way optparse `type="int"` does: `0x` is
/// hex, `0b` binary, any other leading `0` octal, everything else decimal.
/// Values beyond `i64` saturate so range checks still reject them.
pub(crate) fn parse_int(value: &str) -> Result<i64, String> {
    let radix = match value.get(..2) {
        Some(p) if p.eq_ignore_ascii_case("0x") => 16,
        Some(p) if p.eq_ignore_ascii_case("0b") => 2,
        _ if value.starts_with('0') => 8,
        _ => 10,
    };
    if radix == 2 && value.len() == 2 {
        return Ok(0);
    }
    let invalid = || format!("invalid integer value: '{value}'");

    let digits = value.trim();
    let (negative, digits) = match digits.as_bytes().first() {
        Some(b'-') => (true, &digits[1..]),
        Some(b'+') => (false, &digits[1..]),
        _ => (false, digits),
    };
    let prefix = match radix {
        16 => "0x",
        8 => "0o",
        2 => "0b",
        _ => "",
    };
    let digits = match digits.get(..2) {
        Some(p) if !prefix.is_empty() && p.eq_ignore_ascii_case(prefix) => {
            let rest = &digits[2..];
            rest.strip_prefix('_').unwrap_or(rest)
        }
        _ => digits,
    };
    if digits.is_empty()
        || !digits
            .split('_')
            .all(|d| !d.is_empty() && d.chars().all(|c| c.is_digit(radix)))
    {
        return Err(invalid());
    }

    let magnitude = digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0i64, |acc, d| {
            acc.saturating_mul(i64::from(radix))
                .saturating_add(i64::from(d))
        });
    Ok(if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    })
}

impl Default for PauseOptions {
    fn default() -> Self {
        Self {
            interface: None,
            src_mac: None,
            pause_time: i64::from(DEFAULT_PAUSE_TIME),
            repeat_num: DEFAULT_REPEAT_NUM as i64,
        }
    }
}

impl From<&clap::ArgMatches> for PauseOptions {
    fn from(matches: &clap::ArgMatches) -> Self {
        let default = Self::default();
        Self {
            interface: matches.get_one::<String>(ARG_INTERFACE).cloned(),
            src_mac: matches.get_one::<String>(ARG_SOURCEMAC).cloned(),
            pause_time: matches
                .get_one::<i64>(ARG_PAUSETIME)
                .copied()
                .unwrap_or(default.pause_time),
            repeat_num: matches
                .get_one::<i64>(ARG_REPEATNUM)
                .copied()
                .unwrap_or(default.repeat_num),
        }
    }
}

pub fn build_command() -> clap::Command {
    clap::Command::new(APP_NAME)
        .version(clap::crate_version!())
        .about("Send IEEE 802.3x PAUSE frames out of a network interface")
        .after_help(AFTER_HELP)
        .arg(
            clap::Arg::new(ARG_INTERFACE)
                .short('i')
                .long(ARG_INTERFACE)
                .value_name("Interface")
                .help("The Interface to egress packets. (Must)"),
        )
        .arg(
            clap::Arg::new(ARG_SOURCEMAC)
                .short('s')
                .long(ARG_SOURCEMAC)
                .value_name("SourceMac")
                .help(
                    "The Source Mac to egress packets. XX-XX-XX-XX-XX-XX, \
                     default to 01-02-03-04-05-06",
                ),
        )
        .arg(
            clap::Arg::new(ARG_PAUSETIME)
                .short('p')
                .long(ARG_PAUSETIME)
                .value_name("PauseTime")
                .help(
                    "The Pause Time in quanta of 512 bit times, 0 means \
                     the default",
                )
                .value_parser(parse_int)
                .allow_negative_numbers(true)
                .default_value(DEFAULT_PAUSE_TIME_STR),
        )
        .arg(
            clap::Arg::new(ARG_REPEATNUM)
                .short('r')
                .long(ARG_REPEATNUM)
                .value_name("RepeatNumber")
                .help("The Number of times to send packets")
                .value_parser(parse_int)
                .allow_negative_numbers(true)
                .default_value(DEFAULT_REPEAT_NUM_STR),
        )
        .arg(
            clap::Arg::new(ARG_VERBOSE)
                .short('v')
                .long(ARG_VERBOSE)
                .help("Increase log verbosity, repeat for more")
                .action(clap::ArgAction::Count),
        )
}
