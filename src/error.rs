// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    InvalidUsage,
    MissingInterface,
    InvalidMac,
    InvalidPauseTime,
    InvalidRepeatCount,
    Socket,
    IoError,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PauseError {
    kind: ErrorKind,
    msg: String,
}

impl PauseError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::fmt::Display for PauseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl std::error::Error for PauseError {}

impl From<std::io::Error> for PauseError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::IoError, format!("IO error: {e}"))
    }
}

impl From<nix::errno::Errno> for PauseError {
    fn from(e: nix::errno::Errno) -> Self {
        Self::new(ErrorKind::Socket, format!("Socket error: {e}"))
    }
}

impl From<clap::Error> for PauseError {
    fn from(e: clap::Error) -> Self {
        Self::new(ErrorKind::InvalidUsage, e.to_string())
    }
}
