// SPDX-License-Identifier: Apache-2.0

use std::os::fd::{AsRawFd, OwnedFd, RawFd};

use nix::{
    errno::Errno,
    sys::socket::{AddressFamily, MsgFlags, SockFlag, SockType},
};

use crate::{mac::ETH_ALEN, PauseError};

const PACKET_HOST: u8 = 0; // a packet addressed to the local host

/// Anything a finished Ethernet frame can be written to.
pub trait PauseSocket {
    /// Write the whole frame or fail. No retry is attempted.
    fn send(&self, frame: &[u8]) -> Result<(), PauseError>;
}

/// Link layer socket bound to a single interface. The file descriptor is
/// closed when this is dropped.
#[derive(Debug)]
pub struct RawPacketSocket {
    iface_name: String,
    fd: OwnedFd,
}

impl RawPacketSocket {
    pub fn open(iface_name: &str) -> Result<Self, PauseError> {
        let iface_index = get_iface_index(iface_name)?;
        let fd = create_raw_eth_socket()?;
        bind_raw_socket(fd.as_raw_fd(), iface_index)?;

        log::debug!(
            "Raw socket {} bound to {iface_name}(index {iface_index})",
            fd.as_raw_fd()
        );
        Ok(Self {
            iface_name: iface_name.to_string(),
            fd,
        })
    }
}

impl Drop for RawPacketSocket {
    fn drop(&mut self) {
        log::debug!(
            "Closing raw socket {} of {}",
            self.fd.as_raw_fd(),
            self.iface_name
        );
    }
}

impl PauseSocket for RawPacketSocket {
    fn send(&self, frame: &[u8]) -> Result<(), PauseError> {
        let mut sent = 0;
        while sent < frame.len() {
            let rc = nix::sys::socket::send(
                self.fd.as_raw_fd(),
                &frame[sent..],
                MsgFlags::empty(),
            )
            .map_err(|e| {
                log::debug!(
                    "Failed to send to raw socket of {}: {e}",
                    self.iface_name
                );
                PauseError::from(e)
            })?;
            if rc == 0 {
                log::debug!(
                    "Raw socket of {} accepted 0 of {} bytes",
                    self.iface_name,
                    frame.len() - sent
                );
                return Err(PauseError::from(Errno::EIO));
            }
            sent += rc;
        }
        log::trace!("Raw socket sent {sent} bytes");
        Ok(())
    }
}

fn get_iface_index(iface_name: &str) -> Result<libc::c_int, PauseError> {
    let index = nix::net::if_::if_nametoindex(iface_name).map_err(|e| {
        log::debug!("Failed to find interface {iface_name}: {e}");
        PauseError::from(e)
    })?;
    libc::c_int::try_from(index).map_err(|_| PauseError::from(Errno::ENODEV))
}

fn create_raw_eth_socket() -> Result<OwnedFd, PauseError> {
    // Protocol 0: transmit only, the kernel delivers no frames to us.
    nix::sys::socket::socket(
        AddressFamily::Packet,
        SockType::Raw,
        SockFlag::SOCK_CLOEXEC,
        None,
    )
    .map_err(|e| {
        log::debug!("Failed to create raw ethernet socket: {e}");
        PauseError::from(e)
    })
}

fn bind_raw_socket(
    fd: RawFd,
    iface_index: libc::c_int,
) -> Result<(), PauseError> {
    let socket_addr = libc::sockaddr_ll {
        sll_family: libc::AF_PACKET as libc::c_ushort,
        sll_protocol: 0,
        sll_ifindex: iface_index,
        sll_hatype: libc::ARPHRD_ETHER as libc::c_ushort,
        sll_pkttype: PACKET_HOST as libc::c_uchar,
        sll_halen: ETH_ALEN as libc::c_uchar,
        sll_addr: [0; 8],
    };

    let rc = unsafe {
        libc::bind(
            fd,
            (&socket_addr as *const libc::sockaddr_ll).cast::<libc::sockaddr>(),
            std::mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
        )
    };
    if rc != 0 {
        let e = Errno::last();
        log::debug!(
            "Failed to bind raw socket {fd} to interface index \
             {iface_index}: {e}"
        );
        return Err(PauseError::from(e));
    }
    Ok(())
}
