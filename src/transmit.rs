// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use crate::{
    PauseError, PauseFrame, PauseFrameRequest, PauseSocket, RawPacketSocket,
};

/// Send the same frame `repeat_num` times, confirming each send on `out`.
/// The first failure aborts the remaining sends.
pub fn transmit<S, W>(
    socket: &S,
    frame: &PauseFrame,
    repeat_num: u64,
    out: &mut W,
) -> Result<u64, PauseError>
where
    S: PauseSocket,
    W: Write,
{
    let buffer = frame.emit();
    for i in 1..=repeat_num {
        log::trace!("Sending PAUSE frame {i}/{repeat_num}: {buffer:?}");
        socket.send(&buffer)?;
        writeln!(out, "Sent 802.3x PAUSE packet {i} times.")?;
    }
    Ok(repeat_num)
}

/// Build the frame described by `request` and send it out of the requested
/// interface. Nothing is sent if the interface cannot be opened.
pub fn send_pause_frames<W: Write>(
    request: &PauseFrameRequest,
    out: &mut W,
) -> Result<u64, PauseError> {
    let frame = PauseFrame::from(request);
    let socket = RawPacketSocket::open(request.iface_name())?;
    transmit(&socket, &frame, request.repeat_num(), out)
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use super::*;
    use crate::{ErrorKind, MacAddress, PauseOptions};

    #[derive(Default)]
    struct RecordSocket {
        sent: RefCell<Vec<Vec<u8>>>,
        fail_at: Option<usize>,
    }

    impl PauseSocket for RecordSocket {
        fn send(&self, frame: &[u8]) -> Result<(), PauseError> {
            let mut sent = self.sent.borrow_mut();
            if self.fail_at == Some(sent.len()) {
                return Err(PauseError::from(nix::errno::Errno::ENETDOWN));
            }
            sent.push(frame.to_vec());
            Ok(())
        }
    }

    fn eth0_request(
        mac: &str,
        pause_time: i64,
        repeat_num: i64,
    ) -> Result<PauseFrameRequest, PauseError> {
        PauseFrameRequest::from_options(
            &PauseOptions {
                interface: Some("eth0".to_string()),
                src_mac: Some(mac.to_string()),
                pause_time,
                repeat_num,
            },
            &mut std::io::sink(),
        )
    }

    #[test]
    fn transmit_repeats_identical_frames() -> Result<(), PauseError> {
        let socket = RecordSocket::default();
        let frame = PauseFrame::new(MacAddress::new([1, 2, 3, 4, 5, 6]), 7);
        let mut out = Vec::new();

        assert_eq!(transmit(&socket, &frame, 5, &mut out)?, 5);

        let sent = socket.sent.borrow();
        assert_eq!(sent.len(), 5);
        assert!(sent.iter().all(|f| f.as_slice() == frame.emit().as_slice()));
        assert_eq!(
            String::from_utf8_lossy(&out),
            (1..=5)
                .map(|i| format!("Sent 802.3x PAUSE packet {i} times.\n"))
                .collect::<String>()
        );
        Ok(())
    }

    #[test]
    fn transmit_aborts_on_send_failure() {
        let socket = RecordSocket {
            fail_at: Some(2),
            ..Default::default()
        };
        let frame = PauseFrame::new(MacAddress::new([1, 2, 3, 4, 5, 6]), 7);
        let mut out = Vec::new();

        let e = transmit(&socket, &frame, 10, &mut out).unwrap_err();

        assert_eq!(e.kind(), ErrorKind::Socket);
        assert_eq!(socket.sent.borrow().len(), 2);
        assert_eq!(String::from_utf8_lossy(&out).lines().count(), 2);
    }

    #[test]
    fn transmit_end_to_end_frame() -> Result<(), PauseError> {
        let request = eth0_request("AA-BB-CC-DD-EE-FF", 500, 2)?;
        let socket = RecordSocket::default();

        transmit(
            &socket,
            &PauseFrame::from(&request),
            request.repeat_num(),
            &mut std::io::sink(),
        )?;

        let mut expected = vec![
            0x01, 0x80, 0xc2, 0x00, 0x00, 0x01, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
            0xff, 0x88, 0x08, 0x00, 0x01, 0x01, 0xf4,
        ];
        expected.resize(60, 0);
        assert_eq!(*socket.sent.borrow(), vec![expected.clone(), expected]);
        Ok(())
    }

    #[test]
    fn separator_style_does_not_change_frame() -> Result<(), PauseError> {
        let frames = [
            "AA-BB-CC-DD-EE-FF",
            "aa:bb:cc:dd:ee:ff",
            "aabbccddeeff",
            "AaBb-CcDd:EeFf",
        ]
        .iter()
        .map(|mac| Ok(PauseFrame::from(&eth0_request(mac, 1, 1)?).emit()))
        .collect::<Result<Vec<_>, PauseError>>()?;

        assert!(frames.windows(2).all(|w| w[0] == w[1]));
        Ok(())
    }

    #[test]
    fn zero_pause_time_sent_as_max() -> Result<(), PauseError> {
        let request = eth0_request("01:02:03:04:05:06", 0, 1)?;
        let buffer = PauseFrame::from(&request).emit();
        assert_eq!(&buffer[16..18], &[0xff, 0xff]);
        Ok(())
    }

    #[test]
    fn send_on_unknown_iface_sends_nothing() -> Result<(), PauseError> {
        let request = PauseFrameRequest::from_options(
            &PauseOptions {
                interface: Some("xpause-nonexist".to_string()),
                repeat_num: 3,
                ..Default::default()
            },
            &mut std::io::sink(),
        )?;
        let mut out = Vec::new();

        let e = send_pause_frames(&request, &mut out).unwrap_err();

        assert_eq!(e.kind(), ErrorKind::Socket);
        assert!(out.is_empty());
        Ok(())
    }
}
