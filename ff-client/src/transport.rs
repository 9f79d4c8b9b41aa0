use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

/// Destination for encoded datagrams, one call per datagram.
pub trait DatagramSink {
    fn send(&mut self, datagram: &[u8]) -> io::Result<()>;
}

/// Connectionless UDP sink bound to an ephemeral local port.
#[derive(Debug)]
pub struct UdpSink {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl UdpSink {
    /// Bind a local socket of the same address family as `destination`.
    pub fn bind(destination: SocketAddr) -> io::Result<Self> {
        let local: SocketAddr = match destination {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local)?;
        Ok(Self {
            socket,
            destination,
        })
    }

    #[must_use]
    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl DatagramSink for UdpSink {
    fn send(&mut self, datagram: &[u8]) -> io::Result<()> {
        let sent = self.socket.send_to(datagram, self.destination)?;
        if sent != datagram.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short datagram send: {sent} of {} bytes", datagram.len()),
            ));
        }
        Ok(())
    }
}

/// In-memory capture of every datagram sent.
impl DatagramSink for Vec<Vec<u8>> {
    fn send(&mut self, datagram: &[u8]) -> io::Result<()> {
        self.push(datagram.to_vec());
        Ok(())
    }
}

impl<S: DatagramSink + ?Sized> DatagramSink for &mut S {
    fn send(&mut self, datagram: &[u8]) -> io::Result<()> {
        (**self).send(datagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn udp_sink_delivers_to_destination() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let mut sink = UdpSink::bind(receiver.local_addr().unwrap()).unwrap();
        sink.send(b"datagram").unwrap();

        let mut buf = [0u8; 64];
        let (n, from) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"datagram");
        assert_eq!(from.port(), sink.local_addr().unwrap().port());
    }

    #[test]
    fn vec_sink_captures_in_order() {
        let mut sink: Vec<Vec<u8>> = Vec::new();
        sink.send(b"one").unwrap();
        sink.send(b"two").unwrap();
        assert_eq!(sink, vec![b"one".to_vec(), b"two".to_vec()]);
    }
}
