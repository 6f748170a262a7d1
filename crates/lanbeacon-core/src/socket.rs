//! UDP socket construction.
//!
//! Uses SO_REUSEADDR (and SO_REUSEPORT on unix) so that several discoverers
//! may share the multicast port on one machine.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};

/// Create a reusable, non-blocking UDP socket bound to `0.0.0.0:port`.
pub fn bind_reusable(port: u16) -> Result<UdpSocket, std::io::Error> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

    socket.set_reuse_address(true)?;

    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    let addr: SocketAddr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port).into();
    socket.bind(&addr.into())?;

    socket.set_nonblocking(true)?;

    Ok(socket.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sockets_share_a_port() {
        let first = bind_reusable(0).unwrap();
        let port = first.local_addr().unwrap().port();
        let second = bind_reusable(port).unwrap();
        assert_eq!(second.local_addr().unwrap().port(), port);
    }
}
