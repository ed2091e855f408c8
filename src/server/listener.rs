// Listener module
// Creates the TCP listening socket

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Pending connection queue length
const LISTEN_BACKLOG: i32 = 128;

/// Create a `TcpListener` bound to `addr`.
///
/// `SO_REUSEPORT` is not set, so binding a port another server listens on
/// fails. `SO_REUSEADDR` is set on Unix only, where it allows rebinding while
/// old connections sit in `TIME_WAIT`.
///
/// Must be called from within a Tokio runtime.
pub fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    #[cfg(unix)]
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;

    // Convert socket2::Socket to std::net::TcpListener, then to tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
