//! Host address discovery

use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr};
use tokio::net::UdpSocket;
use tracing::debug;

/// Address used when nothing better can be found
pub const FALLBACK_IPV4: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// Public address used only to make the OS pick a route; nothing is sent.
const ROUTE_PROBE: &str = "8.8.8.8:80";

/// IPv4 address of the interface carrying the default route.
pub async fn primary_ipv4() -> Ipv4Addr {
    match probe_route().await {
        Ok(ip) => {
            debug!("Detected local IP: {}", ip);
            ip
        }
        Err(e) => {
            debug!("Route probe failed ({}), falling back to {}", e, FALLBACK_IPV4);
            FALLBACK_IPV4
        }
    }
}

async fn probe_route() -> std::io::Result<Ipv4Addr> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(ROUTE_PROBE).await?;
    match socket.local_addr()?.ip() {
        IpAddr::V4(ip) if !ip.is_unspecified() => Ok(ip),
        other => Err(std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            format!("unusable local address {}", other),
        )),
    }
}

/// Non-loopback IPv4 addresses the host name resolves to, sorted.
pub async fn local_ipv4s() -> Vec<Ipv4Addr> {
    let Some(host) = hostname::get().ok().and_then(|h| h.into_string().ok()) else {
        return Vec::new();
    };

    let addrs = match tokio::net::lookup_host((host.as_str(), 0)).await {
        Ok(addrs) => addrs,
        Err(e) => {
            debug!("Failed to resolve {}: {}", host, e);
            return Vec::new();
        }
    };

    filter_ipv4(addrs.map(|a| a.ip()))
}

fn filter_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Vec<Ipv4Addr> {
    addrs
        .into_iter()
        .filter_map(|ip| match ip {
            IpAddr::V4(v4) if !v4.is_loopback() && !v4.is_unspecified() => Some(v4),
            _ => None,
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
