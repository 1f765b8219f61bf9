//! Simple DNS proxy: forwards one request/reply pair through an upstream
//! server and prints the parsed structure. Mirrors `udp_proxy.py` from the
//! package this codec's wire format was distilled from.
//!
//! Usage: dnswire-proxy [bind_addr:port] [upstream_addr:port]
//!
//!     dnswire-proxy
//!     dig @127.0.0.1 www.google.com -p 8053
//!
//! Transport and process lifecycle are a demonstration, not a product
//! surface: no retry, no timeout policy, no concurrent-client handling.

use std::net::UdpSocket;

use anyhow::{Context, Result};
use dnswire::Message;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let bind_addr = args.next().unwrap_or_else(|| "127.0.0.1:8053".to_owned());
    let upstream = args.next().unwrap_or_else(|| "8.8.8.8:53".to_owned());

    let proxy = UdpSocket::bind(&bind_addr)
        .with_context(|| format!("binding proxy socket on {bind_addr}"))?;
    println!("listening on {bind_addr}, forwarding to {upstream}");

    let mut buf = [0u8; 8192];
    loop {
        if let Err(err) = serve_one(&proxy, &upstream, &mut buf) {
            eprintln!("request failed: {err:#}");
        }
    }
}

fn serve_one(proxy: &UdpSocket, upstream: &str, buf: &mut [u8]) -> Result<()> {
    let (len, client) = proxy.recv_from(buf).context("waiting for client request")?;
    let request = Message::parse(buf[..len].to_vec()).context("parsing client request")?;
    let qname = request
        .questions
        .first()
        .map(|q| q.qname.to_string())
        .unwrap_or_else(|| "?".to_owned());
    println!("------ request ({client}): {qname} id={}", request.header.id);

    let upstream_sock = UdpSocket::bind("0.0.0.0:0").context("binding upstream socket")?;
    upstream_sock
        .send_to(&buf[..len], upstream)
        .with_context(|| format!("forwarding to {upstream}"))?;

    let (reply_len, server) = upstream_sock
        .recv_from(buf)
        .context("waiting for upstream reply")?;
    let reply = Message::parse(buf[..reply_len].to_vec()).context("parsing upstream reply")?;
    println!(
        "------ reply ({server}): {} answers, rcode={}",
        reply.answers.len(),
        reply.header.rcode()
    );

    proxy
        .send_to(&buf[..reply_len], client)
        .context("forwarding reply to client")?;
    Ok(())
}
