//! Packs a query, sends it over UDP, and parses the reply. Mirrors
//! `DNSRecord.send()` from the package this codec's wire format was
//! distilled from.
//!
//! Usage: dnswire-send <qname> [qtype] [server:port]
//!
//!     dnswire-send www.google.com A 8.8.8.8:53

use std::convert::TryFrom;
use std::net::UdpSocket;

use anyhow::{Context, Result};
use dnswire::enums::qtype_code;
use dnswire::{Label, Message};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let qname_str = args
        .next()
        .context("usage: dnswire-send <qname> [qtype] [server:port]")?;
    let qtype_str = args.next().unwrap_or_else(|| "A".to_owned());
    let server = args.next().unwrap_or_else(|| "8.8.8.8:53".to_owned());

    let qname = Label::try_from(qname_str.as_str()).context("invalid domain name")?;
    let qtype = qtype_code(&qtype_str)
        .with_context(|| format!("unrecognized query type mnemonic: {qtype_str}"))?;

    let query = Message::query(qname, qtype, 1 /* IN */);
    let packed = query.pack().context("packing query")?;

    let sock = UdpSocket::bind("0.0.0.0:0").context("binding local socket")?;
    sock.send_to(&packed, &server)
        .with_context(|| format!("sending query to {server}"))?;

    let mut buf = [0u8; 8192];
    let (len, _) = sock.recv_from(&mut buf).context("waiting for reply")?;
    let reply = Message::parse(buf[..len].to_vec()).context("parsing reply")?;

    println!("id={} rcode={}", reply.header.id, reply.header.rcode());
    for rr in &reply.answers {
        println!("{} {} {:?}", rr.name, rr.ttl, rr.rdata);
    }
    Ok(())
}
