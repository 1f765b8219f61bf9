//! The top-level packet: a header plus four ordered record sections.

use std::convert::TryFrom;
use std::net::Ipv4Addr;

use crate::buffer::Buffer;
use crate::enums::Section;
use crate::errors::{Error, Result};
use crate::header::Header;
use crate::label::Label;
use crate::question::Question;
use crate::rdata::{RData, TYPE_AAAA, TYPE_CNAME, TYPE_NS, TYPE_PTR, TYPE_A};
use crate::rr::ResourceRecord;

/// Either a numeric type or its mnemonic, accepted at the `has` boundary.
pub enum TypeSelector {
    Code(u16),
    Name(String),
}

impl From<u16> for TypeSelector {
    fn from(code: u16) -> Self {
        TypeSelector::Code(code)
    }
}

impl From<&str> for TypeSelector {
    fn from(name: &str) -> Self {
        TypeSelector::Name(name.to_owned())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

impl Message {
    pub fn new(header: Header) -> Self {
        Message {
            header,
            questions: Vec::new(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    pub fn add_question(&mut self, q: Question) {
        self.questions.push(q);
    }

    pub fn add_answer(&mut self, rr: ResourceRecord) {
        self.answers.push(rr);
    }

    pub fn add_authority(&mut self, rr: ResourceRecord) {
        self.authority.push(rr);
    }

    pub fn add_additional(&mut self, rr: ResourceRecord) {
        self.additional.push(rr);
    }

    /// Builds a one-question query with a random transaction id and
    /// recursion desired set, the shape `demos/send.rs` packs and sends.
    pub fn query(qname: Label, qtype: u16, qclass: u16) -> Self {
        let mut header = Header::new_random();
        header.set_rd(true);
        let mut msg = Message::new(header);
        msg.add_question(Question::new(qname, qtype, qclass));
        msg
    }

    fn section(&self, s: Section) -> &[ResourceRecord] {
        match s {
            Section::Question => &[],
            Section::Answer => &self.answers,
            Section::Authority => &self.authority,
            Section::Additional => &self.additional,
        }
    }

    /// True iff any record in answer/authority/additional matches `selector`,
    /// given as a numeric type or a case-insensitive mnemonic. An
    /// unrecognized mnemonic is an error rather than "no match" — a typo'd
    /// type name should surface, not silently resolve to `false`.
    pub fn has(&self, selector: impl Into<TypeSelector>) -> Result<bool> {
        let code = match selector.into() {
            TypeSelector::Code(c) => c,
            TypeSelector::Name(n) => crate::enums::qtype_code(&n)?,
        };
        Ok([Section::Answer, Section::Authority, Section::Additional]
            .into_iter()
            .any(|s| self.section(s).iter().any(|rr| rr.rtype() == code)))
    }

    /// Parses a complete packet: header, then the declared count of each
    /// section in order. Fails fast on any underflow or malformed field.
    pub fn parse(bytes: Vec<u8>) -> Result<Self> {
        let mut buf = Buffer::new(bytes);
        let header = Header::parse(&mut buf)?;

        let mut msg = Message::new(header);

        for _ in 0..header.qdcount {
            msg.questions.push(Question::parse(&mut buf)?);
        }
        for _ in 0..header.ancount {
            msg.answers.push(ResourceRecord::parse(&mut buf)?);
        }
        for _ in 0..header.nscount {
            msg.authority.push(ResourceRecord::parse(&mut buf)?);
        }
        for _ in 0..header.arcount {
            msg.additional.push(ResourceRecord::parse(&mut buf)?);
        }

        Ok(msg)
    }

    /// Recomputes header counts from actual section lengths, then writes
    /// header and sections in order. Compression state is a fresh cache
    /// local to this call.
    pub fn pack(&self) -> Result<Vec<u8>> {
        let mut header = self.header;
        header.qdcount = u16::try_from(self.questions.len())
            .map_err(|_| Error::FormatError("too many questions to encode"))?;
        header.ancount = u16::try_from(self.answers.len())
            .map_err(|_| Error::FormatError("too many answers to encode"))?;
        header.nscount = u16::try_from(self.authority.len())
            .map_err(|_| Error::FormatError("too many authority records to encode"))?;
        header.arcount = u16::try_from(self.additional.len())
            .map_err(|_| Error::FormatError("too many additional records to encode"))?;

        let mut buf = Buffer::empty();
        header.encode(&mut buf);
        for q in &self.questions {
            q.encode(&mut buf)?;
        }
        for rr in &self.answers {
            rr.encode(&mut buf)?;
        }
        for rr in &self.authority {
            rr.encode(&mut buf)?;
        }
        for rr in &self.additional {
            rr.encode(&mut buf)?;
        }
        Ok(buf.into_bytes())
    }
}

/// Builds a response skeleton from a query: copies id and bitmap, sets QR=1
/// and the given AA/RA bits, echoes the question, and appends one answer RR
/// whose RDATA is built from `data` using the question's qtype.
///
/// Only qtypes with an obvious string-to-RDATA mapping are supported; a
/// qtype like MX (which needs a preference alongside the name) is a caller
/// responsibility, matching the source this was built from.
pub fn reply(msg: &Message, data: &str, ra: bool, aa: bool) -> Result<Message> {
    let q = msg
        .questions
        .first()
        .ok_or(Error::FormatError("reply() requires a question"))?
        .clone();

    let mut header = Header::new(msg.header.id);
    header.bitmap = msg.header.bitmap;
    header.set_qr(true);
    header.set_ra(ra);
    header.set_aa(aa);

    let mut reply = Message::new(header);
    reply.add_question(q.clone());

    let rdata = rdata_from_str(q.qtype, data)?;
    reply.add_answer(ResourceRecord::new(q.qname, q.qclass, 0, rdata));
    Ok(reply)
}

fn rdata_from_str(qtype: u16, data: &str) -> Result<RData> {
    match qtype {
        TYPE_A => {
            let addr: Ipv4Addr = data
                .parse()
                .map_err(|_| Error::FormatError("not a dotted-quad IPv4 address"))?;
            Ok(RData::A(addr.octets()))
        }
        TYPE_AAAA => {
            let addr: std::net::Ipv6Addr = data
                .parse()
                .map_err(|_| Error::FormatError("not a colon-hex IPv6 address"))?;
            Ok(RData::Aaaa(addr.octets()))
        }
        TYPE_CNAME => Ok(RData::Cname(Label::try_from(data)?)),
        TYPE_NS => Ok(RData::Ns(Label::try_from(data)?)),
        TYPE_PTR => Ok(RData::Ptr(Label::try_from(data)?)),
        _ => Err(Error::FormatError(
            "reply() has no default RDATA mapping for this qtype",
        )),
    }
}
