//! Resource records: name + type + class + TTL + RDATA, with OPT's
//! overloaded fields exposed as named accessors.

use crate::buffer::Buffer;
use crate::constants::DNS_OPT_DO_FLAG;
use crate::enums::is_valid_class;
use crate::errors::{Error, Result};
use crate::label::Label;
use crate::rdata::{RData, TYPE_OPT};

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceRecord {
    pub name: Label,
    pub class: u16,
    pub ttl: u32,
    pub rdata: RData,
}

impl ResourceRecord {
    pub fn new(name: Label, class: u16, ttl: u32, rdata: RData) -> Self {
        ResourceRecord {
            name,
            class,
            ttl,
            rdata,
        }
    }

    /// The wire type, taken from the RDATA arm rather than stored separately
    /// so the two can never disagree.
    pub fn rtype(&self) -> u16 {
        self.rdata.rtype()
    }

    pub fn is_opt(&self) -> bool {
        self.rtype() == TYPE_OPT
    }

    /// OPT only: sender's advertised UDP payload size (overloads `class`).
    pub fn udp_payload(&self) -> Option<u16> {
        self.is_opt().then_some(self.class)
    }

    /// OPT only: the DNSSEC-OK bit, the top bit of the overloaded TTL.
    pub fn do_flag(&self) -> Option<bool> {
        self.is_opt().then_some(self.ttl & DNS_OPT_DO_FLAG != 0)
    }

    /// OPT only: extended RCODE, the top 8 bits of the overloaded TTL.
    pub fn extended_rcode(&self) -> Option<u8> {
        self.is_opt().then_some((self.ttl >> 24) as u8)
    }

    pub fn parse(buf: &mut Buffer) -> Result<Self> {
        let name = buf.decode_name()?;
        let rtype = buf.get_u16()?;
        let class = buf.get_u16()?;
        // OPT overloads `class` as the sender's UDP payload size, not a
        // real CLASS value, so it's exempt from this check.
        if rtype != TYPE_OPT && !is_valid_class(class) {
            return Err(Error::UnsupportedClass(class));
        }
        let ttl = buf.get_u32()?;
        let rdlength = buf.get_u16()?;
        let rdata = RData::parse(buf, rtype, rdlength)?;
        Ok(ResourceRecord {
            name,
            class,
            ttl,
            rdata,
        })
    }

    pub fn encode(&self, buf: &mut Buffer) -> Result<()> {
        buf.encode_name(&self.name, true)?;
        buf.put_u16(self.rtype());
        buf.put_u16(self.class);
        buf.put_u32(self.ttl);
        let rdlength_pos = buf.offset();
        buf.put_u16(0); // placeholder, back-patched below
        let start = buf.offset();
        self.rdata.encode(buf)?;
        let written = buf.offset() - start;
        if written > u16::MAX as usize {
            return Err(Error::FormatError("RDATA exceeds 65535 bytes"));
        }
        buf.update_u16(rdlength_pos, written as u16)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn round_trips_an_a_record() {
        let rr = ResourceRecord::new(
            Label::try_from("example.com").unwrap(),
            1,
            300,
            RData::A([127, 0, 0, 1]),
        );
        let mut buf = Buffer::empty();
        rr.encode(&mut buf).unwrap();
        buf.seek(0).unwrap();
        assert_eq!(ResourceRecord::parse(&mut buf).unwrap(), rr);
    }

    #[test]
    fn rejects_unrecognized_class_for_an_ordinary_record() {
        let rr = ResourceRecord::new(
            Label::try_from("example.com").unwrap(),
            9999,
            300,
            RData::A([127, 0, 0, 1]),
        );
        let mut buf = Buffer::empty();
        rr.encode(&mut buf).unwrap();
        buf.seek(0).unwrap();
        assert!(matches!(
            ResourceRecord::parse(&mut buf),
            Err(Error::UnsupportedClass(9999))
        ));
    }

    #[test]
    fn opt_exposes_overloaded_fields() {
        let rr = ResourceRecord::new(
            Label::root(),
            4096,
            DNS_OPT_DO_FLAG,
            RData::Opt(vec![]),
        );
        assert_eq!(rr.udp_payload(), Some(4096));
        assert_eq!(rr.do_flag(), Some(true));
    }

    #[test]
    fn rdlength_back_patch_matches_bytes_written() {
        let rr = ResourceRecord::new(
            Label::try_from("sip2sip.info").unwrap(),
            1,
            3600,
            RData::Txt(vec![b"hello".to_vec()]),
        );
        let mut buf = Buffer::empty();
        rr.encode(&mut buf).unwrap();
        let bytes = buf.as_bytes();
        let rdlength_pos = bytes.len() - 1 - 5 - 2;
        let rdlength = u16::from_be_bytes([bytes[rdlength_pos], bytes[rdlength_pos + 1]]);
        assert_eq!(rdlength as usize, 6);
    }
}
