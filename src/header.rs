//! The fixed 12-byte DNS header: transaction id, flags, and four section counts.

use crate::bits::{get_bits, set_bits};
use crate::buffer::Buffer;
use crate::constants::DNS_HEADER_SIZE;
use crate::errors::Result;

pub const OPCODE_QUERY: u8 = 0;
pub const OPCODE_IQUERY: u8 = 1;
pub const OPCODE_STATUS: u8 = 2;
pub const OPCODE_NOTIFY: u8 = 4;
pub const OPCODE_UPDATE: u8 = 5;

/// Section counts and the flag bitmap of a DNS message.
///
/// Flag accessors read/write through `bitmap` rather than caching their own
/// copy, so the bitmap stays the single source of truth (mirrors the
/// get/set-bits-over-a-shared-word pattern the dynamic-property source used).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Header {
    pub id: u16,
    pub bitmap: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub fn new(id: u16) -> Self {
        Header {
            id,
            bitmap: 0,
            qdcount: 0,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    /// A header with a randomly chosen transaction id, for building queries.
    pub fn new_random() -> Self {
        Header::new(rand::random())
    }

    pub fn qr(&self) -> bool {
        get_bits(self.bitmap, 15, 1) == 1
    }

    pub fn set_qr(&mut self, v: bool) {
        self.bitmap = set_bits(self.bitmap, v as u16, 15, 1);
    }

    pub fn opcode(&self) -> u8 {
        get_bits(self.bitmap, 11, 4) as u8
    }

    pub fn set_opcode(&mut self, v: u8) {
        self.bitmap = set_bits(self.bitmap, v as u16, 11, 4);
    }

    pub fn aa(&self) -> bool {
        get_bits(self.bitmap, 10, 1) == 1
    }

    pub fn set_aa(&mut self, v: bool) {
        self.bitmap = set_bits(self.bitmap, v as u16, 10, 1);
    }

    pub fn tc(&self) -> bool {
        get_bits(self.bitmap, 9, 1) == 1
    }

    pub fn set_tc(&mut self, v: bool) {
        self.bitmap = set_bits(self.bitmap, v as u16, 9, 1);
    }

    pub fn rd(&self) -> bool {
        get_bits(self.bitmap, 8, 1) == 1
    }

    pub fn set_rd(&mut self, v: bool) {
        self.bitmap = set_bits(self.bitmap, v as u16, 8, 1);
    }

    pub fn ra(&self) -> bool {
        get_bits(self.bitmap, 7, 1) == 1
    }

    pub fn set_ra(&mut self, v: bool) {
        self.bitmap = set_bits(self.bitmap, v as u16, 7, 1);
    }

    /// Reserved, must be zero when sending but preserved as parsed.
    pub fn z(&self) -> u8 {
        get_bits(self.bitmap, 4, 3) as u8
    }

    pub fn rcode(&self) -> u8 {
        get_bits(self.bitmap, 0, 4) as u8
    }

    pub fn set_rcode(&mut self, v: u8) {
        self.bitmap = set_bits(self.bitmap, v as u16, 0, 4);
    }

    /// RFC 2136 UPDATE display names for the section counts. The wire
    /// layout is identical to a query's qd/an/ns/ar counts; these are
    /// purely presentational aliases for `opcode() == OPCODE_UPDATE`.
    pub fn zocount(&self) -> u16 {
        self.qdcount
    }

    pub fn prcount(&self) -> u16 {
        self.ancount
    }

    pub fn upcount(&self) -> u16 {
        self.nscount
    }

    pub fn adcount(&self) -> u16 {
        self.arcount
    }

    pub fn parse(buf: &mut Buffer) -> Result<Self> {
        Ok(Header {
            id: buf.get_u16()?,
            bitmap: buf.get_u16()?,
            qdcount: buf.get_u16()?,
            ancount: buf.get_u16()?,
            nscount: buf.get_u16()?,
            arcount: buf.get_u16()?,
        })
    }

    pub fn encode(&self, buf: &mut Buffer) {
        // Z is preserved on parse but must always be sent as zero.
        let bitmap = set_bits(self.bitmap, 0, 4, 3);
        buf.put_u16(self.id);
        buf.put_u16(bitmap);
        buf.put_u16(self.qdcount);
        buf.put_u16(self.ancount);
        buf.put_u16(self.nscount);
        buf.put_u16(self.arcount);
    }
}

pub const HEADER_SIZE: usize = DNS_HEADER_SIZE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_accessors_round_trip() {
        let mut h = Header::new(0xd5ad);
        h.set_qr(true);
        h.set_rd(true);
        h.set_ra(true);
        h.set_opcode(OPCODE_UPDATE);
        assert!(h.qr());
        assert!(h.rd());
        assert!(h.ra());
        assert_eq!(h.opcode(), OPCODE_UPDATE);
        assert!(!h.aa());
    }

    #[test]
    fn parse_matches_known_flags_word() {
        let mut buf = Buffer::new(vec![
            0xd5, 0xad, 0x81, 0x80, 0x00, 0x01, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00,
        ]);
        let h = Header::parse(&mut buf).unwrap();
        assert_eq!(h.id, 0xd5ad);
        assert!(h.qr());
        assert!(h.rd());
        assert!(h.ra());
        assert_eq!(h.qdcount, 1);
        assert_eq!(h.ancount, 5);
    }

    #[test]
    fn update_section_counts_alias_the_query_counts() {
        let mut h = Header::new(1);
        h.qdcount = 1;
        h.ancount = 2;
        h.nscount = 3;
        h.arcount = 4;
        assert_eq!((h.zocount(), h.prcount(), h.upcount(), h.adcount()), (1, 2, 3, 4));
    }

    #[test]
    fn encode_is_fixed_twelve_bytes() {
        let h = Header::new(1);
        let mut buf = Buffer::empty();
        h.encode(&mut buf);
        assert_eq!(buf.len(), HEADER_SIZE);
    }

    #[test]
    fn parse_preserves_but_encode_clears_nonzero_z_bits() {
        let mut buf = Buffer::new(vec![
            0xd5, 0xad, 0x81, 0xd0, 0x00, 0x01, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00,
        ]);
        let h = Header::parse(&mut buf).unwrap();
        assert_eq!(h.z(), 0x5);

        let mut out = Buffer::empty();
        h.encode(&mut out);
        let reencoded_bitmap = u16::from_be_bytes([out.as_bytes()[2], out.as_bytes()[3]]);
        assert_eq!(get_bits(reencoded_bitmap, 4, 3), 0);
        // the other flag bits in the word survive the re-encode untouched.
        assert_eq!(get_bits(reencoded_bitmap, 15, 1), 1);
        assert_eq!(get_bits(reencoded_bitmap, 8, 1), 1);
    }
}
