//! Typed RDATA: one arm per supported record type plus an opaque fallback.
//!
//! The teacher dispatches on a numeric type to validate in place, without
//! building a tree; here the same numeric dispatch instead selects which
//! `RData` arm to build, matching a type-tagged union over dynamic
//! class-name lookup.

use crate::buffer::Buffer;
use crate::constants::{DNS_RR_HEADER_SIZE, DS_DIGEST_LEN_SHA1, DS_DIGEST_LEN_SHA256};
use crate::errors::{Error, Result};
use crate::label::Label;

pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_PTR: u16 = 12;
pub const TYPE_HINFO: u16 = 13;
pub const TYPE_MX: u16 = 15;
pub const TYPE_TXT: u16 = 16;
pub const TYPE_AAAA: u16 = 28;
pub const TYPE_NAPTR: u16 = 35;
pub const TYPE_OPT: u16 = 41;
pub const TYPE_DS: u16 = 43;
pub const TYPE_RRSIG: u16 = 46;
pub const TYPE_DNSKEY: u16 = 48;

/// One EDNS0 option within an OPT record: `{code, length, bytes}`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdnsOption {
    pub code: u16,
    pub data: Vec<u8>,
}

/// A record's type-specific payload.
#[derive(Clone, Debug, PartialEq)]
pub enum RData {
    A([u8; 4]),
    Aaaa([u8; 16]),
    Cname(Label),
    Ns(Label),
    Ptr(Label),
    Mx {
        preference: u16,
        exchange: Label,
    },
    Soa {
        mname: Label,
        rname: Label,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Txt(Vec<Vec<u8>>),
    Hinfo {
        cpu: Vec<u8>,
        os: Vec<u8>,
    },
    Naptr {
        order: u16,
        preference: u16,
        flags: Vec<u8>,
        service: Vec<u8>,
        regexp: Vec<u8>,
        replacement: Label,
    },
    Opt(Vec<EdnsOption>),
    Dnskey {
        flags: u16,
        protocol: u8,
        algorithm: u8,
        key: Vec<u8>,
    },
    Rrsig {
        type_covered: u16,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: u32,
        inception: u32,
        key_tag: u16,
        signer_name: Label,
        signature: Vec<u8>,
    },
    Ds {
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: Vec<u8>,
    },
    /// Unrecognized type: the raw bytes, preserved verbatim.
    Opaque {
        rtype: u16,
        bytes: Vec<u8>,
    },
}

impl RData {
    /// The numeric RR type this value would be written as.
    pub fn rtype(&self) -> u16 {
        match self {
            RData::A(_) => TYPE_A,
            RData::Aaaa(_) => TYPE_AAAA,
            RData::Cname(_) => TYPE_CNAME,
            RData::Ns(_) => TYPE_NS,
            RData::Ptr(_) => TYPE_PTR,
            RData::Mx { .. } => TYPE_MX,
            RData::Soa { .. } => TYPE_SOA,
            RData::Txt(_) => TYPE_TXT,
            RData::Hinfo { .. } => TYPE_HINFO,
            RData::Naptr { .. } => TYPE_NAPTR,
            RData::Opt(_) => TYPE_OPT,
            RData::Dnskey { .. } => TYPE_DNSKEY,
            RData::Rrsig { .. } => TYPE_RRSIG,
            RData::Ds { .. } => TYPE_DS,
            RData::Opaque { rtype, .. } => *rtype,
        }
    }

    /// Parses `rdlength` bytes at the current offset as the RDATA for `rtype`.
    /// Consumes exactly `rdlength` bytes on success, including for types
    /// whose decoder only needs a prefix of them (NAPTR, OPT already fully
    /// account for their own length; only `Opaque` and any would-be
    /// short reads are checked explicitly below).
    pub fn parse(buf: &mut Buffer, rtype: u16, rdlength: u16) -> Result<Self> {
        let rdlength = rdlength as usize;
        if rdlength == 0 {
            return Ok(RData::Opaque {
                rtype,
                bytes: Vec::new(),
            });
        }
        let end = buf.offset() + rdlength;

        let rdata = match rtype {
            TYPE_A => {
                let bytes = buf.get(4)?;
                let mut a = [0u8; 4];
                a.copy_from_slice(bytes);
                RData::A(a)
            }
            TYPE_AAAA => {
                let bytes = buf.get(16)?;
                let mut a = [0u8; 16];
                a.copy_from_slice(bytes);
                RData::Aaaa(a)
            }
            TYPE_CNAME => RData::Cname(buf.decode_name()?),
            TYPE_NS => RData::Ns(buf.decode_name()?),
            TYPE_PTR => RData::Ptr(buf.decode_name()?),
            TYPE_MX => {
                let preference = buf.get_u16()?;
                let exchange = buf.decode_name()?;
                RData::Mx { preference, exchange }
            }
            TYPE_SOA => {
                let mname = buf.decode_name()?;
                let rname = buf.decode_name()?;
                let serial = buf.get_u32()?;
                let refresh = buf.get_u32()?;
                let retry = buf.get_u32()?;
                let expire = buf.get_u32()?;
                let minimum = buf.get_u32()?;
                RData::Soa {
                    mname,
                    rname,
                    serial,
                    refresh,
                    retry,
                    expire,
                    minimum,
                }
            }
            TYPE_TXT => {
                let mut strings = Vec::new();
                while buf.offset() < end {
                    let len = buf.get_u8()? as usize;
                    if buf.offset() + len > end {
                        return Err(Error::FormatError("TXT string overruns rdlength"));
                    }
                    strings.push(buf.get(len)?.to_vec());
                }
                RData::Txt(strings)
            }
            TYPE_HINFO => {
                let cpu_len = buf.get_u8()? as usize;
                let cpu = buf.get(cpu_len)?.to_vec();
                let os_len = buf.get_u8()? as usize;
                let os = buf.get(os_len)?.to_vec();
                RData::Hinfo { cpu, os }
            }
            TYPE_NAPTR => {
                let order = buf.get_u16()?;
                let preference = buf.get_u16()?;
                let flags = read_char_string(buf)?;
                let service = read_char_string(buf)?;
                let regexp = read_char_string(buf)?;
                let replacement = buf.decode_name()?;
                RData::Naptr {
                    order,
                    preference,
                    flags,
                    service,
                    regexp,
                    replacement,
                }
            }
            TYPE_OPT => {
                let mut options = Vec::new();
                while buf.offset() < end {
                    if end - buf.offset() < 4 {
                        return Err(Error::FormatError("OPT option header truncated"));
                    }
                    let code = buf.get_u16()?;
                    let len = buf.get_u16()? as usize;
                    if buf.offset() + len > end {
                        return Err(Error::FormatError("OPT option data overruns rdlength"));
                    }
                    let data = buf.get(len)?.to_vec();
                    options.push(EdnsOption { code, data });
                }
                if buf.offset() != end {
                    return Err(Error::FormatError("OPT record has trailing unread bytes"));
                }
                RData::Opt(options)
            }
            TYPE_DNSKEY => {
                let flags = buf.get_u16()?;
                let protocol = buf.get_u8()?;
                let algorithm = buf.get_u8()?;
                let key = buf.get(end - buf.offset())?.to_vec();
                RData::Dnskey {
                    flags,
                    protocol,
                    algorithm,
                    key,
                }
            }
            TYPE_RRSIG => {
                let type_covered = buf.get_u16()?;
                let algorithm = buf.get_u8()?;
                let labels = buf.get_u8()?;
                let original_ttl = buf.get_u32()?;
                let expiration = buf.get_u32()?;
                let inception = buf.get_u32()?;
                let key_tag = buf.get_u16()?;
                let signer_name = buf.decode_name()?;
                let signature = buf.get(end.saturating_sub(buf.offset()))?.to_vec();
                RData::Rrsig {
                    type_covered,
                    algorithm,
                    labels,
                    original_ttl,
                    expiration,
                    inception,
                    key_tag,
                    signer_name,
                    signature,
                }
            }
            TYPE_DS => {
                let key_tag = buf.get_u16()?;
                let algorithm = buf.get_u8()?;
                let digest_type = buf.get_u8()?;
                let expected_len = match digest_type {
                    1 => DS_DIGEST_LEN_SHA1,
                    2 => DS_DIGEST_LEN_SHA256,
                    _ => return Err(Error::FormatError("DS record has an unknown digest type")),
                };
                if end - buf.offset() != expected_len {
                    return Err(Error::FormatError("DS digest length doesn't match its digest type"));
                }
                let digest = buf.get(expected_len)?.to_vec();
                RData::Ds {
                    key_tag,
                    algorithm,
                    digest_type,
                    digest,
                }
            }
            _ => RData::Opaque {
                rtype,
                bytes: buf.get(rdlength)?.to_vec(),
            },
        };

        if buf.offset() != end {
            return Err(Error::FormatError("RDATA codec consumed the wrong length"));
        }
        Ok(rdata)
    }

    /// Appends this RDATA's encoding at the current offset. The caller
    /// (`ResourceRecord::encode`) is responsible for the rdlength back-patch.
    pub fn encode(&self, buf: &mut Buffer) -> Result<()> {
        match self {
            RData::A(bytes) => buf.append(bytes),
            RData::Aaaa(bytes) => buf.append(bytes),
            RData::Cname(name) | RData::Ns(name) | RData::Ptr(name) => {
                buf.encode_name(name, true)?
            }
            RData::Mx { preference, exchange } => {
                buf.put_u16(*preference);
                buf.encode_name(exchange, true)?;
            }
            RData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => {
                buf.encode_name(mname, true)?;
                buf.encode_name(rname, true)?;
                buf.put_u32(*serial);
                buf.put_u32(*refresh);
                buf.put_u32(*retry);
                buf.put_u32(*expire);
                buf.put_u32(*minimum);
            }
            RData::Txt(strings) => {
                for s in strings {
                    if s.len() > 255 {
                        return Err(Error::FormatError("TXT string exceeds 255 bytes"));
                    }
                    buf.put_u8(s.len() as u8);
                    buf.append(s);
                }
            }
            RData::Hinfo { cpu, os } => {
                buf.put_u8(cpu.len() as u8);
                buf.append(cpu);
                buf.put_u8(os.len() as u8);
                buf.append(os);
            }
            RData::Naptr {
                order,
                preference,
                flags,
                service,
                regexp,
                replacement,
            } => {
                buf.put_u16(*order);
                buf.put_u16(*preference);
                write_char_string(buf, flags)?;
                write_char_string(buf, service)?;
                write_char_string(buf, regexp)?;
                buf.encode_name(replacement, true)?;
            }
            RData::Opt(options) => {
                for opt in options {
                    buf.put_u16(opt.code);
                    buf.put_u16(opt.data.len() as u16);
                    buf.append(&opt.data);
                }
            }
            RData::Dnskey {
                flags,
                protocol,
                algorithm,
                key,
            } => {
                buf.put_u16(*flags);
                buf.put_u8(*protocol);
                buf.put_u8(*algorithm);
                buf.append(key);
            }
            RData::Rrsig {
                type_covered,
                algorithm,
                labels,
                original_ttl,
                expiration,
                inception,
                key_tag,
                signer_name,
                signature,
            } => {
                buf.put_u16(*type_covered);
                buf.put_u8(*algorithm);
                buf.put_u8(*labels);
                buf.put_u32(*original_ttl);
                buf.put_u32(*expiration);
                buf.put_u32(*inception);
                buf.put_u16(*key_tag);
                buf.encode_name(signer_name, false)?;
                buf.append(signature);
            }
            RData::Ds {
                key_tag,
                algorithm,
                digest_type,
                digest,
            } => {
                buf.put_u16(*key_tag);
                buf.put_u8(*algorithm);
                buf.put_u8(*digest_type);
                buf.append(digest);
            }
            RData::Opaque { bytes, .. } => buf.append(bytes),
        }
        Ok(())
    }
}

fn read_char_string(buf: &mut Buffer) -> Result<Vec<u8>> {
    let len = buf.get_u8()? as usize;
    Ok(buf.get(len)?.to_vec())
}

fn write_char_string(buf: &mut Buffer, s: &[u8]) -> Result<()> {
    if s.len() > 255 {
        return Err(Error::FormatError("character-string exceeds 255 bytes"));
    }
    buf.put_u8(s.len() as u8);
    buf.append(s);
    Ok(())
}

/// Minimum bytes an RR needs past its name: the fixed 10-byte prefix.
pub const MIN_RR_TAIL: usize = DNS_RR_HEADER_SIZE;

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn rdlength_zero_yields_empty_opaque() {
        let mut buf = Buffer::new(vec![]);
        let rdata = RData::parse(&mut buf, TYPE_A, 0).unwrap();
        assert_eq!(
            rdata,
            RData::Opaque {
                rtype: TYPE_A,
                bytes: vec![]
            }
        );
    }

    #[test]
    fn a_record_round_trips() {
        let mut buf = Buffer::empty();
        let rdata = RData::A([93, 184, 216, 34]);
        rdata.encode(&mut buf).unwrap();
        buf.seek(0).unwrap();
        let decoded = RData::parse(&mut buf, TYPE_A, 4).unwrap();
        assert_eq!(decoded, rdata);
    }

    #[test]
    fn txt_parses_multiple_strings() {
        let mut buf = Buffer::empty();
        buf.put_u8(3);
        buf.append(b"foo");
        buf.put_u8(3);
        buf.append(b"bar");
        buf.seek(0).unwrap();
        let rdata = RData::parse(&mut buf, TYPE_TXT, 8).unwrap();
        assert_eq!(rdata, RData::Txt(vec![b"foo".to_vec(), b"bar".to_vec()]));
    }

    #[test]
    fn txt_length_byte_past_rdlength_fails() {
        let mut buf = Buffer::empty();
        buf.put_u8(10);
        buf.append(b"short");
        buf.seek(0).unwrap();
        assert!(RData::parse(&mut buf, TYPE_TXT, 6).is_err());
    }

    #[test]
    fn mx_round_trips_through_compression() {
        let mut buf = Buffer::empty();
        let rdata = RData::Mx {
            preference: 10,
            exchange: Label::try_from("mail.example.com").unwrap(),
        };
        rdata.encode(&mut buf).unwrap();
        buf.seek(0).unwrap();
        let decoded = RData::parse(&mut buf, TYPE_MX, buf.len() as u16).unwrap();
        assert_eq!(decoded, rdata);
    }

    #[test]
    fn opt_round_trips() {
        let mut buf = Buffer::empty();
        let rdata = RData::Opt(vec![EdnsOption {
            code: 3,
            data: vec![1, 2, 3],
        }]);
        rdata.encode(&mut buf).unwrap();
        buf.seek(0).unwrap();
        let decoded = RData::parse(&mut buf, TYPE_OPT, buf.len() as u16).unwrap();
        assert_eq!(decoded, rdata);
    }

    #[test]
    fn ds_round_trips_sha256_digest() {
        let mut buf = Buffer::empty();
        let rdata = RData::Ds {
            key_tag: 12345,
            algorithm: 8,
            digest_type: 2,
            digest: vec![0xab; DS_DIGEST_LEN_SHA256],
        };
        rdata.encode(&mut buf).unwrap();
        buf.seek(0).unwrap();
        let decoded = RData::parse(&mut buf, TYPE_DS, buf.len() as u16).unwrap();
        assert_eq!(decoded, rdata);
    }

    #[test]
    fn ds_rejects_unknown_digest_type() {
        let mut buf = Buffer::empty();
        buf.put_u16(1);
        buf.put_u8(8);
        buf.put_u8(99); // not 1 (SHA-1) or 2 (SHA-256)
        buf.append(&[0u8; 20]);
        buf.seek(0).unwrap();
        assert!(RData::parse(&mut buf, TYPE_DS, buf.len() as u16).is_err());
    }

    #[test]
    fn ds_rejects_digest_length_mismatched_with_its_type() {
        let mut buf = Buffer::empty();
        buf.put_u16(1);
        buf.put_u8(8);
        buf.put_u8(1); // SHA-1, wants 20 bytes
        buf.append(&[0u8; DS_DIGEST_LEN_SHA256]); // 32 supplied instead
        buf.seek(0).unwrap();
        assert!(RData::parse(&mut buf, TYPE_DS, buf.len() as u16).is_err());
    }

    #[test]
    fn unknown_type_preserved_as_opaque() {
        let mut buf = Buffer::new(vec![1, 2, 3, 4]);
        let rdata = RData::parse(&mut buf, 9999, 4).unwrap();
        assert_eq!(
            rdata,
            RData::Opaque {
                rtype: 9999,
                bytes: vec![1, 2, 3, 4]
            }
        );
    }
}
