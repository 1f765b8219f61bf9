#![allow(dead_code)]
//! Wire-layout constants: byte offsets and sizes that appear throughout the
//! codec. Kept centralized so the magic numbers only appear once.

/// Size of the fixed DNS header.
pub const DNS_HEADER_SIZE: usize = 12;

/// Maximum length of an encoded domain name (sum of label lengths, the
/// length-prefix bytes, and the terminating zero byte). RFC 1035 §3.1 / §2.3.4.
pub const DNS_MAX_NAME_LEN: usize = 253;

/// Maximum length of a single label component.
pub const DNS_MAX_LABEL_LEN: usize = 63;

/// Maximum number of pointer indirections followed while decoding one name.
pub const DNS_MAX_POINTER_INDIRECTIONS: u16 = 128;

/// Size of the fixed RR prefix following the name: type, class, ttl, rdlength.
pub const DNS_RR_HEADER_SIZE: usize = 10;

/// Size of the fixed question prefix following the name: qtype, qclass.
pub const DNS_QUESTION_HEADER_SIZE: usize = 4;

/// Top two bits of a label length byte that mark it as a compression pointer.
pub const DNS_POINTER_MASK: u8 = 0xc0;

/// Mask for the 14-bit offset carried in a compression pointer.
pub const DNS_POINTER_OFFSET_MASK: u16 = 0x3fff;

/// Largest offset a compression pointer can address.
pub const DNS_MAX_POINTER_OFFSET: usize = DNS_POINTER_OFFSET_MASK as usize;

/// Size of the OPT pseudo-RR's fixed header, same layout as a normal RR.
pub const DNS_OPT_RR_HEADER_SIZE: usize = DNS_RR_HEADER_SIZE;

/// Top bit of the (overloaded) TTL field in an OPT record: the DNSSEC-OK flag.
pub const DNS_OPT_DO_FLAG: u32 = 1 << 31;

/// DS digest type 1 (SHA-1) digest length, RFC 4034 Appendix A.2 / RFC 3658.
pub const DS_DIGEST_LEN_SHA1: usize = 20;

/// DS digest type 2 (SHA-256) digest length, RFC 4509.
pub const DS_DIGEST_LEN_SHA256: usize = 32;
