//! Bidirectional integer <-> mnemonic maps for QTYPE, CLASS, OPCODE, RCODE.
//!
//! Lookups work in both directions, with unrecognized codes/names falling
//! back to a numeric rendering or `None` rather than panicking. Built once
//! behind a `OnceLock` since the tables never change after startup.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::errors::{Error, Result};

/// A read-only bidirectional map between a numeric code and its mnemonic.
pub struct Bimap {
    to_name: HashMap<u16, &'static str>,
    to_code: HashMap<&'static str, u16>,
}

impl Bimap {
    fn new(pairs: &[(u16, &'static str)]) -> Self {
        let mut to_name = HashMap::with_capacity(pairs.len());
        let mut to_code = HashMap::with_capacity(pairs.len());
        for &(code, name) in pairs {
            to_name.insert(code, name);
            to_code.insert(name, code);
        }
        Bimap { to_name, to_code }
    }

    /// Mnemonic for a numeric code, or `None` if unrecognized.
    pub fn name(&self, code: u16) -> Option<&'static str> {
        self.to_name.get(&code).copied()
    }

    /// Numeric code for a mnemonic, case-insensitively, or `None` if unrecognized.
    pub fn code(&self, name: &str) -> Option<u16> {
        if let Some(&c) = self.to_code.get(name) {
            return Some(c);
        }
        self.to_code
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, &c)| c)
    }
}

macro_rules! bimap_accessor {
    ($fn_name:ident, $cell:ident, $pairs:expr) => {
        pub fn $fn_name() -> &'static Bimap {
            static $cell: OnceLock<Bimap> = OnceLock::new();
            $cell.get_or_init(|| Bimap::new($pairs))
        }
    };
}

bimap_accessor!(
    qtype_map,
    QTYPE_MAP,
    &[
        (1, "A"),
        (2, "NS"),
        (5, "CNAME"),
        (6, "SOA"),
        (12, "PTR"),
        (13, "HINFO"),
        (15, "MX"),
        (16, "TXT"),
        (28, "AAAA"),
        (33, "SRV"),
        (35, "NAPTR"),
        (41, "OPT"),
        (43, "DS"),
        (46, "RRSIG"),
        (47, "NSEC"),
        (48, "DNSKEY"),
        (50, "NSEC3"),
        (51, "NSEC3PARAM"),
        (99, "SPF"),
        (249, "TKEY"),
        (250, "TSIG"),
        (251, "IXFR"),
        (252, "AXFR"),
        (255, "*"),
        (32768, "TA"),
        (32769, "DLV"),
    ]
);

bimap_accessor!(
    class_map,
    CLASS_MAP,
    &[
        (1, "IN"),
        (2, "CS"),
        (3, "CH"),
        (4, "HS"),
        (254, "NONE"),
        (255, "ANY"),
    ]
);

bimap_accessor!(
    opcode_map,
    OPCODE_MAP,
    &[
        (0, "QUERY"),
        (1, "IQUERY"),
        (2, "STATUS"),
        (4, "NOTIFY"),
        (5, "UPDATE"),
    ]
);

bimap_accessor!(
    rcode_map,
    RCODE_MAP,
    &[
        (0, "NOERROR"),
        (1, "FORMERR"),
        (2, "SERVFAIL"),
        (3, "NXDOMAIN"),
        (4, "NOTIMP"),
        (5, "REFUSED"),
        (6, "YXDOMAIN"),
        (7, "YXRRSET"),
        (8, "NXRRSET"),
        (9, "NOTAUTH"),
        (10, "NOTZONE"),
    ]
);

/// Looks up a QTYPE mnemonic; unrecognized codes render as their number.
pub fn qtype_name(code: u16) -> String {
    qtype_map()
        .name(code)
        .map(str::to_owned)
        .unwrap_or_else(|| code.to_string())
}

/// Looks up a QTYPE numeric code by mnemonic, case-insensitively.
///
/// Unlike `qtype_name`'s numeric-sentinel fallback for an unrecognized code,
/// an unrecognized mnemonic here is an error: a name is a caller typo until
/// proven otherwise, and silently mapping it to "no match" would hide that.
pub fn qtype_code(name: &str) -> Result<u16> {
    qtype_map()
        .code(name)
        .ok_or_else(|| Error::FormatError("unrecognized QTYPE mnemonic"))
}

/// True iff `code` is a recognized RR/question CLASS value (IN, CS, CH, HS,
/// NONE, ANY). Used to validate the `class` field of an ordinary question
/// or resource record; OPT overloads that field as a UDP payload size and
/// is never checked against this table.
pub fn is_valid_class(code: u16) -> bool {
    class_map().name(code).is_some()
}

/// Looks up an RCODE mnemonic, defaulting to "NOERROR" for code 0 and the
/// numeric value for anything else unrecognized.
pub fn rcode_name(code: u8) -> String {
    rcode_map()
        .name(code as u16)
        .map(str::to_owned)
        .unwrap_or_else(|| code.to_string())
}

/// DNS packet section, used to pick the right insertion/count accessors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Section {
    Question,
    Answer,
    Authority,
    Additional,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qtype_round_trips() {
        assert_eq!(qtype_name(1), "A");
        assert_eq!(qtype_code("a").unwrap(), 1);
        assert_eq!(qtype_code("AAAA").unwrap(), 28);
    }

    #[test]
    fn unknown_qtype_code_raises_rather_than_reports_no_match() {
        assert_eq!(qtype_name(9999), "9999");
        assert!(qtype_code("bogus").is_err());
    }

    #[test]
    fn rcode_sentinel() {
        assert_eq!(rcode_name(0), "NOERROR");
        assert_eq!(rcode_name(200), "200");
    }
}
