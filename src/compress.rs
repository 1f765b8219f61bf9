//! DNS name compression: decoding pointer chains and encoding with a
//! per-packet suffix cache.
//!
//! Grounded in the teacher's pointer-loop prevention (`check_compressed_name`),
//! generalized from an offset-validating scanner into one that actually
//! builds the decompressed [`Label`].

use crate::buffer::Buffer;
use crate::constants::{DNS_POINTER_MASK, DNS_POINTER_OFFSET_MASK};
use crate::errors::{Error, Result};
use crate::label::Label;

impl Buffer {
    /// Decodes one (possibly compressed) name at the current offset,
    /// leaving the cursor just past the name as it appears in this stream
    /// (a pointer counts as its own 2 bytes, regardless of what it points at).
    pub fn decode_name(&mut self) -> Result<Label> {
        let start = self.offset();
        let mut label = Label::root();
        let mut cursor = start;
        let mut jumped_from = None;

        loop {
            let l = self.peek_u8(cursor)?;

            if l & DNS_POINTER_MASK == DNS_POINTER_MASK {
                let hi = (l & !DNS_POINTER_MASK) as u16;
                let lo = self.peek_u8(cursor + 1)? as u16;
                let target = (((hi << 8) | lo) & DNS_POINTER_OFFSET_MASK) as usize;

                if target >= cursor {
                    return Err(Error::FormatError("compression pointer is not backward"));
                }
                if jumped_from.is_none() {
                    jumped_from = Some(cursor + 2);
                }
                cursor = target;
                continue;
            } else if l & DNS_POINTER_MASK != 0 {
                return Err(Error::FormatError("reserved label length bits set"));
            } else if l == 0 {
                break;
            } else {
                let len = l as usize;
                let component = self.peek_slice(cursor + 1, len)?.to_vec();
                label.push(component);
                cursor += 1 + len;
            }
        }

        label.validate()?;
        let end = jumped_from.unwrap_or(cursor + 1);
        self.seek(end)?;
        Ok(label)
    }

    /// Encodes `label` at the current write offset, consulting and updating
    /// the per-buffer suffix cache unless `allow_cache` is false (RRSIG's
    /// signer name must be written uncompressed since the signature is
    /// computed over the canonical form).
    pub fn encode_name(&mut self, label: &Label, allow_cache: bool) -> Result<()> {
        label.validate()?;

        if label.is_root() {
            self.put_u8(0);
            return Ok(());
        }

        let components = label.components();
        for start in 0..components.len() {
            let suffix = label.suffix(start).to_vec();

            if allow_cache {
                if let Some(&target) = self.name_cache.get(&suffix) {
                    let pointer = DNS_POINTER_OFFSET_MASK & target as u16;
                    self.put_u16(pointer | ((DNS_POINTER_MASK as u16) << 8));
                    return Ok(());
                }
                let offset = self.offset();
                if offset <= DNS_POINTER_OFFSET_MASK as usize {
                    self.name_cache.insert(suffix, offset);
                }
            }

            let component = &components[start];
            self.put_u8(component.len() as u8);
            self.append(component);
        }

        self.put_u8(0);
        Ok(())
    }

    fn peek_u8(&self, at: usize) -> Result<u8> {
        self.peek_slice(at, 1).map(|s| s[0])
    }

    fn peek_slice(&self, at: usize, len: usize) -> Result<&[u8]> {
        let bytes = self.as_bytes();
        if at + len > bytes.len() {
            return Err(Error::ShortRead {
                needed: len,
                available: bytes.len().saturating_sub(at),
            });
        }
        Ok(&bytes[at..at + len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn root_encodes_to_single_zero_byte() {
        let mut buf = Buffer::empty();
        buf.encode_name(&Label::root(), true).unwrap();
        assert_eq!(buf.as_bytes(), &[0]);
    }

    #[test]
    fn decodes_simple_name() {
        let mut buf = Buffer::empty();
        buf.encode_name(&Label::try_from("google.com").unwrap(), true)
            .unwrap();
        buf.seek(0).unwrap();
        let decoded = buf.decode_name().unwrap();
        assert_eq!(decoded.to_string(), "google.com.");
    }

    #[test]
    fn compression_round_trip() {
        let mut buf = Buffer::empty();
        let names = [
            "aaa.bbb.ccc",
            "xxx.yyy.zzz",
            "zzz.xxx.bbb.ccc",
            "aaa.xxx.bbb.ccc",
        ];
        let mut offsets = Vec::new();
        for n in names {
            offsets.push(buf.offset());
            buf.encode_name(&Label::try_from(n).unwrap(), true).unwrap();
        }
        for (i, n) in names.iter().enumerate() {
            buf.seek(offsets[i]).unwrap();
            let decoded = buf.decode_name().unwrap();
            assert_eq!(decoded, Label::try_from(*n).unwrap());
        }
    }

    #[test]
    fn forward_pointer_is_rejected() {
        let mut buf = Buffer::empty();
        buf.put_u8(0xc0);
        buf.put_u8(0x02);
        buf.put_u8(0);
        buf.seek(0).unwrap();
        assert!(matches!(buf.decode_name(), Err(Error::FormatError(_))));
    }

    #[test]
    fn pointer_into_header_fails() {
        // target 0 is < cursor (2) only if cursor > 0; here the pointer
        // itself sits at offset 0, so its own position check catches it.
        let mut buf = Buffer::new(vec![0xc0, 0x00]);
        assert!(matches!(buf.decode_name(), Err(Error::FormatError(_))));
    }
}
