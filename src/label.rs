//! Normalized domain names: an ordered sequence of label components.

use std::fmt;

use crate::constants::{DNS_MAX_LABEL_LEN, DNS_MAX_NAME_LEN};
use crate::errors::{Error, Result};

/// An ordered sequence of label components. The root domain is the empty
/// sequence; it and a single empty component both encode to one zero byte.
///
/// Equality and hashing are by component tuple, case-sensitively: RFC 1035
/// §2.3.3 asks for case-insensitive comparison, but this type does not fold
/// case, matching the behavior this codec was built from.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Label(Vec<Vec<u8>>);

impl Label {
    /// The root domain, encoding to a single zero byte.
    pub fn root() -> Self {
        Label(Vec::new())
    }

    /// Builds a label from already-split components, validating lengths.
    pub fn from_components(components: Vec<Vec<u8>>) -> Result<Self> {
        let label = Label(components);
        label.validate()?;
        Ok(label)
    }

    /// Appends one component without validation; callers validate afterward
    /// (used while decoding, where the terminator hasn't been seen yet).
    pub(crate) fn push(&mut self, component: Vec<u8>) {
        self.0.push(component);
    }

    /// Checks RFC 1035 length limits: 63 bytes per component, 253 bytes of
    /// encoded form overall (sum of component lengths, one length byte per
    /// component, one terminating zero byte). The dotted-string length used
    /// by some implementations is NOT the right basis for this check.
    pub fn validate(&self) -> Result<()> {
        let mut encoded_len = 1; // terminating zero byte
        for component in &self.0 {
            if component.len() > DNS_MAX_LABEL_LEN {
                return Err(Error::LabelError("label component exceeds 63 bytes"));
            }
            encoded_len += component.len() + 1;
        }
        if encoded_len > DNS_MAX_NAME_LEN {
            return Err(Error::LabelError("encoded name exceeds 253 bytes"));
        }
        Ok(())
    }

    /// The ordered label components.
    pub fn components(&self) -> &[Vec<u8>] {
        &self.0
    }

    /// True for the root domain (no components).
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The suffix starting at `start` components in, as used to key the
    /// compression cache.
    pub(crate) fn suffix(&self, start: usize) -> &[Vec<u8>] {
        &self.0[start..]
    }
}

impl TryFrom<&str> for Label {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        if s.is_empty() || s == "." {
            return Ok(Label::root());
        }
        let s = s.strip_suffix('.').unwrap_or(s);
        let components = s.split('.').map(|c| c.as_bytes().to_vec()).collect();
        Label::from_components(components)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, ".");
        }
        for component in &self.0 {
            write!(f, "{}.", String::from_utf8_lossy(component))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty() {
        assert!(Label::root().is_root());
        assert_eq!(Label::try_from(".").unwrap(), Label::root());
        assert_eq!(Label::try_from("").unwrap(), Label::root());
    }

    #[test]
    fn splits_dotted_string() {
        let l = Label::try_from("google.com").unwrap();
        assert_eq!(
            l.components(),
            &[b"google".to_vec(), b"com".to_vec()][..]
        );
        assert_eq!(l.to_string(), "google.com.");
    }

    #[test]
    fn rejects_oversized_component() {
        let s = "a".repeat(64);
        assert!(Label::try_from(s.as_str()).is_err());
    }

    #[test]
    fn rejects_oversized_encoded_name() {
        let components: Vec<Vec<u8>> = (0..4).map(|_| vec![b'a'; 63]).collect();
        assert!(Label::from_components(components).is_err());
    }

    #[test]
    fn accepts_encoded_name_at_the_253_byte_limit() {
        // 3*63 + 59 components + 4 length bytes + 1 terminator = 253.
        let components: Vec<Vec<u8>> = vec![vec![b'a'; 63], vec![b'a'; 63], vec![b'a'; 63], vec![b'a'; 59]];
        assert!(Label::from_components(components).is_ok());
    }

    #[test]
    fn rejects_encoded_name_one_byte_past_the_253_byte_limit() {
        // Same as above but one byte longer overall (254), which spec.md
        // §3/§9 requires rejecting even though it is still under 255.
        let components: Vec<Vec<u8>> = vec![vec![b'a'; 63], vec![b'a'; 63], vec![b'a'; 63], vec![b'a'; 60]];
        assert!(Label::from_components(components).is_err());
    }

    #[test]
    fn equality_is_case_sensitive() {
        let a = Label::try_from("Example.com").unwrap();
        let b = Label::try_from("example.com").unwrap();
        assert_ne!(a, b);
    }
}
