//! A single entry in the question section: a name plus type and class.

use crate::buffer::Buffer;
use crate::enums::is_valid_class;
use crate::errors::{Error, Result};
use crate::label::Label;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    pub qname: Label,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(qname: Label, qtype: u16, qclass: u16) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    pub fn parse(buf: &mut Buffer) -> Result<Self> {
        let qname = buf.decode_name()?;
        let qtype = buf.get_u16()?;
        let qclass = buf.get_u16()?;
        if !is_valid_class(qclass) {
            return Err(Error::UnsupportedClass(qclass));
        }
        Ok(Question::new(qname, qtype, qclass))
    }

    pub fn encode(&self, buf: &mut Buffer) -> Result<()> {
        buf.encode_name(&self.qname, true)?;
        buf.put_u16(self.qtype);
        buf.put_u16(self.qclass);
        Ok(())
    }
}
