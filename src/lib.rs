pub mod bits;
pub mod buffer;
pub mod compress;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod header;
pub mod label;
pub mod message;
pub mod question;
pub mod rdata;
pub mod rr;
pub mod utils;

pub use buffer::Buffer;
pub use errors::{Error, Result};
pub use header::Header;
pub use label::Label;
pub use message::{reply, Message};
pub use question::Question;
pub use rdata::RData;
pub use rr::ResourceRecord;
