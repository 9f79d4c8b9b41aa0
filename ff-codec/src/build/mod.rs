pub mod datagram;
pub mod options;
pub mod writer;

pub use datagram::{Datagram, packetize};
pub use options::{encode_option, encode_options, encoded_len, options_to_vec};
pub use writer::WireWriter;
