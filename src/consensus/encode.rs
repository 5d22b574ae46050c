//! Consensus serialization
//!
//! Little-endian integers and compact-size length prefixes, the byte layout
//! that block and transaction hashes are computed over.

/// Types with a canonical consensus byte encoding
pub trait ConsensusEncode {
    /// Append the encoding of `self` to `buf`
    fn consensus_encode(&self, buf: &mut Vec<u8>);

    /// Encode into a fresh buffer
    fn to_consensus_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.consensus_encode(&mut buf);
        buf
    }
}

/// Write a compact-size unsigned integer
pub fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Write a length-prefixed byte string
pub fn write_var_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    write_compact_size(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

impl<T: ConsensusEncode> ConsensusEncode for Vec<T> {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        write_compact_size(buf, self.len() as u64);
        for item in self {
            item.consensus_encode(buf);
        }
    }
}
