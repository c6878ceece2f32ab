//! Byte-mode bitstream, padding, block split and interleaving.

use crate::gf256::Gf256;
use crate::version::{Version, BYTE_MODE};

/// Pad codewords appended alternately once the payload is exhausted.
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Append-only sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer(Vec<bool>);

impl BitBuffer {
    pub fn new() -> Self {
        BitBuffer(Vec::new())
    }

    /// Appends the low `len` bits of `value`, most significant first.
    pub fn append_bits(&mut self, value: u32, len: usize) {
        debug_assert!(len <= 31 && value >> len == 0, "value does not fit in {} bits", len);
        self.0.extend((0..len).rev().map(|i| (value >> i) & 1 != 0));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Packs the bits into bytes. The length must be a multiple of 8.
    pub fn to_bytes(&self) -> Vec<u8> {
        debug_assert_eq!(self.0.len() % 8, 0);
        self.0
            .chunks(8)
            .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
            .collect()
    }
}

/// Data codewords of one block and their error correction codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub data: Vec<u8>,
    pub ec: Vec<u8>,
}

/// Builds the padded data codewords for `payload`, exactly
/// `version.data_codewords()` bytes long.
///
/// The payload must fit, see [Version::for_payload].
pub fn data_codewords(payload: &[u8], version: Version) -> Vec<u8> {
    let capacity = version.data_codewords() * 8;
    let mut bits = BitBuffer::new();
    bits.append_bits(BYTE_MODE, 4);
    bits.append_bits(payload.len() as u32, version.count_bits());
    for &b in payload {
        bits.append_bits(b as u32, 8);
    }
    debug_assert!(bits.len() <= capacity);

    // Terminator, cut short when the symbol is almost full
    let terminator = (capacity - bits.len()).min(4);
    bits.append_bits(0, terminator);
    let fill = (8 - bits.len() % 8) % 8;
    bits.append_bits(0, fill);

    let mut codewords = bits.to_bytes();
    for &pad in PAD_BYTES.iter().cycle() {
        if codewords.len() >= version.data_codewords() {
            break;
        }
        codewords.push(pad);
    }
    codewords
}

/// Splits data codewords across the version's blocks, in group order, and
/// computes each block's Reed-Solomon codewords.
pub fn split_blocks(codewords: &[u8], version: Version, gf: &Gf256) -> Vec<Block> {
    let specs = version.blocks();
    tracing::debug!(
        %version,
        blocks = specs.len(),
        ec_per_block = version.ec_per_block(),
        "splitting data codewords into blocks"
    );
    debug_assert_eq!(
        specs.iter().map(|s| s.data_len).sum::<usize>(),
        codewords.len(),
        "block table does not cover the data codewords"
    );

    let mut rest = codewords;
    specs
        .iter()
        .map(|spec| {
            let (data, tail) = rest.split_at(spec.data_len);
            rest = tail;
            Block {
                data: data.to_vec(),
                ec: gf.remainder(data, spec.ec_len),
            }
        })
        .collect()
}

/// Final codeword sequence: data codewords taken column-wise across blocks,
/// then EC codewords the same way.
pub fn interleave(blocks: &[Block]) -> Vec<u8> {
    let mut out = Vec::with_capacity(blocks.iter().map(|b| b.data.len() + b.ec.len()).sum());
    let longest_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    for i in 0..longest_data {
        out.extend(blocks.iter().filter_map(|b| b.data.get(i)));
    }
    let longest_ec = blocks.iter().map(|b| b.ec.len()).max().unwrap_or(0);
    for i in 0..longest_ec {
        out.extend(blocks.iter().filter_map(|b| b.ec.get(i)));
    }
    out
}

/// Runs the whole bitstream stage for `payload`.
pub fn encode_codewords(payload: &[u8], version: Version) -> Vec<u8> {
    let gf = Gf256::new();
    let data = data_codewords(payload, version);
    let blocks = split_blocks(&data, version, &gf);
    let stream = interleave(&blocks);
    debug_assert_eq!(stream.len(), version.total_codewords());
    stream
}
