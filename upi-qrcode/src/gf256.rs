//! Arithmetic over GF(2^8) with the QR Code reduction polynomial
//! `x^8 + x^4 + x^3 + x^2 + 1`, and the Reed-Solomon remainder built on it.

/// Reduction constant of the field, `x^8 + x^4 + x^3 + x^2 + 1`.
const PRIMITIVE: u16 = 0x11d;

/// Exponent and logarithm tables of GF(256), generator `α = 2`.
///
/// Cheap to build, so every encode call owns its own copy.
#[derive(Debug, Clone)]
pub struct Gf256 {
    exp: [u8; 256],
    log: [u8; 256],
}

impl Default for Gf256 {
    fn default() -> Self {
        Gf256::new()
    }
}

impl Gf256 {
    pub fn new() -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        for i in 0..255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE;
            }
        }
        // α^255 == α^0
        exp[255] = exp[0];
        Gf256 { exp, log }
    }

    /// `α^power`, with the power taken modulo 255.
    pub fn exp(&self, power: usize) -> u8 {
        self.exp[power % 255]
    }

    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let power = (self.log[a as usize] as usize + self.log[b as usize] as usize) % 255;
        self.exp[power]
    }

    /// Generator polynomial `(x - α^0)(x - α^1)...(x - α^(ec_len - 1))`,
    /// highest degree first. The leading coefficient is always 1.
    pub fn generator(&self, ec_len: usize) -> Vec<u8> {
        let mut gen = vec![1u8];
        for i in 0..ec_len {
            let root = self.exp(i);
            let mut next = vec![0u8; gen.len() + 1];
            for (j, &coef) in gen.iter().enumerate() {
                // Subtraction is XOR in characteristic 2
                next[j] ^= coef;
                next[j + 1] ^= self.mul(coef, root);
            }
            gen = next;
        }
        gen
    }

    /// Reed-Solomon error correction codewords for `data`: the remainder of
    /// `data(x) * x^ec_len` divided by the generator polynomial.
    pub fn remainder(&self, data: &[u8], ec_len: usize) -> Vec<u8> {
        let gen = self.generator(ec_len);
        let mut buf = data.to_vec();
        buf.resize(data.len() + ec_len, 0);

        for i in 0..data.len() {
            let coef = buf[i];
            if coef == 0 {
                continue;
            }
            for (j, &g) in gen.iter().enumerate() {
                buf[i + j] ^= self.mul(coef, g);
            }
        }

        let ec = buf.split_off(data.len());
        debug_assert_eq!(ec.len(), ec_len);
        ec
    }

    /// Evaluates `codeword` (data followed by its EC bytes, highest degree
    /// first) at `α^0..α^(ec_len - 1)`.
    ///
    /// Every syndrome is zero iff the block carries no detectable error.
    pub fn syndromes(&self, codeword: &[u8], ec_len: usize) -> Vec<u8> {
        (0..ec_len)
            .map(|i| {
                let root = self.exp(i);
                codeword
                    .iter()
                    .fold(0u8, |acc, &c| self.mul(acc, root) ^ c)
            })
            .collect()
    }
}
