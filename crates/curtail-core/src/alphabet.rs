use crate::error::{EncoderError, Result};

/// Radix of the code alphabet.
pub const BASE: u64 = 62;

const SYMBOLS: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

static BASE62: Alphabet = Alphabet::new();

/// Bidirectional mapping between the 62 code symbols and their 0..=61
/// ordinals, plus the base conversion routines built on top of it.
///
/// The table is fixed at compile time and shared by reference across
/// the process, so it is thread-safe by construction.
pub struct Alphabet {
    // Indexed by ASCII byte; -1 marks a byte outside the alphabet.
    ordinals: [i8; 128],
}

impl Alphabet {
    const fn new() -> Self {
        let mut ordinals = [-1i8; 128];
        let mut i = 0;
        while i < SYMBOLS.len() {
            ordinals[SYMBOLS[i] as usize] = i as i8;
            i += 1;
        }
        Self { ordinals }
    }

    /// Returns the shared process-wide alphabet.
    pub fn base62() -> &'static Alphabet {
        &BASE62
    }

    /// Returns the symbol at the given ordinal.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal` is not in `0..=61`. Internal callers only
    /// ever pass the result of a modulo-62 reduction.
    pub fn symbol_at(&self, ordinal: u8) -> char {
        SYMBOLS[ordinal as usize] as char
    }

    /// Returns the ordinal of the given symbol, or `None` if the
    /// character is not part of the alphabet.
    pub fn ordinal_of(&self, symbol: char) -> Option<u8> {
        if !symbol.is_ascii() {
            return None;
        }
        match self.ordinals[symbol as usize] {
            -1 => None,
            ordinal => Some(ordinal as u8),
        }
    }

    /// Encodes an identifier as positional base-62 notation,
    /// most-significant symbol first.
    ///
    /// Zero encodes to the single first symbol; no other value carries
    /// a leading zero symbol.
    pub fn encode(&self, id: u64) -> String {
        if id == 0 {
            return self.symbol_at(0).to_string();
        }

        let mut digits = Vec::new();
        let mut rest = id;
        while rest > 0 {
            digits.push(SYMBOLS[(rest % BASE) as usize]);
            rest /= BASE;
        }

        digits.iter().rev().map(|&b| b as char).collect()
    }

    /// Parses positional base-62 notation back into an identifier.
    ///
    /// Any character outside the alphabet, or a value that overflows
    /// the 64-bit identifier space, fails with `InvalidEncodedInput`.
    pub fn decode(&self, code: &str) -> Result<u64> {
        let mut value: u64 = 0;

        for symbol in code.chars() {
            let ordinal = self.ordinal_of(symbol).ok_or_else(|| {
                EncoderError::InvalidEncodedInput(format!(
                    "character '{}' is not in the alphabet",
                    symbol
                ))
            })?;
            value = value
                .checked_mul(BASE)
                .and_then(|v| v.checked_add(u64::from(ordinal)))
                .ok_or_else(|| {
                    EncoderError::InvalidEncodedInput(format!(
                        "code '{}' overflows the identifier space",
                        code
                    ))
                })?;
        }

        Ok(value)
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alphabet").field("base", &BASE).finish()
    }
}
