//! Fixed-width decimal genome and its codec.
//!
//! A genome is a string of ASCII symbols with a fixed layout:
//!
//! ```text
//!  sign  integer digits   point  fraction digits
//!   +      0 0 2             .      5 0 0 0
//!  |<-- integer_width -->|      |<- fraction_width ->|
//! ```
//!
//! Every genome in a population shares the same width and point position,
//! so a locus index means the same decimal place in every individual.
//! Mutation edits symbols in place; decoding to `f64` is a separate, pure
//! conversion.

use std::fmt;

use rand::Rng;

use crate::error::ConfigError;

const POINT: u8 = b'.';
const PLUS: u8 = b'+';
const MINUS: u8 = b'-';

/// Tolerances below this are written in scientific form.
const SCIENTIFIC_BELOW: f64 = 1e-4;

/// One candidate root, encoded as fixed-width decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genome {
    symbols: Vec<u8>,
}

impl Genome {
    pub(crate) fn from_symbols(symbols: Vec<u8>) -> Self {
        Self { symbols }
    }

    pub(crate) fn into_symbols(self) -> Vec<u8> {
        self.symbols
    }

    /// The raw ASCII symbols, sign first.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Total number of symbols, including sign and point.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for genomes built by a codec.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// True when the sign symbol is `-`.
    pub fn is_negative(&self) -> bool {
        self.symbols.first() == Some(&MINUS)
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in &self.symbols {
            fmt::Write::write_char(f, symbol as char)?;
        }
        Ok(())
    }
}

/// Number of fractional digits implied by a tolerance.
///
/// Tolerances from `1e-4` up are written in positional form and give the
/// number of digits after the point: `0.01` gives 2, `2.5e-3` gives 4.
/// Smaller tolerances are read in scientific form and give the magnitude of
/// the exponent: `1e-5` gives 5, `2.5e-5` also gives 5.
///
/// # Errors
/// [`ConfigError::ErrorOutOfRange`] unless `0 < error < 1`.
pub fn compute_fraction_width(error: f64) -> Result<usize, ConfigError> {
    if !(error > 0.0 && error < 1.0) {
        return Err(ConfigError::ErrorOutOfRange(error));
    }
    if error < SCIENTIFIC_BELOW {
        let text = format!("{error:e}");
        let exponent = text
            .rsplit_once('e')
            .and_then(|(_, exponent)| exponent.parse::<i32>().ok())
            .unwrap_or(0);
        return Ok(exponent.unsigned_abs() as usize);
    }
    // `Display` for f64 never uses exponent notation.
    let text = error.to_string();
    Ok(text.split_once('.').map_or(0, |(_, fraction)| fraction.len()))
}

/// Width of the sign-plus-integer segment for a domain.
///
/// One slot for the sign plus the digit count of the wider bound.
///
/// # Errors
/// [`ConfigError::NonIntegerBound`] if either bound has a fractional part
/// or is not finite.
pub fn compute_integer_width(left_bound: f64, right_bound: f64) -> Result<usize, ConfigError> {
    let left = integer_bound("left_bound", left_bound)?;
    let right = integer_bound("right_bound", right_bound)?;
    Ok(digit_count(left.unsigned_abs()).max(digit_count(right.unsigned_abs())) + 1)
}

fn integer_bound(name: &'static str, value: f64) -> Result<i64, ConfigError> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
        return Err(ConfigError::NonIntegerBound { name, value });
    }
    Ok(value as i64)
}

fn digit_count(mut n: u64) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Encodes and decodes genomes for one domain and tolerance.
///
/// # Examples
///
/// ```
/// use u_rootsolve::GenomeCodec;
///
/// let codec = GenomeCodec::new(-10.0, 10.0, 0.001).unwrap();
/// assert_eq!(codec.integer_width(), 3);
/// assert_eq!(codec.fraction_width(), 3);
///
/// let genome = codec.encode(-2.5).unwrap();
/// assert_eq!(genome.to_string(), "-02.500");
/// assert_eq!(codec.decode(&genome), -2.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenomeCodec {
    left: i64,
    right: i64,
    integer_width: usize,
    fraction_width: usize,
}

impl GenomeCodec {
    /// Builds a codec for `[left_bound, right_bound]` at the precision
    /// implied by `error`.
    ///
    /// # Errors
    /// Fails on non-integer bounds, an empty domain, or `error` outside (0, 1).
    pub fn new(left_bound: f64, right_bound: f64, error: f64) -> Result<Self, ConfigError> {
        let fraction_width = compute_fraction_width(error)?;
        let integer_width = compute_integer_width(left_bound, right_bound)?;
        if left_bound >= right_bound {
            return Err(ConfigError::EmptyDomain {
                left: left_bound,
                right: right_bound,
            });
        }
        Ok(Self {
            left: left_bound as i64,
            right: right_bound as i64,
            integer_width,
            fraction_width,
        })
    }

    /// Sign slot plus integer digits.
    pub fn integer_width(&self) -> usize {
        self.integer_width
    }

    /// Digits after the point.
    pub fn fraction_width(&self) -> usize {
        self.fraction_width
    }

    /// Total genome length.
    pub fn genome_len(&self) -> usize {
        self.integer_width + 1 + self.fraction_width
    }

    /// Index of the decimal point; never a mutation locus.
    pub fn point_position(&self) -> usize {
        self.integer_width
    }

    /// Lower bound of the domain.
    pub fn left_bound(&self) -> f64 {
        self.left as f64
    }

    /// Upper bound of the domain.
    pub fn right_bound(&self) -> f64 {
        self.right as f64
    }

    /// Whether `x` lies in the closed domain.
    pub fn contains(&self, x: f64) -> bool {
        self.left_bound() <= x && x <= self.right_bound()
    }

    /// Samples one genome.
    ///
    /// The integer part is uniform over `[left, right]`. A sample sitting
    /// exactly on a bound gets an all-zero fraction so it cannot overshoot;
    /// every other sample gets uniform random fractional digits.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Genome {
        let whole = rng.random_range(self.left..=self.right);
        let on_bound = whole == self.left || whole == self.right;

        let mut symbols = Vec::with_capacity(self.genome_len());
        symbols.push(if whole < 0 { MINUS } else { PLUS });
        let digits = format!(
            "{:0width$}",
            whole.unsigned_abs(),
            width = self.integer_width - 1
        );
        symbols.extend_from_slice(digits.as_bytes());
        symbols.push(POINT);
        for _ in 0..self.fraction_width {
            let digit = if on_bound { 0 } else { rng.random_range(0..10u8) };
            symbols.push(b'0' + digit);
        }
        Genome::from_symbols(symbols)
    }

    /// Samples `size` genomes.
    pub fn generate_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Genome> {
        (0..size).map(|_| self.generate(rng)).collect()
    }

    /// Converts a genome to its signed value.
    pub fn decode(&self, genome: &Genome) -> f64 {
        let symbols = genome.symbols();
        let point = symbols
            .iter()
            .position(|&s| s == POINT)
            .unwrap_or(symbols.len());

        let whole = symbols[..point]
            .iter()
            .filter(|s| s.is_ascii_digit())
            .fold(0.0, |acc, &s| acc * 10.0 + f64::from(s - b'0'));
        // Horner from the last fractional digit keeps every step in [0, 1).
        let fraction = symbols[(point + 1).min(symbols.len())..]
            .iter()
            .rev()
            .filter(|s| s.is_ascii_digit())
            .fold(0.0, |acc, &s| (acc + f64::from(s - b'0')) / 10.0);

        let magnitude = whole + fraction;
        if genome.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Formats an in-domain value at this codec's width.
    ///
    /// The value is rounded to `fraction_width` digits. Returns `None` for
    /// values outside the domain or not finite.
    pub fn encode(&self, x: f64) -> Option<Genome> {
        if !x.is_finite() || !self.contains(x) {
            return None;
        }
        let text = format!(
            "{:+0width$.precision$}",
            x,
            width = self.genome_len(),
            precision = self.fraction_width
        );
        if text.len() != self.genome_len() {
            return None;
        }
        Some(Genome::from_symbols(text.into_bytes()))
    }

    /// Whether a genome has this codec's layout and decodes into the domain.
    pub fn is_valid(&self, genome: &Genome) -> bool {
        let symbols = genome.symbols();
        symbols.len() == self.genome_len()
            && matches!(symbols[0], PLUS | MINUS)
            && symbols[self.point_position()] == POINT
            && symbols
                .iter()
                .enumerate()
                .skip(1)
                .all(|(i, s)| i == self.point_position() || s.is_ascii_digit())
            && self.contains(self.decode(genome))
    }
}
