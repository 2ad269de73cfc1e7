use std::sync::LazyLock;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// The symbols a packed program is written in, in digit order.
const CODE_PAGE: &str = "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~¡¢£¤¥¦§¨©ª«¬®¯°○■↑↓→←║═╔╗╚╝░▒►◄│─┌┐└┘├┤┴┬♦┼█▄▀▬±²³´µ¶·¸¹º»¼½¾¿ÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖ×ØÙÚÛÜÝÞßàáâãäåæçèéêëìíîïðñòóôõö÷øùúûüýþÿŒœŠšŸŽžƒƥʠˆ˜–—‘’‚“”„†‡•…‰‹›€™⁺⁻⁼";

/// Symbols that select dictionary words inside a dictionary string.
const COMPRESSED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ`1234567890-=[]\\;'/~@#$%^&*()_+{}|\"<>";

/// Printable ASCII, the alphabet of an unpacked program.
const PRINTABLE: u32 = 95;

static CODE_PAGE_CHARS: LazyLock<Vec<char>> = LazyLock::new(|| CODE_PAGE.chars().collect());

fn code_page_index(c: char) -> Option<usize> {
    CODE_PAGE_CHARS.iter().position(|&p| p == c)
}

fn compressed_index(c: char) -> Option<usize> {
    COMPRESSED.chars().position(|p| p == c)
}

/// Re-reads a little-endian digit string in another radix.
fn convert_digits(digits: &[u32], from: u32, to: u32) -> Vec<u32> {
    let mut big = BigUint::zero();
    for &digit in digits.iter().rev() {
        big = big * from + digit;
    }
    let mut result = Vec::new();
    while !big.is_zero() {
        result.push((&big % to).to_u32().unwrap_or_default());
        big /= to;
    }
    result
}

/// Packs a printable-ASCII program into the code page.
///
/// Returns `None` if the program contains characters outside printable ASCII,
/// which cannot be represented. Trailing spaces are not preserved.
///
/// # Example
/// ```
/// use arn::util::codec::{pack, unpack};
///
/// let packed = pack("+\\~").unwrap();
/// assert!(packed.chars().count() <= 3);
/// assert_eq!(unpack(&packed), "+\\~");
/// ```
#[must_use]
pub fn pack(code: &str) -> Option<String> {
    let digits = code.chars()
                     .map(|c| (c as u32).checked_sub(32).filter(|&d| d < PRINTABLE))
                     .collect::<Option<Vec<_>>>()?;
    let radix = u32::try_from(CODE_PAGE_CHARS.len()).ok()?;
    convert_digits(&digits, PRINTABLE, radix).into_iter()
                                             .map(|d| CODE_PAGE_CHARS.get(d as usize).copied())
                                             .collect()
}

/// Expands a packed program back into printable ASCII.
///
/// Characters outside the code page are skipped.
#[must_use]
pub fn unpack(packed: &str) -> String {
    let digits: Vec<u32> = packed.chars()
                                 .filter_map(code_page_index)
                                 .filter_map(|i| u32::try_from(i).ok())
                                 .collect();
    let radix = u32::try_from(CODE_PAGE_CHARS.len()).unwrap_or(PRINTABLE);
    convert_digits(&digits, radix, PRINTABLE).into_iter()
                                             .filter_map(|d| char::from_u32(d + 32))
                                             .collect()
}

/// Returns `true` if `code` is written in the packed code page rather than in
/// plain source text.
///
/// A program counts as packed when every character belongs to the code page
/// and at least one of them lies outside printable ASCII.
#[must_use]
pub fn is_packed(code: &str) -> bool {
    code.chars().all(|c| code_page_index(c).is_some()) && code.chars().any(|c| !c.is_ascii())
}

/// A word list indexed by dictionary string symbols.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Builds a dictionary from newline separated words. Blank lines are
    /// skipped.
    #[must_use]
    pub fn from_words(text: &str) -> Self {
        Self { words: text.lines()
                          .map(str::trim)
                          .filter(|w| !w.is_empty())
                          .map(str::to_string)
                          .collect(), }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Expands a dictionary string into text.
    ///
    /// Each pair of compression symbols selects word `100 * first + second`,
    /// and a compression symbol followed by any other character selects word
    /// `100 * first` followed by that character. Everything else is copied
    /// through. With `capitalize_all` every word is capitalised, otherwise only
    /// a word that starts the text. Symbols whose word is missing from the list
    /// are copied through unchanged.
    ///
    /// # Example
    /// ```
    /// use arn::util::codec::Dictionary;
    ///
    /// let mut words = vec!["x"; 2420];
    /// words[2419] = "hello";
    /// words[118] = "world";
    /// let dictionary = Dictionary::from_words(&words.join("\n"));
    ///
    /// assert_eq!(dictionary.decode("yt, bs!", true), "Hello, World!");
    /// assert_eq!(dictionary.decode("yt, bs!", false), "Hello, world!");
    /// ```
    #[must_use]
    pub fn decode(&self, text: &str, capitalize_all: bool) -> String {
        let chars: Vec<char> = text.trim().chars().collect();
        let mut decoded = String::new();
        let mut i = 0;

        while i < chars.len() {
            let first = chars[i];
            let second = chars.get(i + 1).copied();
            let Some(high) = compressed_index(first) else {
                decoded.push(first);
                i += 1;
                continue;
            };
            let low = second.and_then(compressed_index);
            let index = high * 100 + low.unwrap_or(0);

            let Some(word) = self.word(index) else {
                decoded.push(first);
                i += 1;
                continue;
            };

            let keep_case = !capitalize_all && !decoded.is_empty();
            decoded.push_str(&if keep_case { word.to_string() } else { capitalize(word) });
            if low.is_none()
               && let Some(c) = second
            {
                decoded.push(c);
            }
            i += 2;
        }

        decoded
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next()
         .map(|first| first.to_uppercase().chain(chars).collect())
         .unwrap_or_default()
}
