/// Numeric conversion helpers.
///
/// Converts numerals as written in source text into decimals, and decimals into
/// machine integers for indexing, counting and repetition, without silently
/// truncating fractional or out-of-range values.
pub mod num;
/// Source excerpts for error messages.
///
/// Renders the line an error points at with a caret under the failing column.
pub mod diagnostic;
/// Program packing and dictionary string decoding.
///
/// Packed programs are written in a 252-symbol code page and expand to
/// printable ASCII. Dictionary strings expand pairs of compression symbols into
/// words from a loaded word list.
pub mod codec;
