/// Arbitrary-precision number helpers.
///
/// Numbers are `BigDecimal`s rounded to the configured precision after every
/// arithmetic step. This module holds the operations that need more than the
/// plain operator overloads: plain-notation formatting, mathematical modulo,
/// powers, roots and radix conversion.
pub mod number;

/// The runtime value type.
///
/// Defines [`core::Value`], its truthiness, loose structural equality, and its
/// inline text form.
pub mod core;
