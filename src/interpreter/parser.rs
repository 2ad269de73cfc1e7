/// Parser state, entry points and token helpers.
///
/// Holds the token cursor and the call table that records how many arguments
/// each known function takes.
pub mod core;

/// Item sequences and the constructs that look back at previous items.
///
/// Programs, groups, blocks and arrays are lists of items. An item may adopt
/// the item before it as its left operand, and a fold adopts the preceding
/// map block and combinator.
pub mod items;

/// Operand parsing.
///
/// Literals, identifiers, calls, function definitions, groups and prefix
/// operators, plus the implicit `_` operand.
pub mod operand;

/// Infix and suffix operator parsing.
///
/// Implements the precedence climbing loop, the `.` call form, zip-with and
/// base conversion directives.
pub mod binary;
