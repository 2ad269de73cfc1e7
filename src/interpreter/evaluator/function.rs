/// Function calls and native hooks.
///
/// Binds arguments in a copy of the caller's scope, evaluates the body and
/// merges the scope back. Native hooks read their arguments from the
/// parameters bound by the builtin that wraps them.
pub mod core;

/// The builtin function table.
///
/// Builtins are written in Arn itself on top of three native hooks, and are
/// parsed once when the start-up environment is built.
pub mod builtin;
