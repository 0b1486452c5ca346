//! Procedural macros for `safe_traverse`

mod natural;

use proc_macro::TokenStream;

/// Lowers ordinary member and call syntax onto natural-accessor proxy
/// operations.
///
/// The expression must start at a `Proxy` binding. Supported forms:
///
/// - `p.name` and `p.0` read a member
/// - `p.list[index]` reads the member named by `index`'s string form
/// - `p.name(args...)` reads `name` and invokes it with the enclosing value as
///   receiver
/// - `(p.callee)(args...)` invokes the current value
/// - `p.Class.new(args...)` instantiates the current value
///
/// Every invocation and construction propagates errors with `?`, so the
/// macro is used inside closures returning `safe_traverse::Result`.
///
/// # Example
///
/// ```ignore
/// let state = traverse(subject).expect(|p| Ok(natural!(p.functions.sum(1, 2))))?;
/// ```
///
/// This expands to:
///
/// ```ignore
/// let state = traverse(subject).expect(|p| {
///     Ok(p.field("functions").field("sum").invoke(&[
///         ::safe_traverse::Value::from(1),
///         ::safe_traverse::Value::from(2),
///     ])?)
/// })?;
/// ```
#[proc_macro]
pub fn natural(input: TokenStream) -> TokenStream { natural::natural_impl(input) }
