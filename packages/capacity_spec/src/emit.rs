use std::borrow::Borrow;

use itertools::Itertools;

use crate::CapacityToken;

/// Emits a [capacity override list][crate] in canonical form from a sequence of tokens.
///
/// The tokens are emitted in the given order, without merging or reordering, because later
/// segments override earlier ones when applied. Each token uses its canonical
/// [`Display`][std::fmt::Display] form.
pub fn emit<I>(tokens: I) -> String
where
    I: IntoIterator,
    I::Item: Borrow<CapacityToken>,
{
    tokens
        .into_iter()
        .map(|token| {
            let token: &CapacityToken = token.borrow();
            token.to_string()
        })
        .join(",")
}
