use crate::{Capacity, CapacityToken, NumberRole, SpecError, UnitId, parse_integer};

/// One comma-delimited segment of a capacity override list, with surrounding whitespace removed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Segment<'a> {
    index: usize,
    text: &'a str,
}

impl<'a> Segment<'a> {
    /// The zero-based position of the segment among all comma-separated segments of the list,
    /// counting empty segments.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The trimmed text of the segment. Never empty.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }
}

/// Splits a capacity override list into its non-empty segments, left to right.
///
/// Whitespace around each segment is removed. Segments that are empty after trimming are skipped,
/// so a list consisting only of commas and whitespace yields nothing.
pub fn segments(spec: &str) -> impl Iterator<Item = Segment<'_>> {
    spec.split(',')
        .map(str::trim)
        .enumerate()
        .filter(|(_, text)| !text.is_empty())
        .map(|(index, text)| Segment { index, text })
}

/// Returns `true` if the list contains nothing but whitespace.
///
/// A list made of commas is not blank even though it has no segments.
#[must_use]
pub fn is_blank(spec: &str) -> bool {
    spec.trim().is_empty()
}

/// Parses a whole [capacity override list][crate] and returns its tokens in the order written.
///
/// This only validates the syntax and does not act on anything, so it is suitable for checking a
/// list ahead of applying it. An empty or blank list is valid and returns an empty result.
///
/// # Errors
///
/// Returns a [`SpecError`] identifying the first invalid segment.
pub fn parse(spec: &str) -> Result<Vec<CapacityToken>, SpecError> {
    segments(spec)
        .map(|segment| {
            parse_token(segment.text()).map_err(|e| SpecError::new(segment.index(), e))
        })
        .collect()
}

/// Parses one segment of a capacity override list: `unit:capacity` or `first-last:capacity`.
///
/// The segment must already be trimmed and must not contain commas. The text is split at the
/// first `:` and, in the unit part, at the first `-`. Any further separators end up inside a
/// number and make it invalid.
///
/// # Errors
///
/// * [`Error::MalformedSpec`][crate::Error::MalformedSpec] if there is no `:`.
/// * [`Error::InvalidNumber`][crate::Error::InvalidNumber] if a unit or the capacity is not an
///   integer literal (see [`parse_integer()`]).
/// * [`Error::InvalidRange`][crate::Error::InvalidRange] if the range start is after its end.
pub fn parse_token(segment: &str) -> crate::Result<CapacityToken> {
    let Some((unit_part, capacity_part)) = segment.split_once(':') else {
        return Err(crate::Error::MalformedSpec {
            segment: segment.to_string(),
        });
    };

    let capacity = parse_number::<Capacity>(capacity_part, NumberRole::Capacity)?;

    if let Some((range_start, range_end_inc)) = unit_part.split_once('-') {
        let first_unit = parse_number::<UnitId>(range_start, NumberRole::RangeStart)?;
        let last_unit = parse_number::<UnitId>(range_end_inc, NumberRole::RangeEnd)?;

        CapacityToken::new(first_unit, last_unit, capacity)
    } else {
        let unit = parse_number::<UnitId>(unit_part, NumberRole::Unit)?;

        Ok(CapacityToken::single(unit, capacity))
    }
}

fn parse_number<T>(text: &str, role: NumberRole) -> crate::Result<T>
where
    T: num_traits::Num,
{
    parse_integer(text).ok_or_else(|| crate::Error::InvalidNumber {
        invalid_value: text.to_string(),
        role,
    })
}
