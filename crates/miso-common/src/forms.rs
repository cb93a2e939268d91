//! Client-side checks for plain forms (signup and friends).

/// Positions of the fields whose trimmed value is empty, in input order.
///
/// Fields are told apart by position, so two fields sharing a name are
/// checked separately.
pub fn missing_required_indices<'a, I>(fields: I) -> Vec<usize>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    fields
        .into_iter()
        .enumerate()
        .filter(|(_, (_, value))| value.trim().is_empty())
        .map(|(i, _)| i)
        .collect()
}

/// Names of the fields whose trimmed value is empty, in input order.
pub fn missing_required<'a, I>(fields: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}
