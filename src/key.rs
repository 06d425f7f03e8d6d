/// Composes a storage key from the given parts
///
/// Backslashes and colons in each part are replaced with underscores, then the
/// parts are joined with underscores. Suggested input: a module path plus the
/// significant index values.
pub fn key<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = parts
        .into_iter()
        .map(|part| part.as_ref().replace(['\\', ':'], "_"))
        .collect();
    parts.join("_")
}
