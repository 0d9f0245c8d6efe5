pub mod customer;
pub mod menu;
pub mod plan;

/// Comma separated, or `-` when empty.
pub(crate) fn list<T: std::fmt::Display>(values: impl IntoIterator<Item = T>) -> String {
    let joined = values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        "-".to_owned()
    } else {
        joined
    }
}
