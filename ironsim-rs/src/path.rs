/// Builds the URI of a collection, or of one item when `id` is given.
///
/// An empty `prefix` yields a path relative to the service root, which is how
/// the identity API is addressed once its base path has been pinned.
pub fn resource_path(prefix: &str, resource: &str, id: Option<&str>) -> String {
    let collection = if prefix.is_empty() {
        resource.to_string()
    } else {
        format!("{prefix}/{resource}")
    };

    match id {
        Some(id) => format!("{collection}/{id}"),
        None => collection,
    }
}
