/// Raw query pairs in request order.
///
/// Emailed links are sometimes rewritten by mail clients and end up with a
/// parameter repeated; the first occurrence wins.
pub type QueryPairs = Vec<(String, String)>;

pub fn first_value(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}
