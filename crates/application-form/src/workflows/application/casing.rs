use std::collections::BTreeMap;

/// Rewrite a lowerCamelCase key as snake_case (`grammarTest` -> `grammar_test`).
///
/// A key without uppercase letters comes back unchanged. A leading uppercase
/// letter is lowered without a leading underscore.
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (index, ch) in key.chars().enumerate() {
        if ch.is_uppercase() {
            if index > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Apply [`to_snake_case`] to every key; values are moved across untouched.
pub fn snake_case_keys<K, V, I>(entries: I) -> BTreeMap<String, V>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(key, value)| (to_snake_case(key.as_ref()), value))
        .collect()
}
