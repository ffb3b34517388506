//! Slug and display-token helpers.

/// Build a URL slug from arbitrary text: lowercase, alphanumeric runs
/// joined by single dashes, no leading or trailing dash.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Turn a machine token into a display label: dashes become spaces and each
/// word is title-cased (`"deep-blue"` -> `"Deep Blue"`).
#[must_use]
pub fn title_case_token(token: &str) -> String {
    token
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
