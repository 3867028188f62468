//! Container image extraction from compose files.

use regex::Regex;
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::LazyLock;

/// Prefix of compose files that reference images (case-insensitive).
pub const DOCKER_COMPOSE_PREFIX: &str = "docker-compose";

static IMAGE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" image:([^\r\n]*)").expect("image pattern is valid"));

/// Whether a file name looks like a docker-compose file.
pub fn is_docker_compose(name: &str) -> bool {
    name.to_ascii_lowercase().starts_with(DOCKER_COMPOSE_PREFIX)
}

/// Image references in compose contents, first occurrence first.
///
/// Every line containing ` image:` contributes the rest of the line, with
/// surrounding whitespace and quotes removed. Empty values are skipped.
pub fn extract_images(contents: &str) -> Vec<String> {
    let images = IMAGE_LINE
        .captures_iter(contents)
        .filter_map(|caps| caps.get(1))
        .map(|m| clean_image(m.as_str()))
        .filter(|image| !image.is_empty());

    dedupe(images)
}

fn clean_image(raw: &str) -> String {
    raw.trim().trim_matches(['"', '\'']).trim().to_string()
}

/// Keep the first occurrence of every item, preserving order.
pub fn dedupe<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
