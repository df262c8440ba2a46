use crate::utils::AppConfig;

/// Comparison link for a small result set, e.g.
/// `https://www.npmtrends.com/react-vs-vue-vs-svelte`.
///
/// Returns `None` for an empty result set or one larger than
/// `config.trends_limit`.
pub fn trends_link(names: &[String], config: &AppConfig) -> Option<String> {
    if names.is_empty() || names.len() > config.trends_limit {
        return None;
    }

    Some(format!(
        "{}{}",
        config.trends_url,
        names.join(config.trends_separator.as_str())
    ))
}
