//! Rewriting declared container links.
//!
//! A container's links, as reported by the engine, reference sibling
//! containers by runtime display name (`/db`) and carry a path-shaped alias
//! (`/web/db`). Both the current container and its link targets get renamed
//! during recreation, so the rewritten links must reference the logical
//! container name plus an explicit alias: `db:db`. Only the last segment of
//! the alias path is meaningful inside the container; any embedded path
//! depth is discarded.

use crate::recreate::{RecreateError, Result};

/// Rewrite a container's declared links for the replacement container.
///
/// Operates on a copy and returns a new list. A link entry without a `:`
/// separator is a parse error, which aborts the whole recreation before any
/// runtime mutation takes place.
pub fn rewrite_links(links: &[String]) -> Result<Vec<String>> {
    links.iter().map(|link| rewrite_link(link)).collect()
}

fn rewrite_link(link: &str) -> Result<String> {
    let (target, alias_path) = link
        .split_once(':')
        .ok_or_else(|| RecreateError::ParseError(link.to_string()))?;

    let target = target.strip_prefix('/').unwrap_or(target);
    // rsplit always yields at least one segment, even for an empty path.
    let alias = alias_path.rsplit('/').next().unwrap_or(alias_path);

    Ok(format!("{}:{}", target, alias))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_display_name_and_alias_path() {
        let links = vec!["/db:/web/db".to_string()];
        assert_eq!(rewrite_links(&links).unwrap(), vec!["db:db".to_string()]);
    }

    #[test]
    fn test_rewrite_keeps_only_leaf_alias_segment() {
        let links = vec!["/cache:/app/deeply/nested/redis".to_string()];
        assert_eq!(
            rewrite_links(&links).unwrap(),
            vec!["cache:redis".to_string()]
        );
    }

    #[test]
    fn test_rewrite_without_prefix_slash() {
        let links = vec!["db:db".to_string()];
        assert_eq!(rewrite_links(&links).unwrap(), vec!["db:db".to_string()]);
    }

    #[test]
    fn test_rewrite_splits_at_first_colon() {
        // Everything after the first separator belongs to the alias path.
        let links = vec!["/db:/web/db:ro".to_string()];
        assert_eq!(rewrite_links(&links).unwrap(), vec!["db:db:ro".to_string()]);
    }

    #[test]
    fn test_missing_separator_is_a_parse_error() {
        let links = vec!["/db:/web/db".to_string(), "garbage".to_string()];
        let err = rewrite_links(&links).unwrap_err();
        assert!(matches!(err, RecreateError::ParseError(ref l) if l == "garbage"));
    }

    #[test]
    fn test_empty_list_stays_empty() {
        assert!(rewrite_links(&[]).unwrap().is_empty());
    }
}
