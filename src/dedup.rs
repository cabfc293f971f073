//! Cross-page duplicate removal.
//!
//! Posts are identified by a hash of their first few content characters, so
//! two different posts sharing that prefix collapse into one.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::result::Post;

/// Default number of characters hashed per post.
pub const DEFAULT_PREFIX_LEN: usize = 100;

/// Hash of the first `prefix_len` characters of `content`.
#[must_use]
pub fn fingerprint(content: &str, prefix_len: usize) -> u64 {
    let prefix = match content.char_indices().nth(prefix_len) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    };
    let mut hasher = DefaultHasher::new();
    prefix.hash(&mut hasher);
    hasher.finish()
}

/// Keep the first post of every fingerprint, preserving input order.
#[must_use]
pub fn dedup_posts(posts: Vec<Post>, prefix_len: usize) -> Vec<Post> {
    let mut seen = HashSet::with_capacity(posts.len());
    posts
        .into_iter()
        .filter(|post| {
            let fresh = seen.insert(fingerprint(&post.content, prefix_len));
            if !fresh {
                trace!(page = post.page, id = ?post.id, "dropping duplicate post");
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str, page: usize) -> Post {
        Post { content: content.to_string(), page, ..Post::default() }
    }

    #[test]
    fn fingerprint_only_sees_prefix() {
        let a = format!("{}{}", "ب".repeat(100), "tail one");
        let b = format!("{}{}", "ب".repeat(100), "another tail");
        assert_eq!(fingerprint(&a, 100), fingerprint(&b, 100));
        assert_ne!(fingerprint(&a, 101), fingerprint(&b, 101));
    }

    #[test]
    fn short_content_hashes_whole_string() {
        assert_eq!(fingerprint("abc", 100), fingerprint("abc", 3));
        assert_ne!(fingerprint("abc", 100), fingerprint("abd", 100));
    }

    #[test]
    fn keeps_first_occurrence_in_order() {
        let posts = vec![
            post("first", 1),
            post("second", 1),
            post("first", 2),
            post("third", 2),
            post("second", 3),
        ];
        let out = dedup_posts(posts, DEFAULT_PREFIX_LEN);
        let contents: Vec<_> = out.iter().map(|p| (p.content.as_str(), p.page)).collect();
        assert_eq!(contents, vec![("first", 1), ("second", 1), ("third", 2)]);
    }

    #[test]
    fn unique_input_is_untouched() {
        let posts = vec![post("a", 1), post("b", 1), post("c", 2)];
        assert_eq!(dedup_posts(posts.clone(), DEFAULT_PREFIX_LEN), posts);
    }
}
