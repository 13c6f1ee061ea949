//! Aggregations over a list of blogs.
//!
//! Every helper takes a slice and never mutates it. Records only need to
//! expose an author and a like count through [`Tally`]; a record without a
//! like count reports 0 from its `Tally` impl, so the helpers below never
//! see a missing value.

use serde::Serialize;

use crate::blogs::repo_types::Blog;

pub trait Tally {
    fn author(&self) -> Option<&str>;
    fn likes(&self) -> i64;
}

impl Tally for Blog {
    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    fn likes(&self) -> i64 {
        self.likes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogs {
    pub author: Option<String>,
    pub blogs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: Option<String>,
    pub likes: i64,
}

/// Always 1.
pub fn dummy<T>(_blogs: &[T]) -> u32 {
    1
}

/// Sum of likes, saturating at the bounds of `i64`.
pub fn total_likes<T: Tally>(blogs: &[T]) -> i64 {
    blogs
        .iter()
        .fold(0i64, |total, b| total.saturating_add(b.likes()))
}

/// First blog holding the maximum like count.
pub fn favorite_blog<T: Tally>(blogs: &[T]) -> Option<&T> {
    first_max_by_key(blogs.iter(), |b| b.likes())
}

/// Author with the most blogs. Ties go to the author seen first.
pub fn most_blogs<T: Tally>(blogs: &[T]) -> Option<AuthorBlogs> {
    let groups = group_by_author(blogs, |_| 1usize, usize::saturating_add);
    first_max_by_key(groups.into_iter(), |(_, count)| *count).map(|(author, blogs)| AuthorBlogs {
        author: author.map(str::to_string),
        blogs,
    })
}

/// Author with the most likes summed over their blogs. Ties go to the author
/// seen first. Per-author sums saturate like [`total_likes`].
pub fn most_likes<T: Tally>(blogs: &[T]) -> Option<AuthorLikes> {
    let groups = group_by_author(blogs, |b: &T| b.likes(), i64::saturating_add);
    first_max_by_key(groups.into_iter(), |(_, likes)| *likes).map(|(author, likes)| AuthorLikes {
        author: author.map(str::to_string),
        likes,
    })
}

/// Folds `value` per author with `combine`, keeping groups in
/// first-occurrence order.
fn group_by_author<'a, T, V, F, C>(
    blogs: &'a [T],
    value: F,
    combine: C,
) -> Vec<(Option<&'a str>, V)>
where
    T: Tally,
    V: Copy,
    F: Fn(&T) -> V,
    C: Fn(V, V) -> V,
{
    let mut groups: Vec<(Option<&'a str>, V)> = Vec::new();
    for blog in blogs {
        let v = value(blog);
        match groups.iter_mut().find(|(author, _)| *author == blog.author()) {
            Some((_, total)) => *total = combine(*total, v),
            None => groups.push((blog.author(), v)),
        }
    }
    groups
}

// `Iterator::max_by_key` keeps the last maximum; these helpers want the first.
fn first_max_by_key<I, K, F>(iter: I, key: F) -> Option<I::Item>
where
    I: Iterator,
    K: Ord,
    F: Fn(&I::Item) -> K,
{
    iter.fold(None, |best: Option<(K, I::Item)>, item| {
        let k = key(&item);
        match best {
            Some((best_k, best_item)) if best_k >= k => Some((best_k, best_item)),
            _ => Some((k, item)),
        }
    })
    .map(|(_, item)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Loose record shape: author and likes may both be missing.
    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        title: &'static str,
        author: Option<&'static str>,
        likes: Option<i64>,
    }

    impl Tally for Entry {
        fn author(&self) -> Option<&str> {
            self.author
        }

        fn likes(&self) -> i64 {
            self.likes.unwrap_or(0)
        }
    }

    fn entry(title: &'static str, author: &'static str, likes: Option<i64>) -> Entry {
        Entry {
            title,
            author: Some(author),
            likes,
        }
    }

    #[test]
    fn dummy_returns_one() {
        let blogs: Vec<Entry> = Vec::new();
        assert_eq!(dummy(&blogs), 1);
    }

    #[test]
    fn total_likes_of_empty_list_is_zero() {
        assert_eq!(total_likes::<Entry>(&[]), 0);
    }

    #[test]
    fn total_likes_sums_every_blog() {
        let blogs = [
            entry("title 1", "author 1", Some(10)),
            entry("title 2", "author 2", Some(5)),
        ];
        assert_eq!(total_likes(&blogs), 15);
    }

    #[test]
    fn total_likes_counts_missing_likes_as_zero() {
        assert_eq!(total_likes(&[entry("title 1", "author 1", None)]), 0);
        let blogs = [
            entry("title 1", "author 1", Some(10)),
            entry("title 2", "author 2", None),
            entry("title 3", "author 3", Some(5)),
        ];
        assert_eq!(total_likes(&blogs), 15);
    }

    #[test]
    fn like_sums_saturate_instead_of_overflowing() {
        let blogs = [
            entry("title 1", "author 1", Some(i64::MAX)),
            entry("title 2", "author 1", Some(i64::MAX)),
        ];
        assert_eq!(total_likes(&blogs), i64::MAX);
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: Some("author 1".into()),
                likes: i64::MAX
            })
        );

        let blogs = [
            entry("title 1", "author 1", Some(i64::MIN)),
            entry("title 2", "author 2", Some(-1)),
        ];
        assert_eq!(total_likes(&blogs), i64::MIN);
    }

    #[test]
    fn favorite_blog_of_empty_list_is_none() {
        assert_eq!(favorite_blog::<Entry>(&[]), None);
    }

    #[test]
    fn favorite_blog_prefers_the_first_on_ties() {
        let blogs = [
            entry("title 1", "author 1", Some(10)),
            entry("title 2", "author 2", Some(10)),
            entry("title 3", "author 3", Some(10)),
        ];
        assert_eq!(favorite_blog(&blogs), Some(&blogs[0]));
    }

    #[test]
    fn favorite_blog_picks_the_most_liked() {
        let blogs = [
            entry("title 1", "author 1", Some(10)),
            entry("title 2", "author 2", Some(15)),
            entry("title 3", "author 3", Some(10)),
        ];
        assert_eq!(favorite_blog(&blogs), Some(&blogs[1]));
    }

    #[test]
    fn favorite_blog_treats_missing_likes_as_zero() {
        let blogs = [entry("title 1", "author 1", None), entry("title 2", "author 2", None)];
        assert_eq!(favorite_blog(&blogs).map(|b| b.title), Some("title 1"));
    }

    #[test]
    fn most_blogs_of_empty_list_is_none() {
        assert_eq!(most_blogs::<Entry>(&[]), None);
    }

    #[test]
    fn most_blogs_counts_a_single_author() {
        let blogs = [
            entry("title 1", "author 1", Some(10)),
            entry("title 2", "author 1", None),
            entry("title 3", "author 1", Some(5)),
        ];
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: Some("author 1".into()),
                blogs: 3
            })
        );
    }

    #[test]
    fn most_blogs_picks_the_largest_group() {
        let blogs = [
            entry("title 1", "author 1", Some(10)),
            entry("title 2", "author 2", None),
            entry("title 3", "author 2", Some(5)),
        ];
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: Some("author 2".into()),
                blogs: 2
            })
        );
    }

    #[test]
    fn most_blogs_tie_goes_to_first_author_seen() {
        let blogs = [
            entry("title 1", "author 2", None),
            entry("title 2", "author 1", None),
            entry("title 3", "author 1", None),
            entry("title 4", "author 2", None),
        ];
        assert_eq!(most_blogs(&blogs).unwrap().author.as_deref(), Some("author 2"));
    }

    #[test]
    fn most_likes_of_empty_list_is_none() {
        assert_eq!(most_likes::<Entry>(&[]), None);
    }

    #[test]
    fn most_likes_single_blog() {
        let blogs = [entry("title 1", "author 1", Some(10))];
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: Some("author 1".into()),
                likes: 10
            })
        );
    }

    #[test]
    fn most_likes_sums_per_author() {
        let blogs = [
            entry("title 1", "author 1", Some(10)),
            entry("title 2", "author 2", Some(15)),
            entry("title 3", "author 2", Some(5)),
        ];
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: Some("author 2".into()),
                likes: 20
            })
        );
    }

    #[test]
    fn most_likes_with_missing_likes() {
        let blogs = [
            entry("title 1", "author 1", Some(10)),
            entry("title 2", "author 1", None),
            entry("title 3", "author 1", Some(5)),
        ];
        assert_eq!(most_likes(&blogs).unwrap().likes, 15);
    }

    #[test]
    fn helpers_do_not_depend_on_call_count() {
        let blogs = [
            entry("title 1", "author 1", Some(3)),
            entry("title 2", "author 2", Some(3)),
        ];
        let before = blogs.clone();
        for _ in 0..3 {
            assert_eq!(total_likes(&blogs), 6);
            assert_eq!(favorite_blog(&blogs), Some(&blogs[0]));
            assert_eq!(most_blogs(&blogs).unwrap().author.as_deref(), Some("author 1"));
            assert_eq!(most_likes(&blogs).unwrap().author.as_deref(), Some("author 1"));
        }
        assert_eq!(blogs, before);
    }
}
