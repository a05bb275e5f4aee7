//! Aggregations over in-memory blog collections.

use crate::domain::Blog;

/// Always returns 1, whatever the input.
pub fn constant_probe(_blogs: &[Blog]) -> u32 {
    1
}

/// Sum of `likes` across all blogs. Empty input sums to 0.
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs.iter().map(|blog| u64::from(blog.likes)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewBlog;
    use uuid::Uuid;

    fn blog_with_likes(likes: u32) -> Blog {
        Blog::new(
            Uuid::new_v4(),
            NewBlog {
                title: format!("Blog with {likes} likes"),
                author: None,
                url: "www.example.com".to_string(),
                likes,
            },
        )
    }

    #[test]
    fn test_constant_probe_returns_one() {
        assert_eq!(constant_probe(&[]), 1);
        assert_eq!(constant_probe(&[blog_with_likes(3), blog_with_likes(9)]), 1);
    }

    #[test]
    fn test_total_likes_of_empty_list_is_zero() {
        assert_eq!(total_likes(&[]), 0);
    }

    #[test]
    fn test_total_likes_of_single_blog() {
        assert_eq!(total_likes(&[blog_with_likes(5)]), 5);
    }

    #[test]
    fn test_total_likes_sums_all_blogs() {
        assert_eq!(total_likes(&[blog_with_likes(5), blog_with_likes(3)]), 8);
    }

    #[test]
    fn test_total_likes_ignores_order() {
        let mut blogs = vec![blog_with_likes(40), blog_with_likes(16), blog_with_likes(7)];
        let forward = total_likes(&blogs);
        blogs.reverse();

        assert_eq!(forward, 63);
        assert_eq!(total_likes(&blogs), forward);
    }

    #[test]
    fn test_total_likes_does_not_overflow_u32() {
        let blogs = vec![blog_with_likes(u32::MAX), blog_with_likes(u32::MAX)];
        assert_eq!(total_likes(&blogs), 2 * u64::from(u32::MAX));
    }
}
