use crate::posts::PostRecord;

/// The posts currently held by the caller
///
/// A new fetch replaces the whole collection; the only other way a post
/// leaves it is [`PostCollection::remove_by_id`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCollection {
    posts: Vec<PostRecord>,
}

impl PostCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the current posts and keep `posts` instead
    pub fn replace_all(&mut self, posts: Vec<PostRecord>) {
        self.posts = posts;
    }

    /// Remove every post with the given id, keeping the order of the rest
    ///
    /// Returns how many posts were removed. Ids are not deduplicated upstream,
    /// so this can be more than one.
    pub fn remove_by_id(&mut self, id: i64) -> usize {
        let before = self.posts.len();
        self.posts.retain(|post| post.id != id);
        before - self.posts.len()
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn get(&self, id: i64) -> Option<&PostRecord> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::synthesize_image_url;

    fn create_post(id: i64) -> PostRecord {
        PostRecord {
            id,
            title: format!("Title {id}"),
            body: format!("Body {id} (Updated)"),
            image_url: synthesize_image_url(id, 1_000),
        }
    }

    fn ids(collection: &PostCollection) -> Vec<i64> {
        collection.posts().iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_new_collection_is_empty() {
        let collection = PostCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn test_replace_all_discards_previous_posts() {
        let mut collection = PostCollection::new();
        collection.replace_all(vec![create_post(1), create_post(2)]);
        collection.replace_all(vec![create_post(3)]);

        assert_eq!(ids(&collection), vec![3]);
    }

    #[test]
    fn test_remove_by_id_present() {
        let mut collection = PostCollection::new();
        collection.replace_all((1..=5).map(create_post).collect());

        let removed = collection.remove_by_id(3);

        assert_eq!(removed, 1);
        assert_eq!(collection.len(), 4);
        assert_eq!(ids(&collection), vec![1, 2, 4, 5]);
        assert!(!collection.contains(3));
    }

    #[test]
    fn test_remove_by_id_missing_is_noop() {
        let mut collection = PostCollection::new();
        collection.replace_all((1..=3).map(create_post).collect());
        let before = collection.clone();

        assert_eq!(collection.remove_by_id(42), 0);
        assert_eq!(collection, before);
    }

    #[test]
    fn test_remove_by_id_on_empty_collection() {
        let mut collection = PostCollection::new();
        assert_eq!(collection.remove_by_id(1), 0);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_remove_by_id_removes_all_duplicates() {
        let mut collection = PostCollection::new();
        collection.replace_all(vec![create_post(1), create_post(2), create_post(1)]);

        assert_eq!(collection.remove_by_id(1), 2);
        assert_eq!(ids(&collection), vec![2]);
    }

    #[test]
    fn test_get_returns_matching_post() {
        let mut collection = PostCollection::new();
        collection.replace_all((1..=3).map(create_post).collect());

        assert_eq!(collection.get(2).map(|p| p.title.as_str()), Some("Title 2"));
        assert!(collection.get(9).is_none());
    }
}
