use crate::{
    dto::SearchQuery,
    models::{PageRequest, Post},
};
use dashmap::DashMap;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use uuid::Uuid;

/// One page of a filtered, newest-first post listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub posts: Vec<Post>,
    pub total: usize,
    pub request: PageRequest,
}

#[derive(Debug)]
struct StoredPost {
    seq: u64,
    post: Post,
}

/// In-memory post storage shared across request handlers.
///
/// `created_at` only has second precision, so every insert also takes a
/// sequence number and posts from the same second sort latest-first by it.
#[derive(Clone, Default)]
pub struct PostStore {
    posts: Arc<DashMap<Uuid, StoredPost>>,
    next_seq: Arc<AtomicU64>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, post: Post) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.posts.insert(post.id, StoredPost { seq, post });
    }

    pub fn get(&self, id: &Uuid) -> Option<Post> {
        self.posts.get(id).map(|entry| entry.post.clone())
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts in one city, or every post when `city_code` is `None`.
    pub fn list(&self, city_code: Option<&str>, request: PageRequest) -> Page {
        self.query(request, |post| in_city(post, city_code))
    }

    pub fn search(&self, query: &SearchQuery) -> Page {
        self.query(query.page, |post| {
            if !in_city(post, query.city_code.as_deref()) {
                return false;
            }
            let text = post.search_text();
            query.terms.iter().all(|term| text.contains(term.as_str()))
        })
    }

    fn query(&self, request: PageRequest, filter: impl Fn(&Post) -> bool) -> Page {
        let mut matches: Vec<(i64, u64, Post)> = self
            .posts
            .iter()
            .filter(|entry| filter(&entry.post))
            .map(|entry| (entry.post.created_at, entry.seq, entry.post.clone()))
            .collect();

        // Newest first
        matches.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));

        let total = matches.len();
        let posts = matches
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .map(|(_, _, post)| post)
            .collect();

        Page {
            posts,
            total,
            request,
        }
    }
}

fn in_city(post: &Post, city_code: Option<&str>) -> bool {
    city_code.is_none_or(|code| post.city_code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(company: &str, city_code: &str, content: &str, created_at: i64) -> Post {
        Post {
            id: Uuid::new_v4(),
            company: company.into(),
            city_code: city_code.into(),
            city_name: city_code.into(),
            content: content.into(),
            occurred_at: None,
            created_at,
        }
    }

    #[test]
    fn lists_newest_first_with_insertion_tiebreak() {
        let store = PostStore::new();
        let old = post("Old", "beijing", "written long ago", 100);
        let first = post("First", "beijing", "same second one", 200);
        let second = post("Second", "beijing", "same second two", 200);
        store.insert(old.clone());
        store.insert(first.clone());
        store.insert(second.clone());

        let page = store.list(None, PageRequest::new(1, 20));
        let ids: Vec<Uuid> = page.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id, old.id]);
    }

    #[test]
    fn paginates_and_reports_true_total_past_the_end() {
        let store = PostStore::new();
        for i in 0..25 {
            store.insert(post("Acme", "beijing", "some content here", i));
        }

        assert_eq!(store.list(None, PageRequest::new(1, 20)).posts.len(), 20);
        assert_eq!(store.list(None, PageRequest::new(2, 20)).posts.len(), 5);

        let past = store.list(None, PageRequest::new(3, 20));
        assert!(past.posts.is_empty());
        assert_eq!(past.total, 25);
        assert_eq!(past.request.page, 3);
    }

    #[test]
    fn filters_by_city() {
        let store = PostStore::new();
        store.insert(post("A", "beijing", "content in beijing", 1));
        store.insert(post("B", "shanghai", "content in shanghai", 2));

        let page = store.list(Some("shanghai"), PageRequest::default());
        assert_eq!(page.total, 1);
        assert_eq!(page.posts[0].company, "B");
    }

    #[test]
    fn search_requires_every_term_case_insensitively() {
        let store = PostStore::new();
        store.insert(post("AcmeCorp", "beijing", "unpaid overtime every week", 1));
        store.insert(post("Globex", "beijing", "acme partner, fair pay", 2));
        store.insert(post("Initech", "shanghai", "ACME overtime too", 3));

        let query = SearchQuery::parse("acme overtime", None, PageRequest::default()).unwrap();
        let page = store.search(&query);
        let companies: Vec<&str> = page.posts.iter().map(|p| p.company.as_str()).collect();
        assert_eq!(companies, vec!["Initech", "AcmeCorp"]);

        let query =
            SearchQuery::parse("ACME", Some("beijing"), PageRequest::default()).unwrap();
        assert_eq!(store.search(&query).total, 2);
    }
}
