use serde::{Deserialize, Serialize};

pub type TagId = i64;

/// A tag annotated with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStat {
    pub title: String,
    pub posts_count: u64,
}

impl TagStat {
    pub fn new(title: impl Into<String>, posts_count: u64) -> Self {
        Self {
            title: title.into(),
            posts_count,
        }
    }
}

/// Tags of a single post, sorted by title with duplicates removed.
///
/// Tag titles are unique, so deduplicating by title is deduplicating by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagList(Vec<TagStat>);

impl TagList {
    pub fn new(mut tags: Vec<TagStat>) -> Self {
        tags.sort_by(|a, b| a.title.cmp(&b.title));
        tags.dedup_by(|a, b| a.title == b.title);
        Self(tags)
    }

    /// Title of the alphabetically first tag.
    pub fn first_title(&self) -> Option<&str> {
        self.0.first().map(|tag| tag.title.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagStat> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TagStat> for TagList {
    fn from_iter<I: IntoIterator<Item = TagStat>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_list_sorts_and_dedups() {
        let tags = TagList::new(vec![
            TagStat::new("beta", 1),
            TagStat::new("alpha", 4),
            TagStat::new("beta", 1),
        ]);

        let titles: Vec<&str> = tags.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "beta"]);
        assert_eq!(tags.first_title(), Some("alpha"));
    }

    #[test]
    fn test_empty_tag_list_has_no_first_title() {
        let tags = TagList::default();
        assert!(tags.is_empty());
        assert_eq!(tags.first_title(), None);
    }
}
