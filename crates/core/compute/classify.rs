//! Prefix classification of road class labels into categories.

/// Separator between a category and a sub-class suffix (`motorway_link`).
pub const SUBCLASS_SEPARATOR: char = '_';

/// Outcome of classifying one class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification<'a> {
    /// The first category the label matched
    Category(&'a str),
    /// No category matched; the feature goes to the overflow bucket
    Unclassified,
}

impl<'a> Classification<'a> {
    /// Bucket name, substituting `overflow` for unclassified labels.
    pub fn bucket_or(self, overflow: &'a str) -> &'a str {
        match self {
            Classification::Category(category) => category,
            Classification::Unclassified => overflow,
        }
    }
}

/// Assign `label` to the first of `categories` it matches.
///
/// A label matches category `c` when it equals `c` or starts with `c`
/// followed by `_`. Categories are tried in order and the first match wins.
/// An empty label never matches.
///
/// # Examples
///
/// ```
/// use roadindex::compute::classify::{classify, Classification};
///
/// let categories = ["motorway", "trunk", "primary", "secondary"];
/// assert_eq!(classify("motorway_link", &categories), Classification::Category("motorway"));
/// assert_eq!(classify("trunk", &categories), Classification::Category("trunk"));
/// assert_eq!(classify("residential", &categories), Classification::Unclassified);
/// ```
pub fn classify<'a, S: AsRef<str>>(label: &str, categories: &'a [S]) -> Classification<'a> {
    if label.is_empty() {
        return Classification::Unclassified;
    }

    categories
        .iter()
        .map(AsRef::as_ref)
        .find(|category| matches_category(label, category))
        .map_or(Classification::Unclassified, Classification::Category)
}

fn matches_category(label: &str, category: &str) -> bool {
    match label.strip_prefix(category) {
        Some("") => true,
        Some(rest) => rest.starts_with(SUBCLASS_SEPARATOR),
        None => false,
    }
}

/// An ordered category list with the overflow bucket it falls back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    categories: Vec<String>,
    overflow: String,
}

impl Classifier {
    pub fn new<I, S>(categories: I, overflow: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            overflow: overflow.into(),
        }
    }

    pub fn from_config(config: &crate::Config) -> Self {
        Self::new(config.categories.iter().cloned(), config.overflow.clone())
    }

    pub fn classify(&self, label: &str) -> Classification<'_> {
        classify(label, &self.categories)
    }

    /// Position in the category list of the category `label` belongs to.
    pub fn category_index(&self, label: &str) -> Option<usize> {
        if label.is_empty() {
            return None;
        }
        self.categories
            .iter()
            .position(|category| matches_category(label, category))
    }

    /// Bucket name for `label`, the overflow name when nothing matches.
    pub fn bucket(&self, label: &str) -> &str {
        self.classify(label).bucket_or(&self.overflow)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn overflow(&self) -> &str {
        &self.overflow
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&crate::Config::default())
    }
}
