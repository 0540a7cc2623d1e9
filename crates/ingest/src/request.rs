use memvault_core::Category;

/// Declared metadata accompanying one upload.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    /// Declared category; the sniffed content type must match it.
    pub category: Category,

    /// Optional title. Empty strings are treated as absent.
    pub title: Option<String>,

    /// Optional description. Empty strings are treated as absent.
    pub description: Option<String>,

    /// Client-supplied filename; sanitized before use.
    pub original_filename: String,

    /// Tags attached to notes uploads. Ignored for other categories.
    pub tags: Vec<String>,
}

impl IngestRequest {
    /// Create a request with the required fields.
    pub fn new(category: Category, original_filename: impl Into<String>) -> Self {
        Self {
            category,
            title: None,
            description: None,
            original_filename: original_filename.into(),
            tags: Vec::new(),
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Title with empty strings normalized to `None`.
    pub(crate) fn normalized_title(&self) -> Option<String> {
        self.title.clone().filter(|t| !t.is_empty())
    }

    /// Description with empty strings normalized to `None`.
    pub(crate) fn normalized_description(&self) -> Option<String> {
        self.description.clone().filter(|d| !d.is_empty())
    }
}
