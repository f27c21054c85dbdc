use serde::Serialize;
use url::form_urlencoded;

/// Category presets reachable from the navigation bar.
///
/// Each preset matches jobs whose source-assigned category is one of a fixed
/// set of names. The preset is carried by the path (`/tech`), not the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tech,
    Marketing,
    Design,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Tech, Category::Marketing, Category::Design];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Tech => "tech",
            Category::Marketing => "marketing",
            Category::Design => "design",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Tech => "Tech",
            Category::Marketing => "Marketing",
            Category::Design => "Design",
        }
    }

    pub fn path(self) -> String {
        format!("/{}", self.slug())
    }

    pub fn from_slug(slug: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.slug() == slug)
    }

    /// Source category names covered by this preset (exact match).
    pub fn source_categories(self) -> &'static [&'static str] {
        match self {
            Category::Tech => &[
                "Software Development",
                "DevOps / Sysadmin",
                "Data Analysis",
                "QA",
                "Product",
            ],
            Category::Marketing => &["Marketing"],
            Category::Design => &["Design"],
        }
    }

    pub fn matches(self, job_category: Option<&str>) -> bool {
        job_category.is_some_and(|c| self.source_categories().contains(&c))
    }
}

/// Filter state of the job list.
///
/// Values are never edited in place: every transition returns a new state.
/// Changing any predicate (search, location, tags, category) resets the page
/// to 1; moving between pages changes nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    search_term: String,
    selected_location: String,
    selected_tags: Vec<String>,
    category: Option<Category>,
    current_page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_location: String::new(),
            selected_tags: Vec::new(),
            category: None,
            current_page: 1,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from a list-view URL: `q`, `location`, repeated `tag`
    /// and `page`. Unknown keys are ignored, as are empty values.
    pub fn parse(category: Option<Category>, raw_query: Option<&str>) -> Self {
        let mut state = FilterState {
            category,
            ..Self::default()
        };
        let Some(raw) = raw_query else {
            return state;
        };

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            // values are kept verbatim; facets match by exact string equality
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "q" => state.search_term = value.into_owned(),
                "location" => state.selected_location = value.into_owned(),
                "tag" => {
                    if !state.selected_tags.iter().any(|t| *t == value) {
                        state.selected_tags.push(value.into_owned());
                    }
                }
                "page" => state.current_page = value.trim().parse::<usize>().unwrap_or(1).max(1),
                _ => {}
            }
        }
        state
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_location(&self) -> &str {
        &self.selected_location
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.selected_tags.iter().any(|t| t == tag)
    }

    /// True when any of search, location or tags narrows the list.
    pub fn is_filtered(&self) -> bool {
        !self.search_term.is_empty()
            || !self.selected_location.is_empty()
            || !self.selected_tags.is_empty()
    }

    pub fn with_search(&self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            current_page: 1,
            ..self.clone()
        }
    }

    pub fn with_location(&self, location: impl Into<String>) -> Self {
        Self {
            selected_location: location.into(),
            current_page: 1,
            ..self.clone()
        }
    }

    /// Add the tag if absent, remove it if present.
    pub fn toggle_tag(&self, tag: &str) -> Self {
        let mut selected_tags = self.selected_tags.clone();
        if let Some(pos) = selected_tags.iter().position(|t| t == tag) {
            selected_tags.remove(pos);
        } else {
            selected_tags.push(tag.to_string());
        }
        Self {
            selected_tags,
            current_page: 1,
            ..self.clone()
        }
    }

    pub fn with_category(&self, category: Option<Category>) -> Self {
        Self {
            category,
            current_page: 1,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: usize) -> Self {
        Self {
            current_page: page.max(1),
            ..self.clone()
        }
    }

    /// Drop search, location and tags. The category preset is kept because it
    /// belongs to the page the visitor is on.
    pub fn cleared(&self) -> Self {
        Self {
            category: self.category,
            ..Self::default()
        }
    }

    /// Clamp the page into `1..=total_pages`.
    pub fn clamped(&self, total_pages: usize) -> Self {
        let max = total_pages.max(1);
        if self.current_page <= max {
            self.clone()
        } else {
            self.with_page(max)
        }
    }

    /// Query string for this state, without the leading `?`.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if !self.search_term.is_empty() {
            query.append_pair("q", &self.search_term);
        }
        if !self.selected_location.is_empty() {
            query.append_pair("location", &self.selected_location);
        }
        for tag in &self.selected_tags {
            query.append_pair("tag", tag);
        }
        if self.current_page > 1 {
            query.append_pair("page", &self.current_page.to_string());
        }
        query.finish()
    }

    /// Link to the list view showing this state.
    pub fn href(&self) -> String {
        let base = match self.category {
            Some(c) => c.path(),
            None => "/".to_string(),
        };
        let query = self.to_query();
        if query.is_empty() {
            base
        } else {
            format!("{base}?{query}")
        }
    }
}
