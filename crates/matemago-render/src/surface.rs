/// The mutable output region a strategy populates: an HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSurface {
    html: String,
}

impl RenderSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.html.clear();
    }

    pub fn replace(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    pub fn as_html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}
