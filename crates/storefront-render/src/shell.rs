//! Document shell rendered around the route sections.

/// Head content for the document shell.
#[derive(Debug, Clone, Default)]
pub struct HeadContent {
    /// Page title.
    pub title: Option<String>,
    /// Meta tags as (name, content) pairs.
    pub meta: Vec<(String, String)>,
    /// Raw link tags (stylesheets, preconnects).
    pub links: Vec<String>,
}

impl HeadContent {
    /// Create new head content with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Add a meta tag.
    pub fn with_meta(mut self, name: &str, content: &str) -> Self {
        self.meta.push((name.to_string(), content.to_string()));
        self
    }

    /// Add a stylesheet link.
    pub fn with_stylesheet(mut self, href: &str) -> Self {
        self.links
            .push(format!(r#"<link rel="stylesheet" href="{href}">"#));
        self
    }

    /// Add a preconnect link.
    pub fn with_preconnect(mut self, href: &str) -> Self {
        self.links
            .push(format!(r#"<link rel="preconnect" href="{href}">"#));
        self
    }

    fn render(&self) -> String {
        let mut html = String::from("<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");

        if let Some(title) = &self.title {
            html.push_str(&format!("<title>{title}</title>\n"));
        }
        for (name, content) in &self.meta {
            html.push_str(&format!(r#"<meta name="{name}" content="{content}">"#));
            html.push('\n');
        }
        for link in &self.links {
            html.push_str(link);
            html.push('\n');
        }
        html
    }
}

/// The minimal markup around the streamed sections: doctype, `<html>`
/// with the active language tag, head, and body wrapper.
#[derive(Debug, Clone)]
pub struct DocumentShell {
    head: HeadContent,
    body_open: String,
    body_close: String,
}

impl DocumentShell {
    /// Create a shell with the default `<main>` body wrapper.
    pub fn new(head: HeadContent) -> Self {
        Self {
            head,
            body_open: "<body>\n<main>\n".to_string(),
            body_close: "</main>\n</body>\n</html>".to_string(),
        }
    }

    /// Set custom body opening HTML.
    pub fn with_body_open(mut self, html: impl Into<String>) -> Self {
        self.body_open = html.into();
        self
    }

    /// Set custom body closing HTML.
    pub fn with_body_close(mut self, html: impl Into<String>) -> Self {
        self.body_close = html.into();
        self
    }

    /// Render everything up to the first section, tagged with the
    /// resolved locale.
    pub fn render_opening(&self, lang: &str) -> String {
        let mut html = format!("<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n");
        html.push_str(&self.head.render());
        html.push_str("</head>\n");
        html.push_str(&self.body_open);
        html
    }

    /// Render everything after the last section.
    pub fn render_closing(&self) -> String {
        self.body_close.clone()
    }
}

impl Default for DocumentShell {
    fn default() -> Self {
        Self::new(HeadContent::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_carries_lang() {
        let shell = DocumentShell::new(HeadContent::new("Storefront"));
        let opening = shell.render_opening("ar");
        assert!(opening.starts_with("<!DOCTYPE html>"));
        assert!(opening.contains(r#"<html lang="ar">"#));
        assert!(opening.contains("<title>Storefront</title>"));
        assert!(opening.ends_with("<main>\n"));
    }

    #[test]
    fn test_head_links_rendered_in_order() {
        let shell = DocumentShell::new(
            HeadContent::new("Shop")
                .with_preconnect("https://fonts.gstatic.com")
                .with_stylesheet("/assets/app.css"),
        );
        let opening = shell.render_opening("en");
        let preconnect = opening.find("preconnect").unwrap();
        let stylesheet = opening.find("stylesheet").unwrap();
        assert!(preconnect < stylesheet);
    }

    #[test]
    fn test_closing_terminates_document() {
        let shell = DocumentShell::default();
        assert!(shell.render_closing().ends_with("</html>"));
    }
}
