//! Maps URL paths to HTML page templates.

use service_core::error::AppError;
use std::path::PathBuf;

pub const HOME_TEMPLATE: &str = "index.html";

/// Routes with a fixed template.
const KNOWN_PAGES: [(&str, &str); 8] = [
    ("", HOME_TEMPLATE),
    ("login", "login.html"),
    ("pets", "pets.html"),
    ("volunteer", "volunteer.html"),
    ("donate", "donate.html"),
    ("community", "community.html"),
    ("lost-found", "lost-found.html"),
    ("myadoptions", "myadoptions.html"),
];

/// Template name registered for a fixed route, if any.
pub fn known_template(page: &str) -> Option<&'static str> {
    KNOWN_PAGES
        .iter()
        .find(|(route, _)| *route == page)
        .map(|(_, template)| *template)
}

/// A page segment is usable as a file stem only if it cannot escape the
/// template directory.
fn is_page_name(page: &str) -> bool {
    !page.is_empty()
        && page
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Resolves and loads page templates from a directory.
#[derive(Debug, Clone)]
pub struct PageResolver {
    template_dir: PathBuf,
}

impl PageResolver {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
        }
    }

    /// Template to serve for `page` (the path without its leading slash).
    ///
    /// Unknown pages whose template does not exist resolve to the home page.
    pub async fn resolve(&self, page: &str) -> String {
        let candidate = match known_template(page) {
            Some(template) => template.to_string(),
            None if is_page_name(page) => format!("{}.html", page),
            None => return HOME_TEMPLATE.to_string(),
        };

        match tokio::fs::try_exists(self.template_dir.join(&candidate)).await {
            Ok(true) => candidate,
            _ => {
                tracing::debug!(page = %page, "Page template not found, serving home page");
                HOME_TEMPLATE.to_string()
            }
        }
    }

    /// Load the HTML for `page`.
    pub async fn render(&self, page: &str) -> Result<String, AppError> {
        let template = self.resolve(page).await;
        let path = self.template_dir.join(&template);

        tokio::fs::read_to_string(&path).await.map_err(|e| {
            AppError::InternalError(anyhow::anyhow!(
                "Failed to read template {}: {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_routes_have_templates() {
        assert_eq!(known_template(""), Some("index.html"));
        assert_eq!(known_template("lost-found"), Some("lost-found.html"));
        assert_eq!(known_template("myadoptions"), Some("myadoptions.html"));
        assert_eq!(known_template("about"), None);
    }

    #[test]
    fn page_names_reject_traversal() {
        assert!(is_page_name("about-us"));
        assert!(is_page_name("faq_2"));
        assert!(!is_page_name(".."));
        assert!(!is_page_name("index.html"));
        assert!(!is_page_name(""));
    }

    #[tokio::test]
    async fn dotted_page_names_serve_home_even_when_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "home").unwrap();
        std::fs::write(dir.path().join("about.us.html"), "dotted").unwrap();
        std::fs::write(dir.path().join("about-us.html"), "dashed").unwrap();
        let resolver = PageResolver::new(dir.path());

        assert_eq!(resolver.resolve("about.us").await, HOME_TEMPLATE);
        assert_eq!(resolver.render("about.us").await.unwrap(), "home");
        assert_eq!(resolver.resolve("about-us").await, "about-us.html");
    }

    #[tokio::test]
    async fn missing_directory_resolves_to_home() {
        let resolver = PageResolver::new("/nonexistent/petverse/templates");
        assert_eq!(resolver.resolve("pets").await, HOME_TEMPLATE);
        assert_eq!(resolver.resolve("about").await, HOME_TEMPLATE);
    }
}
