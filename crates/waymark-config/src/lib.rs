//! Configuration management for Waymark.
//!
//! Parses `site.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `docs.edit_url`
//! - `footer.copyright`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override sidebars file path.
    pub sidebars: Option<PathBuf>,
    /// Override the broken link policy for navbar and footer links.
    pub broken_links: Option<BrokenLinks>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "site.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity and publication settings.
    pub site: SiteSection,
    /// Docs configuration (paths are relative strings from TOML).
    #[serde(default)]
    docs: DocsSectionRaw,
    /// Navbar configuration.
    pub navbar: NavbarSection,
    /// Footer configuration (optional section).
    pub footer: Option<FooterSection>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsSection,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site identity and publication settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Site title shown in the navbar and the browser tab.
    pub title: String,
    /// Short strapline shown alongside the title.
    pub tagline: Option<String>,
    /// Canonical origin the site is served from.
    pub url: String,
    /// Path prefix every generated href starts with. Must begin and end
    /// with `/`.
    pub base_url: String,
    /// Owning organization, for project pages publication.
    pub organization: Option<String>,
    /// Project name, for project pages publication.
    pub project: Option<String>,
    /// Policy for navbar and footer links pointing at unknown documents.
    pub on_broken_links: BrokenLinks,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            tagline: None,
            url: "http://localhost:3000".to_owned(),
            base_url: "/".to_owned(),
            organization: None,
            project: None,
            on_broken_links: BrokenLinks::default(),
        }
    }
}

/// Policy for navbar and footer links pointing at unknown documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinks {
    /// Keep the link without comment.
    Ignore,
    /// Keep the link, log a warning.
    #[default]
    Warn,
    /// Fail the build.
    Throw,
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsSectionRaw {
    source_dir: Option<String>,
    sidebars: Option<String>,
    route_base: Option<String>,
    edit_url: Option<String>,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsSection {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Path to the sidebars file.
    pub sidebars: PathBuf,
    /// Route prefix for document pages under the base url.
    pub route_base: String,
    /// Base URL for "edit this page" links.
    pub edit_url: Option<String>,
}

/// Navbar configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct NavbarSection {
    /// Navbar title, overrides `site.title` when set.
    pub title: Option<String>,
    /// Navbar items in display order.
    pub items: Vec<NavbarItem>,
}

/// One navbar item.
///
/// Exactly one of `doc`, `to` and `href` must be set.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavbarItem {
    /// Display label.
    pub label: String,
    /// Document id to link to.
    pub doc: Option<String>,
    /// Site-relative route to link to.
    pub to: Option<String>,
    /// Absolute URL to link to.
    pub href: Option<String>,
    /// Which side of the navbar the item docks to.
    pub position: NavbarSide,
}

impl Default for NavbarItem {
    fn default() -> Self {
        Self {
            label: String::new(),
            doc: None,
            to: None,
            href: None,
            position: NavbarSide::Left,
        }
    }
}

impl NavbarItem {
    /// The declared link target.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` unless exactly one of `doc`, `to`
    /// and `href` is set.
    pub fn target(&self) -> Result<LinkRef<'_>, ConfigError> {
        link_ref(&self.doc, &self.to, &self.href).ok_or_else(|| {
            ConfigError::Validation(format!(
                "navbar item `{}` must set exactly one of doc, to or href",
                self.label
            ))
        })
    }
}

/// Navbar side an item docks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarSide {
    /// Left side.
    #[default]
    Left,
    /// Right side.
    Right,
}

/// Footer configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FooterSection {
    /// Theme hint passed through to the frontend, e.g. `dark`.
    pub style: Option<String>,
    /// Copyright line.
    pub copyright: Option<String>,
    /// Link groups in display order.
    pub groups: Vec<FooterGroup>,
}

/// Titled group of footer links.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FooterGroup {
    /// Group heading.
    pub title: String,
    /// Links in display order.
    pub links: Vec<FooterLink>,
}

/// One footer link.
///
/// Exactly one of `doc`, `to` and `href` must be set.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FooterLink {
    /// Display label.
    pub label: String,
    /// Document id to link to.
    pub doc: Option<String>,
    /// Site-relative route to link to.
    pub to: Option<String>,
    /// Absolute URL to link to.
    pub href: Option<String>,
}

impl FooterLink {
    /// The declared link target.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` unless exactly one of `doc`, `to`
    /// and `href` is set.
    pub fn target(&self) -> Result<LinkRef<'_>, ConfigError> {
        link_ref(&self.doc, &self.to, &self.href).ok_or_else(|| {
            ConfigError::Validation(format!(
                "footer link `{}` must set exactly one of doc, to or href",
                self.label
            ))
        })
    }
}

/// Borrowed view of a validated link target declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRef<'a> {
    /// `doc = "..."`, a document id.
    Doc(&'a str),
    /// `to = "..."`, a site-relative route.
    Route(&'a str),
    /// `href = "..."`, an absolute URL.
    Href(&'a str),
}

fn link_ref<'a>(
    doc: &'a Option<String>,
    to: &'a Option<String>,
    href: &'a Option<String>,
) -> Option<LinkRef<'a>> {
    match (doc, to, href) {
        (Some(doc), None, None) => Some(LinkRef::Doc(doc)),
        (None, Some(to), None) => Some(LinkRef::Route(to)),
        (None, None, Some(href)) => Some(LinkRef::Href(href)),
        _ => None,
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `site.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing
    /// fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(sidebars) = &settings.sidebars {
            self.docs_resolved.sidebars.clone_from(sidebars);
        }
        if let Some(broken_links) = settings.broken_links {
            self.site.on_broken_links = broken_links;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteSection::default(),
            docs: DocsSectionRaw::default(),
            navbar: NavbarSection::default(),
            footer: None,
            docs_resolved: DocsSection {
                source_dir: base.join("docs"),
                sidebars: base.join("sidebars.json"),
                route_base: "docs/".to_owned(),
                edit_url: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid
    /// values. Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_navbar()?;
        self.validate_footer()?;
        Ok(())
    }

    /// Validate site identity settings.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_non_empty(&self.site.url, "site.url")?;
        require_http_url(&self.site.url, "site.url")?;

        // Hrefs are formed by joining onto base_url, so both slashes are
        // required
        let base_url = &self.site.base_url;
        if !base_url.starts_with('/') || !base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base_url must start and end with /, got `{base_url}`"
            )));
        }

        Ok(())
    }

    /// Validate navbar items.
    fn validate_navbar(&self) -> Result<(), ConfigError> {
        for item in &self.navbar.items {
            require_non_empty(&item.label, "navbar item label")?;
            item.target()?;
        }
        Ok(())
    }

    /// Validate footer groups and links.
    fn validate_footer(&self) -> Result<(), ConfigError> {
        let Some(footer) = &self.footer else {
            return Ok(());
        };
        for group in &footer.groups {
            require_non_empty(&group.title, "footer group title")?;
            for link in &group.links {
                require_non_empty(&link.label, "footer link label")?;
                link.target()?;
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.url = expand::expand_env(&self.site.url, "site.url")?;

        if let Some(ref edit_url) = self.docs.edit_url {
            self.docs.edit_url = Some(expand::expand_env(edit_url, "docs.edit_url")?);
        }

        if let Some(ref mut footer) = self.footer
            && let Some(ref copyright) = footer.copyright
        {
            footer.copyright = Some(expand::expand_env(copyright, "footer.copyright")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsSection {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            sidebars: resolve(self.docs.sidebars.as_deref(), "sidebars.json"),
            route_base: self
                .docs
                .route_base
                .clone()
                .unwrap_or_else(|| "docs/".to_owned()),
            edit_url: self.docs.edit_url.clone(),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.title, "Documentation");
        assert_eq!(config.site.url, "http://localhost:3000");
        assert_eq!(config.site.base_url, "/");
        assert_eq!(config.site.on_broken_links, BrokenLinks::Warn);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.sidebars,
            PathBuf::from("/test/sidebars.json")
        );
        assert_eq!(config.docs_resolved.route_base, "docs/");
        assert!(config.navbar.items.is_empty());
        assert!(config.footer.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Documentation");
        assert_eq!(config.site.base_url, "/");
    }

    #[test]
    fn test_parse_site_section() {
        let toml = r#"
[site]
title = "Azure ML (v2)"
tagline = "Test the next generation"
url = "https://contoso.github.io"
base_url = "/azureml-v2-preview/"
organization = "contoso"
project = "azureml-v2-preview"
on_broken_links = "throw"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Azure ML (v2)");
        assert_eq!(
            config.site.tagline,
            Some("Test the next generation".to_owned())
        );
        assert_eq!(config.site.base_url, "/azureml-v2-preview/");
        assert_eq!(config.site.organization, Some("contoso".to_owned()));
        assert_eq!(config.site.on_broken_links, BrokenLinks::Throw);
    }

    #[test]
    fn test_parse_navbar_items() {
        let toml = r#"
[navbar]
title = "ML Docs"

[[navbar.items]]
label = "Docs"
doc = "userguide/README"

[[navbar.items]]
label = "GitHub"
href = "https://github.com/contoso/ml"
position = "right"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.navbar.title, Some("ML Docs".to_owned()));
        assert_eq!(config.navbar.items.len(), 2);
        assert_eq!(config.navbar.items[0].label, "Docs");
        assert_eq!(config.navbar.items[0].position, NavbarSide::Left);
        assert_eq!(config.navbar.items[1].position, NavbarSide::Right);
    }

    #[test]
    fn test_parse_footer() {
        let toml = r#"
[footer]
style = "dark"
copyright = "Copyright 2021 Contoso"

[[footer.groups]]
title = "Docs"

[[footer.groups.links]]
label = "Cheat Sheet"
to = "docs/cheatsheet/"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let footer = config.footer.unwrap();
        assert_eq!(footer.style, Some("dark".to_owned()));
        assert_eq!(footer.groups.len(), 1);
        assert_eq!(footer.groups[0].title, "Docs");
        assert_eq!(footer.groups[0].links[0].label, "Cheat Sheet");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "documentation"
sidebars = "nav/sidebars.yaml"
route_base = "guide/"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(
            config.docs_resolved.sidebars,
            PathBuf::from("/project/nav/sidebars.yaml")
        );
        assert_eq!(config.docs_resolved.route_base, "guide/");
    }

    #[test]
    fn test_link_targets() {
        let item = NavbarItem {
            label: "Docs".to_owned(),
            doc: Some("README".to_owned()),
            ..NavbarItem::default()
        };
        assert_eq!(item.target().unwrap(), LinkRef::Doc("README"));

        let link = FooterLink {
            label: "Blog".to_owned(),
            to: Some("blog/".to_owned()),
            ..FooterLink::default()
        };
        assert_eq!(link.target().unwrap(), LinkRef::Route("blog/"));

        let link = FooterLink {
            label: "GitHub".to_owned(),
            href: Some("https://github.com".to_owned()),
            ..FooterLink::default()
        };
        assert_eq!(link.target().unwrap(), LinkRef::Href("https://github.com"));
    }

    #[test]
    fn test_link_target_requires_exactly_one() {
        let none = NavbarItem {
            label: "Empty".to_owned(),
            ..NavbarItem::default()
        };
        assert!(none.target().is_err());

        let both = NavbarItem {
            label: "Both".to_owned(),
            doc: Some("README".to_owned()),
            href: Some("https://example.com".to_owned()),
            ..NavbarItem::default()
        };
        let err = both.target().unwrap_err();
        assert!(err.to_string().contains("exactly one"));
        assert!(err.to_string().contains("Both"));
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(
            config.docs_resolved.sidebars,
            PathBuf::from("/test/sidebars.json")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_sidebars() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            sidebars: Some(PathBuf::from("/custom/sidebars.yaml")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.sidebars,
            PathBuf::from("/custom/sidebars.yaml")
        );
    }

    #[test]
    fn test_apply_cli_settings_broken_links() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            broken_links: Some(BrokenLinks::Throw),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.on_broken_links, BrokenLinks::Throw);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.docs_resolved.source_dir,
            config_before.docs_resolved.source_dir
        );
        assert_eq!(config.site.on_broken_links, BrokenLinks::Warn);
    }

    #[test]
    fn test_expand_env_vars_site_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_SITE_URL", "https://contoso.github.io");
        }

        let toml = r#"
[site]
url = "${TEST_SITE_URL}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.url, "https://contoso.github.io");

        unsafe {
            std::env::remove_var("TEST_SITE_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_copyright() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_COPYRIGHT_OWNER", "Contoso");
        }

        let toml = r#"
[footer]
copyright = "Copyright ${TEST_COPYRIGHT_OWNER}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(
            config.footer.unwrap().copyright,
            Some("Copyright Contoso".to_owned())
        );

        unsafe {
            std::env::remove_var("TEST_COPYRIGHT_OWNER");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_CONFIG_TEST");
        }

        let toml = r#"
[site]
url = "${MISSING_VAR_CONFIG_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let result = config.expand_env_vars();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_CONFIG_TEST"));
        assert!(err.to_string().contains("site.url"));
    }

    #[test]
    fn test_expand_env_vars_literal_unchanged() {
        let toml = r#"
[site]
url = "https://contoso.github.io"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.url, "https://contoso.github.io");
    }

    // Load tests

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(
            &path,
            r#"
[site]
title = "Azure ML (v2)"
url = "https://contoso.github.io"
base_url = "/azureml-v2-preview/"

[docs]
source_dir = "website/docs"
sidebars = "website/sidebars.json"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.title, "Azure ML (v2)");
        assert_eq!(
            config.docs_resolved.source_dir,
            dir.path().join("website/docs")
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/site.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, "[site]\ntitle = \"Docs\"\n").unwrap();

        let settings = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/docs")),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/elsewhere/docs")
        );
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, "[site]\nbase_url = \"no-slashes\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("base_url"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_title_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.title = String::new();
        assert_validation_error(&config, &["site.title", "empty"]);
    }

    #[test]
    fn test_validate_url_invalid_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.url = "ftp://contoso.github.io".to_owned();
        assert_validation_error(&config, &["site.url", "http"]);
    }

    #[test]
    fn test_validate_base_url_missing_leading_slash() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base_url = "azureml/".to_owned();
        assert_validation_error(&config, &["base_url", "start and end with /"]);
    }

    #[test]
    fn test_validate_base_url_missing_trailing_slash() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base_url = "/azureml".to_owned();
        assert_validation_error(&config, &["base_url"]);
    }

    #[test]
    fn test_validate_navbar_item_without_target() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navbar.items.push(NavbarItem {
            label: "Dangling".to_owned(),
            ..NavbarItem::default()
        });
        assert_validation_error(&config, &["Dangling", "exactly one"]);
    }

    #[test]
    fn test_validate_navbar_item_empty_label() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navbar.items.push(NavbarItem {
            doc: Some("README".to_owned()),
            ..NavbarItem::default()
        });
        assert_validation_error(&config, &["navbar item label", "empty"]);
    }

    #[test]
    fn test_validate_footer_link_with_two_targets() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.footer = Some(FooterSection {
            groups: vec![FooterGroup {
                title: "Docs".to_owned(),
                links: vec![FooterLink {
                    label: "Twice".to_owned(),
                    doc: Some("README".to_owned()),
                    to: Some("docs/".to_owned()),
                    ..FooterLink::default()
                }],
            }],
            ..FooterSection::default()
        });
        assert_validation_error(&config, &["Twice", "exactly one"]);
    }

    #[test]
    fn test_validate_footer_group_empty_title() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.footer = Some(FooterSection {
            groups: vec![FooterGroup::default()],
            ..FooterSection::default()
        });
        assert_validation_error(&config, &["footer group title", "empty"]);
    }

    #[test]
    fn test_validate_full_config_passes() {
        let toml = r#"
[site]
title = "Azure ML (v2)"
url = "https://contoso.github.io"
base_url = "/azureml-v2-preview/"

[[navbar.items]]
label = "Docs"
doc = "userguide/README"

[[navbar.items]]
label = "GitHub"
href = "https://github.com/contoso/ml"
position = "right"

[footer]
style = "dark"

[[footer.groups]]
title = "Community"

[[footer.groups.links]]
label = "Stack Overflow"
href = "https://stackoverflow.com/questions/tagged/azure-machine-learning"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
    }
}
