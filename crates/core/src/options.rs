//! Run options shared by every pipeline stage.

use std::path::PathBuf;

/// Directory templates are loaded from when none is configured.
pub const DEFAULT_TEMPLATE_DIR: &str = "Templates";

/// Converter used when none is configured.
pub const DEFAULT_CONVERTER: &str = "c#";

/// Immutable configuration for a single generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Local path or URL of the Swagger document.
    pub input: String,
    /// Basic-auth user for remote documents.
    pub username: Option<String>,
    /// Basic-auth password; only used together with `username`.
    pub password: Option<String>,
    /// Converter registry key (e.g. `c#`).
    pub converter: String,
    /// Namespace handed to the templates.
    pub namespace: String,
    /// Folder generated files are written to. Created if missing.
    pub output_folder: PathBuf,
    /// Prepended to every per-unit output file name.
    pub output_prefix: String,
    /// When set, all rendered output is appended into this one file.
    pub single_file_name: Option<String>,
    /// Prepended to `ModelTemplate.txt` / `ActionTemplate.txt`.
    pub template_prefix: String,
    /// Folder templates are read from.
    pub template_dir: PathBuf,
}

impl Options {
    /// Options with the required values set and everything else defaulted.
    pub fn new(
        input: impl Into<String>,
        namespace: impl Into<String>,
        output_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            username: None,
            password: None,
            converter: DEFAULT_CONVERTER.to_string(),
            namespace: namespace.into(),
            output_folder: output_folder.into(),
            output_prefix: String::new(),
            single_file_name: None,
            template_prefix: String::new(),
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
        }
    }

    /// Credentials attached to the document request, if a username is set.
    ///
    /// An empty username counts as no credentials. A missing password becomes
    /// the empty string.
    pub fn credentials(&self) -> Option<Credentials> {
        self.username
            .as_deref()
            .filter(|username| !username.is_empty())
            .map(|username| Credentials {
                username: username.to_string(),
                password: self.password.clone().unwrap_or_default(),
            })
    }

    /// The configured single-output file name, ignoring empty values.
    pub fn single_file(&self) -> Option<&str> {
        self.single_file_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

/// Basic-auth credentials for remote documents.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name sent with every request.
    pub username: String,
    /// Password, possibly empty.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::new("api.json", "MyNs", "out");
        assert_eq!(options.converter, "c#");
        assert_eq!(options.template_dir, PathBuf::from("Templates"));
        assert!(options.credentials().is_none());
        assert!(options.single_file().is_none());
    }

    #[test]
    fn test_credentials_default_password() {
        let mut options = Options::new("api.json", "MyNs", "out");
        options.username = Some("alice".into());
        let creds = options.credentials().unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "");
    }

    #[test]
    fn test_empty_username_means_no_credentials() {
        let mut options = Options::new("api.json", "MyNs", "out");
        options.username = Some(String::new());
        options.password = Some("secret".into());
        assert!(options.credentials().is_none());
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials {
            username: "alice".into(),
            password: "secret".into(),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("secret"));
    }
}
