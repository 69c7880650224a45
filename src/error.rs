//! Error types for metadata resolution and template rendering.
//!
//! Two tiers exist. [`FatalInitError`] means the embedded or supplied
//! catalog is internally inconsistent; callers must stop the process.
//! Everything else is an ordinary recoverable error.

use thiserror::Error;

/// Inconsistencies detected while building the resolved metadata.
///
/// None of these can be fixed at runtime. The binary prints the error and
/// exits with a non-zero status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalInitError {
    /// The default Kubernetes version for the driver was filtered out or never existed.
    #[error(
        "default Kubernetes version {default_version} for driver {driver_version} is not in the resolved catalog"
    )]
    DefaultVersionNotResolved {
        driver_version: String,
        default_version: String,
    },

    /// A default-table entry points at a version the catalog does not carry.
    #[error("default Kubernetes version {0} is not found in the system images catalog")]
    DefaultVersionUnknown(String),

    /// The Kubernetes image of a catalog entry does not match its version key.
    #[error(
        "for Kubernetes version {version}, the image {image} should be a prefix of {expected}"
    )]
    ImageTagMismatch {
        version: String,
        image: String,
        expected: String,
    },

    /// A template family has no usable `default` entry.
    #[error("template family '{0}' has no default template")]
    MissingDefaultTemplate(String),

    /// A template family the add-on deployment relies on is not registered.
    #[error("required template family '{0}' is not registered")]
    MissingTemplateFamily(String),

    /// The process-wide metadata slot was filled twice.
    #[error("global metadata is already initialized")]
    AlreadyInitialized,
}

/// Errors raised while compiling or executing an add-on template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template text does not parse.
    #[error("failed to parse template: {0}")]
    Parse(#[source] tera::Error),

    /// The template parsed but could not be executed against the context.
    #[error("failed to render template: {0}")]
    Render(#[source] tera::Error),

    /// The supplied context could not be turned into template variables.
    #[error("invalid template context: {0}")]
    Context(#[source] tera::Error),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParsingFailed(String),
}

/// Crate-level error covering loading, lookups and rendering.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Fatal(#[from] FatalInitError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A lookup by Kubernetes version, bucket or template family found nothing.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl MetadataError {
    /// Whether the error must abort the process rather than a single request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MetadataError::Fatal(_))
    }
}

/// Result type alias using [`MetadataError`].
pub type Result<T> = std::result::Result<T, MetadataError>;
