//! Error types and handling for skill-install
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostics.
//! Every variant is fatal to the invocation: `main` prints it and exits.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for skill-install operations
#[derive(Error, Diagnostic, Debug)]
pub enum SkillError {
    // Transport errors
    #[error("Network error: {message}")]
    #[diagnostic(
        code(skill_install::network),
        help("Install curl or wget and check your network connection")
    )]
    Network { message: String },

    // Resolver errors
    #[error("No skills found in {location}")]
    #[diagnostic(code(skill_install::resolver::no_bundles))]
    NoBundlesFound { location: String },

    #[error("Skill '{name}' not found")]
    #[diagnostic(
        code(skill_install::resolver::not_found),
        help("Run with --list to see the available skills")
    )]
    BundleNotFound { name: String },

    // Target errors
    #[error("Skill '{name}' is not installed in {target}")]
    #[diagnostic(code(skill_install::target::not_installed))]
    NotInstalled { name: String, target: String },

    #[error("Could not determine the home directory")]
    #[diagnostic(code(skill_install::target::no_home))]
    HomeDirNotFound,

    // Argument errors
    #[error("Missing argument: {message}")]
    #[diagnostic(code(skill_install::cli::missing_argument))]
    MissingArgument { message: String },

    #[error("Unknown option: {option}")]
    #[diagnostic(
        code(skill_install::cli::unknown_option),
        help("Run with --help to see the supported options")
    )]
    UnknownOption { option: String },

    #[error("Invalid repository '{value}': expected OWNER/NAME")]
    #[diagnostic(code(skill_install::config::invalid_repository))]
    InvalidRepository { value: String },

    // Menu errors
    #[error("Invalid selection: {input}")]
    #[diagnostic(
        code(skill_install::menu::invalid_selection),
        help("Enter numbers from the list separated by spaces, 'a' for all or 'q' to quit")
    )]
    InvalidSelection { input: String },

    #[error("No skills given and no terminal available for interactive selection")]
    #[diagnostic(
        code(skill_install::menu::no_selection),
        help("Pass the skill names as arguments")
    )]
    NoSelection,

    // File system errors
    #[error("Failed to extract archive: {message}")]
    #[diagnostic(code(skill_install::fs::archive))]
    Archive { message: String },

    #[error("Cannot copy {origin} to {destination}: the paths overlap")]
    #[diagnostic(
        code(skill_install::fs::overlapping_paths),
        help("Run skill-install from outside the skill's source directory")
    )]
    OverlappingPaths { origin: String, destination: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(skill_install::fs::io_error))]
    Io { message: String },
}

impl From<std::io::Error> for SkillError {
    fn from(err: std::io::Error) -> Self {
        SkillError::Io {
            message: err.to_string(),
        }
    }
}

impl From<walkdir::Error> for SkillError {
    fn from(err: walkdir::Error) -> Self {
        SkillError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SkillError>;
