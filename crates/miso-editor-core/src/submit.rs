//! Article form submission gate errors and outcome.

use miette::Diagnostic;

use crate::platform::PlatformError;

/// Why an article submission was blocked.
///
/// All variants are terminal for the current submit: nothing is written to
/// the form and the user has to fix the content and try again.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Trimmed article text is shorter than the minimum.
    #[error("article too short: {len} characters, at least {min} required")]
    #[diagnostic(
        code(miso::submit::too_short),
        help("write at least {min} characters before publishing")
    )]
    TooShort { len: usize, min: usize },

    /// No category selected.
    #[error("no category selected")]
    #[diagnostic(
        code(miso::submit::missing_category),
        help("pick a category for the article")
    )]
    MissingCategory,

    /// The hidden content field could not be written.
    #[error("could not write article content: {0}")]
    #[diagnostic(code(miso::submit::platform))]
    Platform(#[from] PlatformError),
}

impl SubmitError {
    /// Alert text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::TooShort { min, .. } => {
                format!("Veuillez écrire un article plus long (au moins {min} caractères)")
            }
            SubmitError::MissingCategory => "Veuillez sélectionner une catégorie".to_string(),
            SubmitError::Platform(_) => {
                "Impossible d'enregistrer l'article, veuillez réessayer".to_string()
            }
        }
    }
}

/// A submission that passed the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Sanitized markup written to the hidden field.
    pub content: String,
    pub category: String,
}
