//! Fixed user-facing text in the two supported languages.

use std::fmt;

/// Language of the user-facing text. Portuguese is the original UI language.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Locale {
    #[default]
    Pt,
    En,
}

impl Locale {
    pub fn title(self) -> &'static str {
        match self {
            Locale::Pt => "Classificador de sentimentos",
            Locale::En => "Sentiment classifier",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Locale::Pt => "Digite um tweet:",
            Locale::En => "Enter a tweet:",
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            Locale::Pt => "Analisar",
            Locale::En => "Analyze",
        }
    }

    pub fn quit(self) -> &'static str {
        match self {
            Locale::Pt => "Sair",
            Locale::En => "Quit",
        }
    }

    /// Shown when either artifact file is missing
    pub fn unavailable(self) -> &'static str {
        match self {
            Locale::Pt => "Modelo ou vetor não foram encontrados. Certifique-se de que os arquivos model e vectorizer estão na raiz do projeto.",
            Locale::En => "Model or vectorizer not found. Make sure the model and vectorizer files are in the project root.",
        }
    }

    /// Shown when the action fires with blank input
    pub fn blank_input(self) -> &'static str {
        match self {
            Locale::Pt => "Por favor, insira um texto para análise.",
            Locale::En => "Please enter text to analyze.",
        }
    }

    pub fn success(self, label: &str) -> String {
        match self {
            Locale::Pt => format!("Sentimento: {}", label),
            Locale::En => format!("Sentiment: {}", label),
        }
    }

    pub fn fault(self, details: &str) -> String {
        match self {
            Locale::Pt => format!("Falha ao analisar o texto: {}", details),
            Locale::En => format!("Failed to analyze text: {}", details),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Pt => write!(f, "pt"),
            Locale::En => write!(f, "en"),
        }
    }
}
