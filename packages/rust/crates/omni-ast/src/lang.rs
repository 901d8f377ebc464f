//! Language support for structural matching.
//!
//! Provides the `Lang` enum covering the grammars the documentation
//! pipeline understands, with detection from file extensions.

use std::path::Path;

use crate::error::AstError;
use crate::re_exports::SupportLang;

/// Grammars available to the structural matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    /// TypeScript (`.ts`, `.mts`, `.cts`)
    TypeScript,
    /// TypeScript or JavaScript with JSX (`.tsx`, `.jsx`)
    Tsx,
    /// JavaScript (`.js`, `.mjs`, `.cjs`)
    JavaScript,
    /// Python
    Python,
    /// C# (`.cs`, `.csx`)
    CSharp,
}

impl Lang {
    /// All supported grammars.
    pub const ALL: [Lang; 5] = [
        Self::TypeScript,
        Self::Tsx,
        Self::JavaScript,
        Self::Python,
        Self::CSharp,
    ];

    /// Get the ast-grep language identifier
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::CSharp => "csharp",
        }
    }

    /// The ast-grep parser backing this grammar.
    #[must_use]
    pub fn support_lang(&self) -> SupportLang {
        match self {
            Self::TypeScript => SupportLang::TypeScript,
            Self::Tsx => SupportLang::Tsx,
            Self::JavaScript => SupportLang::JavaScript,
            Self::Python => SupportLang::Python,
            Self::CSharp => SupportLang::CSharp,
        }
    }

    /// Try to detect language from file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        Self::from_extension(&ext)
    }

    /// Try to detect language from extension string
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "jsx" => Some(Self::Tsx),
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "py" => Some(Self::Python),
            "cs" | "csx" => Some(Self::CSharp),
            _ => None,
        }
    }

    /// Get file extensions for this language
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::TypeScript => &["ts", "mts", "cts"],
            Self::Tsx => &["tsx", "jsx"],
            Self::JavaScript => &["js", "mjs", "cjs"],
            Self::Python => &["py"],
            Self::CSharp => &["cs", "csx"],
        }
    }

    /// Every extension accepted by some grammar.
    pub fn all_extensions() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().flat_map(|lang| lang.extensions().iter().copied())
    }
}

impl TryFrom<&str> for Lang {
    type Error = AstError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "ts" | "typescript" => Ok(Self::TypeScript),
            "tsx" | "jsx" => Ok(Self::Tsx),
            "js" | "javascript" => Ok(Self::JavaScript),
            "py" | "python" => Ok(Self::Python),
            "cs" | "csharp" | "c#" => Ok(Self::CSharp),
            _ => Err(AstError::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_extension_round_trips() {
        for lang in Lang::ALL {
            for ext in lang.extensions() {
                assert_eq!(Lang::from_extension(ext), Some(lang));
            }
        }
    }

    #[test]
    fn test_from_path_is_case_insensitive() {
        assert_eq!(
            Lang::from_path(Path::new("src/Program.CS")),
            Some(Lang::CSharp)
        );
        assert_eq!(Lang::from_path(Path::new("Makefile")), None);
    }
}
