//! Question catalog loader.

use std::path::Path;

use maze_core::TriviaQuestion;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const BUILTIN_CATALOG: &str = include_str!("../../data/questions.ron");

/// Question catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCatalog {
    pub questions: Vec<TriviaQuestion>,
}

/// Loader for question catalogs from RON files.
pub struct QuestionLoader;

impl QuestionLoader {
    /// Load a question catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a QuestionCatalog
    ///
    /// # Returns
    ///
    /// Returns the questions in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<TriviaQuestion>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<TriviaQuestion>> {
        let catalog: QuestionCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse question catalog RON: {}", e))?;

        Ok(catalog.questions)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> LoadResult<Vec<TriviaQuestion>> {
        Self::parse(BUILTIN_CATALOG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::QuestionType;

    #[test]
    fn builtin_catalog_parses() {
        let questions = QuestionLoader::builtin().unwrap();

        assert!(questions.len() >= 20);
        assert!(questions.iter().all(|q| !q.question().is_empty() && !q.answer().is_empty()));
        for kind in [QuestionType::MultipleChoice, QuestionType::TrueFalse, QuestionType::ShortAnswer] {
            assert!(questions.iter().any(|q| q.kind() == kind), "no {kind} question");
        }
    }

    #[test]
    fn parses_inline_catalog() {
        let questions = QuestionLoader::parse(
            r#"(questions: [(question: "Capital of France?", answer: "Paris", kind: ShortAnswer)])"#,
        )
        .unwrap();

        assert_eq!(
            questions,
            vec![TriviaQuestion::new("Capital of France?", "Paris", QuestionType::ShortAnswer)]
        );
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let result = QuestionLoader::parse(r#"(questions: [(question: "q", answer: "a", kind: Essay)])"#);
        assert!(result.is_err());
    }
}
