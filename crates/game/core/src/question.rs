//! Trivia questions and the ask/answer protocol between doors and handlers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{ErrorSeverity, GameError};

/// Presentation hint for a question; grading is the same for every kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

/// Immutable question/answer pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriviaQuestion {
    question: String,
    answer: String,
    kind: QuestionType,
}

impl TriviaQuestion {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, kind: QuestionType) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            kind,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn kind(&self) -> QuestionType {
        self.kind
    }

    /// Exact, case- and whitespace-sensitive comparison.
    pub fn is_correct(&self, input: &str) -> bool {
        input == self.answer
    }
}

/// Outcome delivered to the asker once a question is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionResult {
    Correct,
    Incorrect,
    Cancelled,
}

/// Errors raised by the question protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    /// A question is already outstanding; the new one was not accepted.
    #[error("question handler is already busy with another question")]
    Rejected,

    /// Answer or cancel was requested while no question is outstanding.
    #[error("no question is currently being asked")]
    NoActiveQuestion,
}

impl GameError for QuestionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            QuestionError::Rejected | QuestionError::NoActiveQuestion => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            QuestionError::Rejected => "QUESTION_REJECTED",
            QuestionError::NoActiveQuestion => "QUESTION_NONE_ACTIVE",
        }
    }
}

/// One-shot continuation invoked with the result of an asked question.
pub struct AnswerCallback(Box<dyn FnOnce(QuestionResult)>);

impl AnswerCallback {
    pub fn new(callback: impl FnOnce(QuestionResult) + 'static) -> Self {
        Self(Box::new(callback))
    }

    pub fn call(self, result: QuestionResult) {
        (self.0)(result)
    }
}

impl fmt::Debug for AnswerCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnswerCallback")
    }
}

/// Accepts questions on behalf of the player.
///
/// Implemented by [`QuestionController`](crate::QuestionController) and
/// consumed by door controllers.
pub trait QuestionHandler {
    /// Takes ownership of `question` until it is resolved through `callback`.
    ///
    /// Returns [`QuestionError::Rejected`] if another question is outstanding.
    fn ask_question(
        &mut self,
        question: TriviaQuestion,
        callback: AnswerCallback,
    ) -> Result<(), QuestionError>;
}

/// Handler shared by every door of a maze.
pub type SharedQuestionHandler = Rc<RefCell<dyn QuestionHandler>>;

/// Supplies one question per door during maze generation.
pub trait QuestionSource {
    /// Returns the next question. Sources may recycle their pool but never run dry.
    fn next_question(&mut self) -> TriviaQuestion;
}

impl<S: QuestionSource + ?Sized> QuestionSource for Box<S> {
    fn next_question(&mut self) -> TriviaQuestion {
        (**self).next_question()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grading_is_exact() {
        let question =
            TriviaQuestion::new("Capital of France?", "Paris", QuestionType::ShortAnswer);

        assert!(question.is_correct("Paris"));
        assert!(!question.is_correct("paris"));
        assert!(!question.is_correct("Paris "));
    }

    #[test]
    fn callback_receives_result() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let callback = AnswerCallback::new(move |result| *sink.borrow_mut() = Some(result));

        callback.call(QuestionResult::Incorrect);

        assert_eq!(*seen.borrow(), Some(QuestionResult::Incorrect));
    }
}
