//! Single-slot arbiter for the question currently shown to the player.

use tracing::debug;

use crate::listeners::{ListenerId, Listeners};
use crate::question::{
    AnswerCallback, QuestionError, QuestionHandler, QuestionResult, TriviaQuestion,
};

/// Kind of change reported to question controller listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionUpdate {
    NewQuestion,
    AnsweredCorrectly,
    AnsweredIncorrectly,
    Cancelled,
}

impl From<QuestionResult> for QuestionUpdate {
    fn from(result: QuestionResult) -> Self {
        match result {
            QuestionResult::Correct => QuestionUpdate::AnsweredCorrectly,
            QuestionResult::Incorrect => QuestionUpdate::AnsweredIncorrectly,
            QuestionResult::Cancelled => QuestionUpdate::Cancelled,
        }
    }
}

pub type QuestionListener = dyn FnMut(QuestionUpdate, &QuestionController);

#[derive(Debug)]
struct ActiveQuestion {
    question: TriviaQuestion,
    callback: AnswerCallback,
}

/// Holds at most one outstanding question, grades answers and reports the
/// outcome back to whoever asked.
#[derive(Debug, Default)]
pub struct QuestionController {
    active: Option<ActiveQuestion>,
    listeners: Listeners<QuestionListener>,
}

impl QuestionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_question(&self) -> bool {
        self.active.is_some()
    }

    /// The outstanding question, if any.
    pub fn question(&self) -> Option<&TriviaQuestion> {
        self.active.as_ref().map(|active| &active.question)
    }

    pub fn add_listener(
        &mut self,
        listener: impl FnMut(QuestionUpdate, &QuestionController) + 'static,
    ) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Grades `input` against the outstanding question and resolves it.
    pub fn answer_question(&mut self, input: &str) -> Result<QuestionResult, QuestionError> {
        let active = self.active.as_ref().ok_or(QuestionError::NoActiveQuestion)?;
        let result = if active.question.is_correct(input) {
            QuestionResult::Correct
        } else {
            QuestionResult::Incorrect
        };

        self.resolve(result)?;
        Ok(result)
    }

    /// Abandons the outstanding question.
    pub fn cancel_question(&mut self) -> Result<(), QuestionError> {
        self.resolve(QuestionResult::Cancelled)
    }

    fn resolve(&mut self, result: QuestionResult) -> Result<(), QuestionError> {
        let active = self.active.take().ok_or(QuestionError::NoActiveQuestion)?;
        debug!(%result, question = active.question.question(), "question resolved");

        active.callback.call(result);
        self.notify(result.into());
        Ok(())
    }

    fn notify(&mut self, update: QuestionUpdate) {
        let mut listeners = self.listeners.detach();
        listeners.for_each(|listener| listener(update, self));
        self.listeners.reattach(listeners);
    }
}

impl QuestionHandler for QuestionController {
    fn ask_question(
        &mut self,
        question: TriviaQuestion,
        callback: AnswerCallback,
    ) -> Result<(), QuestionError> {
        if self.active.is_some() {
            debug!(question = question.question(), "rejecting question while busy");
            return Err(QuestionError::Rejected);
        }

        self.active = Some(ActiveQuestion { question, callback });
        self.notify(QuestionUpdate::NewQuestion);
        Ok(())
    }
}
