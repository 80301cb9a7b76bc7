//! Shuffled question pool used as the maze generator's question source.

use maze_core::{
    ErrorSeverity, GameError, PcgRng, QuestionSource, RngOracle, TriviaQuestion, compute_seed,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("question pool needs at least one question")]
    Empty,
}

impl GameError for PoolError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            PoolError::Empty => "POOL_EMPTY",
        }
    }
}

/// Hands out questions in shuffled order, reshuffling once every question has
/// been used.
#[derive(Debug, Clone)]
pub struct QuestionPool {
    questions: Vec<TriviaQuestion>,
    next: usize,
    seed: u64,
    round: u64,
}

impl QuestionPool {
    pub fn new(questions: Vec<TriviaQuestion>, seed: u64) -> Result<Self, PoolError> {
        if questions.is_empty() {
            return Err(PoolError::Empty);
        }

        let mut pool = Self {
            questions,
            next: 0,
            seed,
            round: 0,
        };
        pool.shuffle();
        Ok(pool)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Never true for a constructed pool.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.questions.len() - self.next
    }

    /// Fisher-Yates over the deterministic RNG; each round gets fresh rolls.
    fn shuffle(&mut self) {
        let rng = PcgRng;
        for i in (1..self.questions.len()).rev() {
            let roll = compute_seed(self.seed, self.round, i as u32, 0);
            let j = rng.range(roll, 0, i as u32) as usize;
            self.questions.swap(i, j);
        }
        debug!(round = self.round, questions = self.questions.len(), "shuffled question pool");
    }
}

impl QuestionSource for QuestionPool {
    fn next_question(&mut self) -> TriviaQuestion {
        let question = self.questions[self.next].clone();
        self.next += 1;

        if self.next >= self.questions.len() {
            self.round += 1;
            self.next = 0;
            self.shuffle();
        }
        question
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::QuestionType;
    use std::collections::HashSet;

    fn numbered(count: usize) -> Vec<TriviaQuestion> {
        (0..count)
            .map(|i| TriviaQuestion::new(format!("q{i}"), i.to_string(), QuestionType::ShortAnswer))
            .collect()
    }

    #[test]
    fn rejects_empty_pool() {
        assert_eq!(QuestionPool::new(Vec::new(), 1).unwrap_err(), PoolError::Empty);
    }

    #[test]
    fn every_question_once_per_round() {
        let mut pool = QuestionPool::new(numbered(10), 99).unwrap();

        for _ in 0..3 {
            let round: HashSet<_> = (0..10).map(|_| pool.next_question()).collect();
            assert_eq!(round.len(), 10);
            assert_eq!(pool.remaining(), 10);
        }
    }

    #[test]
    fn same_seed_same_order() {
        let mut a = QuestionPool::new(numbered(8), 5).unwrap();
        let mut b = QuestionPool::new(numbered(8), 5).unwrap();

        for _ in 0..20 {
            assert_eq!(a.next_question(), b.next_question());
        }
    }

    #[test]
    fn single_question_repeats() {
        let mut pool = QuestionPool::new(numbered(1), 0).unwrap();

        assert_eq!(pool.next_question().question(), "q0");
        assert_eq!(pool.next_question().question(), "q0");
        assert_eq!(pool.len(), 1);
        assert!(!pool.is_empty());
    }
}
