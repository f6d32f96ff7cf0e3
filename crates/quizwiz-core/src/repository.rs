//! Quiz and result repositories over a [`KeyValueStore`].
//!
//! Records are stored as JSON under `quiz:{quizId}` and
//! `result:{quizId}:{userId}`. A record that fails to decode is logged and
//! treated as absent so one bad entry never hides the others.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{QuizError, StoreError};
use crate::model::{AttemptResult, Quiz};
use crate::store::KeyValueStore;

/// Prefix for quiz record keys.
pub const QUIZ_PREFIX: &str = "quiz:";
/// Prefix for result record keys.
pub const RESULT_PREFIX: &str = "result:";

/// Storage key of a quiz.
pub fn quiz_key(quiz_id: &str) -> String {
    format!("{QUIZ_PREFIX}{quiz_id}")
}

/// Storage key of a result. Unique per (quiz, user).
pub fn result_key(quiz_id: &str, user_id: &str) -> String {
    format!("{RESULT_PREFIX}{quiz_id}:{user_id}")
}

/// A record kind that can live in a [`Repository`].
pub trait Record: Serialize + DeserializeOwned {
    /// Human-readable kind, used in logs and `NotFound` errors.
    const KIND: &'static str;
    /// Key prefix shared by every record of this kind.
    const PREFIX: &'static str;

    /// The full storage key of this record.
    fn key(&self) -> String;
}

impl Record for Quiz {
    const KIND: &'static str = "quiz";
    const PREFIX: &'static str = QUIZ_PREFIX;

    fn key(&self) -> String {
        quiz_key(&self.id)
    }
}

impl Record for AttemptResult {
    const KIND: &'static str = "result";
    const PREFIX: &'static str = RESULT_PREFIX;

    fn key(&self) -> String {
        result_key(&self.quiz_id, &self.user_id)
    }
}

/// Typed access to one kind of record in a shared store.
pub struct Repository<R> {
    store: Arc<dyn KeyValueStore>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

/// Repository of published quizzes.
pub type QuizRepository = Repository<Quiz>;
/// Repository of graded attempts.
pub type ResultRepository = Repository<AttemptResult>;

impl<R: Record> Repository<R> {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// The store this repository reads and writes.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Upsert a record. The last write to a key wins.
    pub fn put(&self, record: &R) -> Result<(), QuizError> {
        let key = record.key();
        let json = serde_json::to_string(record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.put(&key, &json)?;
        tracing::debug!(kind = R::KIND, %key, bytes = json.len(), "stored record");
        Ok(())
    }

    /// Read the record at `key`, treating corrupt entries as absent.
    pub fn get_by_key(&self, key: &str) -> Result<Option<R>, QuizError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match decode::<R>(key, &raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!("discarding {}: {e}", R::KIND);
                // Best-effort cleanup.
                if let Err(remove_err) = self.store.remove(key) {
                    tracing::debug!("could not remove corrupt entry {key}: {remove_err}");
                }
                Ok(None)
            }
        }
    }

    /// Scan every record of this kind and keep those matching `predicate`.
    ///
    /// Entries that fail to decode are skipped. Order is unspecified.
    pub fn list<F>(&self, predicate: F) -> Result<Vec<R>, QuizError>
    where
        F: Fn(&R) -> bool,
    {
        let mut records = Vec::new();
        for key in self.store.keys_with_prefix(R::PREFIX)? {
            let Some(raw) = self.store.get(&key)? else {
                continue;
            };
            match decode::<R>(&key, &raw) {
                Ok(record) if predicate(&record) => records.push(record),
                Ok(_) => {}
                Err(e) => tracing::warn!("skipping {}: {e}", R::KIND),
            }
        }
        Ok(records)
    }

    /// Idempotent delete.
    pub fn remove_by_key(&self, key: &str) -> Result<(), QuizError> {
        self.store.remove(key)?;
        tracing::debug!(kind = R::KIND, %key, "removed record");
        Ok(())
    }

    /// Turn an absent lookup into a `NotFound` error.
    pub fn require(&self, key: &str) -> Result<R, QuizError> {
        self.get_by_key(key)?.ok_or_else(|| QuizError::NotFound {
            kind: R::KIND,
            key: key.to_string(),
        })
    }
}

fn decode<R: Record>(key: &str, raw: &str) -> Result<R, QuizError> {
    serde_json::from_str(raw).map_err(|source| QuizError::CorruptRecord {
        key: key.to_string(),
        source,
    })
}

impl Repository<Quiz> {
    pub fn get(&self, quiz_id: &str) -> Result<Option<Quiz>, QuizError> {
        self.get_by_key(&quiz_key(quiz_id))
    }

    /// Every stored quiz.
    pub fn list_all(&self) -> Result<Vec<Quiz>, QuizError> {
        self.list(|_| true)
    }

    /// Quizzes saved by the given instructor.
    pub fn list_by_author(&self, user_id: &str) -> Result<Vec<Quiz>, QuizError> {
        self.list(|q| q.created_by == user_id)
    }

    pub fn remove(&self, quiz_id: &str) -> Result<(), QuizError> {
        self.remove_by_key(&quiz_key(quiz_id))
    }
}

impl Repository<AttemptResult> {
    pub fn get(&self, quiz_id: &str, user_id: &str) -> Result<Option<AttemptResult>, QuizError> {
        self.get_by_key(&result_key(quiz_id, user_id))
    }

    /// Every result recorded for a quiz, one per user.
    pub fn list_for_quiz(&self, quiz_id: &str) -> Result<Vec<AttemptResult>, QuizError> {
        self.list(|r| r.quiz_id == quiz_id)
    }

    /// Every result recorded by a user across quizzes.
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<AttemptResult>, QuizError> {
        self.list(|r| r.user_id == user_id)
    }

    /// Number of users with a stored result for the quiz.
    pub fn attempt_count(&self, quiz_id: &str) -> Result<usize, QuizError> {
        Ok(self.list_for_quiz(quiz_id)?.len())
    }

    pub fn remove(&self, quiz_id: &str, user_id: &str) -> Result<(), QuizError> {
        self.remove_by_key(&result_key(quiz_id, user_id))
    }
}

/// Delete a quiz together with every result recorded for it.
///
/// Returns the number of results removed.
pub fn delete_quiz_cascade(
    quizzes: &QuizRepository,
    results: &ResultRepository,
    quiz_id: &str,
) -> Result<usize, QuizError> {
    // Scan by key so entries that no longer decode are removed too.
    let keys = results
        .store()
        .keys_with_prefix(&format!("{RESULT_PREFIX}{quiz_id}:"))?;
    for key in &keys {
        results.remove_by_key(key)?;
    }
    quizzes.remove(quiz_id)?;
    tracing::info!(quiz_id, results = keys.len(), "deleted quiz");
    Ok(keys.len())
}
