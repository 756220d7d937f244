/// Aggregation Engine
///
/// Turns approved submissions into finalized semester results. Every run is a
/// full recomputation from the approved submissions of one student key, so
/// replaying an approval (or running two concurrently) converges on the same
/// result.
///
/// Runs for the same key are serialized through a per-key lock and each write
/// happens inside a single transaction. Notifications are sent only after the
/// transaction commits.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

use crate::eligibility::{Eligibility, classify, classify_lowest};
use crate::error::{DomainError, DomainResult};
use crate::events::{ResultEvent, ResultNotification};
use crate::models::StudentKey;
use crate::models::result::{Model as ResultModel, ResultFields, SubjectMark};
use crate::models::submission::{Model as SubmissionModel, SubmissionStatus};

/// Outcome of aggregating one student key.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// The stored result, present only once the key is complete.
    pub result: Option<ResultModel>,
    pub complete: bool,
}

impl Aggregation {
    fn incomplete() -> Self {
        Self {
            result: None,
            complete: false,
        }
    }
}

/// A submission approval together with the aggregation it triggered.
#[derive(Debug, Clone, PartialEq)]
pub struct Approval {
    pub submission: SubmissionModel,
    pub aggregation: Aggregation,
}

/// One validated row of a bulk import, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedResult {
    pub key: StudentKey,
    pub student_name: String,
    pub student_email: String,
    pub subjects: Vec<SubjectMark>,
    pub attendance_percent: i32,
}

type KeyLock = Arc<Mutex<()>>;

pub struct AggregationEngine {
    db: DatabaseConnection,
    /// Distinct approved subjects a key needs before a result is written.
    expected_subject_count: usize,
    /// One lock per key with an aggregation in flight.
    key_locks: Mutex<HashMap<StudentKey, KeyLock>>,
    /// Post-commit event sink; `None` disables notifications.
    events: Option<mpsc::UnboundedSender<ResultEvent>>,
}

impl AggregationEngine {
    pub fn new(db: DatabaseConnection, expected_subject_count: usize) -> Self {
        Self {
            db,
            expected_subject_count: expected_subject_count.max(1),
            key_locks: Mutex::new(HashMap::new()),
            events: None,
        }
    }

    /// Attaches the channel finalized results are announced on.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<ResultEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn expected_subject_count(&self) -> usize {
        self.expected_subject_count
    }

    /// Approves a pending submission and aggregates its key.
    ///
    /// Approving an already approved submission re-runs the aggregation, which
    /// is harmless.
    pub async fn approve(&self, submission_id: i64) -> DomainResult<Approval> {
        let submission =
            SubmissionModel::set_status(&self.db, submission_id, SubmissionStatus::Approved)
                .await?;
        let aggregation = self.on_approval(submission.id).await?;

        Ok(Approval {
            submission,
            aggregation,
        })
    }

    pub async fn reject(&self, submission_id: i64) -> DomainResult<SubmissionModel> {
        self.on_rejection(submission_id).await
    }

    /// Recomputes the result for the key of an approved submission.
    ///
    /// Safe to call again after any failure; nothing is written until the key
    /// is complete.
    pub async fn on_approval(&self, submission_id: i64) -> DomainResult<Aggregation> {
        let submission = SubmissionModel::find_by_id(&self.db, submission_id)
            .await?
            .ok_or_else(|| DomainError::submission_not_found(submission_id))?;

        if submission.status != SubmissionStatus::Approved {
            return Err(DomainError::InvalidTransition(format!(
                "submission {submission_id} is {}, not approved",
                submission.status
            )));
        }

        let key = submission.key();
        let lock = self.key_lock(&key).await;
        let outcome = {
            let _guard = lock.lock().await;
            self.aggregate(&key).await
        };
        self.release_key_lock(&key, lock).await;

        let aggregation = outcome?;
        if let Some(result) = &aggregation.result {
            self.emit(ResultEvent::Finalized(ResultNotification::from(result)));
        }

        Ok(aggregation)
    }

    /// Rejects a submission. Results are never touched by a rejection.
    pub async fn on_rejection(&self, submission_id: i64) -> DomainResult<SubmissionModel> {
        let submission =
            SubmissionModel::set_status(&self.db, submission_id, SubmissionStatus::Rejected)
                .await?;
        debug!(
            submission_id,
            key = %submission.key(),
            "Submission rejected; result left unchanged"
        );
        Ok(submission)
    }

    /// Writes bulk-imported results through the same upsert path as aggregation.
    ///
    /// The batch is a single transaction: either every row is stored or none is.
    /// Each row must carry exactly `expected_subject_count` subjects.
    pub async fn import_results(
        &self,
        rows: Vec<ImportedResult>,
    ) -> DomainResult<Vec<ResultModel>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(row) = rows
            .iter()
            .find(|row| row.subjects.len() != self.expected_subject_count)
        {
            return Err(DomainError::Validation(format!(
                "Import lists {} subjects; each result needs exactly {}",
                row.subjects.len(),
                self.expected_subject_count
            )));
        }

        // Ordered acquisition so two imports can never wait on each other.
        let keys: BTreeSet<StudentKey> = rows.iter().map(|row| row.key.clone()).collect();
        let mut locks = Vec::with_capacity(keys.len());
        for key in &keys {
            locks.push((key.clone(), self.key_lock(key).await));
        }

        let outcome = {
            let mut guards = Vec::with_capacity(locks.len());
            for (_, lock) in &locks {
                guards.push(lock.lock().await);
            }
            self.write_imported(rows).await
        };

        for (key, lock) in locks {
            self.release_key_lock(&key, lock).await;
        }

        let stored = outcome?;
        info!("Imported {} results", stored.len());
        Ok(stored)
    }

    async fn write_imported(&self, rows: Vec<ImportedResult>) -> DomainResult<Vec<ResultModel>> {
        let txn = self.db.begin().await?;
        let mut stored = Vec::with_capacity(rows.len());

        for row in rows {
            let fields = ResultFields::compute(
                row.student_name,
                row.student_email,
                row.subjects,
                classify(row.attendance_percent),
                self.expected_subject_count,
            );
            stored.push(ResultModel::upsert(&txn, &row.key, fields).await?);
        }

        txn.commit().await?;
        Ok(stored)
    }

    /// Steps that must see a consistent view of the key: read, derive, write.
    async fn aggregate(&self, key: &StudentKey) -> DomainResult<Aggregation> {
        let txn = self.db.begin().await?;

        let approved =
            SubmissionModel::list_by_key(&txn, key, Some(SubmissionStatus::Approved)).await?;
        let contributing = latest_per_subject(approved);

        if contributing.len() < self.expected_subject_count {
            debug!(
                key = %key,
                subjects = contributing.len(),
                expected = self.expected_subject_count,
                "Result incomplete; nothing written"
            );
            txn.commit().await?;
            return Ok(Aggregation::incomplete());
        }

        let eligibility = classify_lowest(contributing.iter().map(|s| s.attendance_percent))
            .unwrap_or(Eligibility::NotEligible);

        // Contact details follow the most recently approved submission.
        let (student_name, student_email) = contributing
            .iter()
            .max_by_key(|s| (s.approved_at, s.id))
            .map(|s| (s.student_name.clone(), s.student_email.clone()))
            .unwrap_or_default();

        let subjects = contributing
            .into_iter()
            .map(|s| SubjectMark {
                subject_name: s.subject_name,
                marks: s.marks,
            })
            .collect();

        let fields = ResultFields::compute(
            student_name,
            student_email,
            subjects,
            eligibility,
            self.expected_subject_count,
        );
        let result = ResultModel::upsert(&txn, key, fields).await?;
        txn.commit().await?;

        info!(
            key = %key,
            result_id = result.id,
            total = result.total_marks,
            pass_status = %result.pass_status,
            "Result finalized"
        );

        Ok(Aggregation {
            result: Some(result),
            complete: true,
        })
    }

    fn emit(&self, event: ResultEvent) {
        let Some(events) = &self.events else {
            debug!("No event channel attached; skipping {}", event.event_type());
            return;
        };

        if let Err(err) = events.send(event) {
            warn!(
                "Dropping {} event for {}: dispatcher has shut down",
                err.0.event_type(),
                err.0.notification().key()
            );
        }
    }

    async fn key_lock(&self, key: &StudentKey) -> KeyLock {
        let mut locks = self.key_locks.lock().await;
        locks.entry(key.clone()).or_default().clone()
    }

    /// Drops the table entry once no other task holds or waits on it.
    async fn release_key_lock(&self, key: &StudentKey, lock: KeyLock) {
        drop(lock);
        let mut locks = self.key_locks.lock().await;
        let idle = locks
            .get(key)
            .is_some_and(|entry| Arc::strong_count(entry) == 1);
        if idle {
            locks.remove(key);
        }
    }
}

/// Keeps one submission per subject: the latest approved one wins, ordered by
/// `approved_at` then `id`. Each subject stays at the position where it was
/// first approved.
pub fn latest_per_subject(mut approved: Vec<SubmissionModel>) -> Vec<SubmissionModel> {
    approved.sort_by_key(|s| (s.approved_at, s.id));

    let mut order: Vec<String> = Vec::new();
    let mut latest: HashMap<String, SubmissionModel> = HashMap::new();

    for submission in approved {
        if !latest.contains_key(&submission.subject_name) {
            order.push(submission.subject_name.clone());
        }
        latest.insert(submission.subject_name.clone(), submission);
    }

    order
        .into_iter()
        .filter_map(|subject| latest.remove(&subject))
        .collect()
}
