//! The month data join.
//!
//! [`DataJoinController`] issues the four month fetches concurrently, waits for all
//! of them, and only then runs the reconciliation pipeline. A generation counter
//! guards against a slow fetch for an old selection overwriting the result of a
//! newer one.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::calculation::{MonthSnapshot, reconcile_month};
use crate::config::AttendancePolicy;
use crate::error::EngineResult;
use crate::models::{AttendanceSheet, MonthPeriod, Viewer};

use super::source::{AttendanceSource, SourceKind, SourceStatus};

/// Per-source outcome of one fetch round.
pub type SourceStatuses = BTreeMap<SourceKind, SourceStatus>;

/// The controller's lifecycle.
///
/// `Idle → FetchingAll → (PartialFailure | AllResolved) → Computed`. A new refresh
/// always restarts from `FetchingAll`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinState {
    /// No refresh has started yet.
    Idle,
    /// The fetches for `period` are outstanding.
    FetchingAll {
        /// The selected month.
        period: MonthPeriod,
        /// The refresh that owns this state.
        generation: u64,
        /// Every source starts `Pending` and is updated as its fetch settles.
        sources: SourceStatuses,
    },
    /// At least one fetch failed. No authoritative sheet exists for `period`.
    PartialFailure {
        /// The selected month.
        period: MonthPeriod,
        /// Which sources resolved and which failed.
        sources: SourceStatuses,
    },
    /// Every fetch resolved; the pipeline is running.
    AllResolved {
        /// The selected month.
        period: MonthPeriod,
    },
    /// The sheet for `period` is ready.
    Computed {
        /// The selected month.
        period: MonthPeriod,
        /// The authoritative result.
        sheet: AttendanceSheet,
    },
}

impl JoinState {
    /// The month this state refers to, if any.
    pub fn period(&self) -> Option<MonthPeriod> {
        match self {
            JoinState::Idle => None,
            JoinState::FetchingAll { period, .. }
            | JoinState::PartialFailure { period, .. }
            | JoinState::AllResolved { period }
            | JoinState::Computed { period, .. } => Some(*period),
        }
    }

    /// The authoritative sheet, only once computed.
    pub fn sheet(&self) -> Option<&AttendanceSheet> {
        match self {
            JoinState::Computed { sheet, .. } => Some(sheet),
            _ => None,
        }
    }
}

/// What a call to [`DataJoinController::refresh`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// All four sources resolved and the sheet is authoritative.
    Computed(AttendanceSheet),
    /// Some sources failed.
    ///
    /// When employees and reports both resolved, `provisional` holds a sheet
    /// computed with the failed leave or calendar inputs treated as empty. It must
    /// not be presented as final.
    Degraded {
        /// Which sources resolved and which failed.
        sources: SourceStatuses,
        /// A non-authoritative sheet, if one could be computed.
        provisional: Option<AttendanceSheet>,
    },
    /// A newer refresh started while this one was fetching; nothing was applied.
    Stale {
        /// The generation of the discarded refresh.
        generation: u64,
    },
}

impl JoinOutcome {
    /// The authoritative sheet, if the refresh computed one.
    pub fn sheet(&self) -> Option<&AttendanceSheet> {
        match self {
            JoinOutcome::Computed(sheet) => Some(sheet),
            _ => None,
        }
    }

    /// Returns true if the refresh was superseded.
    pub fn is_stale(&self) -> bool {
        matches!(self, JoinOutcome::Stale { .. })
    }
}

/// Joins the four month sources and reconciles the result for one viewer.
pub struct DataJoinController<S: AttendanceSource> {
    source: Arc<S>,
    viewer: Viewer,
    policy: AttendancePolicy,
    generation: AtomicU64,
    state: RwLock<JoinState>,
}

impl<S: AttendanceSource> DataJoinController<S> {
    /// Creates an idle controller.
    pub fn new(source: Arc<S>, viewer: Viewer, policy: AttendancePolicy) -> Self {
        Self {
            source,
            viewer,
            policy,
            generation: AtomicU64::new(0),
            state: RwLock::new(JoinState::Idle),
        }
    }

    /// Refreshes the sheet for `period`.
    ///
    /// The four fetches run concurrently and the pipeline only runs after all of
    /// them settle. If another refresh starts before this one settles, this one
    /// returns [`JoinOutcome::Stale`] and leaves the state alone.
    pub async fn refresh(&self, period: MonthPeriod, today: NaiveDate) -> JoinOutcome {
        let generation = {
            let mut state = self.state.write().await;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = JoinState::FetchingAll {
                period,
                generation,
                sources: SourceKind::ALL
                    .into_iter()
                    .map(|kind| (kind, SourceStatus::Pending))
                    .collect(),
            };
            generation
        };
        debug!(period = %period, generation, "Fetching month sources");

        let (employees, reports, leaves, calendar) = tokio::join!(
            self.track(generation, SourceKind::Employees, self.source.fetch_employees(period)),
            self.track(generation, SourceKind::Reports, self.source.fetch_reports(period)),
            self.track(generation, SourceKind::Leaves, self.source.fetch_leaves(period)),
            self.track(generation, SourceKind::Calendars, self.source.fetch_calendar(period)),
        );

        let mut sources = SourceStatuses::new();
        let employees = settle(SourceKind::Employees, employees, &mut sources);
        let reports = settle(SourceKind::Reports, reports, &mut sources);
        let leaves = settle(SourceKind::Leaves, leaves, &mut sources);
        let calendar = settle(SourceKind::Calendars, calendar, &mut sources);

        let all_resolved = sources.values().all(SourceStatus::is_resolved);
        {
            let mut state = self.state.write().await;
            if self.is_superseded(generation) {
                debug!(period = %period, generation, "Discarding stale month fetch");
                return JoinOutcome::Stale { generation };
            }
            *state = if all_resolved {
                JoinState::AllResolved { period }
            } else {
                JoinState::PartialFailure {
                    period,
                    sources: sources.clone(),
                }
            };
        }

        let (Some(employees), Some(reports)) = (employees, reports) else {
            warn!(period = %period, "Employees or reports unavailable, no sheet computed");
            return JoinOutcome::Degraded {
                sources,
                provisional: None,
            };
        };

        let leaves_resolved = leaves.is_some();
        let calendars_resolved = calendar.is_some();
        let snapshot = MonthSnapshot {
            employees,
            reports,
            leaves: leaves.unwrap_or_default(),
            calendar: calendar.unwrap_or_default(),
        };
        let sheet = reconcile_month(&snapshot, period, &self.viewer, today, &self.policy);

        if !all_resolved {
            if self.is_superseded(generation) {
                debug!(period = %period, generation, "Discarding stale provisional sheet");
                return JoinOutcome::Stale { generation };
            }
            warn!(
                period = %period,
                leaves_resolved,
                calendars_resolved,
                "Computed provisional sheet from partial sources"
            );
            return JoinOutcome::Degraded {
                sources,
                provisional: Some(sheet),
            };
        }

        let mut state = self.state.write().await;
        if self.is_superseded(generation) {
            debug!(period = %period, generation, "Discarding stale month result");
            return JoinOutcome::Stale { generation };
        }
        *state = JoinState::Computed {
            period,
            sheet: sheet.clone(),
        };
        info!(
            period = %period,
            generation,
            employees = sheet.summaries.len(),
            "Month sheet computed"
        );
        JoinOutcome::Computed(sheet)
    }

    /// A snapshot of the current state.
    pub async fn state(&self) -> JoinState {
        self.state.read().await.clone()
    }

    /// The generation of the most recently started refresh (0 before the first).
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// The viewer this controller reconciles for.
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Awaits one fetch and records its status while the owning refresh is current.
    async fn track<T>(
        &self,
        generation: u64,
        kind: SourceKind,
        fetch: impl Future<Output = EngineResult<T>>,
    ) -> EngineResult<T> {
        let result = fetch.await;
        let mut state = self.state.write().await;
        if self.is_superseded(generation) {
            return result;
        }
        if let JoinState::FetchingAll { sources, .. } = &mut *state {
            sources.insert(kind, status_of(&result));
        }
        result
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }
}

fn status_of<T>(result: &EngineResult<T>) -> SourceStatus {
    match result {
        Ok(_) => SourceStatus::Resolved,
        Err(err) => SourceStatus::Failed {
            message: err.to_string(),
        },
    }
}

fn settle<T>(kind: SourceKind, result: EngineResult<T>, sources: &mut SourceStatuses) -> Option<T> {
    sources.insert(kind, status_of(&result));
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(source = %kind, error = %err, "Month source failed");
            None
        }
    }
}
