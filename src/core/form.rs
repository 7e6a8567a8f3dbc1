use crate::core::flatten::{flatten_forest, DEFAULT_INDENT_MARKER};
use crate::core::sector_tree::{build_forest, OrphanPolicy};
use crate::core::session::SessionStore;
use crate::domain::model::{
    DisplaySector, FormState, SessionId, SessionState, SubmissionPayload, SubmissionValues,
};
use crate::domain::ports::{KeyValueStorage, SubmissionApi};
use crate::utils::error::{FormError, Result};
use chrono::Local;

pub const USERNAME_REQUIRED: &str = "Name is required.";
pub const SECTORS_REQUIRED: &str = "At least one sectors is required.";
pub const TERMS_REQUIRED: &str = "Agree of terms is required.";

/// Options that shape how the sector list is built and shown.
#[derive(Debug, Clone)]
pub struct SectorOptions {
    pub orphan_policy: OrphanPolicy,
    pub indent_marker: String,
}

impl Default for SectorOptions {
    fn default() -> Self {
        Self {
            orphan_policy: OrphanPolicy::default(),
            indent_marker: DEFAULT_INDENT_MARKER.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; `FormState::errors` says why. Nothing was sent.
    Invalid,
    Created(SessionId),
    Updated(SessionId),
    Failed(FormError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_) | SubmitOutcome::Updated(_))
    }
}

/// Owns the form, the sector list and the session, and talks to the API.
pub struct FormController<A: SubmissionApi, S: KeyValueStorage> {
    api: A,
    session: SessionStore<S>,
    options: SectorOptions,
    state: FormState,
    sectors: Vec<DisplaySector>,
}

impl<A: SubmissionApi, S: KeyValueStorage> FormController<A, S> {
    pub fn new(api: A, session: SessionStore<S>) -> Self {
        Self::with_options(api, session, SectorOptions::default())
    }

    pub fn with_options(api: A, session: SessionStore<S>, options: SectorOptions) -> Self {
        Self {
            api,
            session,
            options,
            state: FormState::default(),
            sectors: Vec::new(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.state
    }

    pub fn sectors(&self) -> &[DisplaySector] {
        &self.sectors
    }

    pub fn session_state(&self) -> Result<SessionState> {
        Ok(match self.session.get()? {
            Some(id) => SessionState::SessionActive(id),
            None => SessionState::NoSession,
        })
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.state.username = username.into();
    }

    pub fn set_agree_of_terms(&mut self, agreed: bool) {
        self.state.agree_of_terms = agreed;
    }

    pub fn select_sector(&mut self, id: i64) {
        self.state.selected_sectors.insert(id);
    }

    pub fn deselect_sector(&mut self, id: i64) {
        self.state.selected_sectors.remove(&id);
    }

    pub fn set_selected_sectors(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.state.selected_sectors = ids.into_iter().collect();
    }

    /// Load the sector list, then resume the stored session if there is one.
    /// Failures are logged and leave the corresponding state untouched.
    pub async fn init(&mut self) {
        let _ = self.load_sectors().await;

        match self.session.get() {
            Ok(Some(id)) => {
                let _ = self.load_values_by_session(&id).await;
            }
            Ok(None) => tracing::debug!("No active session"),
            Err(e) => tracing::error!("Failed to read stored session: {}", e),
        }
    }

    pub async fn load_sectors(&mut self) -> Result<usize> {
        match self.fetch_display_sectors().await {
            Ok(sectors) => {
                tracing::info!("Loaded {} sectors", sectors.len());
                self.sectors = sectors;
                Ok(self.sectors.len())
            }
            Err(e) => {
                tracing::error!("Failed to load sectors: {}", e);
                Err(e)
            }
        }
    }

    async fn fetch_display_sectors(&self) -> Result<Vec<DisplaySector>> {
        let records = self.api.fetch_sectors().await?;
        let forest = build_forest(records, self.options.orphan_policy)?;
        Ok(flatten_forest(&forest, &self.options.indent_marker))
    }

    pub async fn load_values_by_session(&mut self, id: &SessionId) -> Result<()> {
        match self.api.fetch_submission(id).await {
            Ok(values) => {
                tracing::debug!("Resumed values for session {}", id);
                self.apply_values(values);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load values for session {}: {}", id, e);
                Err(e)
            }
        }
    }

    fn apply_values(&mut self, values: SubmissionValues) {
        self.state.username = values.username;
        self.state.selected_sectors = values.sectors.into_iter().collect();
        self.state.agree_of_terms = values.is_agree_of_terms;
    }

    /// Presence checks only. Messages come out in username, sectors, terms order.
    pub fn validate(&mut self) -> bool {
        self.state.errors.clear();

        if !self.state.username.is_empty()
            && !self.state.selected_sectors.is_empty()
            && self.state.agree_of_terms
        {
            return true;
        }

        if self.state.username.is_empty() {
            self.state.errors.push(USERNAME_REQUIRED.to_string());
        }
        if self.state.selected_sectors.is_empty() {
            self.state.errors.push(SECTORS_REQUIRED.to_string());
        }
        if !self.state.agree_of_terms {
            self.state.errors.push(TERMS_REQUIRED.to_string());
        }

        self.state.submitted_at = None;
        false
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.validate() {
            tracing::debug!("Submit blocked by {} validation error(s)", self.state.errors.len());
            return SubmitOutcome::Invalid;
        }

        let payload = SubmissionPayload::from(&self.state);

        let session = match self.session_state() {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("Failed to read stored session: {}", e);
                return SubmitOutcome::Failed(e);
            }
        };

        let outcome = match session {
            SessionState::SessionActive(id) => match self.api.update_submission(&id, &payload).await {
                Ok(()) => {
                    tracing::info!("Updated submission for session {}", id);
                    SubmitOutcome::Updated(id)
                }
                Err(e) => {
                    tracing::error!("Failed to update submission {}: {}", id, e);
                    SubmitOutcome::Failed(e)
                }
            },
            SessionState::NoSession => match self.api.create_submission(&payload).await {
                Ok(id) if id.as_str().is_empty() => {
                    tracing::error!("Create submission returned an empty session id");
                    SubmitOutcome::Failed(FormError::InvalidResponse {
                        message: "empty session_id".to_string(),
                    })
                }
                Ok(id) => {
                    tracing::info!("Created submission, session {}", id);
                    if let Err(e) = self.session.set(&id) {
                        tracing::error!("Failed to persist session {}: {}", id, e);
                    }
                    let _ = self.load_values_by_session(&id).await;
                    SubmitOutcome::Created(id)
                }
                Err(e) => {
                    tracing::error!("Failed to create submission: {}", e);
                    SubmitOutcome::Failed(e)
                }
            },
        };

        if outcome.is_success() {
            self.state.submitted_at = Some(Local::now());
        }
        outcome
    }

    /// Reset the form for a new submission. The stored session is kept.
    pub fn init_values(&mut self) {
        self.state = FormState::default();
    }

    pub fn destroy_session(&mut self) -> Result<()> {
        self.session.clear()?;
        self.init_values();
        Ok(())
    }
}
