use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One row of `GET /sectors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorRecord {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
}

impl SectorRecord {
    pub fn new(id: i64, parent_id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorNode {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub children: Vec<SectorNode>,
}

impl From<SectorRecord> for SectorNode {
    fn from(record: SectorRecord) -> Self {
        Self {
            id: record.id,
            parent_id: record.parent_id,
            name: record.name,
            children: Vec::new(),
        }
    }
}

/// A sector ready for a select list: `name` already carries the depth prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySector {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub depth: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// The API has been seen to hand out numeric ids; keep them as text either way.
impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => SessionId(s),
            RawId::Number(n) => SessionId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    SessionActive(SessionId),
}

impl SessionState {
    pub fn session_id(&self) -> Option<&SessionId> {
        match self {
            SessionState::NoSession => None,
            SessionState::SessionActive(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub username: String,
    pub agree_of_terms: bool,
    pub selected_sectors: BTreeSet<i64>,
    pub submitted_at: Option<DateTime<Local>>,
    pub errors: Vec<String>,
}

/// Request body of the create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub username: String,
    pub is_agree_of_terms: bool,
    pub sectors: Vec<i64>,
}

impl From<&FormState> for SubmissionPayload {
    fn from(state: &FormState) -> Self {
        Self {
            username: state.username.clone(),
            is_agree_of_terms: state.agree_of_terms,
            sectors: state.selected_sectors.iter().copied().collect(),
        }
    }
}

/// Body of `GET /submission/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionValues {
    pub username: String,
    pub sectors: Vec<i64>,
    pub is_agree_of_terms: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedSubmission {
    pub session_id: SessionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_accepts_string_and_number() {
        let created: CreatedSubmission =
            serde_json::from_str(r#"{"session_id": "abc123"}"#).unwrap();
        assert_eq!(created.session_id.as_str(), "abc123");

        let created: CreatedSubmission = serde_json::from_str(r#"{"session_id": 42}"#).unwrap();
        assert_eq!(created.session_id, SessionId::from("42"));
    }

    #[test]
    fn test_session_state_session_id() {
        assert_eq!(SessionState::NoSession.session_id(), None);
        let active = SessionState::SessionActive(SessionId::from("s1"));
        assert_eq!(active.session_id().map(SessionId::as_str), Some("s1"));
    }

    #[test]
    fn test_payload_from_state_sorts_sectors() {
        let state = FormState {
            username: "Mari".to_string(),
            agree_of_terms: true,
            selected_sectors: [19, 3, 7].into_iter().collect(),
            ..Default::default()
        };

        let payload = SubmissionPayload::from(&state);
        assert_eq!(payload.sectors, vec![3, 7, 19]);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "username": "Mari",
                "is_agree_of_terms": true,
                "sectors": [3, 7, 19]
            })
        );
    }

    #[test]
    fn test_sector_record_null_parent() {
        let records: Vec<SectorRecord> = serde_json::from_str(
            r#"[{"id": 1, "parent_id": null, "name": "Manufacturing"},
                {"id": 19, "parent_id": 1, "name": "Construction materials"}]"#,
        )
        .unwrap();
        assert_eq!(records[0].parent_id, None);
        assert_eq!(records[1].parent_id, Some(1));
    }
}
