pub mod flatten;
pub mod form;
pub mod sector_tree;
pub mod session;

pub use crate::domain::model::{DisplaySector, FormState, SectorNode, SectorRecord, SessionId};
pub use crate::domain::ports::{ConfigProvider, KeyValueStorage, SubmissionApi};
pub use crate::utils::error::Result;
