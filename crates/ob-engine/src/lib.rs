//! Deterministic reading engine for Observador.
//!
//! A consultation turns a question and a session state into a structured
//! reading: a seeded, weighted three-symbol draw, a discourse relation, a
//! template-assembled argumentative body with an act and a cost, and a
//! structural lint with bounded retry. The same session base, question, and
//! counter always produce the same reading.
//!
//! ```no_run
//! use ob_core::DataSet;
//! use ob_engine::{Oracle, SessionState};
//!
//! let data = DataSet::load_dir(std::path::Path::new("data"))?;
//! let oracle = Oracle::new(data);
//! let out = oracle.consult(&SessionState::new(), "Devo mudar de emprego?")?;
//! println!("{}", out.reading.full_text());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod nlg;
pub mod oracle;
pub mod reading;
pub mod rng;
pub mod seed;
pub mod state;
pub mod taboo;
pub mod topic;

#[cfg(test)]
mod fixtures;

pub use config::EngineConfig;
pub use draw::{Draw, draw_three};
pub use error::{EngineError, EngineResult};
pub use nlg::{Criterion, DiscourseRelation, LintReport};
pub use oracle::{Consultation, Oracle};
pub use reading::{CorrespondenceRow, CorrespondenceTable, ReadingResult, SelectedEvidence};
pub use rng::SeededRng;
pub use seed::{derive_seed, normalize_question};
pub use state::SessionState;
pub use taboo::{TabooVerdict, check_taboos};
pub use topic::TopicExtractor;
