//! Natural-language generation: relation planning, microplanning,
//! assembly, and the structural linter.

pub mod assemble;
pub mod discourse;
pub mod lint;
pub mod microplan;
pub mod template;

pub use assemble::{Assembler, Drift, ReadingBody};
pub use discourse::{DiscourseRelation, select_relation};
pub use lint::{Criterion, LintReport, lint};
pub use microplan::{ConceptTracker, Lexicon, SentencePlanner, SymbolContent, plan_content};
