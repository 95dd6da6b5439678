mod artifact;
mod degradation_event;
mod feedback;
mod identification;
mod nlp;
mod pattern;

pub use artifact::{cache_key, Artifact};
pub use degradation_event::DegradationEvent;
pub use feedback::{CorpusRecord, FeedbackExport, FeedbackRecord, RankedQuery};
pub use identification::{FusionBreakdown, Identification};
pub use nlp::{content_lemmas, Entity, EntityLabel, NlpToken};
pub use pattern::Pattern;
