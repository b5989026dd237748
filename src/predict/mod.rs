//! Adaptive bigram predictor: next-word and completion suggestions learned from
//! committed text.

mod predictor;
mod store;
mod table;

pub use predictor::{ObserveReport, Predictor, SharedPredictor, Suggestion, MAX_SUGGESTIONS};
pub use store::{load_model, read_model, JsonModelStore, ModelLoadStatus, PersistRequest};
pub use table::BigramTable;
