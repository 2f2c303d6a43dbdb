//! Tagger core: pure wizard state machine, long-URL builder and view-model helpers.
mod config;
mod effect;
mod form;
mod msg;
mod state;
mod step;
mod update;
mod url_builder;
mod view_model;

pub use config::{Capabilities, OptionCatalog, WizardConfig};
pub use effect::Effect;
pub use form::{Field, FlowVariant, FormState, Param, SuggestField};
pub use msg::Msg;
pub use state::{RequestId, ShortenResult, WizardSession};
pub use step::{step_sequence, Step};
pub use update::update;
pub use url_builder::build_long_url;
pub use view_model::WizardViewModel;
