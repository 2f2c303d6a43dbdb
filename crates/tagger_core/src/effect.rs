use crate::{FormState, RequestId, SuggestField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Submit the long URL to the shortening collaborator.
    Shorten {
        request_id: RequestId,
        long_url: String,
    },
    /// Ask the suggestion collaborator for values of `field`.
    FetchSuggestions {
        request_id: RequestId,
        field: SuggestField,
        form: FormState,
    },
}
