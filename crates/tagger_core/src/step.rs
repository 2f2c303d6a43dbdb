use crate::{Capabilities, Field, FlowVariant, SuggestField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FlowSelection,
    BaseUrl,
    Source,
    Medium,
    Campaign,
    Content,
    Id,
    AdditionalParams,
    Confirmation,
    Result,
}

impl Step {
    pub fn title(self) -> &'static str {
        match self {
            Step::FlowSelection => "Campaign Type",
            Step::BaseUrl => "Base URL",
            Step::Source => "UTM Source",
            Step::Medium => "UTM Medium",
            Step::Campaign => "UTM Campaign",
            Step::Content => "UTM Content",
            Step::Id => "UTM ID",
            Step::AdditionalParams => "Additional Parameters",
            Step::Confirmation => "Confirmation",
            Step::Result => "Success!",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Step::FlowSelection => "Choose a social campaign or another kind of link.",
            Step::BaseUrl => "Enter the destination website URL.",
            Step::Source => "Select the traffic source (utm_source).",
            Step::Medium => "Select the marketing medium (utm_medium).",
            Step::Campaign => "Select the specific campaign (utm_campaign).",
            Step::Content => "Optional: enter a content identifier (utm_content).",
            Step::Id => "Optional: enter a campaign ID (utm_id).",
            Step::AdditionalParams => "Optional: add custom key/value query parameters.",
            Step::Confirmation => "Review your parameters before generating the short link.",
            Step::Result => "Your shortened URL is ready.",
        }
    }

    /// The form field edited on this step, if it edits exactly one.
    pub fn field(self) -> Option<Field> {
        match self {
            Step::BaseUrl => Some(Field::BaseUrl),
            Step::Source => Some(Field::Source),
            Step::Medium => Some(Field::Medium),
            Step::Campaign => Some(Field::Campaign),
            Step::Content => Some(Field::Content),
            Step::Id => Some(Field::Id),
            _ => None,
        }
    }

    pub fn is_option_step(self) -> bool {
        matches!(self, Step::Source | Step::Medium | Step::Campaign)
    }

    pub fn suggest_field(self) -> Option<SuggestField> {
        match self {
            Step::Content => Some(SuggestField::Content),
            Step::Id => Some(SuggestField::Id),
            _ => None,
        }
    }

    fn is_tracking(self) -> bool {
        matches!(
            self,
            Step::Source | Step::Medium | Step::Campaign | Step::Content | Step::Id
        )
    }
}

const ALL_STEPS: [Step; 10] = [
    Step::FlowSelection,
    Step::BaseUrl,
    Step::Source,
    Step::Medium,
    Step::Campaign,
    Step::Content,
    Step::Id,
    Step::AdditionalParams,
    Step::Confirmation,
    Step::Result,
];

/// Steps visited for the given capabilities and flow variant, in order.
///
/// Before a branching session picks its variant the social sequence is
/// reported, since it is the longest one the user can end up on.
pub fn step_sequence(capabilities: &Capabilities, variant: Option<FlowVariant>) -> Vec<Step> {
    let skip_tracking = capabilities.branching && variant == Some(FlowVariant::Other);
    ALL_STEPS
        .iter()
        .copied()
        .filter(|step| match step {
            Step::FlowSelection => capabilities.branching,
            Step::AdditionalParams => capabilities.additional_params,
            s if s.is_tracking() => !skip_tracking,
            _ => true,
        })
        .collect()
}
