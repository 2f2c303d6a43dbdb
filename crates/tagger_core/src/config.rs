use crate::Step;

/// Optional behaviours of the wizard. Every preset is a combination of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Start with a flow-selection step that decides whether UTM fields are collected.
    pub branching: bool,
    /// Option steps also accept a typed value, which wins over the list choice.
    pub free_text_override: bool,
    /// Collect custom key/value pairs on their own step.
    pub additional_params: bool,
    /// Content and ID steps may ask the suggestion collaborator for values.
    pub suggestions: bool,
}

/// Values offered on the source, medium and campaign steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCatalog {
    pub sources: Vec<String>,
    pub mediums: Vec<String>,
    pub campaigns: Vec<String>,
}

impl OptionCatalog {
    pub fn new(sources: Vec<String>, mediums: Vec<String>, campaigns: Vec<String>) -> Self {
        Self {
            sources,
            mediums,
            campaigns,
        }
    }

    /// Options for an option step; empty for every other step.
    pub fn options_for(&self, step: Step) -> &[String] {
        match step {
            Step::Source => &self.sources,
            Step::Medium => &self.mediums,
            Step::Campaign => &self.campaigns,
            _ => &[],
        }
    }
}

impl Default for OptionCatalog {
    fn default() -> Self {
        fn owned(values: &[&str]) -> Vec<String> {
            values.iter().map(|v| (*v).to_string()).collect()
        }
        Self {
            sources: owned(&["events", "linkedin", "referral", "website", "newsletter"]),
            mediums: owned(&["email", "social", "whatsapp", "summit", "cpc"]),
            campaigns: owned(&["promo", "volunteer", "assessment", "referral", "launch"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    pub capabilities: Capabilities,
    pub catalog: OptionCatalog,
}

impl WizardConfig {
    pub fn new(capabilities: Capabilities, catalog: OptionCatalog) -> Self {
        Self {
            capabilities,
            catalog,
        }
    }

    /// Fixed linear flow with suggestions on the content and ID steps.
    pub fn simple(catalog: OptionCatalog) -> Self {
        Self::new(
            Capabilities {
                suggestions: true,
                ..Capabilities::default()
            },
            catalog,
        )
    }

    /// Flow selection, typed overrides, custom parameters and suggestions.
    pub fn branching(catalog: OptionCatalog) -> Self {
        Self::new(
            Capabilities {
                branching: true,
                free_text_override: true,
                additional_params: true,
                suggestions: true,
            },
            catalog,
        )
    }

    /// Linear flow without any optional behaviour.
    pub fn basic(catalog: OptionCatalog) -> Self {
        Self::new(Capabilities::default(), catalog)
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self::branching(OptionCatalog::default())
    }
}
