//! Turns a line of user input into wizard messages for the current step.

use tagger_core::{FlowVariant, Msg, Step, WizardViewModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
    /// Input not understood here; the text is shown to the user.
    Invalid(String),
}

pub const HELP: &str = "\
Type a value and press Enter. An empty line continues.
  :back          go to the previous step
  :next          continue (generate on the confirmation step)
  :reset         start a new link
  :clear         empty the value of the current step
  :suggest       ask for suggestions (content and ID steps)
  :pick <n>      use suggestion n
  :add key=value add a custom parameter
  :set <n> key=value
  :rm <n>        remove custom parameter n
  :help          show this help
  :quit          leave";

pub fn parse_line(line: &str, view: &WizardViewModel) -> Command {
    let text = line.trim();
    if text.is_empty() {
        return Command::Dispatch(vec![Msg::Next]);
    }
    match text.strip_prefix(':') {
        Some(command) => parse_command(command.trim(), view),
        None => parse_value(text, view),
    }
}

fn parse_command(command: &str, view: &WizardViewModel) -> Command {
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name {
        "q" | "quit" => Command::Quit,
        "h" | "help" => Command::Help,
        "b" | "back" => Command::Dispatch(vec![Msg::Back]),
        "n" | "next" => Command::Dispatch(vec![Msg::Next]),
        "g" | "generate" => Command::Dispatch(vec![Msg::GenerateClicked]),
        "reset" => Command::Dispatch(vec![Msg::Reset]),
        "clear" => clear_step(view),
        "s" | "suggest" => Command::Dispatch(vec![Msg::SuggestionsRequested]),
        "pick" => match pick(rest, &view.suggestions) {
            Some(value) => Command::Dispatch(vec![Msg::SuggestionChosen(value)]),
            None => Command::Invalid("No such suggestion.".to_string()),
        },
        "add" => add_param(rest, view),
        "set" => {
            let Some((index, pair)) = rest.split_once(char::is_whitespace) else {
                return Command::Invalid("Usage: :set <n> key=value".to_string());
            };
            match (row_index(index), split_pair(pair)) {
                (Some(index), Some((key, value))) => {
                    Command::Dispatch(vec![Msg::ParamChanged { index, key, value }])
                }
                _ => Command::Invalid("Usage: :set <n> key=value".to_string()),
            }
        }
        "rm" => match row_index(rest) {
            Some(index) => Command::Dispatch(vec![Msg::ParamRemoved(index)]),
            None => Command::Invalid("Usage: :rm <n>".to_string()),
        },
        other => Command::Invalid(format!("Unknown command ':{other}'. Type :help.")),
    }
}

fn parse_value(text: &str, view: &WizardViewModel) -> Command {
    match view.step {
        Step::FlowSelection => match text.to_ascii_lowercase().as_str() {
            "1" | "social" => Command::Dispatch(vec![Msg::FlowSelected(FlowVariant::Social)]),
            "2" | "other" => Command::Dispatch(vec![Msg::FlowSelected(FlowVariant::Other)]),
            _ => Command::Invalid("Choose 1 (social) or 2 (other).".to_string()),
        },
        step if step.is_option_step() => {
            if let Some(value) = pick(text, &view.options) {
                return Command::Dispatch(vec![Msg::OptionSelected(value)]);
            }
            if view.options.iter().any(|option| option == text) {
                return Command::Dispatch(vec![Msg::OptionSelected(text.to_string())]);
            }
            if view.free_text_override {
                return Command::Dispatch(vec![Msg::OverrideSubmitted(text.to_string())]);
            }
            Command::Invalid("Pick a number from the list.".to_string())
        }
        Step::AdditionalParams => add_param(text, view),
        Step::Confirmation => match text.to_ascii_lowercase().as_str() {
            "y" | "yes" | "generate" => Command::Dispatch(vec![Msg::GenerateClicked]),
            _ => Command::Invalid("Press Enter or type 'yes' to generate.".to_string()),
        },
        Step::Result => match text.to_ascii_lowercase().as_str() {
            "new" | "reset" => Command::Dispatch(vec![Msg::Reset]),
            _ => Command::Invalid("Type 'new' to start another link.".to_string()),
        },
        step => match step.field() {
            Some(field) => Command::Dispatch(vec![
                Msg::FieldChanged {
                    field,
                    value: text.to_string(),
                },
                Msg::Next,
            ]),
            None => Command::Invalid("Nothing to enter on this step.".to_string()),
        },
    }
}

fn clear_step(view: &WizardViewModel) -> Command {
    let Some(field) = view.step.field() else {
        return Command::Invalid("Nothing to clear on this step.".to_string());
    };
    let mut msgs = vec![Msg::FieldChanged {
        field,
        value: String::new(),
    }];
    if view.free_text_override {
        msgs.push(Msg::OverrideChanged(String::new()));
    }
    Command::Dispatch(msgs)
}

fn add_param(pair: &str, view: &WizardViewModel) -> Command {
    if pair.is_empty() {
        return Command::Dispatch(vec![Msg::ParamAdded]);
    }
    match split_pair(pair) {
        Some((key, value)) => Command::Dispatch(vec![
            Msg::ParamAdded,
            Msg::ParamChanged {
                index: view.form.additional_params.len(),
                key,
                value,
            },
        ]),
        None => Command::Invalid("Use key=value.".to_string()),
    }
}

fn split_pair(pair: &str) -> Option<(String, String)> {
    let (key, value) = pair.split_once('=')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// 1-based row number to 0-based index.
fn row_index(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()?.checked_sub(1)
}

fn pick(raw: &str, values: &[String]) -> Option<String> {
    values.get(row_index(raw)?).cloned()
}
