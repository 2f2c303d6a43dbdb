use std::fmt::Write;

use tagger_core::{Field, FlowVariant, Step, WizardViewModel};

pub fn render(view: &WizardViewModel) -> String {
    let mut out = String::new();

    if view.step == Step::Result {
        let _ = writeln!(out, "\n== {} ==", view.title);
    } else {
        let _ = writeln!(
            out,
            "\n[{}/{}] {}",
            view.step_number, view.total_steps, view.title
        );
    }
    let _ = writeln!(out, "{}", view.description);

    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {error}");
    }

    match view.step {
        Step::FlowSelection => {
            for (n, variant) in [FlowVariant::Social, FlowVariant::Other].iter().enumerate() {
                let marker = if view.form.flow_variant == Some(*variant) {
                    "*"
                } else {
                    " "
                };
                let _ = writeln!(out, "{marker} {}) {}", n + 1, variant.label());
            }
        }
        Step::AdditionalParams => render_params(&mut out, view),
        Step::Confirmation => render_summary(&mut out, view),
        Step::Result => render_result(&mut out, view),
        step => {
            if let Some(field) = step.field() {
                let current = view.form.get(field);
                if !current.is_empty() {
                    let _ = writeln!(out, "Current: {current}");
                }
            }
            for (n, option) in view.options.iter().enumerate() {
                let _ = writeln!(out, "  {}) {}", n + 1, option);
            }
            if view.free_text_override {
                let _ = writeln!(out, "Or type your own value.");
            }
        }
    }

    if view.suggesting {
        let _ = writeln!(out, "Fetching suggestions...");
    } else if !view.suggestions.is_empty() {
        let _ = writeln!(out, "Suggestions (:pick <n>):");
        for (n, suggestion) in view.suggestions.iter().enumerate() {
            let _ = writeln!(out, "  {}) {}", n + 1, suggestion);
        }
    } else if view.suggestions_enabled {
        let _ = writeln!(out, "Type :suggest for ideas.");
    }

    if view.generating {
        let _ = writeln!(out, "Generating short link...");
    }

    out
}

fn render_params(out: &mut String, view: &WizardViewModel) {
    let params = &view.form.additional_params;
    if params.is_empty() {
        let _ = writeln!(out, "No custom parameters. Type key=value to add one.");
        return;
    }
    for (n, param) in params.iter().enumerate() {
        let _ = writeln!(out, "  {}) {}={}", n + 1, param.key, param.value);
    }
}

fn render_summary(out: &mut String, view: &WizardViewModel) {
    let form = &view.form;
    let mut rows: Vec<(&str, Field)> = vec![("Website", Field::BaseUrl)];
    if form.include_tracking_fields() {
        rows.extend([
            ("Source", Field::Source),
            ("Medium", Field::Medium),
            ("Campaign", Field::Campaign),
        ]);
    }
    rows.extend([("Content", Field::Content), ("ID", Field::Id)]);

    for (label, field) in rows {
        let value = form.get(field).trim();
        if !value.is_empty() {
            let _ = writeln!(out, "  {label:<9} {value}");
        }
    }
    for param in &form.additional_params {
        if let Some((key, value)) = param.meaningful() {
            let _ = writeln!(out, "  {key:<9} {value}");
        }
    }
    if let Some(preview) = &view.long_url_preview {
        let _ = writeln!(out, "Link: {preview}");
    }
    let _ = writeln!(out, "Press Enter to generate.");
}

fn render_result(out: &mut String, view: &WizardViewModel) {
    let Some(result) = &view.result else {
        return;
    };
    let _ = writeln!(out, "Short link: {}", result.short_link);
    let _ = writeln!(out, "Full link:  {}", result.long_url);
    let _ = writeln!(out, "Created:    {}", result.created_at);
    let _ = writeln!(out, "Type 'new' to create another link.");
}
