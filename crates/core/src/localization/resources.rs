use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::Display;

static SERVICE_RESOURCES: Lazy<HashMap<String, String>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../resources/service_resources.json")).unwrap_or_default()
});

/// Built-in resource strings used by the library itself
pub struct ServiceResources;

impl ServiceResources {
    /// Format the resource `name` with positional arguments
    ///
    /// An unknown name is itself used as the template, so ad-hoc messages
    /// with `{0}` placeholders format the same way.
    pub fn get(name: &str, args: &[&dyn Display]) -> String {
        let template = SERVICE_RESOURCES.get(name).map(String::as_str).unwrap_or(name);
        format_resource(template, args)
    }

    /// Raw template for `name`, if the library defines one
    pub fn template(name: &str) -> Option<&'static str> {
        SERVICE_RESOURCES.get(name).map(String::as_str)
    }
}

/// Replace `{0}`, `{1}` … with the matching argument
///
/// Single pass over the template: argument text is never rescanned, and a
/// placeholder without a matching argument is kept as written.
pub fn format_resource(template: &str, args: &[&dyn Display]) -> String {
    let mut text = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();

        let argument = (digits > 0 && after[digits..].starts_with('}'))
            .then(|| after[..digits].parse::<usize>().ok())
            .flatten()
            .and_then(|index| args.get(index));

        match argument {
            Some(arg) => {
                text.push_str(&arg.to_string());
                rest = &after[digits + 1..];
            }
            None => {
                text.push('{');
                rest = after;
            }
        }
    }

    text.push_str(rest);
    text
}
