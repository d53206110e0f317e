//! `$variable` template renderer for verification messages
//!
//! Syntax:
//! - `$name` and `${name}` reference a variable; names start with an ASCII
//!   letter followed by letters, digits or `_`
//! - `$$` is a literal `$`
//! - a `$` that starts no reference is kept as is
//! - references to unknown variables are kept verbatim
//!
//! `${` without a closing brace, `${}` and `${...}` holding an invalid name
//! are errors.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::traits::TemplateRenderer;

static REFERENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|\{(?P<braced>[^}]*)\}|(?P<named>[A-Za-z][A-Za-z0-9_]*)|(?P<unclosed>\{))",
    )
    .expect("reference pattern is valid")
});

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("name pattern is valid"));

/// Renderer for `$variable` templates
#[derive(Debug, Clone, Copy, Default)]
pub struct DollarTemplateRenderer;

impl DollarTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for DollarTemplateRenderer {
    fn render(&self, template: &str, variables: &HashMap<String, String>) -> Result<String, String> {
        let mut rendered = String::with_capacity(template.len());
        let mut last = 0;

        for caps in REFERENCE_REGEX.captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            rendered.push_str(&template[last..whole.start()]);

            if caps.name("escaped").is_some() {
                rendered.push('$');
            } else if let Some(name) = caps.name("braced") {
                if !NAME_REGEX.is_match(name.as_str()) {
                    return Err(format!(
                        "invalid variable name '{}' at byte {}",
                        name.as_str(),
                        whole.start()
                    ));
                }
                match variables.get(name.as_str()) {
                    Some(value) => rendered.push_str(value),
                    None => rendered.push_str(whole.as_str()),
                }
            } else if let Some(name) = caps.name("named") {
                match variables.get(name.as_str()) {
                    Some(value) => rendered.push_str(value),
                    None => rendered.push_str(whole.as_str()),
                }
            } else {
                return Err(format!(
                    "unterminated variable reference at byte {}",
                    whole.start()
                ));
            }

            last = whole.end();
        }

        rendered.push_str(&template[last..]);
        Ok(rendered)
    }
}
