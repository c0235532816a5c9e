//! `${name}` placeholder substitution for message templates.
//!
//! Templates are scanned once, left to right. Known placeholders are replaced
//! at every occurrence, unknown ones are copied through verbatim, and
//! substituted values are never rescanned. Literal `\n` sequences in the
//! template's own text become newlines so templates can be supplied as
//! single-line action inputs.

use std::collections::BTreeMap;

/// Placeholder name to substituted value.
pub type Substitutions<'a> = BTreeMap<&'a str, String>;

/// Render `template` with `substitutions`.
pub fn format_template(template: &str, substitutions: &Substitutions<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        push_literal(&mut out, &rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match substitutions.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str("${");
                rest = after;
            }
        }
    }
    push_literal(&mut out, rest);
    out
}

/// Split `template` around the first `${placeholder}` occurrence.
///
/// Returns `None` when the placeholder does not appear.
pub fn split_at_placeholder<'t>(
    template: &'t str,
    placeholder: &str,
) -> Option<(&'t str, &'t str)> {
    let token = format!("${{{}}}", placeholder);
    template.find(&token).map(|idx| (&template[..idx], &template[idx + token.len()..]))
}

fn push_literal(out: &mut String, literal: &str) {
    out.push_str(&literal.replace("\\n", "\n"));
}
