use crate::domain::errors::DomainError;

/// A prompt text with named `{placeholder}` slots, parsed once and rendered
/// per request. Braces that do not wrap a valid placeholder name pass
/// through verbatim.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    text: String,
    placeholders: Vec<String>,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut placeholders = Vec::new();
        for segment in segments(&text) {
            if let Segment::Placeholder(name) = segment {
                if !placeholders.iter().any(|p| p == name) {
                    placeholders.push(name.to_string());
                }
            }
        }
        Self { text, placeholders }
    }

    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitutes every placeholder from `bindings`. A placeholder with no
    /// binding is a render error; unused bindings are ignored.
    pub fn render(&self, bindings: &[(&str, &str)]) -> Result<String, DomainError> {
        let mut out = String::with_capacity(self.text.len());
        for segment in segments(&self.text) {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Placeholder(name) => {
                    let value = bindings
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| {
                            DomainError::template(format!(
                                "no value bound for placeholder `{name}`"
                            ))
                        })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_placeholder_name(&after[..close]) => {
                if open > 0 {
                    out.push(Segment::Literal(&rest[..open]));
                }
                out.push(Segment::Placeholder(&after[..close]));
                rest = &after[close + 1..];
            }
            _ => {
                // Not a placeholder, keep the brace as literal text.
                out.push(Segment::Literal(&rest[..open + 1]));
                rest = after;
            }
        }
    }

    if !rest.is_empty() {
        out.push(Segment::Literal(rest));
    }
    out
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

const SYSTEM_MESSAGE: &str = include_str!("../../../templates/system-message.st");
const RAG_PROMPT_TEMPLATE: &str = include_str!("../../../templates/rag-prompt-template.st");

/// The two process-lifetime prompt templates, immutable after startup and
/// shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Prompts {
    pub system: PromptTemplate,
    pub rag: PromptTemplate,
}

impl Prompts {
    pub fn new(system: PromptTemplate, rag: PromptTemplate) -> Self {
        Self { system, rag }
    }

    /// The templates shipped with the binary, from `templates/*.st`.
    pub fn embedded() -> Self {
        Self::new(
            PromptTemplate::new(SYSTEM_MESSAGE),
            PromptTemplate::new(RAG_PROMPT_TEMPLATE),
        )
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholders() {
        let template = PromptTemplate::new("Q: {input}\nD: {documents}");
        let rendered = template
            .render(&[("input", "what?"), ("documents", "a\nb")])
            .unwrap();
        assert_eq!(rendered, "Q: what?\nD: a\nb");
    }

    #[test]
    fn test_render_without_placeholders_is_verbatim() {
        let template = PromptTemplate::new("fixed instructions");
        assert!(template.placeholders().is_empty());
        assert_eq!(template.render(&[]).unwrap(), "fixed instructions");
    }

    #[test]
    fn test_render_missing_binding_is_error() {
        let template = PromptTemplate::new("Q: {input}");
        let err = template.render(&[("documents", "x")]).unwrap_err();
        assert!(matches!(err, DomainError::Template(_)));
    }

    #[test]
    fn test_unmatched_braces_pass_through() {
        let template = PromptTemplate::new("a { b } c {not a name}");
        assert!(template.placeholders().is_empty());
        assert_eq!(template.render(&[]).unwrap(), "a { b } c {not a name}");
    }

    #[test]
    fn test_repeated_placeholder_substituted_everywhere() {
        let template = PromptTemplate::new("{input} and {input}");
        assert_eq!(template.placeholders(), &["input".to_string()]);
        assert_eq!(
            template.render(&[("input", "x")]).unwrap(),
            "x and x"
        );
    }

    #[test]
    fn test_embedded_rag_template_has_expected_placeholders() {
        let prompts = Prompts::embedded();
        assert!(prompts.system.placeholders().is_empty());
        assert!(prompts.rag.placeholders().contains(&"input".to_string()));
        assert!(prompts
            .rag
            .placeholders()
            .contains(&"documents".to_string()));
    }
}
