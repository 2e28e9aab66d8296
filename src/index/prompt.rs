// file: src/index/prompt.rs
// description: medical question-answering prompt assembled from retrieved chunks

use crate::models::SourceNode;

pub const MEDICAL_QA_TEMPLATE: &str = "\
Based on the provided medical information, please answer the following health-related question.
Provide an accurate diagnosis or medical advice based only on the context of the symptoms mentioned.
<context>
{context}
</context>
User's Symptoms: {input}
Disease Diagnosis and Medical Advice:
";

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn medical() -> Self {
        Self::new(MEDICAL_QA_TEMPLATE)
    }

    /// Context is substituted last so chunk text containing `{input}` stays literal.
    pub fn render(&self, sources: &[SourceNode], input: &str) -> String {
        let context = sources
            .iter()
            .map(|source| source.node.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let (before, after) = match self.template.split_once("{context}") {
            Some(parts) => parts,
            None => (self.template.as_str(), ""),
        };

        let mut rendered = before.replace("{input}", input);
        if self.template.contains("{context}") {
            rendered.push_str(&context);
        }
        rendered.push_str(&after.replace("{input}", input));
        rendered
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::medical()
    }
}
