// file: src/web/page.rs
// description: server-rendered html for the symptom form and its results
// reference: all dynamic text passes through escape_html

use crate::models::Answer;

const TITLE: &str = "Health Symptoms & Medical Advice Demo";

const STYLE: &str = r#"
    body { font-family: sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
    .title { font-size: 35px; font-weight: bold; color: #1e90ff; margin-bottom: 1.5rem; }
    label { display: block; margin-bottom: .4rem; }
    input[type=text] { width: 100%; padding: 8px; box-sizing: border-box; }
    .button { background-color: #4CAF50; color: white; padding: 10px 20px; border-radius: 5px; border: none; cursor: pointer; margin-top: .8rem; }
    .button:hover { background-color: #45a049; }
    .notice { padding: .6rem .8rem; border-radius: 4px; margin: .6rem 0; }
    .info { background: #eef6ff; }
    .success { background: #e9f7ef; }
    .error { background: #fdecea; color: #a61b1b; }
    .answer { white-space: pre-wrap; }
    .source { border-bottom: 1px solid #ddd; padding: .5rem 0; }
    .source-text { white-space: pre-wrap; font-size: 14px; }
    .footer { font-size: 12px; color: #777; margin-top: 2rem; }
"#;

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Success(String),
    Error(String),
}

impl Notice {
    fn render(&self) -> String {
        let (class, text) = match self {
            Notice::Info(text) => ("info", text),
            Notice::Success(text) => ("success", text),
            Notice::Error(text) => ("error", text),
        };
        format!(
            "<div class=\"notice {}\">{}</div>\n",
            class,
            escape_html(text)
        )
    }
}

/// Everything one render of the page shows.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub credential_missing: bool,
    pub max_query_chars: usize,
    pub symptoms: String,
    pub embed_notices: Vec<Notice>,
    pub query_notices: Vec<Notice>,
    pub answer: Option<Answer>,
}

impl PageView {
    pub fn new(max_query_chars: usize, credential_missing: bool) -> Self {
        Self {
            credential_missing,
            max_query_chars,
            ..Self::default()
        }
    }

    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096);

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(TITLE)));
        html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
        html.push_str(&format!("<div class=\"title\">{}</div>\n", escape_html(TITLE)));

        if self.credential_missing {
            html.push_str(
                &Notice::Error("NVIDIA API key is missing from environment variables.".to_string())
                    .render(),
            );
        }

        html.push_str(&format!(
            r#"<form method="post" action="/query">
<label for="symptoms">Enter Your Health Symptoms (e.g., fever, cough, fatigue, etc.)</label>
<input type="text" id="symptoms" name="symptoms" maxlength="{}" placeholder="Enter symptoms here..." value="{}">
</form>
<form method="post" action="/embed">
<button class="button" type="submit" title="Click to process the documents and generate embeddings.">Start Document Embedding</button>
</form>
"#,
            self.max_query_chars,
            escape_html(&self.symptoms)
        ));

        for notice in &self.embed_notices {
            html.push_str(&notice.render());
        }

        html.push_str("<hr>\n");

        for notice in &self.query_notices {
            html.push_str(&notice.render());
        }

        if let Some(answer) = &self.answer {
            html.push_str(&render_answer(answer));
        }

        html.push_str("<div class=\"footer\">Powered by NVIDIA AI</div>\n</body>\n</html>\n");
        html
    }
}

fn render_answer(answer: &Answer) -> String {
    let mut html = format!(
        "<p>Response time: {:.3}s</p>\n<p><strong>Medical Advice &amp; Disease Diagnosis:</strong></p>\n<div class=\"answer\">{}</div>\n",
        answer.elapsed_secs,
        escape_html(&answer.response)
    );

    html.push_str("<details>\n<summary>Related Medical Information</summary>\n");
    for source in &answer.source_nodes {
        html.push_str(&format!(
            "<div class=\"source\">\n<p>File: {} (Page {})</p>\n<p>Path: {}</p>\n<div class=\"source-text\">{}</div>\n</div>\n",
            escape_html(source.node.file_name()),
            escape_html(source.node.page_label()),
            escape_html(source.node.file_path()),
            escape_html(&source.node.text)
        ));
    }
    html.push_str("</details>\n");
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
