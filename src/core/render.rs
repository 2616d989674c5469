use crate::core::{PatternKind, ScoredCandidate};

pub const DEFAULT_FOOTER: &str = "⚡ Powered by Fancy Numbers Bot";
pub const REMAINDER_FILE_NAME: &str = "remaining.txt";

/// Telegram rejects messages over 4096 characters; leave room for the footer.
const MAX_MESSAGE_CHARS: usize = 3500;

/// User-facing bot replies, each ending with the footer.
#[derive(Debug, Clone)]
pub struct Replies {
    footer: String,
    markdown_footer: String,
}

impl Replies {
    pub fn new(footer: impl Into<String>) -> Self {
        let footer = footer.into();
        Self {
            markdown_footer: escape_markdown(&footer),
            footer,
        }
    }

    pub fn welcome(&self) -> String {
        self.with_markdown_footer(
            "👋 Send me any TXT / CSV / XLSX file containing numbers.\n\
             I will extract & sort the *best fancy numbers*.",
        )
    }

    pub fn processing(&self) -> String {
        self.with_footer("📥 Processing your file...")
    }

    pub fn unsupported_file(&self) -> String {
        self.with_footer("❌ Unsupported file type.")
    }

    pub fn no_numbers(&self) -> String {
        self.with_footer("❌ No numbers found.")
    }

    pub fn numbers_found(&self, count: usize) -> String {
        self.with_markdown_footer(&format!(
            "📊 Found *{}* numbers.\nSend how many *TOP fancy numbers* you want.\n\nExample: `50`",
            count
        ))
    }

    pub fn sorting(&self) -> String {
        self.with_footer("⏳ Sorting fancy numbers...")
    }

    pub fn no_fancy(&self) -> String {
        self.with_footer("❌ No fancy numbers found.")
    }

    pub fn error(&self, message: &str) -> String {
        self.with_footer(&format!("❌ Error: {}", message))
    }

    pub fn remainder_caption(&self) -> String {
        self.with_footer("📄 Remaining fancy numbers")
    }

    /// Ranked list as Markdown code blocks, split to stay under the message limit.
    pub fn top_messages(&self, selected: &[ScoredCandidate]) -> Vec<String> {
        let mut messages = Vec::new();
        let mut body = format!("🏆 *Top {} Fancy Numbers (Best First):*\n```", selected.len());

        for (index, scored) in selected.iter().enumerate() {
            let line = format_ranked_line(index + 1, scored);
            if body.chars().count() + line.chars().count() + 5 > MAX_MESSAGE_CHARS {
                body.push_str("\n```");
                messages.push(self.with_markdown_footer(&body));
                body = String::from("```");
            }
            body.push('\n');
            body.push_str(&line);
        }

        body.push_str("\n```");
        messages.push(self.with_markdown_footer(&body));
        messages
    }

    fn with_footer(&self, text: &str) -> String {
        append_footer(text, &self.footer)
    }

    fn with_markdown_footer(&self, text: &str) -> String {
        append_footer(text, &self.markdown_footer)
    }
}

fn append_footer(text: &str, footer: &str) -> String {
    if footer.is_empty() {
        text.to_string()
    } else {
        format!("{}\n\n{}", text, footer)
    }
}

/// Backslash-escapes the characters Telegram's legacy Markdown treats as entity markers.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

impl Default for Replies {
    fn default() -> Self {
        Self::new(DEFAULT_FOOTER)
    }
}

pub fn format_ranked_line(position: usize, scored: &ScoredCandidate) -> String {
    format!(
        "{}. {} (Score: {})",
        position,
        scored.candidate.with_plus(),
        scored.score
    )
}

/// Matched substrings grouped by pattern, e.g. `Repeated: 111 222; Seq Up: 1234`.
pub fn format_pattern_summary(scored: &ScoredCandidate) -> String {
    PatternKind::ALL
        .iter()
        .filter_map(|kind| {
            let matched: Vec<&str> = scored
                .matches
                .iter()
                .filter(|m| m.kind == *kind)
                .map(|m| m.matched.as_str())
                .collect();
            (!matched.is_empty()).then(|| format!("{}: {}", kind.label(), matched.join(" ")))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// One `+number` per line.
pub fn remainder_file(remainder: &[ScoredCandidate]) -> String {
    remainder
        .iter()
        .map(|scored| format!("{}\n", scored.candidate.with_plus()))
        .collect()
}
