//! Diagnostic list of handled failures.
//!
//! Purely informational: nothing in the resolution path ever reads it back.

use parking_lot::Mutex;

/// Ordered, unbounded list of human-readable failure messages.
#[derive(Debug, Default)]
pub struct ErrorLog {
    messages: Mutex<Vec<String>>
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, message: impl Into<String>) {
        self.messages.lock().push(message.into());
    }

    /// Snapshot of every message recorded so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }

    /// Render the list as an HTML fragment for a debug panel.
    ///
    /// Returns `None` when nothing has been recorded.
    pub fn render_html(&self) -> Option<String> {
        let messages = self.messages.lock();
        if messages.is_empty() {
            return None;
        }

        let mut html = String::from("<ul class=\"mns_error_report\">");
        for message in messages.iter() {
            html.push_str("<li class=\"mns_error_description\">");
            html.push_str(&escape_html(message));
            html.push_str("</li>");
        }
        html.push_str("</ul>");
        Some(html)
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c)
        }
    }
    escaped
}
