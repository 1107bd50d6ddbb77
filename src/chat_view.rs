use crate::message::Message;

/// Conversation plus the input and in-flight state that gate it.
///
/// A submission moves the view from idle to sending; [`ChatView::complete`]
/// always brings it back to idle. At most one request is outstanding.
#[derive(Debug, Clone)]
pub struct ChatView {
    messages: Vec<Message>,
    input: String,
    in_flight: bool,
    /// Lines scrolled back from the bottom. Zero follows the latest message.
    scroll_back: usize,
}

impl ChatView {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
            input: String::new(),
            in_flight: false,
            scroll_back: 0,
        }
    }

    pub fn render_messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Input is disabled while a reply is pending.
    pub fn push_char(&mut self, c: char) {
        if !self.in_flight {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if !self.in_flight {
            self.input.pop();
        }
    }

    /// Submits the current input. Returns the text to send to the backend, or
    /// `None` when the input is blank or a request is already in flight.
    pub fn submit(&mut self) -> Option<String> {
        if !self.accepts(&self.input) {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.begin(text.clone());
        Some(text)
    }

    pub fn submit_text(&mut self, text: &str) -> Option<String> {
        if !self.accepts(text) {
            return None;
        }
        self.input.clear();
        self.begin(text.to_string());
        Some(text.to_string())
    }

    /// Appends the assistant reply for the outstanding request.
    pub fn complete(&mut self, reply: impl Into<String>) {
        if !self.in_flight {
            log::warn!("Ignoring reply with no request in flight");
            return;
        }
        self.messages.push(Message::assistant(reply));
        self.in_flight = false;
        self.scroll_to_bottom();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    /// Index of the first visible line for a list of `total_lines` shown in
    /// `height` rows. Clamps the scroll-back so it never runs past the first
    /// line.
    pub fn visible_scroll(&mut self, total_lines: usize, height: usize) -> usize {
        let max_scroll = total_lines.saturating_sub(height);
        self.scroll_back = self.scroll_back.min(max_scroll);
        max_scroll - self.scroll_back
    }

    fn accepts(&self, text: &str) -> bool {
        !text.trim().is_empty() && !self.in_flight
    }

    fn begin(&mut self, text: String) {
        self.messages.push(Message::user(text));
        self.in_flight = true;
        self.scroll_to_bottom();
    }
}
