use crate::{
    chat_message::RenderCache,
    config::QuickReply,
    constants::SERVER_ERROR_REPLY,
    conversation::{Conversation, Message},
    dispatcher::Dispatcher,
    highlight::CodeHighlighter,
    scroll::SmoothScroll,
    session::SessionId,
    status_indicator::StatusIndicator,
    widget_state::WidgetState,
};
use ratatui::text::Line;
use std::sync::Arc;
use tokio::{runtime::Handle, sync::mpsc};

/// Bot reply for the request identified by `ticket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub ticket: u64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Whitespace-only input; nothing changed.
    Blank,
    /// A reply is still pending; the send was ignored.
    Busy,
    Dispatched(u64),
}

/// One chat widget instance: its conversation, UI state and session.
pub struct ChatWidget {
    conversation: Conversation,
    state: WidgetState,
    quick_replies: Vec<QuickReply>,
    quick_reply_offset: usize,
    dispatcher: Arc<Dispatcher>,
    replies: mpsc::UnboundedSender<Reply>,
    runtime: Option<Handle>,
    render_cache: RenderCache,
    scroll: SmoothScroll,
    status: StatusIndicator,
    next_ticket: u64,
}

impl ChatWidget {
    /// Replies for dispatched messages are delivered on `replies`; feed them
    /// back through [`ChatWidget::apply_reply`]. Requests run on the tokio
    /// runtime current at construction, if any.
    pub fn new(
        dispatcher: Dispatcher,
        quick_replies: Vec<QuickReply>,
        replies: mpsc::UnboundedSender<Reply>,
    ) -> Self {
        ChatWidget {
            conversation: Conversation::new(),
            state: WidgetState::new(),
            quick_replies,
            quick_reply_offset: 0,
            dispatcher: Arc::new(dispatcher),
            replies,
            runtime: Handle::try_current().ok(),
            render_cache: RenderCache::new(),
            scroll: SmoothScroll::new(),
            status: StatusIndicator::new(),
            next_ticket: 1,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn latest_message(&self) -> Option<&Message> {
        self.conversation.latest()
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn quick_replies(&self) -> &[QuickReply] {
        &self.quick_replies
    }

    /// Index of the first quick reply shown on the row.
    pub fn quick_reply_offset(&self) -> usize {
        self.quick_reply_offset
    }

    /// Scrolls the quick-reply row by `delta` buttons, staying on the list.
    pub fn scroll_quick_replies(&mut self, delta: isize) {
        let last = self.quick_replies.len().saturating_sub(1);
        self.quick_reply_offset = self
            .quick_reply_offset
            .saturating_add_signed(delta)
            .min(last);
    }

    pub fn session_id(&self) -> &SessionId {
        self.dispatcher.session_id()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn status(&self) -> &StatusIndicator {
        &self.status
    }

    /// Display lines for every message, rendered once per body width.
    pub fn rendered_messages(
        &mut self,
        width: u16,
        highlighter: &dyn CodeHighlighter,
        bot_name: &str,
    ) -> &[Vec<Line<'static>>] {
        self.render_cache
            .render(self.conversation.messages(), width, highlighter, bot_name)
    }

    pub fn scroll(&self) -> &SmoothScroll {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut SmoothScroll {
        &mut self.scroll
    }

    pub fn toggle(&mut self) {
        self.state.toggle();
    }

    pub fn open(&mut self) {
        self.state.open();
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    pub fn push_char(&mut self, c: char) {
        self.state.push_char(c);
    }

    pub fn backspace(&mut self) {
        self.state.backspace();
    }

    /// Sends `text` to the webhook.
    ///
    /// The request runs on a spawned task and its reply arrives on the reply
    /// channel. Without a tokio runtime the error reply is queued instead.
    pub fn send(&mut self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Blank;
        }

        let ticket = self.next_ticket;
        if !self.state.begin(ticket) {
            log::debug!("ignoring send while a reply is pending");
            return SendOutcome::Busy;
        }
        self.next_ticket += 1;

        self.state.clear_input();
        self.conversation.append(Message::user(text));
        self.scroll.follow_latest();

        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            log::error!("no tokio runtime to dispatch ticket {} on", ticket);
            let _ = self.replies.send(Reply {
                ticket,
                text: SERVER_ERROR_REPLY.to_string(),
            });
            return SendOutcome::Dispatched(ticket);
        };

        let dispatcher = Arc::clone(&self.dispatcher);
        let replies = self.replies.clone();
        let text = text.to_string();
        runtime.spawn(async move {
            let reply = dispatcher.dispatch(&text).await;
            if replies.send(Reply { ticket, text: reply }).is_err() {
                log::warn!("reply for ticket {} dropped, widget is gone", ticket);
            }
        });

        SendOutcome::Dispatched(ticket)
    }

    /// Sends whatever is in the input buffer.
    pub fn submit_input(&mut self) -> SendOutcome {
        let text = self.state.input().to_string();
        self.send(&text)
    }

    pub fn quick_reply(&mut self, index: usize) -> Option<SendOutcome> {
        let label = self.quick_replies.get(index)?.label.clone();
        Some(self.send(&label))
    }

    /// Appends a finished reply, whether or not the panel is still open.
    pub fn apply_reply(&mut self, reply: Reply) {
        if !self.state.finish(reply.ticket) {
            log::warn!("reply for ticket {} was not the pending one", reply.ticket);
        }
        self.conversation.append(Message::bot(reply.text));
        self.scroll.follow_latest();
    }

    /// Advances animations; called on every UI tick.
    pub fn tick(&mut self) {
        if self.state.is_pending() {
            self.status.update_spinner();
        }
        self.scroll.tick();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll.scroll_up(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll.scroll_down(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WebhookClient;
    use crate::constants::{FALLBACK_REPLY, GREETING, SERVER_ERROR_REPLY};
    use crate::conversation::Sender;
    use serde_json::json;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    fn widget_for(endpoint: &str) -> (ChatWidget, mpsc::UnboundedReceiver<Reply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = WebhookClient::new(endpoint, None).unwrap();
        let dispatcher = Dispatcher::new(client, SessionId::generate());
        let quick_replies = vec![QuickReply {
            label: "Help".to_string(),
            icon: "🆘".to_string(),
        }];
        (ChatWidget::new(dispatcher, quick_replies, tx), rx)
    }

    async fn mock_output(output: serde_json::Value) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": output })))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[test]
    fn test_new_widget_has_greeting_and_is_closed() {
        let (widget, _rx) = widget_for("http://localhost");
        assert_eq!(widget.conversation().len(), 1);
        assert_eq!(widget.latest_message(), Some(&Message::bot(GREETING)));
        assert!(!widget.state().is_open());
        assert!(!widget.is_pending());
    }

    #[test]
    fn test_blank_send_is_a_no_op() {
        let (mut widget, mut rx) = widget_for("http://localhost");
        " \t ".chars().for_each(|c| widget.push_char(c));
        let before = widget.state().clone();

        assert_eq!(widget.submit_input(), SendOutcome::Blank);
        assert_eq!(widget.send(""), SendOutcome::Blank);
        assert_eq!(widget.conversation().len(), 1);
        assert_eq!(widget.state(), &before);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_appends_exactly_one_reply() {
        let mock_server = mock_output(json!("a\n\n\n\nb")).await;
        let (mut widget, mut rx) = widget_for(&mock_server.uri());
        "hello".chars().for_each(|c| widget.push_char(c));

        let outcome = widget.submit_input();
        assert_eq!(outcome, SendOutcome::Dispatched(1));
        assert!(widget.is_pending());
        assert_eq!(widget.state().input(), "");
        assert_eq!(widget.latest_message(), Some(&Message::user("hello")));

        let reply = rx.recv().await.unwrap();
        widget.apply_reply(reply);

        assert!(!widget.is_pending());
        assert_eq!(widget.conversation().len(), 3);
        assert_eq!(widget.latest_message(), Some(&Message::bot("a\n\nb")));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_overlapping_send_is_ignored() {
        let mock_server = mock_output(json!("first")).await;
        let (mut widget, mut rx) = widget_for(&mock_server.uri());

        assert_eq!(widget.send("one"), SendOutcome::Dispatched(1));
        widget.push_char('x');
        assert_eq!(widget.submit_input(), SendOutcome::Busy);
        assert_eq!(widget.state().input(), "x");
        assert_eq!(widget.conversation().len(), 2);

        widget.apply_reply(rx.recv().await.unwrap());
        assert_eq!(widget.submit_input(), SendOutcome::Dispatched(2));
        widget.apply_reply(rx.recv().await.unwrap());

        let senders: Vec<Sender> = widget.conversation().iter().map(|m| m.sender()).collect();
        assert_eq!(
            senders,
            vec![Sender::Bot, Sender::User, Sender::Bot, Sender::User, Sender::Bot]
        );
    }

    #[tokio::test]
    async fn test_quick_reply_sends_label() {
        let mock_server = mock_output(json!("Here is some help")).await;
        let (mut widget, mut rx) = widget_for(&mock_server.uri());

        assert_eq!(widget.quick_reply(0), Some(SendOutcome::Dispatched(1)));
        assert_eq!(widget.latest_message(), Some(&Message::user("Help")));
        assert_eq!(widget.quick_reply(5), None);

        widget.apply_reply(rx.recv().await.unwrap());
        assert_eq!(widget.latest_message().map(|m| m.text()), Some("Here is some help"));
    }

    #[tokio::test]
    async fn test_empty_output_appends_fallback() {
        let mock_server = mock_output(json!("")).await;
        let (mut widget, mut rx) = widget_for(&mock_server.uri());

        widget.send("?");
        widget.apply_reply(rx.recv().await.unwrap());
        assert_eq!(widget.latest_message(), Some(&Message::bot(FALLBACK_REPLY)));
    }

    #[tokio::test]
    async fn test_transport_failure_appends_error_reply() {
        let (mut widget, mut rx) = widget_for("http://127.0.0.1:9/webhook");

        widget.send("hello");
        widget.apply_reply(rx.recv().await.unwrap());
        assert_eq!(widget.latest_message(), Some(&Message::bot(SERVER_ERROR_REPLY)));
        assert!(!widget.is_pending());
    }

    #[tokio::test]
    async fn test_reply_applied_after_close() {
        let mock_server = mock_output(json!("late")).await;
        let (mut widget, mut rx) = widget_for(&mock_server.uri());

        widget.open();
        widget.send("hi");
        widget.close();
        widget.apply_reply(rx.recv().await.unwrap());

        assert!(!widget.state().is_open());
        assert_eq!(widget.latest_message().map(|m| m.text()), Some("late"));
    }

    #[tokio::test]
    async fn test_session_id_stable_per_widget_and_distinct_across_widgets() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": "ok" })))
            .mount(&mock_server)
            .await;

        let (mut first, mut first_rx) = widget_for(&mock_server.uri());
        let (mut second, mut second_rx) = widget_for(&mock_server.uri());
        assert_ne!(first.session_id(), second.session_id());

        for text in ["one", "two"] {
            first.send(text);
            first.apply_reply(first_rx.recv().await.unwrap());
        }
        second.send("three");
        second.apply_reply(second_rx.recv().await.unwrap());

        let requests = mock_server.received_requests().await.unwrap();
        let sessions: Vec<String> = requests
            .iter()
            .map(|r| {
                let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
                body["sessionId"].as_str().unwrap().to_string()
            })
            .collect();

        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0], first.session_id().to_string());
        assert_eq!(sessions[1], sessions[0]);
        assert_eq!(sessions[2], second.session_id().to_string());
    }

    #[test]
    fn test_send_without_runtime_queues_error_reply() {
        let (mut widget, mut rx) = widget_for("http://127.0.0.1:9");
        assert_eq!(widget.send("hello"), SendOutcome::Dispatched(1));
        assert_eq!(widget.latest_message(), Some(&Message::user("hello")));

        let reply = rx.try_recv().unwrap();
        assert_eq!(reply.text, SERVER_ERROR_REPLY);
        widget.apply_reply(reply);
        assert!(!widget.is_pending());
    }

    #[tokio::test]
    async fn test_send_from_plain_thread_uses_construction_runtime() {
        let mock_server = mock_output(json!("from the runtime")).await;
        let (mut widget, mut rx) = widget_for(&mock_server.uri());

        let outcome = std::thread::spawn(move || {
            let outcome = widget.send("hello");
            (widget, outcome)
        })
        .join()
        .unwrap();
        let (mut widget, outcome) = outcome;
        assert_eq!(outcome, SendOutcome::Dispatched(1));

        widget.apply_reply(rx.recv().await.unwrap());
        assert_eq!(widget.latest_message(), Some(&Message::bot("from the runtime")));
    }

    #[test]
    fn test_quick_reply_row_scroll_is_clamped() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let client = WebhookClient::new("http://localhost", None).unwrap();
        let quick_replies = ["Help", "Pricing", "Contact"]
            .iter()
            .map(|label| QuickReply {
                label: label.to_string(),
                icon: "*".to_string(),
            })
            .collect();
        let mut widget =
            ChatWidget::new(Dispatcher::new(client, SessionId::generate()), quick_replies, tx);

        widget.scroll_quick_replies(-1);
        assert_eq!(widget.quick_reply_offset(), 0);
        widget.scroll_quick_replies(2);
        assert_eq!(widget.quick_reply_offset(), 2);
        widget.scroll_quick_replies(5);
        assert_eq!(widget.quick_reply_offset(), 2);
        widget.scroll_quick_replies(-1);
        assert_eq!(widget.quick_reply_offset(), 1);
    }
}
