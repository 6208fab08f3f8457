/// Whether the chat panel is shown or collapsed to its launcher button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Open,
}

/// Request activity. At most one request is outstanding at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Pending { ticket: u64 },
}

/// All mutable UI state of one widget, kept together so that
/// visibility, request activity and the input buffer move through
/// well-defined transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    visibility: Visibility,
    activity: Activity,
    input: String,
}

impl WidgetState {
    pub fn new() -> Self {
        WidgetState {
            visibility: Visibility::Closed,
            activity: Activity::Idle,
            input: String::new(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.activity, Activity::Pending { .. })
    }

    pub fn toggle(&mut self) {
        self.visibility = match self.visibility {
            Visibility::Closed => Visibility::Open,
            Visibility::Open => Visibility::Closed,
        };
    }

    pub fn open(&mut self) {
        self.visibility = Visibility::Open;
    }

    pub fn close(&mut self) {
        self.visibility = Visibility::Closed;
    }

    /// Idle -> Pending. Refused (returns false) while a request is outstanding.
    pub fn begin(&mut self, ticket: u64) -> bool {
        match self.activity {
            Activity::Idle => {
                self.activity = Activity::Pending { ticket };
                true
            }
            Activity::Pending { .. } => false,
        }
    }

    /// Pending -> Idle, only for the ticket that is outstanding.
    pub fn finish(&mut self, ticket: u64) -> bool {
        match self.activity {
            Activity::Pending { ticket: current } if current == ticket => {
                self.activity = Activity::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new()
    }
}
