/// Animated vertical scroll for the message body.
///
/// While `follow` is set the target tracks the bottom of the content.
/// `tick` moves the visible offset halfway toward the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmoothScroll {
    offset: u16,
    target: u16,
    max: u16,
    follow: bool,
}

impl SmoothScroll {
    pub fn new() -> Self {
        Self {
            offset: 0,
            target: 0,
            max: 0,
            follow: true,
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Re-attach to the bottom; called after every conversation change.
    pub fn follow_latest(&mut self) {
        self.follow = true;
        self.target = self.max;
    }

    /// Records the scrollable range for the current layout.
    pub fn set_max(&mut self, max: u16) {
        self.max = max;
        if self.follow {
            self.target = max;
        }
        self.target = self.target.min(max);
        self.offset = self.offset.min(max);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow = false;
        self.target = self.target.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.target = self.target.saturating_add(lines).min(self.max);
        if self.target == self.max {
            self.follow = true;
        }
    }

    pub fn tick(&mut self) {
        if self.offset < self.target {
            let step = (self.target - self.offset).div_ceil(2);
            self.offset += step;
        } else if self.offset > self.target {
            let step = (self.offset - self.target).div_ceil(2);
            self.offset -= step;
        }
    }
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new()
    }
}
