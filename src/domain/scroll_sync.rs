/// The two horizontally scrollable panes of the calendar: the date
/// header strip and the grid body below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Header,
    Body,
}

impl Pane {
    fn other(&self) -> Pane {
        match self {
            Pane::Header => Pane::Body,
            Pane::Body => Pane::Header,
        }
    }
}

/// The imperative write needed to bring the opposite pane in line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollWrite {
    pub pane: Pane,
    pub scroll_left: u32,
}

/// Keeps the header and body panes horizontally aligned. Each pane
/// scrolls independently; reporting a scroll on one yields the write
/// for the other, or nothing when they already match — so the echoed
/// event from applying that write cannot ping-pong back.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSync {
    header_left: u32,
    body_left: u32,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self, pane: Pane) -> u32 {
        match pane {
            Pane::Header => self.header_left,
            Pane::Body => self.body_left,
        }
    }

    /// Handles a scroll event from one pane.
    pub fn scrolled(
        &mut self,
        source: Pane,
        scroll_left: u32,
    ) -> Option<ScrollWrite> {
        match source {
            Pane::Header => self.header_left = scroll_left,
            Pane::Body => self.body_left = scroll_left,
        }

        let target = source.other();
        if self.offset(target) == scroll_left {
            return None;
        }
        match target {
            Pane::Header => self.header_left = scroll_left,
            Pane::Body => self.body_left = scroll_left,
        }
        Some(ScrollWrite {
            pane: target,
            scroll_left,
        })
    }
}
