//! Pause menu options and list cursor shared with the shop screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Resume,
    Shop,
    Sound,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Resume,
        MenuItem::Shop,
        MenuItem::Sound,
        MenuItem::Quit,
    ];

    pub fn label(self, sound_on: bool) -> &'static str {
        match self {
            MenuItem::Resume => "Resume",
            MenuItem::Shop => "Shop",
            MenuItem::Sound if sound_on => "Sound: On",
            MenuItem::Sound => "Sound: Off",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Selection index over a fixed-length list, wrapping at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Cursor { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn up(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    pub fn down(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// The pause overlay: a cursor over `MenuItem::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseMenu {
    pub cursor: Cursor,
}

impl PauseMenu {
    pub fn new() -> Self {
        PauseMenu {
            cursor: Cursor::new(MenuItem::ALL.len()),
        }
    }

    pub fn current(&self) -> MenuItem {
        MenuItem::ALL[self.cursor.index()]
    }
}

impl Default for PauseMenu {
    fn default() -> Self {
        Self::new()
    }
}
