use crate::constants::DOUBLE_CLICK_SECONDS;

/// One observation of the pointer relative to an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseSample {
    pub x: i32,
    pub y: i32,
    /// Pointer counts as over the element (visibility and occlusion already
    /// applied by the caller).
    pub over: bool,
    pub down: bool,
    pub seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MousePhase {
    Idle,
    /// The button went down over the element during this sample.
    DownHere,
    /// Held since an earlier `DownHere`, wherever the pointer is now.
    Grabbed,
    /// The button is held but went down somewhere else.
    DownElsewhere,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    primed: bool,
    was_down: bool,
    down_here: bool,
    down_elsewhere: bool,
    just_down_here: bool,
    just_down_elsewhere: bool,
    just_up_here: bool,
    clicked: bool,
    double_clicked: bool,
    last_click: Option<f64>,
    grab_x: i32,
    grab_y: i32,
    grab_rel_x: i32,
    grab_rel_y: i32,
    x: i32,
    y: i32,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the machine by one sample.
    ///
    /// `origin` is the element's top-left corner, used to remember where on
    /// the element the grab happened. `may_grab` is false when something else
    /// already claimed this press; the press then counts as elsewhere.
    pub fn update(&mut self, sample: MouseSample, origin: (i32, i32), may_grab: bool) {
        self.just_down_here = false;
        self.just_down_elsewhere = false;
        self.just_up_here = false;
        self.clicked = false;
        self.double_clicked = false;
        self.x = sample.x;
        self.y = sample.y;

        // A button already held when the element is first seen was pressed
        // before it existed; it must not count as a fresh press.
        if !self.primed {
            self.primed = true;
            self.was_down = sample.down;
            if sample.down {
                self.down_elsewhere = true;
            }
            return;
        }

        let just_down = sample.down && !self.was_down;
        let just_up = !sample.down && self.was_down;

        if just_down {
            if sample.over && may_grab {
                self.down_here = true;
                self.just_down_here = true;
                self.grab_x = sample.x;
                self.grab_y = sample.y;
                self.grab_rel_x = sample.x - origin.0;
                self.grab_rel_y = sample.y - origin.1;
            } else {
                self.down_elsewhere = true;
                self.just_down_elsewhere = true;
            }
        }

        if just_up {
            self.just_up_here = sample.over;
            if self.down_here && sample.over {
                self.clicked = true;
                self.double_clicked = self
                    .last_click
                    .is_some_and(|prev| sample.seconds - prev <= DOUBLE_CLICK_SECONDS);
                self.last_click = if self.double_clicked {
                    None
                } else {
                    Some(sample.seconds)
                };
            }
        }

        if !sample.down {
            self.down_here = false;
            self.down_elsewhere = false;
        }
        self.was_down = sample.down;
    }

    pub fn phase(&self) -> MousePhase {
        if self.just_down_here {
            MousePhase::DownHere
        } else if self.down_here {
            MousePhase::Grabbed
        } else if self.down_elsewhere {
            MousePhase::DownElsewhere
        } else {
            MousePhase::Idle
        }
    }

    /// Held since a press that started over the element, including the
    /// press sample itself.
    pub fn grabbed(&self) -> bool {
        self.down_here
    }

    pub fn just_down_here(&self) -> bool {
        self.just_down_here
    }

    pub fn just_down_elsewhere(&self) -> bool {
        self.just_down_elsewhere
    }

    pub fn down_elsewhere(&self) -> bool {
        self.down_elsewhere
    }

    /// Released this sample while over the element, wherever it was pressed.
    pub fn just_up_here(&self) -> bool {
        self.just_up_here
    }

    /// Pressed over the element in an earlier sample and released over it
    /// in this one.
    pub fn clicked(&self) -> bool {
        self.clicked
    }

    pub fn double_clicked(&self) -> bool {
        self.double_clicked
    }

    /// Pointer position relative to the element origin at grab time.
    pub fn grab_offset(&self) -> (i32, i32) {
        (self.grab_rel_x, self.grab_rel_y)
    }

    /// Absolute pointer position at grab time.
    pub fn grab_position(&self) -> (i32, i32) {
        (self.grab_x, self.grab_y)
    }

    /// Pointer movement since the grab, zero when not grabbed.
    pub fn drag_delta(&self) -> (i32, i32) {
        if self.down_here {
            (self.x - self.grab_x, self.y - self.grab_y)
        } else {
            (0, 0)
        }
    }
}
