//! Logical input actions and the per-frame held snapshot.
//!
//! The host samples its keyboard once per update and hands the scenes a
//! [`HeldActions`]; nothing below the host knows about physical keys.

/// Something the player can hold down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    /// Leave the game for the menu.
    OpenMenu,
    /// Activate the selected menu entry.
    Confirm,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::TurnLeft,
        Action::TurnRight,
        Action::OpenMenu,
        Action::Confirm,
    ];

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of actions held during one update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldActions(u16);

impl HeldActions {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn press(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn release(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    /// Actions held now but not in `previous`.
    pub fn pressed_since(&self, previous: &HeldActions) -> HeldActions {
        HeldActions(self.0 & !previous.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Action> for HeldActions {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut held = HeldActions::none();
        for a in iter {
            held.press(a);
        }
        held
    }
}
