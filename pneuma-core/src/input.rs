//! Button input mapping
//!
//! Turns debounced button events into session commands. The primary
//! button is context sensitive (it ends the hold while holding, and
//! toggles start/pause otherwise); the plus/minus pair adjusts whichever
//! setting currently has focus.

use crate::session::{Phase, SessionCommand};

/// Debounced button events from the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Primary button short press (<500 ms)
    PrimaryClick,
    /// Primary button long press (>=500 ms)
    PrimaryLongPress,
    /// Plus button short press
    PlusClick,
    /// Minus button short press
    MinusClick,
    /// Select button short press (moves setting focus)
    SelectClick,
}

/// Which setting the plus/minus pair adjusts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingFocus {
    /// Breaths per round
    #[default]
    Breaths,
    /// Breath cycle length
    Length,
}

/// Stateful button-to-command mapper
///
/// Holds only the setting focus; everything else is derived from the
/// session phase at the time of the press.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper {
    focus: SettingFocus,
}

impl InputMapper {
    /// Create a mapper with focus on the breath count
    pub fn new() -> Self {
        Self::default()
    }

    /// Current setting focus
    pub fn focus(&self) -> SettingFocus {
        self.focus
    }

    /// Map a button event to a session command
    ///
    /// Returns `None` for events that only affect the mapper itself.
    /// Adjuster commands are emitted regardless of phase; the session
    /// rejects them while active.
    pub fn map(&mut self, event: ButtonEvent, phase: Phase) -> Option<SessionCommand> {
        match event {
            ButtonEvent::PrimaryClick => {
                if phase == Phase::Holding {
                    Some(SessionCommand::FinishHolding)
                } else {
                    Some(SessionCommand::StartStop)
                }
            }
            ButtonEvent::PrimaryLongPress => Some(SessionCommand::Reset),
            ButtonEvent::SelectClick => {
                self.focus = match self.focus {
                    SettingFocus::Breaths => SettingFocus::Length,
                    SettingFocus::Length => SettingFocus::Breaths,
                };
                None
            }
            ButtonEvent::PlusClick => Some(match self.focus {
                SettingFocus::Breaths => SessionCommand::IncreaseBreaths,
                SettingFocus::Length => SessionCommand::IncreaseLength,
            }),
            ButtonEvent::MinusClick => Some(match self.focus {
                SettingFocus::Breaths => SessionCommand::DecreaseBreaths,
                SettingFocus::Length => SessionCommand::DecreaseLength,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_click_starts_and_pauses() {
        let mut mapper = InputMapper::new();
        assert_eq!(
            mapper.map(ButtonEvent::PrimaryClick, Phase::Idle),
            Some(SessionCommand::StartStop)
        );
        assert_eq!(
            mapper.map(ButtonEvent::PrimaryClick, Phase::Breathing),
            Some(SessionCommand::StartStop)
        );
    }

    #[test]
    fn test_primary_click_ends_hold() {
        let mut mapper = InputMapper::new();
        assert_eq!(
            mapper.map(ButtonEvent::PrimaryClick, Phase::Holding),
            Some(SessionCommand::FinishHolding)
        );
    }

    #[test]
    fn test_long_press_resets() {
        let mut mapper = InputMapper::new();
        assert_eq!(
            mapper.map(ButtonEvent::PrimaryLongPress, Phase::Recovery),
            Some(SessionCommand::Reset)
        );
    }

    #[test]
    fn test_select_toggles_focus() {
        let mut mapper = InputMapper::new();
        assert_eq!(mapper.focus(), SettingFocus::Breaths);

        assert_eq!(mapper.map(ButtonEvent::SelectClick, Phase::Idle), None);
        assert_eq!(mapper.focus(), SettingFocus::Length);

        assert_eq!(mapper.map(ButtonEvent::SelectClick, Phase::Idle), None);
        assert_eq!(mapper.focus(), SettingFocus::Breaths);
    }

    #[test]
    fn test_plus_minus_follow_focus() {
        let mut mapper = InputMapper::new();
        assert_eq!(
            mapper.map(ButtonEvent::PlusClick, Phase::Idle),
            Some(SessionCommand::IncreaseBreaths)
        );
        assert_eq!(
            mapper.map(ButtonEvent::MinusClick, Phase::Idle),
            Some(SessionCommand::DecreaseBreaths)
        );

        mapper.map(ButtonEvent::SelectClick, Phase::Idle);
        assert_eq!(
            mapper.map(ButtonEvent::PlusClick, Phase::Idle),
            Some(SessionCommand::IncreaseLength)
        );
        assert_eq!(
            mapper.map(ButtonEvent::MinusClick, Phase::Idle),
            Some(SessionCommand::DecreaseLength)
        );
    }
}
