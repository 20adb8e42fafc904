use bevy::prelude::*;

/// Top-level system ordering sets for the frame.
///
/// Configured as a chain: Input → Parallax → Ui.
/// Individual plugins place their systems into the appropriate set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Parallax,
    Ui,
}
