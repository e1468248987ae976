//! View state, transition candidates, and the board presentation model.

mod candidate;
mod layout;
mod view;

pub use candidate::{DiscardReason, DropResolution, TransitionCandidate};
pub use layout::{
    BoardColumns, BoardLayout, BoardScreen, Chip, ChipTone, ColumnView, EMPTY_COLUMN_LABEL,
    TaskCard,
};
pub use view::{BoardViewState, ProjectLoad};
