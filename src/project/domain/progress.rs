//! Completion percentage derived from a task collection.

use super::{Task, TaskStatus};

/// Returns the share of done tasks as a whole percentage in `0..=100`.
///
/// The value is `round(100 * done / max(1, total))` with halves rounded up,
/// so an empty collection reports `0`.
#[must_use]
pub fn calc_progress(tasks: &[Task]) -> u8 {
    let total = u64::try_from(tasks.len()).unwrap_or(u64::MAX).max(1);
    let done = u64::try_from(
        tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::Done)
            .count(),
    )
    .unwrap_or(0);

    // round(100 * done / total) == floor((200 * done + total) / (2 * total))
    let numerator = done.saturating_mul(200).saturating_add(total);
    let denominator = total.saturating_mul(2);
    let percent = numerator.checked_div(denominator).unwrap_or(0).min(100);
    u8::try_from(percent).unwrap_or(100)
}
