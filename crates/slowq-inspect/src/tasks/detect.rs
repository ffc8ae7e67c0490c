use tracing::{debug, info};

use slowq_model::{TaskSnapshot, Threshold};

/// Tasks that have run strictly longer than `threshold`.
pub fn slow_tasks(
    tasks: &[TaskSnapshot],
    threshold: Threshold,
) -> impl Iterator<Item = &TaskSnapshot> {
    tasks.iter().filter(move |task| task.exceeds(threshold))
}

/// Log one info event per slow task and return how many were logged.
///
/// The `task` field carries the complete snapshot as text so downstream parsers see
/// every field the cluster reported.
pub fn detect_slow_tasks(tasks: &[TaskSnapshot], threshold: Threshold) -> usize {
    let mut flagged = 0;
    for task in slow_tasks(tasks, threshold) {
        info!(
            task = %task,
            task_id = %task.id(),
            elapsed_seconds = task.elapsed_seconds(),
            threshold_seconds = threshold.as_secs(),
            "slow task detected"
        );
        flagged += 1;
    }

    debug!(
        total = tasks.len(),
        flagged,
        threshold_seconds = threshold.as_secs(),
        "slow task detection finished"
    );
    flagged
}
