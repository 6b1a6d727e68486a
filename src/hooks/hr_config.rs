//! Permission documents mirrored into HR Config.

use tracing::debug;

use crate::config::{CheckInOutPermissionRow, HrConfig};

/// Appends the doc links of a submitted Attendance Permission.
pub fn on_attendance_permission_submit(config: &mut HrConfig, doc_links: &[String]) {
    config.attendance_config_data.extend(doc_links.iter().cloned());
    debug!(added = doc_links.len(), "Attendance permission links recorded");
}

/// Upserts a Check-in/out Permission row, keyed by its `doc_link`.
pub fn on_checkinout_permission_save(config: &mut HrConfig, row: CheckInOutPermissionRow) {
    match config
        .checkinout_permission_config
        .iter_mut()
        .find(|existing| existing.doc_link == row.doc_link)
    {
        Some(existing) => {
            existing.late_early_validation = row.late_early_validation;
            existing.image_required = row.image_required;
        }
        None => config.checkinout_permission_config.push(row),
    }
}
