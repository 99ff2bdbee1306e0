//! Observer for session setting changes.

/// Receives notifications when a [`WorkingSession`](super::WorkingSession)
/// changes a display setting.
///
/// Every hook has an empty default, so implementors only override what
/// they care about. Hooks run synchronously on the thread that made the
/// change, after the in-memory state is updated and before the change is
/// necessarily persisted. The session holds no lock while calling them.
pub trait SettingsListener: Send + Sync {
    fn on_background_color_changed(&self) {}

    fn on_alert_changed(&self, _date: i64, _enabled: bool) {}

    fn on_widget_changed(&self) {}

    fn on_checklist_mode_changed(&self, _old_mode: i64, _new_mode: i64) {}
}
