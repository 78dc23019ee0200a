/// Cross-platform notification support
/// Currently only implements macOS notifications
use crate::domain::Phase;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Message shown when a Pomodoro phase runs out and the next one begins
pub fn phase_message(finished: Phase, next: Phase) -> String {
    if finished.is_break() {
        "Break is over, back to work".to_string()
    } else if next == Phase::LongBreak {
        "Great work! Time for a long break".to_string()
    } else {
        "Work session done, take a short break".to_string()
    }
}

/// Send a notification when a Pomodoro phase completes
pub fn notify_phase_complete(finished: Phase, next: Phase) {
    let message = phase_message(finished, next);

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "⏱ {}" with title "Organiser - Pomodoro""#,
            message.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!(error = %e, "notification not sent");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_message() {
        assert_eq!(phase_message(Phase::Work, Phase::ShortBreak), "Work session done, take a short break");
        assert_eq!(phase_message(Phase::Work, Phase::LongBreak), "Great work! Time for a long break");
        assert_eq!(phase_message(Phase::LongBreak, Phase::Work), "Break is over, back to work");
    }
}
