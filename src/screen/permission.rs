//! Storage permission result handling.

use super::host::{Permission, PermissionRequester};

/// Request code used for the storage permission prompt.
pub const STORAGE_PERMISSION_REQUEST: u32 = 44;

/// How a permission result should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    /// Denied; explain and offer a retry.
    ShowRationale,
    /// Denied for good; point the user at system settings.
    RedirectToSettings,
    /// Not a request code this screen issued.
    Unhandled,
}

/// `true` only if at least one flag was returned and all are granted.
#[inline]
pub fn is_permitted(granted: &[bool]) -> bool {
    !granted.is_empty() && granted.iter().all(|g| *g)
}

pub fn classify(
    request_code: u32,
    granted: &[bool],
    requester: &dyn PermissionRequester,
) -> PermissionOutcome {
    if request_code != STORAGE_PERMISSION_REQUEST {
        return PermissionOutcome::Unhandled;
    }
    if is_permitted(granted) {
        PermissionOutcome::Granted
    } else if requester.should_show_rationale(Permission::WriteStorage) {
        PermissionOutcome::ShowRationale
    } else {
        PermissionOutcome::RedirectToSettings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rationale(bool);

    impl PermissionRequester for Rationale {
        fn request(&self, _permission: Permission, _request_code: u32) {}

        fn should_show_rationale(&self, _permission: Permission) -> bool {
            self.0
        }
    }

    #[test]
    fn empty_result_is_a_denial() {
        assert!(!is_permitted(&[]));
        assert!(!is_permitted(&[true, false]));
        assert!(is_permitted(&[true]));
    }

    #[test]
    fn denial_picks_rationale_or_settings() {
        let code = STORAGE_PERMISSION_REQUEST;
        assert_eq!(classify(code, &[true], &Rationale(true)), PermissionOutcome::Granted);
        assert_eq!(
            classify(code, &[false], &Rationale(true)),
            PermissionOutcome::ShowRationale
        );
        assert_eq!(
            classify(code, &[false], &Rationale(false)),
            PermissionOutcome::RedirectToSettings
        );
        assert_eq!(classify(7, &[false], &Rationale(true)), PermissionOutcome::Unhandled);
    }
}
