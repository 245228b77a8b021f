//! Fixed values shared by the dispatch pipeline and the outcome recorder.

/// Origin marker for cases that arrived already listed; never printed.
pub const READY_TO_LIST: &str = "readyToList";

/// `dwp_state` applied to ready-to-list cases once they are marked sent.
pub const DWP_STATE_UNREGISTERED: &str = "unregistered";

pub const HMCTS_DWP_STATE_SENT: &str = "sentToDwp";
pub const HMCTS_DWP_STATE_FAILED: &str = "failedSending";

/// Identity the content store sees for evidence downloads.
pub const CONTENT_STORE_USER: &str = "sscs";

pub const SENT_TO_DWP_TITLE: &str = "Sent to DWP";
pub const SENT_TO_DWP_ERROR_TITLE: &str = "Send to DWP Error";

pub const NOT_ELIGIBLE_DESCRIPTION: &str = "Case state is now sent to DWP";
pub const INTERNAL_ERROR_DESCRIPTION: &str =
    "Send to DWP Error event has been triggered from Evidence Share service";

pub const DL6: &str = "dl6";
pub const DL16: &str = "dl16";
pub const SSCS1: &str = "sscs1";

pub const PRINTABLE_EXTENSION: &str = ".pdf";
