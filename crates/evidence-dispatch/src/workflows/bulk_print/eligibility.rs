use super::constants::READY_TO_LIST;
use super::domain::{CaseEvent, CaseSnapshot, EventKind};

/// Event kinds that trigger a dispatch attempt when no translation is pending.
const TRIGGER_EVENTS: [EventKind; 6] = [
    EventKind::ValidAppealCreated,
    EventKind::DraftToValidAppealCreated,
    EventKind::ValidAppeal,
    EventKind::InterlocValidAppeal,
    EventKind::AppealToProceed,
    EventKind::SendToDwp,
];

/// Whether the dispatcher subscribes to this event at all.
///
/// Trigger events are skipped while translation work is outstanding. A resend is
/// always taken, see [`resend_bypasses_translation`].
pub fn handles_event(event: &CaseEvent) -> bool {
    let triggered =
        TRIGGER_EVENTS.contains(&event.kind) && !event.translation_work_outstanding;
    triggered || resend_bypasses_translation(event.kind)
}

/// An explicit resend is operator driven and ignores outstanding translation work.
pub fn resend_bypasses_translation(kind: EventKind) -> bool {
    kind == EventKind::ResendToDwp
}

/// Decides whether a case is posted on paper, based on how the appeal was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityGate {
    submit_types: Vec<String>,
}

impl EligibilityGate {
    pub fn new(submit_types: Vec<String>) -> Self {
        Self { submit_types }
    }

    pub fn is_eligible(&self, snapshot: Option<&CaseSnapshot>) -> bool {
        let Some(snapshot) = snapshot else {
            return false;
        };
        let Some(received_via) = snapshot
            .appeal
            .as_ref()
            .and_then(|appeal| appeal.received_via.as_deref())
        else {
            return false;
        };

        match snapshot.created_in_gaps_from.as_deref() {
            Some(origin) if origin != READY_TO_LIST => self.accepts_channel(received_via),
            _ => false,
        }
    }

    fn accepts_channel(&self, received_via: &str) -> bool {
        self.submit_types
            .iter()
            .any(|accepted| accepted.to_lowercase() == received_via.to_lowercase())
    }
}
