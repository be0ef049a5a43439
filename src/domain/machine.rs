use super::event::{Effect, Event, SubmissionPayload};
use super::geometry::{self, GeometryRejection};
use super::replies::Reply;
use super::session::{Sender, Session, SessionState, Submission};
use super::url;

/// Outcome of feeding one event to a session: the state to adopt and the
/// effects the driver must execute, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub next: SessionState,
    pub effects: Vec<Effect>,
}

impl Step {
    fn stay(state: &SessionState) -> Self {
        Self {
            next: state.clone(),
            effects: Vec::new(),
        }
    }

    fn reply(state: &SessionState, reply: Reply) -> Self {
        Self {
            next: state.clone(),
            effects: vec![Effect::Reply(reply)],
        }
    }

    fn advance(next: SessionState, effects: Vec<Effect>) -> Self {
        Self { next, effects }
    }
}

/// The pure transition function of the conversation flow.
///
/// No I/O, no logging, no clock: everything the outside world must do comes
/// back as [`Effect`]s. Rejected input never advances the state.
pub fn transition(session: &Session, sender: &Sender, event: Event) -> Step {
    use SessionState::*;

    match (&session.state, event) {
        // Cancellation is honoured from every state.
        (_, Event::Cancel) => Step::advance(Terminated, vec![Effect::Reply(Reply::Cancelled)]),

        (AwaitingStart, Event::Start) => {
            Step::advance(AwaitingTxUrl, vec![Effect::Reply(Reply::Welcome)])
        }
        // A repeated /start mid-conversation is ignored rather than
        // restarting the flow.
        (_, Event::Start) => Step::stay(&session.state),

        (AwaitingTxUrl, Event::Text(text)) => {
            if url::is_valid_url(&text) {
                let submission = Submission {
                    username: sender.display_name(),
                    tx_url: text,
                };
                Step::advance(
                    AwaitingImage(submission),
                    vec![Effect::Reply(Reply::AskForImage)],
                )
            } else {
                Step::reply(&session.state, Reply::InvalidUrl)
            }
        }

        (AwaitingImage(_), Event::Attachment { file, kind }) if kind.is_image() => Step {
            next: session.state.clone(),
            effects: vec![Effect::RetrieveFile(file)],
        },

        (AwaitingImage(submission), Event::Retrieved { bytes }) => {
            match geometry::check_geometry(&bytes) {
                Ok(_) => {
                    let payload = SubmissionPayload::assemble(session.user_id, submission, bytes);
                    Step::advance(Terminated, vec![Effect::Forward(payload)])
                }
                // Rejected bytes are dropped with the event.
                Err(GeometryRejection::NotSquareOrTooSmall { .. }) => {
                    Step::reply(&session.state, Reply::BadGeometry)
                }
                Err(GeometryRejection::Undecodable) => {
                    Step::reply(&session.state, Reply::ProcessingFailed)
                }
            }
        }

        // Anything else while an image is expected: ask for a real image.
        (AwaitingImage(_), Event::Text(_) | Event::Attachment { .. } | Event::Unsupported) => {
            Step::reply(&session.state, Reply::NotAnImage)
        }

        // Terminated is absorbing; input outside an active step is ignored.
        (state, _) => Step::stay(state),
    }
}
