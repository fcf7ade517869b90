//! Message types exchanged between the session actor and its fetch actors.

use reqwest::Method;
use serde_json::Value;
use url::Url;

/// Opaque routing token carried through a fetch round-trip.
///
/// The session actor picks a success and a failure label when it builds a
/// [`FetchInstruction`]; the fetch actor copies the matching label into its
/// outcome without interpreting it. This is what lets one generic fetch
/// actor serve every operation: routing lives in the label, not the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeLabel {
    LoginSuccess,
    LoginFailure,
    SignupSuccess,
    SignupFailure,
    MenuFetchSuccess,
    MenuFetchFailure,
    OrdersFetchSuccess,
    OrdersFetchFailure,
}

/// An immutable description of one HTTP call.
///
/// `payload` is serialized as a JSON body only when the method is not GET.
/// `headers` are plain string pairs; the fetch actor hands them to the HTTP
/// client unvalidated, so a malformed header surfaces as a transport
/// failure like any other.
#[derive(Debug, Clone)]
pub struct FetchInstruction {
    pub url: Url,
    pub method: Method,
    pub payload: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub on_success: OutcomeLabel,
    pub on_failure: OutcomeLabel,
}

/// The single terminal message a fetch actor reports to its spawner.
///
/// `generation` identifies the spawn that produced the outcome. The session
/// actor drops outcomes whose generation is not the current one, so a
/// superseded fetch can never settle a later operation.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Success {
        generation: u64,
        label: OutcomeLabel,
        result: Value,
    },
    Failure {
        generation: u64,
        label: OutcomeLabel,
        message: String,
    },
}

impl FetchOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Success { generation, .. } | Self::Failure { generation, .. } => *generation,
        }
    }

    pub fn label(&self) -> OutcomeLabel {
        match self {
            Self::Success { label, .. } | Self::Failure { label, .. } => *label,
        }
    }
}
