//! Transformer invoker: retry-governed, error-classified calls to a text-transformation
//! service.
//!
//! - [`TransformInvoker`] runs the bounded retry loop as an explicit [`InvocationState`]
//!   machine and returns `Option<String>`.
//! - [`TransformBackend`] is the transport seam; [`OpenAiBackend`] speaks the
//!   OpenAI-compatible chat completions API.
//! - [`ServiceError`] carries the failure kind; [`FailureClass`] decides retry vs abort.

pub mod backend;
pub mod error;
pub mod invoker;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod types;


pub use backend::{OpenAiBackend, TransformBackend};
pub use error::{FailureClass, ServiceError};
pub use invoker::{InvokerConfig, TransformInvoker};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransformBackend;
pub use types::{
    AttemptOutcome, InvocationState, InvocationTrace, TransformAttempt, TransformRequest,
    TransformResult,
};
