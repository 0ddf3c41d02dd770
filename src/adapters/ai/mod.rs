//! AI responder adapters.
//!
//! - `HttpAIResponder` - hosted chat function over HTTP
//! - `KeywordResponder` - offline scripted replies
//! - `MockAIResponder` - scriptable test double

mod http_responder;
mod keyword_responder;
mod mock_responder;

pub use http_responder::{HttpAIResponder, HttpAIResponderConfig};
pub use keyword_responder::KeywordResponder;
pub use mock_responder::MockAIResponder;
