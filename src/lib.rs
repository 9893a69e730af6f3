// toxmeter: six-category toxicity analysis backed by a Gemini model
//
// This is the library root. The toxicity module owns the request flow and
// the parse/classify core; output and web are the two ways results are shown.

pub mod config;
pub mod output;
pub mod toxicity;

#[cfg(feature = "web")]
pub mod web;
