//! # Tutorial: Recognizing Responses with triage
//!
//! Learn to dispatch responses to handlers step by step.
//!
//! ## Chapters
//!
//! 1. [Getting Started][chapter_0] - Your first handler and dispatcher
//! 2. [Errors & Fallbacks][chapter_1] - Domain errors, unrecognized responses, observers
//!
//! Ready? Start with [Chapter 0: Getting Started][chapter_0].

pub mod chapter_0;
pub mod chapter_1;
