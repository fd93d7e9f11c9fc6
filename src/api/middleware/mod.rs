//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. CORS: answer preflight before anything else
//! 2. General rate limiter: every route
//! 3. Analysis rate limiter: `/api/symptoms/analyze` only

pub mod rate;
