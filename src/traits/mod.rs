//! Trait definitions for extensible components
//!
//! These traits allow users to swap implementations or provide their own
//! delivery backend.

pub mod mailer;
