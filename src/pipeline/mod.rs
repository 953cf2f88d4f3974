//! Pipeline stages for Markdown-to-Word conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different document backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! discover ──▶ assets ──▶ classify ──▶ emit
//! (walk .md)   (PDFs)     (per line)   (.docx)
//! ```
//!
//! 1. [`discover`] — enumerate `.md` files under the input root, paired with
//!    their root-relative paths for output mirroring
//! 2. [`assets`]   — extract `[text](target.pdf)` references and localize
//!    them (HTTP download or local copy); the only stage with network I/O
//! 3. [`classify`] — tag each source line as blank, info block, heading,
//!    image, or plain text
//! 4. [`emit`]     — fold classified lines into an ordered block sequence
//!    and serialize it as a Word document

pub mod assets;
pub mod classify;
pub mod discover;
pub mod emit;
