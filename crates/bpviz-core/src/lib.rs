//! bpviz Core Types and Definitions
//!
//! This crate provides the foundational types shared by the bpviz translation
//! engine and its command-line front end. It includes:
//!
//! - **Blueprint**: The workflow document being visualized ([`blueprint`] module)
//! - **Sequence**: The intermediate sequence diagram model ([`sequence`] module)
//!
//! # Pipeline Position
//!
//! ```text
//! Blueprint (these types)
//!     ↓ builder + mapper
//! SequenceDiagram (these types)
//!     ↓ export
//! Mermaid text
//! ```

pub mod blueprint;
pub mod sequence;
