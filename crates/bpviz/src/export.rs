//! Text export of sequence diagram models.
//!
//! [`mermaid`] serializes a [`SequenceDiagram`](bpviz_core::sequence::SequenceDiagram)
//! into Mermaid `sequenceDiagram` markup.

pub mod mermaid;
