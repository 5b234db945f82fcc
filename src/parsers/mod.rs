//! Roster parsers for character data stored as JSON or JSON Lines
//!
//! # Error Handling Strategy
//!
//! Parsing follows a **graceful degradation** approach:
//!
//! - **Individual record failures**: A malformed character (or JSONL line) is logged with
//!   `tracing::warn!` and skipped, so one bad sheet does not hide the rest of the roster.
//!
//! - **Catastrophic failure detection**: If >50% of records fail, or >100 consecutive JSONL
//!   lines fail, the parser returns an error rather than presenting a mostly-empty roster.
//!
//! - **Lenient fields**: Missing or `null` values become empty strings/lists (see
//!   [`deserializers`]), so downstream code never checks for absence.

pub mod deserializers;
pub mod roster;

pub use roster::{
    parse_character_file, parse_roster_document, parse_roster_file, parse_roster_json,
    parse_roster_lines,
};
