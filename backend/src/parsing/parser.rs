use tracing::debug;

use super::base::extract_base;
use super::changes::apply_changes;
use crate::algorithms::reconcile_all;
use crate::models::{clean_message, ParsedSchedule, ScheduleBlock};

/// Outage schedule parser.
///
/// Stateless: recognition patterns are compiled once per process and every
/// call works on its own data, so one parser can serve any number of blocks
/// from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleParser;

impl ScheduleParser {
    pub fn new() -> Self {
        Self
    }

    /// Turn one date's text block into reconciled per-queue intervals.
    ///
    /// Never fails: text that matches no known pattern is ignored and only
    /// makes the result smaller. Callers should treat an empty result as
    /// "nothing to save" for the date.
    pub fn parse_block(&self, block: &ScheduleBlock) -> ParsedSchedule {
        let mut raw = extract_base(&block.schedule_text);

        if !block.extras_text.trim().is_empty() {
            apply_changes(&block.extras_text, &mut raw);
        }

        let queues = reconcile_all(&raw);
        debug!(
            date = %block.date,
            queues = queues.len(),
            "Parsed schedule block"
        );

        ParsedSchedule {
            date: block.date,
            queues,
            message: clean_message(&block.extras_text),
        }
    }

    /// Parse blocks independently, preserving their order.
    pub fn parse_blocks(&self, blocks: &[ScheduleBlock]) -> Vec<ParsedSchedule> {
        blocks.iter().map(|block| self.parse_block(block)).collect()
    }
}

/// Parse a block with a default [`ScheduleParser`].
pub fn parse_block(block: &ScheduleBlock) -> ParsedSchedule {
    ScheduleParser::new().parse_block(block)
}
