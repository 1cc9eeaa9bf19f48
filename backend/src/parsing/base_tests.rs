#[cfg(test)]
mod tests {
    use crate::models::{QueueId, RawInterval};
    use crate::parsing::base::extract_base;
    use std::collections::BTreeMap;

    fn q(raw: &str) -> QueueId {
        raw.parse().unwrap()
    }

    fn rendered(queues: &BTreeMap<QueueId, Vec<RawInterval>>, queue: &str) -> Vec<String> {
        queues
            .get(&q(queue))
            .map(|intervals| {
                intervals
                    .iter()
                    .map(|raw| match raw {
                        RawInterval::Base(span) => format!("{}-{}", span.start, span.end),
                        other => panic!("unexpected {other:?}"),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Test the usual one-queue-per-line table
    #[test]
    fn test_extract_line_per_queue() {
        let text = "підчерга 1.1 – з 10:00 до 15:00;\n\
                    підчерга 1.2 – з 04:00 до 09:00, з 18:00 до 23:00;\n\
                    підчерга 2.1 – з 6:00 до 11:00.";
        let queues = extract_base(text);

        assert_eq!(queues.len(), 3);
        assert_eq!(rendered(&queues, "1.1"), vec!["10:00-15:00"]);
        assert_eq!(rendered(&queues, "1.2"), vec!["04:00-09:00", "18:00-23:00"]);
        assert_eq!(rendered(&queues, "2.1"), vec!["06:00-11:00"]);
    }

    /// Test that a marker without times does not create a queue
    #[test]
    fn test_marker_without_times_is_omitted() {
        let queues = extract_base("підчерга 1.1 – з 10:00 до 15:00;\nпідчерга 3.2 – без відключень");
        assert!(queues.contains_key(&q("1.1")));
        assert!(!queues.contains_key(&q("3.2")));
    }

    /// Test that each marker on a line owns the text up to the next marker
    #[test]
    fn test_multiple_markers_on_one_line() {
        let queues =
            extract_base("підчерга 1.1 – з 10:00 до 15:00; підчерга 1.2 – з 16:00 до 20:00");
        assert_eq!(rendered(&queues, "1.1"), vec!["10:00-15:00"]);
        assert_eq!(rendered(&queues, "1.2"), vec!["16:00-20:00"]);
    }

    /// Test last write wins for a queue listed twice
    #[test]
    fn test_repeated_queue_last_block_wins() {
        let queues = extract_base(
            "підчерга 4.1 – з 01:00 до 03:00;\nпідчерга 4.1 – з 12:00 до 14:00, з 20:00 до 22:00;",
        );
        assert_eq!(rendered(&queues, "4.1"), vec!["12:00-14:00", "20:00-22:00"]);
    }

    /// Test that a later line without times does not erase earlier ones
    #[test]
    fn test_repeated_queue_without_times_keeps_previous() {
        let queues = extract_base("підчерга 4.1 – з 01:00 до 03:00;\nпідчерга 4.1 – уточнюється");
        assert_eq!(rendered(&queues, "4.1"), vec!["01:00-03:00"]);
    }

    /// Test markers split from their pair and times across lines
    #[test]
    fn test_split_lines_fall_back_to_window_scan() {
        let text = "підчерга\n1.1\n– з 10:00 до 15:00;\nпідчерга\n1.2\n– з 16:00 до 20:00;";
        let queues = extract_base(text);
        assert_eq!(rendered(&queues, "1.1"), vec!["10:00-15:00"]);
        assert_eq!(rendered(&queues, "1.2"), vec!["16:00-20:00"]);
    }

    /// Test queues outside 1.1 - 6.2 are ignored
    #[test]
    fn test_invalid_queue_marker_ignored() {
        let queues = extract_base("підчерга 7.1 – з 10:00 до 15:00;\nпідчерга 6.2 – з 10:00 до 12:00;");
        assert_eq!(queues.len(), 1);
        assert!(queues.contains_key(&q("6.2")));
    }

    /// Test overnight ranges survive extraction
    #[test]
    fn test_overnight_range_kept() {
        let queues = extract_base("підчерга 5.2 – з 23:00 до 02:00;");
        assert_eq!(rendered(&queues, "5.2"), vec!["23:00-02:00"]);
    }

    /// Test a range ending at 24:00 is kept as end of day
    #[test]
    fn test_end_of_day_range_kept() {
        let queues = extract_base("підчерга 1.1 – з 20:00 до 24:00;\nпідчерга 1.2 – з 10:00 до 12:00;");
        assert_eq!(queues.len(), 2);
        assert_eq!(rendered(&queues, "1.1"), vec!["20:00-24:00"]);
    }

    /// Test header prose before the first marker is not read in a whole-text scan
    #[test]
    fn test_window_scan_ignores_text_before_first_marker() {
        let text = "з 00:00 до 24:00 діють графіки погодинних відключень:\n\
                    підчерга\n1.1\n– з 10:00 до 15:00;\nпідчерга\n1.2\n– з 16:00 до 20:00;";
        let queues = extract_base(text);
        assert_eq!(rendered(&queues, "1.1"), vec!["10:00-15:00"]);
        assert_eq!(rendered(&queues, "1.2"), vec!["16:00-20:00"]);
    }

    /// Test a single table line still owns the text before its marker
    #[test]
    fn test_line_prefix_belongs_to_its_queue() {
        let queues = extract_base("з 08:00 до 10:00 – підчерга 2.1, з 12:00 до 14:00");
        assert_eq!(rendered(&queues, "2.1"), vec!["08:00-10:00", "12:00-14:00"]);
    }

    /// Test empty and unrelated text
    #[test]
    fn test_no_markers() {
        assert!(extract_base("").is_empty());
        assert!(extract_base("Графік відключень не застосовується").is_empty());
    }
}
