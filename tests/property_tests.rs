//! Property-based tests for xlog using proptest

use proptest::prelude::*;
use xlog::prelude::*;
use xlog::sinks::WriterSink;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Panic),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// Level parsing
// ============================================================================

proptest! {
    /// Every level name parses back to itself
    #[test]
    fn test_level_name_roundtrip(level in any_level()) {
        prop_assert_eq!(LogLevel::parse_or_info(level.to_str()), level);
    }

    /// Anything that is not an exact lowercase level name means info
    #[test]
    fn test_unknown_names_mean_info(name in ".*") {
        let known = ["debug", "info", "warn", "error", "panic", "fatal"];
        prop_assume!(!known.contains(&name.as_str()));
        prop_assert_eq!(LogLevel::parse_or_info(&name), LogLevel::Info);
    }

    /// Ordering follows severity
    #[test]
    fn test_level_ordering_matches_discriminant(a in any_level(), b in any_level()) {
        prop_assert_eq!(a < b, (a as u8) < (b as u8));
    }
}

// ============================================================================
// Records
// ============================================================================

proptest! {
    /// Any message and logger name encode to exactly one line
    #[test]
    fn test_record_is_single_line(message in ".*", name in ".*", level in any_level()) {
        let entry = LogEntry::new(level, &message).with_name(Some(&name));
        let line = Encoder::default().encode(&entry);
        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);
    }

    /// JSON records always parse and keep the message
    #[test]
    fn test_json_record_parses(message in ".*", key in "f_[a-z]{1,8}", value in any::<i64>()) {
        let entry = LogEntry::new(LogLevel::Info, &message)
            .with_fields(vec![field::int(key.clone(), value)]);
        let line = Encoder::json(EncoderConfig::iso8601()).encode(&entry);
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        prop_assert_eq!(parsed["msg"].as_str(), Some(entry.message.as_str()));
        prop_assert_eq!(parsed[&key].as_i64(), Some(value));
    }

    /// A logger writes exactly when the level is at or above its threshold
    #[test]
    fn test_threshold_decides_emission(min in any_level(), level in any_level()) {
        prop_assume!(!level.terminates());
        let buffer = std::sync::Arc::new(parking_lot::Mutex::new(Vec::<u8>::new()));
        let logger = Logger::builder()
            .min_level(min)
            .sink(WriterSink::new(SharedBuffer(buffer.clone())))
            .build();

        logger.log(level, "probe", &[]);
        let written = buffer.lock().len();
        prop_assert_eq!(written > 0, level >= min);
    }
}

// ============================================================================
// Key/value lists
// ============================================================================

proptest! {
    /// Pairs become fields; an odd tail becomes one `ignored` field
    #[test]
    fn test_sweeten_field_count(keys in prop::collection::vec("[a-z]{1,6}", 0..10), odd in any::<bool>()) {
        let mut items: Vec<FieldValue> = Vec::new();
        for (idx, key) in keys.iter().enumerate() {
            items.push(key.as_str().into());
            items.push((idx as i64).into());
        }
        if odd {
            items.push("orphan".into());
        }

        let fields = xlog::core::sugar::sweeten(&items);
        prop_assert_eq!(fields.len(), keys.len() + usize::from(odd));
        if odd {
            prop_assert_eq!(&fields.last().unwrap().key, "ignored");
        }
    }
}

struct SharedBuffer(std::sync::Arc<parking_lot::Mutex<Vec<u8>>>);

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
