//! Integration tests for the ESC/P-R codec
//!
//! These tests verify end-to-end behavior of the protocol crate including:
//! - Registry self-consistency
//! - Encode/decode round trips for every registered command type
//! - Raw-byte equality semantics
//! - Stream scanning across raster data blocks
//! - Directional diffs

use escpr_protocol::inspect::{diff, DiffOutcome};
use escpr_protocol::{
    fields, registry, scan, Command, CommandCollection, CommandHeader, CommandKind, EncodeCommand,
    FieldFormat, KnownCommand, ESC,
};

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    /// Split an encoded command into its header and parameter bytes
    pub fn split_encoded(bytes: &[u8]) -> (CommandHeader, &[u8]) {
        assert_eq!(bytes[0], ESC);
        let header = CommandHeader::from_slice(&bytes[1..]).unwrap();
        (header, &bytes[10..])
    }

    /// Concatenate encoded commands
    pub fn stream(cmds: &[&KnownCommand]) -> Vec<u8> {
        cmds.iter().flat_map(|c| c.encode()).collect()
    }

    /// A job-start command with the given paper geometry
    pub fn job_start(width: i64, length: i64) -> KnownCommand {
        KnownCommand::new(CommandKind::JobStart)
            .with(fields::PAPER_WIDTH, width)
            .unwrap()
            .with(fields::PAPER_LENGTH, length)
            .unwrap()
    }
}

// ============================================================================
// Registry Tests
// ============================================================================

mod registry_tests {
    use super::*;

    #[test]
    fn every_layout_matches_declared_length() {
        registry::validate().unwrap();
        for kind in CommandKind::ALL {
            assert_eq!(
                kind.layout().width(),
                usize::from(kind.parameter_length()),
                "{}",
                kind.name()
            );
        }
    }

    #[test]
    fn header_embeds_parameter_length() {
        for kind in CommandKind::ALL {
            assert_eq!(kind.header().parameter_length(), kind.parameter_length());
            assert_eq!(CommandKind::from_header(&kind.header()), Some(kind));
        }
    }

    #[test]
    fn mecha_info_variants_are_distinct() {
        let long = CommandKind::MechaAdditionalInfo.header();
        let short = CommandKind::MechaAdditionalInfoShort.header();
        assert_eq!(long.name(), short.name());
        assert_ne!(long, short);
    }
}

// ============================================================================
// Codec Tests
// ============================================================================

mod codec_tests {
    use super::*;

    #[test]
    fn job_start_round_trip_with_negative_margins() {
        let cmd = helpers::job_start(2976, 4209)
            .with("TopMargin", -36)
            .unwrap()
            .with("LeftMargin", -42)
            .unwrap();
        let bytes = cmd.encode();
        assert_eq!(bytes.len(), 32);

        let (header, params) = helpers::split_encoded(&bytes);
        let decoded = Command::decode(header, params);
        let known = decoded.as_known().unwrap();
        assert_eq!(known.get("TopMargin"), Some(-36));
        assert_eq!(known.get("LeftMargin"), Some(-42));
        assert_eq!(known, &cmd);
    }

    #[test]
    fn highlight_point_keeps_full_64_bits() {
        let cmd = KnownCommand::new(CommandKind::AbwpSetting)
            .with("HighlightPoint", u64::MAX as i64)
            .unwrap();
        let bytes = cmd.encode();
        assert_eq!(&bytes[bytes.len() - 8..], &[0xFF; 8]);
        assert!(cmd.to_string().contains("HighlightPoint=18446744073709551615"));
    }

    #[test]
    fn unknown_command_encodes_verbatim() {
        let header = CommandHeader::new(b'q', 3, *b"setz");
        let cmd = Command::decode(header, &[0x01, 0x02, 0x03]);
        assert_eq!(cmd.kind(), None);
        assert_eq!(
            cmd.encode(),
            vec![0x1B, b'q', 0x03, 0x00, 0x00, 0x00, b's', b'e', b't', b'z', 0x01, 0x02, 0x03]
        );
    }
}

// ============================================================================
// Scanner Tests
// ============================================================================

mod scanner_tests {
    use super::*;

    #[test]
    fn real_capture_prefix() {
        // IPP preamble, remote-mode block, q-setq, q-seti, j-setj, p-sttp, p-setq
        let buf: Vec<u8> = vec![
            0x00, 0x05, 0x00, 0x1B, 0x00, 0x00, 0x00, 0x1B, 0x28, 0x52, 0x06, 0x00, 0x00, 0x45,
            0x53, 0x43, 0x50, 0x52, 0x1B, 0x71, 0x09, 0x00, 0x00, 0x00, 0x73, 0x65, 0x74, 0x71,
            0x0C, 0x02, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x1B, 0x71, 0x0A, 0x00, 0x00,
            0x00, 0x73, 0x65, 0x74, 0x69, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x1B, 0x6A, 0x16, 0x00, 0x00, 0x00, 0x73, 0x65, 0x74, 0x6A, 0x00, 0x00, 0x0B,
            0xA0, 0x00, 0x00, 0x10, 0x71, 0x00, 0x2A, 0x00, 0x2A, 0x00, 0x00, 0x0B, 0x4C, 0x00,
            0x00, 0x10, 0x1D, 0x00, 0x00, 0x1B, 0x70, 0x00, 0x00, 0x00, 0x00, 0x73, 0x74, 0x74,
            0x70, 0x1B, 0x70, 0x0C, 0x00, 0x00, 0x00, 0x73, 0x65, 0x74, 0x71, 0x00, 0x03, 0x04,
            0x00, 0xDC, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let kinds: Vec<_> = scan(&buf).iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                Some(CommandKind::PrintQuality),
                Some(CommandKind::ImageProcessing),
                Some(CommandKind::JobStart),
                Some(CommandKind::PageStart),
                Some(CommandKind::PageQuality),
            ]
        );

        let collection = CommandCollection::from_bytes(&buf);
        let print_quality = collection
            .get(&CommandKind::PrintQuality.header())
            .and_then(Command::as_known)
            .unwrap();
        assert_eq!(print_quality.get(fields::MEDIA_TYPE_ID), Some(0x0C));

        let job = collection
            .get(&CommandKind::JobStart.header())
            .and_then(Command::as_known)
            .unwrap();
        assert_eq!(job.get(fields::PAPER_WIDTH), Some(2976));
        assert_eq!(job.get(fields::PAPER_LENGTH), Some(4209));
    }

    #[test]
    fn escape_inside_parameters_truncates_token() {
        // PaperWidth 0x1B00 puts an escape byte inside the parameter block
        let cmd = helpers::job_start(0x1B00, 4209);
        let cmds = scan(&cmd.encode());
        let known = cmds[0].as_known().unwrap();
        assert_eq!(known.raw().len(), 2);
        assert_eq!(known.get(fields::PAPER_WIDTH), Some(0));
    }

    #[test]
    fn repeated_headers_collapse_in_collection() {
        let first = KnownCommand::new(CommandKind::PageNum);
        let second = KnownCommand::new(CommandKind::PageNum)
            .with(fields::NEXT_PAGE, 1)
            .unwrap();
        let buf = helpers::stream(&[&first, &second]);

        assert_eq!(scan(&buf).len(), 2);
        let collection = CommandCollection::from_bytes(&buf);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.commands()[0].as_known(), Some(&second));
    }
}

// ============================================================================
// Diff Tests
// ============================================================================

mod diff_tests {
    use super::*;

    #[test]
    fn only_reference_keys_are_reported() {
        let h1_a = helpers::job_start(2976, 4209);
        let h1_b = helpers::job_start(3060, 3960);
        let h2 = KnownCommand::new(CommandKind::PageStart);

        let a = CommandCollection::from_bytes(&helpers::stream(&[&h1_a, &h2]));
        let b = CommandCollection::from_bytes(&helpers::stream(&[&h1_b]));

        let forward = diff(&a, &b);
        assert!(matches!(forward[0].outcome, DiffOutcome::Differing(_)));
        assert_eq!(forward[1].header, h2.header());
        assert_eq!(forward[1].outcome, DiffOutcome::Missing);

        let backward = diff(&b, &a);
        assert_eq!(backward.len(), 1);
        assert!(backward.iter().all(|e| e.header != h2.header()));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn field_value(format: FieldFormat) -> BoxedStrategy<i64> {
        match format {
            FieldFormat::U8 => (0i64..=0xFF).boxed(),
            FieldFormat::U16Be => (0i64..=0xFFFF).boxed(),
            FieldFormat::I16Be => (i64::from(i16::MIN)..=i64::from(i16::MAX)).boxed(),
            FieldFormat::U32Be => (0i64..=i64::from(u32::MAX)).boxed(),
            FieldFormat::U64Be => any::<i64>().boxed(),
        }
    }

    /// Any registered command with arbitrary in-range field values
    fn known_command() -> impl Strategy<Value = KnownCommand> {
        prop::sample::select(CommandKind::ALL.to_vec()).prop_flat_map(|kind| {
            let values: Vec<_> = kind
                .layout()
                .fields()
                .iter()
                .map(|f| field_value(f.format))
                .collect();
            values.prop_map(move |values| {
                let mut cmd = KnownCommand::new(kind);
                for (field, value) in kind.layout().fields().iter().zip(values) {
                    cmd.set(field.name, value).unwrap();
                }
                cmd
            })
        })
    }

    /// Commands whose encoding can pass through the scanner intact
    fn scannable_command() -> impl Strategy<Value = KnownCommand> {
        known_command().prop_filter("escape byte in parameters", |cmd| {
            !cmd.encode()[1..].contains(&ESC)
        })
    }

    fn raster_payload() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(any::<u8>(), 0..256)
            .prop_filter("payload contains end marker", |bytes| {
                escpr_protocol::find_subslice(bytes, b"ESCPR").is_none()
            })
    }

    proptest! {
        #[test]
        fn decode_encode_round_trip(cmd in known_command()) {
            let bytes = cmd.encode();
            let (header, params) = helpers::split_encoded(&bytes);
            let decoded = Command::decode(header, params);
            prop_assert_eq!(decoded, Command::Known(cmd.clone()));
            prop_assert_eq!(Command::decode(header, params).encode(), bytes);
        }

        #[test]
        fn equal_raw_bytes_means_equal(cmd in known_command()) {
            let a = KnownCommand::decode(cmd.kind(), cmd.raw());
            let b = KnownCommand::decode(cmd.kind(), &cmd.raw().to_vec());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn differing_raw_bytes_never_equal(
            cmd in known_command().prop_filter("needs parameters", |c| !c.raw().is_empty()),
            index in any::<prop::sample::Index>(),
            flip in 1u8..=0xFF,
        ) {
            let mut raw = cmd.raw().to_vec();
            let i = index.index(raw.len());
            raw[i] ^= flip;
            let other = KnownCommand::decode(cmd.kind(), &raw);
            prop_assert_ne!(other, cmd);
        }

        #[test]
        fn scanner_skips_data_block(
            first in scannable_command(),
            payload in raster_payload(),
            second in scannable_command(),
        ) {
            let mut buf = first.encode();
            buf.extend([ESC, b'd']);
            buf.extend(&payload);
            buf.push(ESC);
            buf.extend(b"ESCPR");
            buf.extend(second.encode());

            let cmds = scan(&buf);
            prop_assert_eq!(cmds, vec![Command::Known(first), Command::Known(second)]);
        }
    }
}
