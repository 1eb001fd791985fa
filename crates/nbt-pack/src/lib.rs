//! NBT (Named Binary Tag) binary format codec.
//!
//! NBT is the tagged, nested, length-prefixed binary tree format used by
//! Minecraft save data. This crate decodes a byte buffer into an owned
//! [`NbtValue`] tree, lets collaborators navigate and mutate it through a
//! path-addressed API, and encodes it back bit-exactly — optionally wrapped
//! in a gzip or zlib envelope.
//!
//! ```
//! use nbt_pack::{NbtDocument, NbtValue, PathStep};
//!
//! let mut doc = NbtDocument::new();
//! doc.insert_entry(&[], "id", NbtValue::Int(7)).unwrap();
//! let bytes = doc.save().unwrap();
//! let doc = NbtDocument::load(&bytes).unwrap();
//! assert_eq!(doc.get(&[PathStep::Name("id")]).unwrap(), &NbtValue::Int(7));
//! ```

pub mod compression;
pub mod constants;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod nbt_value;
pub mod path;
pub mod tag_str;
pub mod to_json;

pub use compression::Compression;
pub use constants::TagKind;
pub use decoder::NbtDecoder;
pub use document::NbtDocument;
pub use encoder::NbtEncoder;
pub use error::{DecodeError, EncodeError, TreeError};
pub use nbt_value::{NbtList, NbtValue};
pub use path::PathStep;
pub use tag_str::TagStr;

#[cfg(test)]
mod tests {
    use super::*;

    /// `{"id": Int(7), "tags": List<String>["a", "b"]}` under an anonymous
    /// root, written out by hand from the grammar.
    fn scenario_bytes() -> Vec<u8> {
        vec![
            0x0a, 0x00, 0x00, // root: Compound, name ""
            0x03, 0x00, 0x02, b'i', b'd', // Int "id"
            0x00, 0x00, 0x00, 0x07, // 7
            0x09, 0x00, 0x04, b't', b'a', b'g', b's', // List "tags"
            0x08, // elem kind String
            0x00, 0x00, 0x00, 0x02, // count 2
            0x00, 0x01, b'a', // "a"
            0x00, 0x01, b'b', // "b"
            0x00, // End
        ]
    }

    fn scenario_tree() -> (TagStr, NbtValue) {
        let tags = NbtList::try_from_items(vec![NbtValue::string("a"), NbtValue::string("b")])
            .expect("homogeneous");
        let root = NbtValue::Compound(vec![
            (TagStr::from("id"), NbtValue::Int(7)),
            (TagStr::from("tags"), NbtValue::List(tags)),
        ]);
        (TagStr::new(), root)
    }

    #[test]
    fn scenario_wire_vector_matches_grammar() {
        let (name, root) = scenario_tree();
        let bytes = NbtEncoder::new().encode(&name, &root).unwrap();
        assert_eq!(bytes, scenario_bytes());
    }

    #[test]
    fn scenario_decode_resolves_paths() {
        let doc = NbtDocument::load(&scenario_bytes()).unwrap();
        assert_eq!(doc.get(&[PathStep::Name("id")]).unwrap(), &NbtValue::Int(7));
        assert_eq!(
            doc.get(&[PathStep::Name("tags"), PathStep::Index(1)])
                .unwrap(),
            &NbtValue::string("b")
        );
        assert_eq!(doc.compression(), Compression::None);
    }

    #[test]
    fn roundtrip_is_bit_exact() {
        let bytes = scenario_bytes();
        let (name, root) = NbtDecoder::new().decode(&bytes).unwrap();
        assert_eq!(NbtEncoder::new().encode(&name, &root).unwrap(), bytes);
    }

    #[test]
    fn named_root_roundtrip_preserves_name() {
        let root = NbtValue::Compound(vec![(TagStr::from("x"), NbtValue::Byte(-1))]);
        let bytes = NbtEncoder::new()
            .encode(&TagStr::from("Level"), &root)
            .unwrap();
        assert_eq!(&bytes[..8], &[0x0a, 0x00, 0x05, b'L', b'e', b'v', b'e', b'l']);
        let (name, decoded) = NbtDecoder::new().decode(&bytes).unwrap();
        assert_eq!(name, "Level");
        assert_eq!(decoded, root);
    }

    #[test]
    fn empty_list_keeps_declared_kind() {
        // List "xs" declared Int, count 0.
        let bytes = vec![
            0x0a, 0x00, 0x00, // root
            0x09, 0x00, 0x02, b'x', b's', // List "xs"
            0x03, // elem kind Int
            0x00, 0x00, 0x00, 0x00, // count 0
            0x00, // End
        ];
        let (name, root) = NbtDecoder::new().decode(&bytes).unwrap();
        match root.get_entry("xs").unwrap() {
            NbtValue::List(list) => {
                assert_eq!(list.elem_kind(), TagKind::Int);
                assert!(list.is_empty());
            }
            other => panic!("expected list, got {other:?}"),
        }
        assert_eq!(NbtEncoder::new().encode(&name, &root).unwrap(), bytes);
    }

    #[test]
    fn empty_list_sentinel_kind_roundtrips() {
        let root = NbtValue::Compound(vec![(
            TagStr::from("xs"),
            NbtValue::List(NbtList::new()),
        )]);
        let bytes = NbtEncoder::new().encode(&TagStr::new(), &root).unwrap();
        // Sentinel End kind byte and zero count.
        assert_eq!(&bytes[8..13], &[0x00, 0x00, 0x00, 0x00, 0x00]);
        let (_, decoded) = NbtDecoder::new().decode(&bytes).unwrap();
        assert_eq!(decoded, root);
    }

    #[test]
    fn unknown_kind_id_is_rejected_not_skipped() {
        let bytes = vec![
            0x0a, 0x00, 0x00, // root
            0x0d, 0x00, 0x01, b'z', // kind 13 does not exist
            0x00,
        ];
        assert_eq!(
            NbtDecoder::new().decode(&bytes),
            Err(DecodeError::UnknownTagKind(0x0d))
        );
    }

    #[test]
    fn non_compound_root_is_invalid() {
        let bytes = vec![0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07];
        assert_eq!(
            NbtDecoder::new().decode(&bytes),
            Err(DecodeError::InvalidRoot(0x03))
        );
    }

    #[test]
    fn negative_count_is_malformed() {
        let bytes = vec![
            0x0a, 0x00, 0x00, // root
            0x09, 0x00, 0x02, b'x', b's', // List "xs"
            0x03, // elem kind Int
            0xff, 0xff, 0xff, 0xff, // count -1
            0x00,
        ];
        assert_eq!(
            NbtDecoder::new().decode(&bytes),
            Err(DecodeError::MalformedLength(-1))
        );
    }

    #[test]
    fn nonempty_list_of_end_kind_is_rejected() {
        let bytes = vec![
            0x0a, 0x00, 0x00, // root
            0x09, 0x00, 0x02, b'x', b's', // List "xs"
            0x00, // elem kind End
            0x00, 0x00, 0x00, 0x01, // count 1
            0x00,
        ];
        assert_eq!(
            NbtDecoder::new().decode(&bytes),
            Err(DecodeError::UnknownTagKind(0x00))
        );
    }

    #[test]
    fn every_truncation_boundary_fails_cleanly() {
        let bytes = scenario_bytes();
        for cut in 0..bytes.len() {
            assert_eq!(
                NbtDecoder::new().decode(&bytes[..cut]),
                Err(DecodeError::UnexpectedEndOfData),
                "prefix of {cut} bytes"
            );
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = scenario_bytes();
        bytes.push(0x00);
        assert_eq!(
            NbtDecoder::new().decode(&bytes),
            Err(DecodeError::TrailingData)
        );
    }

    #[test]
    fn heterogeneous_list_construction_fails() {
        let err = NbtList::try_from_items(vec![NbtValue::Int(1), NbtValue::string("x")])
            .unwrap_err();
        assert!(matches!(err, TreeError::InvariantViolation(_)));

        let mut list = NbtList::with_kind(TagKind::Int);
        assert!(matches!(
            list.try_push(NbtValue::Byte(1)),
            Err(TreeError::InvariantViolation(_))
        ));
    }

    #[test]
    fn encode_rejects_list_kind_drift() {
        // from_raw_parts is the decoder's trusted entry; abuse it from the
        // crate-internal test to exercise the encoder's defensive check.
        let list = NbtList::from_raw_parts(TagKind::Int, vec![NbtValue::Byte(1)]);
        let root = NbtValue::Compound(vec![(TagStr::from("xs"), NbtValue::List(list))]);
        assert_eq!(
            NbtEncoder::new().encode(&TagStr::new(), &root),
            Err(EncodeError::ListKindMismatch {
                declared: TagKind::Int,
                found: TagKind::Byte,
            })
        );
    }

    #[test]
    fn remove_entry_leaves_no_residue() {
        let mut doc = NbtDocument::load(&scenario_bytes()).unwrap();
        let removed = doc.remove_entry(&[], "id").unwrap();
        assert_eq!(removed, NbtValue::Int(7));
        doc.set_compression(Compression::None);
        let bytes = doc.save().unwrap();
        let expected = vec![
            0x0a, 0x00, 0x00, // root
            0x09, 0x00, 0x04, b't', b'a', b'g', b's', // List "tags"
            0x08, 0x00, 0x00, 0x00, 0x02, // String x2
            0x00, 0x01, b'a', 0x00, 0x01, b'b', // elements
            0x00, // End
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn duplicate_names_preserve_order_and_resolve_last() {
        let bytes = vec![
            0x0a, 0x00, 0x00, // root
            0x03, 0x00, 0x01, b'x', 0x00, 0x00, 0x00, 0x01, // Int "x" = 1
            0x03, 0x00, 0x01, b'x', 0x00, 0x00, 0x00, 0x02, // Int "x" = 2
            0x00,
        ];
        let (name, root) = NbtDecoder::new().decode(&bytes).unwrap();
        assert_eq!(root.get_entry("x"), Some(&NbtValue::Int(2)));
        // Both entries survive, so the pathological document still
        // round-trips bit-exactly.
        assert_eq!(NbtEncoder::new().encode(&name, &root).unwrap(), bytes);
    }

    #[test]
    fn insert_entry_is_last_write_wins() {
        let mut root = NbtValue::compound();
        root.insert_entry("a", NbtValue::Int(1)).unwrap();
        root.insert_entry("b", NbtValue::Int(2)).unwrap();
        root.insert_entry("a", NbtValue::Int(3)).unwrap();
        assert_eq!(root.get_entry("a"), Some(&NbtValue::Int(3)));
        // Replacement happens in place; order is unchanged.
        match &root {
            NbtValue::Compound(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].0, "a");
                assert_eq!(entries[1].0, "b");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn modified_utf8_string_roundtrips_verbatim() {
        // CESU-8 surrogate pair for U+1F600 as Java writes it; not valid
        // standard UTF-8.
        let cesu8 = [0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80];
        let mut bytes = vec![
            0x0a, 0x00, 0x00, // root
            0x08, 0x00, 0x01, b's', // String "s"
            0x00, 0x06, // byte length 6
        ];
        bytes.extend_from_slice(&cesu8);
        bytes.push(0x00);
        let (name, root) = NbtDecoder::new().decode(&bytes).unwrap();
        match root.get_entry("s").unwrap() {
            NbtValue::String(s) => {
                assert_eq!(s.as_bytes(), &cesu8);
                assert!(s.as_str().is_none());
            }
            other => panic!("expected string, got {other:?}"),
        }
        assert_eq!(NbtEncoder::new().encode(&name, &root).unwrap(), bytes);
    }

    #[test]
    fn path_errors_are_local_and_typed() {
        let mut doc = NbtDocument::load(&scenario_bytes()).unwrap();
        assert_eq!(
            doc.get(&[PathStep::Name("nope")]),
            Err(TreeError::PathNotFound)
        );
        assert_eq!(
            doc.get(&[PathStep::Name("tags"), PathStep::Index(2)]),
            Err(TreeError::PathNotFound)
        );
        // A name step into a list does not resolve.
        assert_eq!(
            doc.get(&[PathStep::Name("tags"), PathStep::Name("a")]),
            Err(TreeError::PathNotFound)
        );
        // No implicit coercion: Int target rejects a Byte value.
        assert_eq!(
            doc.set_primitive(&[PathStep::Name("id")], NbtValue::Byte(7)),
            Err(TreeError::TypeMismatch)
        );
        // The failed calls left the tree untouched.
        assert_eq!(doc.get(&[PathStep::Name("id")]).unwrap(), &NbtValue::Int(7));
    }

    #[test]
    fn set_primitive_and_append_mutate_in_place() {
        let mut doc = NbtDocument::load(&scenario_bytes()).unwrap();
        doc.set_primitive(&[PathStep::Name("id")], NbtValue::Int(42))
            .unwrap();
        doc.append_list_element(&[PathStep::Name("tags")], NbtValue::string("c"))
            .unwrap();
        assert_eq!(doc.get(&[PathStep::Name("id")]).unwrap(), &NbtValue::Int(42));
        assert_eq!(
            doc.get(&[PathStep::Name("tags"), PathStep::Index(2)])
                .unwrap(),
            &NbtValue::string("c")
        );
        assert_eq!(
            doc.append_list_element(&[PathStep::Name("tags")], NbtValue::Int(1)),
            Err(TreeError::InvariantViolation(
                "list of String cannot hold a Int element".to_string()
            ))
        );
    }

    #[test]
    fn set_array_replaces_same_kind_only() {
        let root = NbtValue::Compound(vec![(
            TagStr::from("data"),
            NbtValue::IntArray(vec![1, 2, 3]),
        )]);
        let mut doc = NbtDocument::with_root("", root).unwrap();
        doc.set_array(&[PathStep::Name("data")], NbtValue::IntArray(vec![9]))
            .unwrap();
        assert_eq!(
            doc.get(&[PathStep::Name("data")]).unwrap(),
            &NbtValue::IntArray(vec![9])
        );
        assert_eq!(
            doc.set_array(&[PathStep::Name("data")], NbtValue::LongArray(vec![9])),
            Err(TreeError::TypeMismatch)
        );
    }

    #[test]
    fn children_lists_names_and_indices() {
        let doc = NbtDocument::load(&scenario_bytes()).unwrap();
        let top = doc.children(&[]).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0.unwrap(), "id");
        assert_eq!(top[1].0.unwrap(), "tags");
        let tags = doc.children(&[PathStep::Name("tags")]).unwrap();
        assert_eq!(tags.len(), 2);
        assert!(tags.iter().all(|(name, _)| name.is_none()));
        assert_eq!(
            doc.children(&[PathStep::Name("id")]),
            Err(TreeError::TypeMismatch)
        );
    }

    #[test]
    fn to_json_view_flattens_last_wins() {
        let doc = NbtDocument::load(&scenario_bytes()).unwrap();
        let json = to_json::nbt_to_json(doc.root());
        assert_eq!(json["id"], serde_json::json!(7));
        assert_eq!(json["tags"], serde_json::json!(["a", "b"]));
    }
}
