use std::collections::{BTreeSet, HashSet, VecDeque};
use std::sync::{Arc, Barrier};
use std::thread;

use tc_codec::codec::{Collection, OrderedCollection};
use tc_codec::info::Model;
use tc_codec::registry::ProcessorRegistry;
use tc_codec::stream::{ByteReader, ByteWriter};
use tc_codec::{CodecError, ErrorKind};

fn round_trip<T: Model + PartialEq + std::fmt::Debug>(value: T) {
    let bytes = tc_codec::to_bytes(&value).unwrap();
    assert_eq!(tc_codec::from_bytes::<T>(&bytes).unwrap(), value);
}

#[test]
fn primitives() {
    round_trip(u8::MAX);
    round_trip(i16::MIN);
    round_trip(u32::MAX);
    round_trip(i64::MIN);
    round_trip(u128::MAX);
    round_trip(usize::MAX);
    round_trip(f32::MIN_POSITIVE);
    round_trip(f64::EPSILON);
    round_trip(true);
    round_trip('\u{1F980}');
    round_trip(());
    round_trip([[1_u8, 2], [3, 4]]);

    let nan = tc_codec::from_bytes::<f32>(&tc_codec::to_bytes(&f32::NAN).unwrap()).unwrap();
    assert!(nan.is_nan());
}

#[test]
fn text() {
    round_trip(String::new());
    round_trip(String::from("plain ascii"));
    round_trip(String::from("多字节 — ünïcödé 🦀"));
    round_trip(Box::<str>::from("boxed"));
    round_trip(Arc::<str>::from("shared"));
    round_trip(Some(String::new()));
    round_trip(None::<String>);
}

#[test]
fn empty_string_and_null_never_cross_decode() {
    let empty = tc_codec::to_bytes(&Some(String::new())).unwrap();
    let null = tc_codec::to_bytes(&None::<String>).unwrap();

    assert_ne!(empty, null);
    assert_eq!(tc_codec::from_bytes::<Option<String>>(&empty).unwrap(), Some(String::new()));
    assert_eq!(tc_codec::from_bytes::<Option<String>>(&null).unwrap(), None);
    assert!(matches!(
        tc_codec::from_bytes::<String>(&null),
        Err(CodecError::UnexpectedNull { .. })
    ));
}

#[test]
fn sequences_keep_every_element() {
    for count in [0_usize, 1, 2, 255, 256, 1000] {
        let list: Vec<u32> = (0..count as u32).collect();
        let bytes = tc_codec::to_bytes(&list).unwrap();
        let decoded = tc_codec::from_bytes::<Vec<u32>>(&bytes).unwrap();
        assert_eq!(decoded.len(), count);
        assert_eq!(decoded, list);
    }

    round_trip(VecDeque::from([String::from("front"), String::from("back")]));
    round_trip(vec![Some(String::from("a")), None].into_boxed_slice());
    round_trip(vec![vec![Box::<str>::from("nested")]]);
}

#[test]
fn collection_interfaces() {
    let registry = ProcessorRegistry::new();

    let hashed: Box<dyn Collection<u16>> = Box::new(HashSet::from([7_u16]));
    let bytes = registry.to_bytes(&hashed).unwrap();
    assert_eq!(bytes, [1, 0, 0, 0, 7, 0]);

    let ordered: Box<dyn Collection<String>> =
        Box::new(BTreeSet::from([String::from("b"), String::from("a")]));
    let bytes = registry.to_bytes(&ordered).unwrap();
    let decoded: Arc<dyn OrderedCollection<String>> = registry.from_bytes(&bytes).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.get(0).map(String::as_str), Some("a"));
    assert_eq!(decoded.get(1).map(String::as_str), Some("b"));

    // Interface and concrete list share one wire form.
    let list: Arc<dyn OrderedCollection<u8>> = Arc::new(vec![9_u8, 8]);
    assert_eq!(
        registry.to_bytes(&list).unwrap(),
        registry.to_bytes(&vec![9_u8, 8]).unwrap()
    );
}

#[test]
fn truncated_input_underflows() {
    // Declares 100 bytes, carries 10.
    let mut bytes = 100_i32.to_le_bytes().to_vec();
    bytes.extend_from_slice(b"0123456789");

    let error = tc_codec::from_bytes::<String>(&bytes).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Underflow);
    assert_eq!(
        error,
        CodecError::Underflow {
            offset: 4,
            needed: 100,
            remaining: 10,
        }
    );

    let error = tc_codec::from_bytes::<Vec<u64>>(&[2, 0, 0, 0, 1, 0, 0, 0]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Underflow);
}

#[test]
fn streaming_several_values() {
    let mut writer = ByteWriter::new();
    tc_codec::serialize_into(&1_u8, &mut writer).unwrap();
    tc_codec::serialize_into(&vec![String::from("x")], &mut writer).unwrap();
    tc_codec::serialize_into(&None::<String>, &mut writer).unwrap();

    let mut reader = ByteReader::new(writer.as_bytes());
    assert_eq!(tc_codec::deserialize_from::<u8>(&mut reader).unwrap(), 1);
    assert_eq!(
        tc_codec::deserialize_from::<Vec<String>>(&mut reader).unwrap(),
        ["x"]
    );
    assert_eq!(tc_codec::deserialize_from::<Option<String>>(&mut reader).unwrap(), None);
    assert!(reader.is_empty());
}

#[test]
fn global_registry_concurrent_first_use() {
    type Payload = Vec<Option<Box<str>>>;
    const THREADS: usize = 16;

    let barrier = Arc::new(Barrier::new(THREADS));
    let value: Payload = vec![Some("left".into()), None, Some("".into())];

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            let value = value.clone();
            thread::spawn(move || {
                barrier.wait();
                let registry = ProcessorRegistry::global();
                (registry.processor::<Payload>().unwrap(), registry.to_bytes(&value).unwrap())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (processor, bytes) in &results {
        assert!(Arc::ptr_eq(processor, &results[0].0));
        assert_eq!(bytes, &results[0].1);
    }
    assert_eq!(tc_codec::from_bytes::<Payload>(&results[0].1).unwrap(), value);
}
