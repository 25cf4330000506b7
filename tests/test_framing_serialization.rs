use bytes::{Buf, Bytes, BytesMut};
use hqframing::framing::{
    parse_frame_header, write_data, write_frame_header, write_goaway, write_settings,
    write_unframed_bytes, MAX_FRAME_HEADER_SIZE, SETTINGS_HEADER_TABLE_SIZE,
    SETTINGS_NUM_PLACEHOLDERS, SETTINGS_QPACK_BLOCKED_STREAMS,
};
use hqframing::types::{Frame, FrameType, PriorityElementType, PriorityUpdate, SettingPair};
use hqframing::varint::MAX_VARINT;

fn roundtrip(frame: &Frame) -> Frame {
    let mut buf = BytesMut::new();
    let written = frame.write(&mut buf).expect("write frame");
    assert_eq!(written, buf.len(), "writer must report bytes appended");

    let mut cursor = buf.freeze();
    let header = parse_frame_header(&mut cursor).expect("parse header");
    assert_eq!(header.frame_type, frame.frame_type());
    let parsed = Frame::parse(&mut cursor, &header).expect("parse frame");
    assert!(cursor.is_empty(), "parser must consume the whole payload");
    parsed
}

fn wire_bytes(frame: &Frame) -> Vec<u8> {
    let mut buf = BytesMut::new();
    frame.write(&mut buf).expect("write frame");
    buf.to_vec()
}

#[test]
fn data_roundtrip() {
    let frame = Frame::Data(Bytes::from_static(b"hello, http/3"));
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn empty_data_is_two_bytes() {
    let frame = Frame::Data(Bytes::new());
    assert_eq!(wire_bytes(&frame), vec![0x00, 0x00]);

    match roundtrip(&frame) {
        Frame::Data(payload) => assert!(payload.is_empty()),
        other => panic!("expected DATA, got {:?}", other),
    }
}

#[test]
fn headers_roundtrip() {
    let frame = Frame::Headers(Bytes::from_static(&[0x00, 0x00, 0xd1, 0xd7]));
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn settings_wire_literal() {
    // HEADER_TABLE_SIZE=4096, QPACK_BLOCKED_STREAMS=100.
    let frame = Frame::Settings(vec![
        SettingPair::new(SETTINGS_HEADER_TABLE_SIZE, 4096),
        SettingPair::new(SETTINGS_QPACK_BLOCKED_STREAMS, 100),
    ]);
    assert_eq!(
        wire_bytes(&frame),
        vec![0x04, 0x06, 0x01, 0x50, 0x00, 0x07, 0x40, 0x64]
    );
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn settings_preserve_order_and_unknown_ids() {
    let frame = Frame::Settings(vec![
        SettingPair::new(SETTINGS_NUM_PLACEHOLDERS, 16),
        SettingPair::new(0x4040, 9000), // unknown id, kept verbatim
        SettingPair::new(SETTINGS_HEADER_TABLE_SIZE, 0),
    ]);
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn empty_settings_roundtrip() {
    let frame = Frame::Settings(Vec::new());
    assert_eq!(wire_bytes(&frame), vec![0x04, 0x00]);
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn cancel_push_wire_literal() {
    let frame = Frame::CancelPush(7);
    assert_eq!(wire_bytes(&frame), vec![0x03, 0x01, 0x07]);
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn goaway_wire_literal() {
    let frame = Frame::Goaway(16_383);
    assert_eq!(wire_bytes(&frame), vec![0x07, 0x02, 0x7f, 0xff]);
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn max_push_id_roundtrip() {
    for push_id in [0, 999, MAX_VARINT] {
        let frame = Frame::MaxPushId(push_id);
        assert_eq!(roundtrip(&frame), frame);
    }
}

#[test]
fn priority_wire_literal() {
    // Request stream 3 as exclusive child of push stream 9, weight 15.
    let frame = Frame::Priority(PriorityUpdate {
        prioritized_type: PriorityElementType::RequestStream,
        dependency_type: PriorityElementType::PushStream,
        prioritized_element_id: 3,
        element_dependency_id: 9,
        weight: 15,
        exclusive: true,
    });
    assert_eq!(wire_bytes(&frame), vec![0x02, 0x04, 0x11, 0x03, 0x09, 0x0f]);

    match roundtrip(&frame) {
        Frame::Priority(priority) => {
            assert_eq!(priority.prioritized_type, PriorityElementType::RequestStream);
            assert_eq!(priority.dependency_type, PriorityElementType::PushStream);
            assert_eq!(priority.prioritized_element_id, 3);
            assert_eq!(priority.element_dependency_id, 9);
            assert_eq!(priority.weight, 15);
            assert!(priority.exclusive);
        }
        other => panic!("expected PRIORITY, got {:?}", other),
    }
}

#[test]
fn priority_tree_root_dependency_omits_id() {
    let frame = Frame::Priority(PriorityUpdate {
        prioritized_type: PriorityElementType::Placeholder,
        dependency_type: PriorityElementType::TreeRoot,
        prioritized_element_id: 5,
        element_dependency_id: 0,
        weight: 255,
        exclusive: false,
    });
    // flags, prioritized element id, weight: no dependency varint on the wire.
    assert_eq!(wire_bytes(&frame), vec![0x02, 0x03, 0xb0, 0x05, 0xff]);
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn priority_weight_preserved_bit_exactly() {
    for weight in [0u8, 1, 127, 255] {
        let frame = Frame::Priority(PriorityUpdate {
            weight,
            ..PriorityUpdate::default()
        });
        match roundtrip(&frame) {
            Frame::Priority(priority) => assert_eq!(priority.weight, weight),
            other => panic!("expected PRIORITY, got {:?}", other),
        }
    }
}

#[test]
fn push_promise_roundtrip() {
    let frame = Frame::PushPromise {
        push_id: 42,
        header_block: Bytes::from_static(&[0xd1, 0xd7, 0x51, 0x86]),
    };
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn push_promise_empty_header_block() {
    let frame = Frame::PushPromise {
        push_id: 0,
        header_block: Bytes::new(),
    };
    assert_eq!(wire_bytes(&frame), vec![0x05, 0x01, 0x00]);
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn unknown_frame_roundtrip() {
    // 0x21 is the first grease codepoint; emitting it must not disturb peers.
    let frame = Frame::Unknown {
        frame_type: 0x21,
        payload: Bytes::from_static(&[0x01, 0x02, 0x03]),
    };
    assert_eq!(wire_bytes(&frame), vec![0x21, 0x03, 0x01, 0x02, 0x03]);
    assert_eq!(roundtrip(&frame), frame);
}

#[test]
fn frame_header_size_bounds() {
    let mut buf = BytesMut::new();
    let written = write_frame_header(&mut buf, FrameType::Data, 0).expect("write header");
    assert_eq!(written, 2);

    let mut buf = BytesMut::new();
    let written =
        write_frame_header(&mut buf, FrameType::Unknown(MAX_VARINT), MAX_VARINT).expect("header");
    assert_eq!(written, MAX_FRAME_HEADER_SIZE);
}

#[test]
fn frame_type_wire_mapping() {
    for code in [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x07, 0x0d, 0x21, 0x1f42] {
        assert_eq!(FrameType::from_wire(code).to_wire(), code);
    }
    assert_eq!(FrameType::from_wire(0x0d), FrameType::MaxPushId);
    assert_eq!(FrameType::from_wire(0x2000), FrameType::Unknown(0x2000));
}

#[test]
fn multiple_frames_parse_sequentially() {
    let mut buf = BytesMut::new();
    write_data(&mut buf, b"hi").expect("write data");
    write_goaway(&mut buf, 100).expect("write goaway");
    write_settings(&mut buf, &[SettingPair::new(SETTINGS_HEADER_TABLE_SIZE, 1)])
        .expect("write settings");

    let mut cursor = buf.freeze();

    let header = parse_frame_header(&mut cursor).expect("header 1");
    assert_eq!(
        Frame::parse(&mut cursor, &header).expect("frame 1"),
        Frame::Data(Bytes::from_static(b"hi"))
    );

    let header = parse_frame_header(&mut cursor).expect("header 2");
    assert_eq!(
        Frame::parse(&mut cursor, &header).expect("frame 2"),
        Frame::Goaway(100)
    );

    let header = parse_frame_header(&mut cursor).expect("header 3");
    assert_eq!(
        Frame::parse(&mut cursor, &header).expect("frame 3"),
        Frame::Settings(vec![SettingPair::new(SETTINGS_HEADER_TABLE_SIZE, 1)])
    );

    assert!(cursor.is_empty());
}

#[test]
fn parse_consumes_exactly_declared_length() {
    // A DATA frame followed by trailing stream bytes the parser must not touch.
    let mut buf = BytesMut::new();
    write_data(&mut buf, b"abc").expect("write data");
    buf.extend_from_slice(&[0xaa, 0xbb]);

    let mut cursor = buf.freeze();
    let header = parse_frame_header(&mut cursor).expect("header");
    let before = cursor.remaining();
    Frame::parse(&mut cursor, &header).expect("frame");
    assert_eq!(before - cursor.remaining(), header.length as usize);
    assert_eq!(cursor.remaining(), 2);
}

#[test]
fn unframed_bytes_have_no_header() {
    let mut buf = BytesMut::new();
    let written = write_unframed_bytes(&mut buf, b"raw body").expect("write unframed");
    assert_eq!(written, 8);
    assert_eq!(&buf[..], b"raw body");
}

#[test]
fn data_payload_shares_input_storage() {
    let mut buf = BytesMut::new();
    write_data(&mut buf, &[0xab; 64]).expect("write data");
    let mut cursor = buf.freeze();

    let header = parse_frame_header(&mut cursor).expect("header");
    let base = cursor.as_ref().as_ptr();
    match Frame::parse(&mut cursor, &header).expect("frame") {
        Frame::Data(payload) => assert_eq!(payload.as_ref().as_ptr(), base),
        other => panic!("expected DATA, got {:?}", other),
    }
}
