use crate::grease::is_grease_id;
use crate::types::{
    Frame, FrameHeader, FrameType, Http3ErrorCode, PriorityElementType, PriorityUpdate, PushId,
    SettingPair, StreamId, TransportErrorCode,
};
use crate::varint::{decode_varint, encode_varint, varint_len};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

// HTTP/3 Frame Format:
//
// Frame {
//   Type (varint),
//   Length (varint),
//   Payload (Length bytes)
// }

// HTTP/3 Frame Type Codepoints
pub const DATA_FRAME_TYPE: u64 = 0x0;
pub const HEADERS_FRAME_TYPE: u64 = 0x1;
pub const PRIORITY_FRAME_TYPE: u64 = 0x2;
pub const CANCEL_PUSH_FRAME_TYPE: u64 = 0x3;
pub const SETTINGS_FRAME_TYPE: u64 = 0x4;
pub const PUSH_PROMISE_FRAME_TYPE: u64 = 0x5;
pub const GOAWAY_FRAME_TYPE: u64 = 0x7;
pub const MAX_PUSH_ID_FRAME_TYPE: u64 = 0x0d;

// HTTP/3 Settings Identifiers
pub const SETTINGS_HEADER_TABLE_SIZE: u64 = 0x01;
pub const SETTINGS_MAX_HEADER_LIST_SIZE: u64 = 0x06;
pub const SETTINGS_QPACK_BLOCKED_STREAMS: u64 = 0x07;
pub const SETTINGS_NUM_PLACEHOLDERS: u64 = 0x09;

// A frame header is two varints: between 2 and 16 bytes on the wire.
pub const MAX_FRAME_HEADER_SIZE: usize = 16;

// Sentinel length for streams that carry their body as unframed bytes,
// distinguishing that mode from a DATA frame of length 0.
pub const UNFRAMED_DATA_FRAME_LEN: u64 = 0;

// PRIORITY first-byte layout: prioritized element type in bits 7-6,
// dependency type in bits 5-4, bits 3-2 reserved (must be zero), the
// historical `empty` flag at bit 1, exclusivity at bit 0.
pub const PRIORITIZED_TYPE_POS: u8 = 6;
pub const DEPENDENCY_TYPE_POS: u8 = 4;
pub const PRIORITY_EMPTY_POS: u8 = 1;
pub const PRIORITY_EXCLUSIVE_MASK: u8 = 0x01;
const PRIORITY_RESERVED_MASK: u8 = 0x0c;

impl FrameType {
    pub fn from_wire(code: u64) -> Self {
        match code {
            DATA_FRAME_TYPE => FrameType::Data,
            HEADERS_FRAME_TYPE => FrameType::Headers,
            PRIORITY_FRAME_TYPE => FrameType::Priority,
            CANCEL_PUSH_FRAME_TYPE => FrameType::CancelPush,
            SETTINGS_FRAME_TYPE => FrameType::Settings,
            PUSH_PROMISE_FRAME_TYPE => FrameType::PushPromise,
            GOAWAY_FRAME_TYPE => FrameType::GoAway,
            MAX_PUSH_ID_FRAME_TYPE => FrameType::MaxPushId,
            other => FrameType::Unknown(other),
        }
    }

    pub fn to_wire(self) -> u64 {
        match self {
            FrameType::Data => DATA_FRAME_TYPE,
            FrameType::Headers => HEADERS_FRAME_TYPE,
            FrameType::Priority => PRIORITY_FRAME_TYPE,
            FrameType::CancelPush => CANCEL_PUSH_FRAME_TYPE,
            FrameType::Settings => SETTINGS_FRAME_TYPE,
            FrameType::PushPromise => PUSH_PROMISE_FRAME_TYPE,
            FrameType::GoAway => GOAWAY_FRAME_TYPE,
            FrameType::MaxPushId => MAX_PUSH_ID_FRAME_TYPE,
            FrameType::Unknown(code) => code,
        }
    }

    // HEADERS and PUSH_PROMISE carry QPACK-encoded payloads; skipping them
    // would desynchronize the compression state shared with the peer.
    pub fn affects_compression(self) -> bool {
        matches!(self, FrameType::Headers | FrameType::PushPromise)
    }
}

// Codepoints 0x06, 0x08 and 0x09 are reserved; a peer sending them has
// violated the protocol.
fn is_reserved_frame_type(code: u64) -> bool {
    matches!(code, 0x06 | 0x08 | 0x09)
}

// Read the common `{type, length}` prefix from the front of `cursor`.
pub fn parse_frame_header(cursor: &mut impl Buf) -> Result<FrameHeader, Http3ErrorCode> {
    let (code, _) = decode_varint(cursor).ok_or(Http3ErrorCode::FrameError)?;
    let (length, _) = decode_varint(cursor).ok_or(Http3ErrorCode::FrameError)?;
    Ok(FrameHeader {
        frame_type: FrameType::from_wire(code),
        length,
    })
}

impl Frame {
    // The cursor must be positioned at the first payload byte and hold at
    // least header.length bytes; on success exactly header.length bytes
    // have been consumed. Unknown non-reserved frame types are consumed
    // and surfaced so the caller can apply its own policy.
    pub fn parse(cursor: &mut impl Buf, header: &FrameHeader) -> Result<Frame, Http3ErrorCode> {
        let length = header.length as usize;
        if cursor.remaining() < length {
            return Err(Http3ErrorCode::FrameError);
        }
        let payload = cursor.copy_to_bytes(length);

        match header.frame_type {
            FrameType::Data => Ok(Frame::Data(payload)),
            FrameType::Headers => parse_headers(payload),
            FrameType::Priority => parse_priority(payload),
            FrameType::CancelPush => Ok(Frame::CancelPush(parse_varint_payload(payload)?)),
            FrameType::Settings => parse_settings(payload),
            FrameType::PushPromise => parse_push_promise(payload),
            FrameType::GoAway => Ok(Frame::Goaway(parse_varint_payload(payload)?)),
            FrameType::MaxPushId => Ok(Frame::MaxPushId(parse_varint_payload(payload)?)),
            FrameType::Unknown(code) => {
                if is_reserved_frame_type(code) {
                    trace!(frame_type = code, "reserved frame type on the wire");
                    return Err(Http3ErrorCode::FrameError);
                }
                trace!(frame_type = code, len = length, "skipping unknown frame");
                Ok(Frame::Unknown {
                    frame_type: code,
                    payload,
                })
            }
        }
    }

    // Serialize this frame, header included, appending to dst. Writing an
    // Unknown frame emits the raw codepoint verbatim, which is also how
    // grease frames are produced.
    pub fn write(&self, dst: &mut BytesMut) -> Result<usize, TransportErrorCode> {
        match self {
            Frame::Data(data) => write_data(dst, data),
            Frame::Headers(block) => write_headers(dst, block),
            Frame::Priority(priority) => write_priority(dst, priority),
            Frame::CancelPush(push_id) => write_cancel_push(dst, *push_id),
            Frame::Settings(settings) => write_settings(dst, settings),
            Frame::PushPromise {
                push_id,
                header_block,
            } => write_push_promise(dst, *push_id, header_block),
            Frame::Goaway(stream_id) => write_goaway(dst, *stream_id),
            Frame::MaxPushId(push_id) => write_max_push_id(dst, *push_id),
            Frame::Unknown {
                frame_type,
                payload,
            } => {
                let mut written =
                    write_frame_header(dst, FrameType::Unknown(*frame_type), payload.len() as u64)?;
                dst.put_slice(payload);
                written += payload.len();
                Ok(written)
            }
        }
    }

    pub fn frame_type(&self) -> FrameType {
        match self {
            Frame::Data(_) => FrameType::Data,
            Frame::Headers(_) => FrameType::Headers,
            Frame::Priority(_) => FrameType::Priority,
            Frame::CancelPush(_) => FrameType::CancelPush,
            Frame::Settings(_) => FrameType::Settings,
            Frame::PushPromise { .. } => FrameType::PushPromise,
            Frame::Goaway(_) => FrameType::GoAway,
            Frame::MaxPushId(_) => FrameType::MaxPushId,
            Frame::Unknown { frame_type, .. } => FrameType::Unknown(*frame_type),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-frame parsers. Each receives a payload view of exactly `header.length`
// bytes and must consume all of it.
// ---------------------------------------------------------------------------

fn parse_headers(payload: Bytes) -> Result<Frame, Http3ErrorCode> {
    // An empty QPACK field section is never valid.
    if payload.is_empty() {
        return Err(Http3ErrorCode::FrameError);
    }
    Ok(Frame::Headers(payload))
}

fn parse_priority(mut payload: Bytes) -> Result<Frame, Http3ErrorCode> {
    if payload.is_empty() {
        return Err(Http3ErrorCode::FrameError);
    }
    let flags = payload.get_u8();
    if flags & PRIORITY_RESERVED_MASK != 0 {
        return Err(Http3ErrorCode::FrameError);
    }
    let prioritized_type = PriorityElementType::from_bits(flags >> PRIORITIZED_TYPE_POS);
    let dependency_type = PriorityElementType::from_bits(flags >> DEPENDENCY_TYPE_POS);
    let exclusive = flags & PRIORITY_EXCLUSIVE_MASK != 0;

    // The tree root may only appear as the target of a dependency.
    if prioritized_type == PriorityElementType::TreeRoot {
        return Err(Http3ErrorCode::FrameError);
    }
    let (prioritized_element_id, _) =
        decode_varint(&mut payload).ok_or(Http3ErrorCode::FrameError)?;
    let element_dependency_id = if dependency_type == PriorityElementType::TreeRoot {
        0
    } else {
        decode_varint(&mut payload)
            .ok_or(Http3ErrorCode::FrameError)?
            .0
    };

    // Exactly the weight byte must remain.
    if payload.len() != 1 {
        return Err(Http3ErrorCode::FrameError);
    }
    let weight = payload.get_u8();

    Ok(Frame::Priority(PriorityUpdate {
        prioritized_type,
        dependency_type,
        prioritized_element_id,
        element_dependency_id,
        weight,
        exclusive,
    }))
}

fn parse_settings(mut payload: Bytes) -> Result<Frame, Http3ErrorCode> {
    let mut settings = Vec::new();
    let mut seen = Vec::new();
    while payload.has_remaining() {
        let (id, _) = decode_varint(&mut payload).ok_or(Http3ErrorCode::FrameError)?;
        let (value, _) = decode_varint(&mut payload).ok_or(Http3ErrorCode::FrameError)?;
        // Grease settings are legal anywhere and carry no meaning.
        if is_grease_id(id) {
            continue;
        }
        if is_known_setting_id(id) {
            if seen.contains(&id) {
                return Err(Http3ErrorCode::SettingsError);
            }
            seen.push(id);
        }
        // Unknown identifiers are kept; the layer above decides their fate.
        settings.push(SettingPair { id, value });
    }
    Ok(Frame::Settings(settings))
}

fn parse_push_promise(mut payload: Bytes) -> Result<Frame, Http3ErrorCode> {
    let (push_id, _) = decode_varint(&mut payload).ok_or(Http3ErrorCode::FrameError)?;
    // The remainder is the QPACK header block, which may be empty.
    Ok(Frame::PushPromise {
        push_id,
        header_block: payload,
    })
}

// CANCEL_PUSH, GOAWAY and MAX_PUSH_ID carry a single varint that must fill
// the payload exactly.
fn parse_varint_payload(mut payload: Bytes) -> Result<u64, Http3ErrorCode> {
    let (value, _) = decode_varint(&mut payload).ok_or(Http3ErrorCode::FrameError)?;
    if payload.has_remaining() {
        return Err(Http3ErrorCode::FrameError);
    }
    Ok(value)
}

fn is_known_setting_id(id: u64) -> bool {
    matches!(
        id,
        SETTINGS_HEADER_TABLE_SIZE
            | SETTINGS_MAX_HEADER_LIST_SIZE
            | SETTINGS_QPACK_BLOCKED_STREAMS
            | SETTINGS_NUM_PLACEHOLDERS
    )
}

// ---------------------------------------------------------------------------
// Writers. Each computes the payload length up front, emits the frame header
// and then the payload, returning the total bytes appended to `dst`. Inputs
// are trusted caller values; the only failure mode is the output queue
// running out of memory, surfaced as a transport error.
// ---------------------------------------------------------------------------

pub fn write_frame_header(
    dst: &mut BytesMut,
    frame_type: FrameType,
    length: u64,
) -> Result<usize, TransportErrorCode> {
    dst.reserve(MAX_FRAME_HEADER_SIZE);
    let mut written = encode_varint(frame_type.to_wire(), dst);
    written += encode_varint(length, dst);
    Ok(written)
}

pub fn write_data(dst: &mut BytesMut, data: &[u8]) -> Result<usize, TransportErrorCode> {
    let mut written = write_frame_header(dst, FrameType::Data, data.len() as u64)?;
    dst.put_slice(data);
    written += data.len();
    Ok(written)
}

// Body bytes with no frame header at all. Only valid on streams whose wire
// contract is a single implicit DATA payload; sessions must opt into this
// mode explicitly.
pub fn write_unframed_bytes(dst: &mut BytesMut, data: &[u8]) -> Result<usize, TransportErrorCode> {
    dst.put_slice(data);
    Ok(data.len())
}

pub fn write_headers(dst: &mut BytesMut, block: &[u8]) -> Result<usize, TransportErrorCode> {
    let mut written = write_frame_header(dst, FrameType::Headers, block.len() as u64)?;
    dst.put_slice(block);
    written += block.len();
    Ok(written)
}

pub fn write_priority(
    dst: &mut BytesMut,
    priority: &PriorityUpdate,
) -> Result<usize, TransportErrorCode> {
    let mut payload_len = 1 + varint_len(priority.prioritized_element_id) + 1;
    if priority.dependency_type != PriorityElementType::TreeRoot {
        payload_len += varint_len(priority.element_dependency_id);
    }
    let written = write_frame_header(dst, FrameType::Priority, payload_len as u64)?;

    let mut flags = (priority.prioritized_type as u8) << PRIORITIZED_TYPE_POS
        | (priority.dependency_type as u8) << DEPENDENCY_TYPE_POS;
    if priority.exclusive {
        flags |= PRIORITY_EXCLUSIVE_MASK;
    }
    dst.put_u8(flags);
    encode_varint(priority.prioritized_element_id, dst);
    if priority.dependency_type != PriorityElementType::TreeRoot {
        encode_varint(priority.element_dependency_id, dst);
    }
    dst.put_u8(priority.weight);

    Ok(written + payload_len)
}

pub fn write_cancel_push(dst: &mut BytesMut, push_id: PushId) -> Result<usize, TransportErrorCode> {
    write_varint_frame(dst, FrameType::CancelPush, push_id)
}

// Pairs are emitted in the order given; deduplication is the caller's concern.
pub fn write_settings(
    dst: &mut BytesMut,
    settings: &[SettingPair],
) -> Result<usize, TransportErrorCode> {
    let payload_len: usize = settings
        .iter()
        .map(|pair| varint_len(pair.id) + varint_len(pair.value))
        .sum();
    let mut written = write_frame_header(dst, FrameType::Settings, payload_len as u64)?;
    for pair in settings {
        written += encode_varint(pair.id, dst);
        written += encode_varint(pair.value, dst);
    }
    Ok(written)
}

pub fn write_push_promise(
    dst: &mut BytesMut,
    push_id: PushId,
    block: &[u8],
) -> Result<usize, TransportErrorCode> {
    let payload_len = varint_len(push_id) + block.len();
    let mut written = write_frame_header(dst, FrameType::PushPromise, payload_len as u64)?;
    written += encode_varint(push_id, dst);
    dst.put_slice(block);
    written += block.len();
    Ok(written)
}

pub fn write_goaway(
    dst: &mut BytesMut,
    last_stream_id: StreamId,
) -> Result<usize, TransportErrorCode> {
    write_varint_frame(dst, FrameType::GoAway, last_stream_id)
}

pub fn write_max_push_id(
    dst: &mut BytesMut,
    max_push_id: PushId,
) -> Result<usize, TransportErrorCode> {
    write_varint_frame(dst, FrameType::MaxPushId, max_push_id)
}

fn write_varint_frame(
    dst: &mut BytesMut,
    frame_type: FrameType,
    value: u64,
) -> Result<usize, TransportErrorCode> {
    let payload_len = varint_len(value);
    let mut written = write_frame_header(dst, frame_type, payload_len as u64)?;
    written += encode_varint(value, dst);
    Ok(written)
}
