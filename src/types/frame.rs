use crate::varint::MAX_VARINT;
use bytes::Bytes;

pub type PushId = u64;
pub type StreamId = u64;

// Tag bit set on push ids inside a session so that push-id and stream-id
// spaces stay disjoint in a single identifier map. On the wire push ids are
// always carried in external (untagged) form.
pub const PUSH_ID_MASK: u64 = 1 << 63;

pub fn is_internal_push_id(push_id: PushId) -> bool {
    push_id & PUSH_ID_MASK != 0 && push_id & !PUSH_ID_MASK <= MAX_VARINT
}

pub fn is_external_push_id(push_id: PushId) -> bool {
    push_id & PUSH_ID_MASK == 0 && push_id <= MAX_VARINT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Data,        // 0x0
    Headers,     // 0x1
    Priority,    // 0x2
    CancelPush,  // 0x3
    Settings,    // 0x4
    PushPromise, // 0x5
    GoAway,      // 0x7
    MaxPushId,   // 0xd
    Unknown(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub frame_type: FrameType,
    // Number of payload bytes following the header.
    pub length: u64,
}

// Payload-carrying variants hold views that share storage with the input
// buffer where it supports reference counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Data(Bytes),
    Headers(Bytes),
    Priority(PriorityUpdate),
    CancelPush(PushId),
    Settings(Vec<SettingPair>),
    PushPromise { push_id: PushId, header_block: Bytes },
    Goaway(StreamId),
    MaxPushId(PushId),
    Unknown { frame_type: u64, payload: Bytes },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityElementType {
    RequestStream = 0x00,
    PushStream = 0x01,
    Placeholder = 0x02,
    TreeRoot = 0x03,
}

impl PriorityElementType {
    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0x00 => PriorityElementType::RequestStream,
            0x01 => PriorityElementType::PushStream,
            0x02 => PriorityElementType::Placeholder,
            _ => PriorityElementType::TreeRoot,
        }
    }
}

// `weight` is the raw wire byte; the protocol's implicit +1 is left to the
// priority tree above this layer. When `dependency_type` is TreeRoot the
// dependency id is absent on the wire and stored as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityUpdate {
    pub prioritized_type: PriorityElementType,
    pub dependency_type: PriorityElementType,
    // The element ids can be a stream id, a push id or a placeholder id,
    // based on the corresponding element type.
    pub prioritized_element_id: u64,
    pub element_dependency_id: u64,
    pub weight: u8,
    pub exclusive: bool,
}

impl Default for PriorityUpdate {
    fn default() -> Self {
        Self {
            prioritized_type: PriorityElementType::RequestStream,
            dependency_type: PriorityElementType::TreeRoot,
            prioritized_element_id: 0,
            element_dependency_id: 0,
            weight: 0,
            exclusive: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingPair {
    pub id: u64,
    pub value: u64,
}

impl SettingPair {
    pub fn new(id: u64, value: u64) -> Self {
        Self { id, value }
    }
}
