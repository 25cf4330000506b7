// HTTP/3 Application Error Codes (RFC 9114 Section 8.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Http3ErrorCode {
    NoError = 0x0100,
    GeneralProtocolError = 0x0101,
    InternalError = 0x0102,
    StreamCreationError = 0x0103,
    ClosedCriticalStream = 0x0104,
    FrameUnexpected = 0x0105,
    FrameError = 0x0106,
    ExcessiveLoad = 0x0107,
    IdError = 0x0108,
    SettingsError = 0x0109,
    MissingSettings = 0x010a,
    RequestRejected = 0x010b,
    RequestCancelled = 0x010c,
    RequestIncomplete = 0x010d,
    MessageError = 0x010e,
    ConnectError = 0x010f,
    VersionFallback = 0x0110,
}

// QUIC Transport Error Codes (RFC 9000 Section 20.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorCode {
    NoError = 0x00,
    InternalError = 0x01,
    ConnectionRefused = 0x02,
    FlowControlError = 0x03,
    StreamLimitError = 0x04,
    StreamStateError = 0x05,
    FinalSizeError = 0x06,
    FrameEncodingError = 0x07,
    TransportParameterError = 0x08,
    ConnectionIdLimitError = 0x09,
    ProtocolViolation = 0x0a,
    InvalidToken = 0x0b,
    ApplicationError = 0x0c,
    CryptoBufferExceeded = 0x0d,
    KeyUpdateError = 0x0e,
    AeadLimitReached = 0x0f,
    NoViablePath = 0x10,
}

impl std::fmt::Display for Http3ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (name, description) = match self {
            Http3ErrorCode::NoError => ("H3_NO_ERROR", "no error"),
            Http3ErrorCode::GeneralProtocolError => {
                ("H3_GENERAL_PROTOCOL_ERROR", "peer violated the protocol")
            }
            Http3ErrorCode::InternalError => ("H3_INTERNAL_ERROR", "implementation fault"),
            Http3ErrorCode::StreamCreationError => {
                ("H3_STREAM_CREATION_ERROR", "stream creation not allowed")
            }
            Http3ErrorCode::ClosedCriticalStream => {
                ("H3_CLOSED_CRITICAL_STREAM", "critical stream was closed")
            }
            Http3ErrorCode::FrameUnexpected => {
                ("H3_FRAME_UNEXPECTED", "frame not permitted in this context")
            }
            Http3ErrorCode::FrameError => ("H3_FRAME_ERROR", "frame violated layout rules"),
            Http3ErrorCode::ExcessiveLoad => {
                ("H3_EXCESSIVE_LOAD", "peer generating excessive load")
            }
            Http3ErrorCode::IdError => ("H3_ID_ERROR", "identifier used incorrectly"),
            Http3ErrorCode::SettingsError => ("H3_SETTINGS_ERROR", "settings frame malformed"),
            Http3ErrorCode::MissingSettings => {
                ("H3_MISSING_SETTINGS", "no settings frame received")
            }
            Http3ErrorCode::RequestRejected => ("H3_REQUEST_REJECTED", "request not processed"),
            Http3ErrorCode::RequestCancelled => ("H3_REQUEST_CANCELLED", "request cancelled"),
            Http3ErrorCode::RequestIncomplete => {
                ("H3_REQUEST_INCOMPLETE", "request terminated early")
            }
            Http3ErrorCode::MessageError => ("H3_MESSAGE_ERROR", "malformed message"),
            Http3ErrorCode::ConnectError => ("H3_CONNECT_ERROR", "CONNECT tunnel failed"),
            Http3ErrorCode::VersionFallback => {
                ("H3_VERSION_FALLBACK", "retry over an earlier HTTP version")
            }
        };
        write!(f, "{} (0x{:x}): {}", name, *self as u64, description)
    }
}

impl std::fmt::Display for TransportErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (name, description) = match self {
            TransportErrorCode::NoError => ("NO_ERROR", "graceful shutdown"),
            TransportErrorCode::InternalError => ("INTERNAL_ERROR", "implementation fault"),
            TransportErrorCode::ConnectionRefused => {
                ("CONNECTION_REFUSED", "server refused the connection")
            }
            TransportErrorCode::FlowControlError => {
                ("FLOW_CONTROL_ERROR", "flow control limits exceeded")
            }
            TransportErrorCode::StreamLimitError => {
                ("STREAM_LIMIT_ERROR", "too many streams opened")
            }
            TransportErrorCode::StreamStateError => {
                ("STREAM_STATE_ERROR", "frame received in invalid stream state")
            }
            TransportErrorCode::FinalSizeError => {
                ("FINAL_SIZE_ERROR", "final stream size changed")
            }
            TransportErrorCode::FrameEncodingError => {
                ("FRAME_ENCODING_ERROR", "frame could not be decoded")
            }
            TransportErrorCode::TransportParameterError => {
                ("TRANSPORT_PARAMETER_ERROR", "transport parameters malformed")
            }
            TransportErrorCode::ConnectionIdLimitError => {
                ("CONNECTION_ID_LIMIT_ERROR", "too many connection ids")
            }
            TransportErrorCode::ProtocolViolation => {
                ("PROTOCOL_VIOLATION", "general protocol violation")
            }
            TransportErrorCode::InvalidToken => ("INVALID_TOKEN", "invalid retry token"),
            TransportErrorCode::ApplicationError => {
                ("APPLICATION_ERROR", "application layer closed the connection")
            }
            TransportErrorCode::CryptoBufferExceeded => {
                ("CRYPTO_BUFFER_EXCEEDED", "crypto buffering limit exceeded")
            }
            TransportErrorCode::KeyUpdateError => ("KEY_UPDATE_ERROR", "key update failed"),
            TransportErrorCode::AeadLimitReached => {
                ("AEAD_LIMIT_REACHED", "AEAD usage limit reached")
            }
            TransportErrorCode::NoViablePath => ("NO_VIABLE_PATH", "no viable network path"),
        };
        write!(f, "{} (0x{:x}): {}", name, *self as u64, description)
    }
}

// From conversions
impl From<u64> for Http3ErrorCode {
    fn from(code: u64) -> Self {
        match code {
            0x0100 => Http3ErrorCode::NoError,
            0x0101 => Http3ErrorCode::GeneralProtocolError,
            0x0102 => Http3ErrorCode::InternalError,
            0x0103 => Http3ErrorCode::StreamCreationError,
            0x0104 => Http3ErrorCode::ClosedCriticalStream,
            0x0105 => Http3ErrorCode::FrameUnexpected,
            0x0106 => Http3ErrorCode::FrameError,
            0x0107 => Http3ErrorCode::ExcessiveLoad,
            0x0108 => Http3ErrorCode::IdError,
            0x0109 => Http3ErrorCode::SettingsError,
            0x010a => Http3ErrorCode::MissingSettings,
            0x010b => Http3ErrorCode::RequestRejected,
            0x010c => Http3ErrorCode::RequestCancelled,
            0x010d => Http3ErrorCode::RequestIncomplete,
            0x010e => Http3ErrorCode::MessageError,
            0x010f => Http3ErrorCode::ConnectError,
            0x0110 => Http3ErrorCode::VersionFallback,
            _ => Http3ErrorCode::InternalError, // Default for unknown error codes
        }
    }
}

impl From<u64> for TransportErrorCode {
    fn from(code: u64) -> Self {
        match code {
            0x00 => TransportErrorCode::NoError,
            0x01 => TransportErrorCode::InternalError,
            0x02 => TransportErrorCode::ConnectionRefused,
            0x03 => TransportErrorCode::FlowControlError,
            0x04 => TransportErrorCode::StreamLimitError,
            0x05 => TransportErrorCode::StreamStateError,
            0x06 => TransportErrorCode::FinalSizeError,
            0x07 => TransportErrorCode::FrameEncodingError,
            0x08 => TransportErrorCode::TransportParameterError,
            0x09 => TransportErrorCode::ConnectionIdLimitError,
            0x0a => TransportErrorCode::ProtocolViolation,
            0x0b => TransportErrorCode::InvalidToken,
            0x0c => TransportErrorCode::ApplicationError,
            0x0d => TransportErrorCode::CryptoBufferExceeded,
            0x0e => TransportErrorCode::KeyUpdateError,
            0x0f => TransportErrorCode::AeadLimitReached,
            0x10 => TransportErrorCode::NoViablePath,
            _ => TransportErrorCode::InternalError, // Default for unknown error codes
        }
    }
}
